//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use mtw_core::error::{MtwError, MtwResult};
use tracing::info;

pub mod ng_add;


use crate::{Commands, output::OutputHandler};
use ng_add::RunMode;

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new() -> MtwResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| MtwError::io("Failed to get current directory".to_string(), e))?;

        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
            MtwError::io(
                "Current directory is not valid UTF-8".to_string(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        Ok(Self { cwd, output: OutputHandler::new() })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> MtwResult<()> {
    match command {
        Commands::NgAdd { name, project_root, dry_run, skip_install } => {
            info!("Running ng-add (project: {:?}, root: {:?}, dry_run: {})", name, project_root, dry_run);
            let options = mtw_config::GeneratorOptions { name, project_root };
            ng_add::execute(options, RunMode { dry_run, skip_install }, ctx).await
        }
        Commands::Version => show_version(ctx).await,
    }
}

async fn show_version(ctx: &CommandContext) -> MtwResult<()> {
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("mtw v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("MTW_BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("MTW_RUSTC_VERSION")));

    Ok(())
}
