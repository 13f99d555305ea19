//! # mtw
//!
//! Adds Angular Material and the Tailwind CSS toolchain to a workspace.
//!
//! This is the main entry point for the CLI. It handles command parsing,
//! sets up logging and error handling, and dispatches to the command handlers.

use clap::{Parser, Subcommand};
use mtw_core::error::{MtwError, MtwResult};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Workspace generator for Angular Material with Tailwind CSS
#[derive(Parser)]
#[command(name = "mtw", version, about = "Angular Material + Tailwind CSS workspace generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record the Angular Material and Tailwind CSS dependencies
    NgAdd {
        /// Logical project name
        #[arg(long, default_value = "")]
        name: String,
        /// Project root relative to the workspace
        #[arg(long)]
        project_root: Option<String>,
        /// Report changes without writing them
        #[arg(long)]
        dry_run: bool,
        /// Do not run the package manager afterwards
        #[arg(long)]
        skip_install: bool,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting mtw v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> MtwResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| MtwError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new().await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mtw_cli={level},mtw_config={level},mtw_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("mtw encountered an unexpected error: {}", panic_info);
        eprintln!("mtw crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/vp-autox/material-tailwind/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
