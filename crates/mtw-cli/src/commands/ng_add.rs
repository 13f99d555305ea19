//! `mtw ng-add` command implementation.
//!
//! Records Angular Material and the Tailwind CSS toolchain in the workspace
//! manifest, formats what changed and hands back an install task. The
//! generator itself only works against a [`Tree`]; committing the staged
//! changes and running the install are left to [`execute`].

use camino::{Utf8Path, Utf8PathBuf};
use mtw_config::{
    format_files, read_manifest, write_manifest, ConfigLoader, ConfigSource, DependencyMerger,
    GeneratorConfig, GeneratorOptions, JsonFormatter, MergeAction, MergeReport, ValidatedOptions,
};
use mtw_core::error::{MtwError, MtwResult};
use mtw_core::tree::{FileChange, FsTree, Tree};
use mtw_core::types::PackageManager;
use tracing::{debug, info};
use super::CommandContext;

/// Banner shown when the generator starts
pub const WELCOME: &str = "Welcome to the material-tailwind generator!";

/// How the host should treat the staged result
#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    pub dry_run: bool,
    pub skip_install: bool,
}

/// Result of a generator run
#[derive(Debug)]
pub struct GeneratorOutcome {
    pub report: MergeReport,
    /// Staged changes, not yet committed
    pub changes: Vec<FileChange>,
    /// Follow-up install, present when the manifest changed
    pub install: Option<InstallTask>,
}

/// Package manager install to run after the changes are committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTask {
    pub package_manager: PackageManager,
    pub cwd: Utf8PathBuf,
}

impl InstallTask {
    /// Pick the package manager from the lockfiles in the tree
    pub fn detect(tree: &dyn Tree) -> Self {
        Self {
            package_manager: PackageManager::detect(|lockfile| tree.exists(Utf8Path::new(lockfile))),
            cwd: tree.root().to_path_buf(),
        }
    }

    pub fn command_line(&self) -> String {
        let mut parts = vec![self.package_manager.command()];
        parts.extend_from_slice(self.package_manager.install_args());
        parts.join(" ")
    }

    /// Run the install in the workspace root
    pub async fn run(&self) -> MtwResult<()> {
        info!("Running `{}` in {}", self.command_line(), self.cwd);

        let status = tokio::process::Command::new(self.package_manager.command())
            .args(self.package_manager.install_args())
            .current_dir(&self.cwd)
            .status()
            .await
            .map_err(|e| MtwError::io(format!("Failed to run `{}`", self.command_line()), e))?;

        if !status.success() {
            return Err(MtwError::InstallFailed {
                command: self.command_line(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

/// Add the configured dependencies to the workspace manifest.
///
/// Options are validated before the tree is read; a rejected run leaves the
/// tree untouched.
pub fn ng_add_generator(
    tree: &mut dyn Tree,
    options: GeneratorOptions,
    config: &GeneratorConfig,
) -> MtwResult<GeneratorOutcome> {
    let options = options.validate()?;
    apply_generator(tree, &options, config)
}

/// Generator body for options that already passed the guard
pub fn apply_generator(
    tree: &mut dyn Tree,
    options: &ValidatedOptions,
    config: &GeneratorConfig,
) -> MtwResult<GeneratorOutcome> {
    info!("Adding material-tailwind to '{}' at {}", options.name(), options.project_root());

    let manifest_path = config.manifest_path();
    let (document, mut manifest) = read_manifest(&*tree, manifest_path)?;

    let report = DependencyMerger::apply(&mut manifest, &config.additions());
    if report.changed() {
        write_manifest(tree, manifest_path, document, &manifest)?;
    } else {
        debug!("{} already has every requested dependency", manifest_path);
    }

    if config.format.enabled {
        format_files(tree, &JsonFormatter::new(config.format.indent))?;
    }

    let install = if report.changed() {
        Some(InstallTask::detect(&*tree))
    } else {
        None
    };

    Ok(GeneratorOutcome {
        report,
        changes: tree.changes(),
        install,
    })
}

/// Execute the `mtw ng-add` command
pub async fn execute(options: GeneratorOptions, mode: RunMode, ctx: &CommandContext) -> MtwResult<()> {
    ctx.output.step("🎨", WELCOME);
    let options = options.validate()?;

    let loaded = ConfigLoader::new(ctx.cwd.clone()).load().await?;
    if let ConfigSource::File(path) = &loaded.source {
        ctx.output.info(&format!("Using configuration from {}", path));
    }

    let mut tree = FsTree::new(loaded.workspace_root.clone());
    let outcome = apply_generator(&mut tree, &options, &loaded.config)?;

    report_merge(&outcome.report, ctx);
    for change in &outcome.changes {
        ctx.output.info(&change.to_string());
    }

    if mode.dry_run {
        ctx.output.warn("Dry run: no changes were written");
        return Ok(());
    }

    tree.flush().await?;

    match outcome.install {
        Some(task) if !mode.skip_install => {
            ctx.output.step("📦", &format!("Running {}", task.command_line()));
            task.run().await?;
        }
        Some(task) => {
            ctx.output.info(&format!("Skipped install, run `{}` when ready", task.command_line()));
        }
        None => {}
    }

    if outcome.report.changed() {
        ctx.output.success("Added Angular Material and Tailwind CSS");
    } else {
        ctx.output.success("Dependencies already up to date");
    }

    Ok(())
}

fn report_merge(report: &MergeReport, ctx: &CommandContext) {
    for (dependency, action) in report.modified() {
        let line = match action {
            MergeAction::Added => format!("Added {} {}", dependency.kind, dependency),
            MergeAction::Updated { from } => {
                format!("Updated {} {} (was {})", dependency.kind, dependency, from)
            }
            MergeAction::Moved { from, constraint } => {
                format!("Moved {} from {} ({}) to {}", dependency, from, constraint, dependency.kind)
            }
            MergeAction::Unchanged => continue,
        };
        ctx.output.step("➕", &line);
    }
}
