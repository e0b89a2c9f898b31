//! CLI command implementations

pub mod install;
pub mod update;

pub use install::InstallCommand;
pub use update::UpdateCommand;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::config::Settings;
use crate::copier::Summary;
use crate::fs::LocalFs;
use crate::report::ConsoleReporter;
use crate::scaffold::{self, Mode, Options};
use crate::template_tree::TemplateTree;

/// Options shared by `install` and `update`
#[derive(Debug, Clone, Default, Args)]
pub struct ScaffoldArgs {
    /// Compose files to copy: local, dev, prod or all
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Database flavor: pgsql, mysql or mariadb
    #[arg(long, value_name = "DB")]
    pub db: Option<String>,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Report what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Project root to copy into
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Template directory to copy from (defaults to the templates built into the binary)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl ScaffoldArgs {
    /// Merge flags over `dockerize.toml` and `DOCKERIZE_*` settings
    ///
    /// Returns the run options and the explicit template directory, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn resolve(self, mode: Mode) -> Result<(Options, Option<PathBuf>)> {
        let settings = Settings::load(&self.path)
            .with_context(|| format!("Failed to load configuration from {}", self.path.display()))?;
        tracing::debug!(?settings, "loaded settings");

        let templates = self.templates.or_else(|| settings.templates_dir_in(&self.path));
        let options = Options {
            mode,
            preset: self.preset.or(settings.preset),
            db: self.db.or(settings.db),
            force: self.force || settings.force,
            dry_run: self.dry_run,
            target: self.path,
        };

        Ok((options, templates))
    }
}

/// Run the shared sequence against the local disk and print the tally
fn execute(mode: Mode, args: ScaffoldArgs) -> Result<Summary> {
    let (options, templates) = args.resolve(mode)?;

    let fs = LocalFs;
    let tree = TemplateTree::locate(&fs, templates.as_deref())?;
    let mut reporter = ConsoleReporter::new(options.dry_run);

    let summary = scaffold::run(&fs, &tree, &options, &mut reporter)
        .with_context(|| format!("Failed to {mode} Docker templates"))?;

    println!();
    println!(
        "{} created, {} updated, {} skipped",
        style(summary.created).green(),
        style(summary.updated).cyan(),
        style(summary.skipped).yellow()
    );
    if options.dry_run {
        println!("{}", style("Dry run: no files were written.").dim());
    }

    Ok(summary)
}
