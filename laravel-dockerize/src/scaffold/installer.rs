//! Install/update sequence

use super::{Mode, Options};
use crate::copier::{CopySpec, FileCopier, Summary};
use crate::database::DbFlavor;
use crate::error::Result;
use crate::fs::Filesystem;
use crate::preset::Preset;
use crate::report::Reporter;
use crate::template_tree::{TemplateTree, AUXILIARY_FILES, DOCKER_DIR};

/// Copy the template tree into `options.target`
///
/// Unknown preset or database values are reported as warnings and replaced
/// by their defaults; existing files are skipped unless forced.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a required template
/// (generic compose fallback, auxiliary file) cannot be copied.
pub fn run(
    fs: &dyn Filesystem,
    templates: &TemplateTree,
    options: &Options,
    reporter: &mut dyn Reporter,
) -> Result<Summary> {
    let preset = Preset::select(options.preset.as_deref());
    if let Some(warning) = &preset.warning {
        reporter.warning(warning);
    }
    let preset = preset.value;

    let db = match options.mode {
        Mode::Install => DbFlavor::select_for_install(options.db.as_deref(), |flavor| {
            templates.has_flavor(fs, flavor)
        }),
        Mode::Update => DbFlavor::select_for_update(options.db.as_deref(), fs, &options.target),
    };
    if let Some(warning) = &db.warning {
        reporter.warning(warning);
    }
    let db = db.value;

    let verb = match options.mode {
        Mode::Install => "Installing",
        Mode::Update => "Updating",
    };
    reporter.heading(&format!("{verb} Docker templates (preset: {preset}, db: {db})..."));

    tracing::info!(
        mode = %options.mode,
        %preset,
        %db,
        force = options.force,
        dry_run = options.dry_run,
        target = %options.target.display(),
        templates = %templates.root().display(),
        "starting"
    );

    let mut copier = FileCopier::new(fs, options.dry_run);

    copier.copy_directory(
        &templates.docker_dir(),
        &options.target.join(DOCKER_DIR),
        options.force,
        reporter,
    )?;

    for file in preset.compose_files() {
        let from = templates.compose_source(fs, db, file);
        copier.copy_file(
            CopySpec::new(from, options.target.join(file), options.force),
            reporter,
        )?;
    }

    for name in AUXILIARY_FILES {
        copier.copy_file(
            CopySpec::new(templates.auxiliary(name), options.target.join(name), options.force),
            reporter,
        )?;
    }

    let summary = copier.summary();
    tracing::info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        "finished"
    );
    Ok(summary)
}
