//! File and directory copying with overwrite protection
//!
//! Existing destinations are left alone unless the copy is forced. Parent
//! directories are created on demand. Each file produces exactly one
//! [`CopyAction`], which is handed to the [`Reporter`] as soon as it happens.

use std::path::{Path, PathBuf};

use crate::error::{DockerizeError, Result};
use crate::fs::Filesystem;
use crate::report::Reporter;

/// A single planned copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    /// Template file
    pub from: PathBuf,
    /// Destination inside the target project
    pub to: PathBuf,
    /// Replace the destination if it already exists
    pub force: bool,
}

impl CopySpec {
    /// Create a copy spec
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            force,
        }
    }
}

/// What happened to a destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Destination did not exist and was written
    Created,
    /// Destination existed and was overwritten
    Updated,
    /// Destination existed and was left untouched
    Skipped,
}

/// A copy spec and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    /// The copy that was attempted
    pub spec: CopySpec,
    /// Result of the attempt
    pub outcome: CopyOutcome,
}

/// Tally of outcomes for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files written to new paths
    pub created: usize,
    /// Files overwritten
    pub updated: usize,
    /// Files left untouched
    pub skipped: usize,
}

impl Summary {
    /// Count one outcome
    pub fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Created => self.created += 1,
            CopyOutcome::Updated => self.updated += 1,
            CopyOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Total number of files considered
    #[must_use]
    pub const fn total(&self) -> usize {
        self.created + self.updated + self.skipped
    }

    /// Files actually written
    #[must_use]
    pub const fn written(&self) -> usize {
        self.created + self.updated
    }
}

/// Copies template files into a project
pub struct FileCopier<'a> {
    fs: &'a dyn Filesystem,
    dry_run: bool,
    summary: Summary,
}

impl<'a> FileCopier<'a> {
    /// Create a copier over `fs`
    ///
    /// In dry-run mode outcomes are computed and reported but nothing is
    /// written and no directories are created.
    pub fn new(fs: &'a dyn Filesystem, dry_run: bool) -> Self {
        Self {
            fs,
            dry_run,
            summary: Summary::default(),
        }
    }

    /// Outcomes recorded so far
    #[must_use]
    pub const fn summary(&self) -> Summary {
        self.summary
    }

    /// Copy a single file
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// source cannot be copied (including a missing source).
    pub fn copy_file(&mut self, spec: CopySpec, reporter: &mut dyn Reporter) -> Result<CopyAction> {
        if let Some(parent) = spec.to.parent() {
            if !self.dry_run && !parent.as_os_str().is_empty() {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|e| DockerizeError::io("create directory", parent, e))?;
            }
        }

        let existed = self.fs.exists(&spec.to);
        let outcome = if existed && !spec.force {
            CopyOutcome::Skipped
        } else {
            if self.dry_run {
                if !self.fs.is_file(&spec.from) {
                    return Err(DockerizeError::io(
                        "copy",
                        &spec.from,
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "template source missing",
                        ),
                    ));
                }
            } else {
                self.fs
                    .copy(&spec.from, &spec.to)
                    .map_err(|e| DockerizeError::io("copy", &spec.from, e))?;
            }
            if existed {
                CopyOutcome::Updated
            } else {
                CopyOutcome::Created
            }
        };

        tracing::debug!(
            from = %spec.from.display(),
            to = %spec.to.display(),
            ?outcome,
            dry_run = self.dry_run,
            "copy"
        );

        let action = CopyAction { spec, outcome };
        self.summary.record(outcome);
        reporter.action(&action);
        Ok(action)
    }

    /// Copy every file below `from` to the same relative path below `to`
    ///
    /// A missing `from` is not an error; nothing is copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be listed or any file fails to copy.
    pub fn copy_directory(
        &mut self,
        from: &Path,
        to: &Path,
        force: bool,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<CopyAction>> {
        if !self.fs.exists(from) {
            tracing::debug!(from = %from.display(), "source directory missing, nothing to copy");
            return Ok(Vec::new());
        }

        let mut files = self
            .fs
            .list_files(from)
            .map_err(|e| DockerizeError::io("list", from, e))?;
        files.sort();

        let mut actions = Vec::with_capacity(files.len());
        for file in files {
            let Ok(relative) = file.strip_prefix(from) else {
                continue;
            };
            let dest = to.join(relative);
            actions.push(self.copy_file(CopySpec::new(&file, dest, force), reporter)?);
        }

        Ok(actions)
    }
}
