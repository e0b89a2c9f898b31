//! Docker scaffolding orchestration
//!
//! Both `install` and `update` run the same sequence:
//! - Resolve the preset and database flavor
//! - Copy the shared `docker/` tree
//! - Copy the selected compose files (flavor variant, else generic)
//! - Copy `.env.docker.example` and `.dockerignore`

mod installer;

use std::fmt;
use std::path::PathBuf;

pub use installer::run;

/// Which command is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// First-time install; the database comes from the option or defaults to pgsql
    Install,
    /// Re-sync; the database is detected from existing compose files when not given
    Update,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => f.write_str("install"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Parsed options for one run
#[derive(Debug, Clone)]
pub struct Options {
    /// Command being run
    pub mode: Mode,
    /// Raw `--preset` value
    pub preset: Option<String>,
    /// Raw `--db` value
    pub db: Option<String>,
    /// Overwrite existing files
    pub force: bool,
    /// Report without writing
    pub dry_run: bool,
    /// Project root receiving the files
    pub target: PathBuf,
}

impl Options {
    /// Options with defaults for `mode`, targeting `target`
    pub fn new(mode: Mode, target: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            preset: None,
            db: None,
            force: false,
            dry_run: false,
            target: target.into(),
        }
    }

    /// Set the raw preset value
    #[must_use]
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Set the raw database value
    #[must_use]
    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.db = Some(db.into());
        self
    }

    /// Overwrite existing files
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Report without writing
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
