//! Configuration management
//!
//! Defaults for command options are loaded from multiple sources with clear
//! precedence:
//!
//! 1. Command-line flags (highest priority, applied by the caller)
//! 2. Environment variables (`DOCKERIZE_` prefix)
//! 3. `dockerize.toml` in the target project
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # dockerize.toml
//! preset = "local"
//! db = "mysql"
//! force = false
//! templates_dir = "/opt/company/docker-templates"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DockerizeError, Result};

/// Project-level configuration file name
pub const CONFIG_FILE: &str = "dockerize.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DOCKERIZE_";

/// Defaults for `install`/`update` options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default preset
    pub preset: Option<String>,

    /// Default database flavor; when set, `update` skips detection
    pub db: Option<String>,

    /// Always overwrite existing files
    pub force: bool,

    /// Template tree to install from
    pub templates_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings for a project directory
    ///
    /// A missing `dockerize.toml` is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DockerizeError::Config`] if the file or an environment value
    /// cannot be parsed.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::figment(project_root)
            .extract()
            .map_err(|e| DockerizeError::Config(e.to_string()))
    }

    /// The provider chain used by [`Settings::load`]
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Resolve `templates_dir` against the project root when relative
    #[must_use]
    pub fn templates_dir_in(&self, project_root: &Path) -> Option<PathBuf> {
        self.templates_dir.as_ref().map(|dir| {
            if dir.is_relative() {
                project_root.join(dir)
            } else {
                dir.clone()
            }
        })
    }
}
