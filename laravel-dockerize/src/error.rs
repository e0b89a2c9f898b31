//! Error types and error handling

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving options or copying templates
#[derive(Debug, Error)]
pub enum DockerizeError {
    /// Preset value outside of local, dev, prod, all
    #[error("Unknown preset '{0}'. Use one of: local, dev, prod, all")]
    UnknownPreset(String),

    /// Database value outside of pgsql, mysql, mariadb
    #[error("Unknown database '{0}'. Use one of: pgsql, mysql, mariadb")]
    UnknownDatabase(String),

    /// Explicitly configured template directory does not exist
    #[error("Template directory not found: {}", .0.display())]
    TemplatesNotFound(PathBuf),

    /// Configuration file or environment value could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem operation failed
    #[error("Failed to {op} {}", path.display())]
    Io {
        /// Operation that failed (e.g. "copy", "create directory")
        op: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DockerizeError {
    /// Wrap an I/O error with the operation and path it failed on
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for dockerize operations
pub type Result<T> = std::result::Result<T, DockerizeError>;
