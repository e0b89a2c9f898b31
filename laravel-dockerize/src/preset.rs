//! Deployment presets and the compose files they install

use std::fmt;
use std::str::FromStr;

use crate::error::DockerizeError;

/// Production-like compose file
pub const COMPOSE_PROD: &str = "docker-compose.yml";
/// Shared development stack compose file
pub const COMPOSE_DEV: &str = "docker-compose.dev.yml";
/// Local development (hot reload) compose file
pub const COMPOSE_LOCAL: &str = "docker-compose.local.yml";

/// A validated option value plus the warning raised while normalizing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    /// Normalized value
    pub value: T,
    /// Set when the raw input was rejected and a fallback was chosen
    pub warning: Option<String>,
}

impl<T> Selection<T> {
    /// Accepted as given
    pub const fn accepted(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// Replaced by a fallback, with the reason
    pub fn fallback(value: T, warning: impl Into<String>) -> Self {
        Self {
            value,
            warning: Some(warning.into()),
        }
    }
}

/// Named bundle of compose files for a deployment context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Local development with hot reload
    Local,
    /// Shared development stack
    Dev,
    /// Production-like stack
    Prod,
    /// Every compose file
    #[default]
    All,
}

impl Preset {
    /// Presets that map to exactly one compose file, in install order
    pub const SINGLE: [Self; 3] = [Self::Local, Self::Dev, Self::Prod];

    /// Lowercase option name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::All => "all",
        }
    }

    /// Compose filenames this preset installs, without duplicates
    #[must_use]
    pub fn compose_files(self) -> Vec<&'static str> {
        match self {
            Self::Local => vec![COMPOSE_LOCAL],
            Self::Dev => vec![COMPOSE_DEV],
            Self::Prod => vec![COMPOSE_PROD],
            Self::All => {
                let mut files = Vec::with_capacity(Self::SINGLE.len());
                for file in Self::SINGLE.into_iter().flat_map(Self::compose_files) {
                    if !files.contains(&file) {
                        files.push(file);
                    }
                }
                files
            }
        }
    }

    /// Normalize a raw `--preset` value
    ///
    /// Matching is case-insensitive. A missing or blank value means `all`;
    /// anything unrecognized also falls back to `all` with a warning.
    #[must_use]
    pub fn select(raw: Option<&str>) -> Selection<Self> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Selection::accepted(Self::All);
        }

        match raw.parse::<Self>() {
            Ok(preset) => Selection::accepted(preset),
            Err(err) => Selection::fallback(Self::All, format!("{err}. Using all.")),
        }
    }
}

impl FromStr for Preset {
    type Err = DockerizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            "all" => Ok(Self::All),
            _ => Err(DockerizeError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
