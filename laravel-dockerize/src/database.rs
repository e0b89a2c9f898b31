//! Database flavor selection and detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::DockerizeError;
use crate::fs::Filesystem;
use crate::preset::{Selection, COMPOSE_DEV, COMPOSE_LOCAL, COMPOSE_PROD};

/// Compose files inspected during detection, in the order they are tried
pub const DETECTION_ORDER: [&str; 3] = [COMPOSE_PROD, COMPOSE_DEV, COMPOSE_LOCAL];

/// Database engine targeted by the generated compose stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DbFlavor {
    /// `PostgreSQL`
    #[default]
    Pgsql,
    /// `MySQL`
    Mysql,
    /// `MariaDB`
    Mariadb,
}

impl DbFlavor {
    /// All flavors, in detection priority order
    pub const ALL: [Self; 3] = [Self::Pgsql, Self::Mysql, Self::Mariadb];

    /// Option name, also the template subdirectory under `compose/`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pgsql => "pgsql",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
        }
    }

    /// Lowercase substring that identifies this engine in a compose file
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Pgsql => "image: postgres",
            Self::Mysql => "image: mysql",
            Self::Mariadb => "image: mariadb",
        }
    }

    /// Normalize a raw `--db` value for `install`
    ///
    /// A missing or blank value means `pgsql`. Values that are not a known
    /// flavor, or whose template directory is unavailable, fall back to
    /// `pgsql` with a warning. This includes `pgsql` itself, whose compose
    /// files then come from the generic templates.
    pub fn select_for_install(
        raw: Option<&str>,
        available: impl Fn(Self) -> bool,
    ) -> Selection<Self> {
        let raw = raw.map(str::trim).unwrap_or_default();
        let parsed = if raw.is_empty() {
            Ok(Self::Pgsql)
        } else {
            raw.parse::<Self>()
        };

        match parsed {
            Ok(flavor) if available(flavor) => Selection::accepted(flavor),
            Ok(flavor) => Selection::fallback(
                Self::Pgsql,
                format!("No templates for database '{flavor}'. Falling back to pgsql."),
            ),
            Err(err) => Selection::fallback(Self::Pgsql, format!("{err}. Falling back to pgsql.")),
        }
    }

    /// Normalize a raw `--db` value for `update`
    ///
    /// A missing or blank value triggers detection from the compose files
    /// already present in `target`; an explicit value always wins.
    pub fn select_for_update(
        raw: Option<&str>,
        fs: &dyn Filesystem,
        target: &Path,
    ) -> Selection<Self> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            let detected = detect(fs, target);
            tracing::info!(detected = ?detected, "database detection finished");
            return Selection::accepted(detected.unwrap_or_default());
        }

        match raw.parse::<Self>() {
            Ok(flavor) => Selection::accepted(flavor),
            Err(err) => Selection::fallback(Self::Pgsql, format!("{err}. Falling back to pgsql.")),
        }
    }
}

impl FromStr for DbFlavor {
    type Err = DockerizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pgsql" => Ok(Self::Pgsql),
            "mysql" => Ok(Self::Mysql),
            "mariadb" => Ok(Self::Mariadb),
            _ => Err(DockerizeError::UnknownDatabase(s.to_string())),
        }
    }
}

impl fmt::Display for DbFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the database flavor from compose files in `project_root`
///
/// Files are tried in [`DETECTION_ORDER`]; within a file the markers are
/// checked in [`DbFlavor::ALL`] order. Missing or unreadable files are skipped.
#[must_use]
pub fn detect(fs: &dyn Filesystem, project_root: &Path) -> Option<DbFlavor> {
    for name in DETECTION_ORDER {
        let path = project_root.join(name);
        if !fs.is_file(&path) {
            continue;
        }

        let contents = match fs.read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).to_ascii_lowercase(),
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable compose file"
                );
                continue;
            }
        };

        if let Some(flavor) = DbFlavor::ALL
            .into_iter()
            .find(|flavor| contents.contains(flavor.marker()))
        {
            tracing::debug!(path = %path.display(), %flavor, "matched database marker");
            return Some(flavor);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("MySQL".parse::<DbFlavor>().unwrap(), DbFlavor::Mysql);
        assert_eq!("MARIADB".parse::<DbFlavor>().unwrap(), DbFlavor::Mariadb);
        assert!("postgres".parse::<DbFlavor>().is_err());
    }

    #[test]
    fn test_install_defaults_to_pgsql() {
        let selection = DbFlavor::select_for_install(None, |_| true);
        assert_eq!(selection, Selection::accepted(DbFlavor::Pgsql));
    }

    #[test]
    fn test_install_unknown_falls_back() {
        let selection = DbFlavor::select_for_install(Some("oracle"), |_| true);
        assert_eq!(selection.value, DbFlavor::Pgsql);
        assert!(selection.warning.unwrap().contains("Unknown database 'oracle'"));
    }

    #[test]
    fn test_install_missing_template_dir_falls_back() {
        let without_mariadb = |flavor: DbFlavor| flavor != DbFlavor::Mariadb;

        let selection = DbFlavor::select_for_install(Some("mariadb"), without_mariadb);
        assert_eq!(selection.value, DbFlavor::Pgsql);
        assert!(selection.warning.is_some());

        let selection = DbFlavor::select_for_install(Some("mysql"), without_mariadb);
        assert_eq!(selection, Selection::accepted(DbFlavor::Mysql));
    }

    #[test]
    fn test_install_missing_pgsql_dir_warns() {
        let without_pgsql = |flavor: DbFlavor| flavor != DbFlavor::Pgsql;

        for raw in [Some("pgsql"), Some("PgSQL"), None, Some("  ")] {
            let selection = DbFlavor::select_for_install(raw, without_pgsql);
            assert_eq!(selection.value, DbFlavor::Pgsql);
            assert!(
                selection.warning.unwrap().contains("'pgsql'"),
                "expected a warning for {raw:?}"
            );
        }
    }

    #[test]
    fn test_detect_mysql_from_prod_compose() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "services:\n  db:\n    image: mysql:8.0\n");

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Mysql));
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.dev.yml", "    IMAGE: MariaDB:11\n");

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Mariadb));
    }

    #[test]
    fn test_detect_file_order_wins_over_marker_priority() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: mariadb:11");
        fs.insert("/app/docker-compose.local.yml", "image: postgres:16");

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Mariadb));
    }

    #[test]
    fn test_detect_marker_priority_within_file() {
        let fs = MemoryFs::new();
        fs.insert(
            "/app/docker-compose.yml",
            "image: mysql:8.0\nimage: postgres:16\n",
        );

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Pgsql));
    }

    #[test]
    fn test_detect_skips_files_without_markers() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: redis:7");
        fs.insert("/app/docker-compose.dev.yml", "image: mysql:8.0");

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Mysql));
    }

    #[test]
    fn test_detect_skips_unreadable_files() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: postgres:16");
        fs.deny_reads("/app/docker-compose.yml");
        fs.insert("/app/docker-compose.dev.yml", "image: mysql:8.0");

        assert_eq!(detect(&fs, Path::new("/app")), Some(DbFlavor::Mysql));
        assert_eq!(
            DbFlavor::select_for_update(None, &fs, Path::new("/app")),
            Selection::accepted(DbFlavor::Mysql)
        );
    }

    #[test]
    fn test_detect_nothing() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: redis:7");

        assert_eq!(detect(&fs, Path::new("/app")), None);
        assert_eq!(detect(&fs, Path::new("/empty")), None);
    }

    #[test]
    fn test_update_explicit_overrides_detection() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: mysql:8.0");

        let selection = DbFlavor::select_for_update(Some("mariadb"), &fs, Path::new("/app"));
        assert_eq!(selection, Selection::accepted(DbFlavor::Mariadb));

        let selection = DbFlavor::select_for_update(None, &fs, Path::new("/app"));
        assert_eq!(selection, Selection::accepted(DbFlavor::Mysql));
    }

    #[test]
    fn test_update_invalid_explicit_falls_back() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: mysql:8.0");

        let selection = DbFlavor::select_for_update(Some("sqlite"), &fs, Path::new("/app"));
        assert_eq!(selection.value, DbFlavor::Pgsql);
        assert!(selection.warning.is_some());
    }

    #[test]
    fn test_update_without_markers_defaults_to_pgsql() {
        let fs = MemoryFs::new();
        let selection = DbFlavor::select_for_update(None, &fs, Path::new("/app"));
        assert_eq!(selection, Selection::accepted(DbFlavor::Pgsql));
    }
}
