//! Location and layout of the template tree
//!
//! Templates are resolved with priority:
//! explicit path > user customizations (XDG config) > next to the executable
//! > the crate's source checkout > the tree embedded in the binary.
//!
//! The embedded tree is unpacked into a per-version cache directory so the
//! installer can copy from it like any other directory.

use include_dir::{include_dir, Dir, File};
use std::path::{Path, PathBuf};

use crate::database::DbFlavor;
use crate::error::{DockerizeError, Result};
use crate::fs::Filesystem;

/// Template tree compiled into the binary
static EMBEDDED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Template tree in the crate's source checkout, present for development builds
pub const SOURCE_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Env example copied next to the project's `.env`
pub const ENV_EXAMPLE: &str = ".env.docker.example";
/// Build-context ignore file
pub const DOCKERIGNORE: &str = ".dockerignore";
/// Standalone files copied on every run
pub const AUXILIARY_FILES: [&str; 2] = [ENV_EXAMPLE, DOCKERIGNORE];

/// Shared subtree copied verbatim
pub const DOCKER_DIR: &str = "docker";
/// Directory holding the compose variants
pub const COMPOSE_DIR: &str = "compose";

/// A read-only template tree on some filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTree {
    root: PathBuf,
}

impl TemplateTree {
    /// Use `root` as the template tree
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tree in the crate's source checkout
    #[must_use]
    pub fn source() -> Self {
        Self::new(SOURCE_TEMPLATES)
    }

    /// Find the template tree to install from
    ///
    /// An `explicit` directory must exist. Without one, the first existing
    /// candidate wins: the user's XDG config directory, a `templates/`
    /// directory beside the executable, then the source checkout. When none
    /// exists the embedded tree is unpacked into the user cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`DockerizeError::TemplatesNotFound`] if the explicit directory
    /// is missing, or an I/O error if the embedded tree cannot be unpacked.
    pub fn locate(fs: &dyn Filesystem, explicit: Option<&Path>) -> Result<Self> {
        let candidates = [
            Self::user_config_dir(),
            Self::exe_adjacent_dir(),
            Some(PathBuf::from(SOURCE_TEMPLATES)),
        ];
        let candidates = candidates.into_iter().flatten();
        Self::locate_from(fs, explicit, candidates, &Self::cache_dir())
    }

    fn locate_from(
        fs: &dyn Filesystem,
        explicit: Option<&Path>,
        candidates: impl IntoIterator<Item = PathBuf>,
        cache: &Path,
    ) -> Result<Self> {
        if let Some(dir) = explicit {
            if fs.is_dir(dir) {
                tracing::info!(root = %dir.display(), "using explicit template directory");
                return Ok(Self::new(dir));
            }
            return Err(DockerizeError::TemplatesNotFound(dir.to_path_buf()));
        }

        for candidate in candidates {
            if fs.is_dir(&candidate) {
                tracing::info!(root = %candidate.display(), "using template directory");
                return Ok(Self::new(candidate));
            }
            tracing::debug!(candidate = %candidate.display(), "template directory not present");
        }

        Self::unpack_embedded(fs, cache)
    }

    /// Write the embedded tree below `dest` and use it
    ///
    /// Files already present with the embedded contents are left alone, so
    /// repeated runs only repair missing or modified files.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub fn unpack_embedded(fs: &dyn Filesystem, dest: &Path) -> Result<Self> {
        let mut written = 0_usize;
        for file in embedded_files(&EMBEDDED) {
            let path = dest.join(file.path());
            if fs.read(&path).is_ok_and(|current| current == file.contents()) {
                continue;
            }

            if let Some(parent) = path.parent() {
                fs.create_dir_all(parent)
                    .map_err(|source| DockerizeError::io("create directory", parent, source))?;
            }
            fs.write(&path, file.contents())
                .map_err(|source| DockerizeError::io("write", &path, source))?;
            written += 1;
        }

        tracing::info!(root = %dest.display(), written, "using embedded templates");
        Ok(Self::new(dest))
    }

    /// `$XDG_CONFIG_HOME/laravel-dockerize/templates`, or under `~/.config`
    fn user_config_dir() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("laravel-dockerize").join("templates"))
    }

    fn exe_adjacent_dir() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join("templates"))
    }

    /// `$XDG_CACHE_HOME/laravel-dockerize/templates/<version>`, or under
    /// `~/.cache`, or the system temp directory
    fn cache_dir() -> PathBuf {
        std::env::var_os("XDG_CACHE_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
            .unwrap_or_else(std::env::temp_dir)
            .join("laravel-dockerize")
            .join("templates")
            .join(env!("CARGO_PKG_VERSION"))
    }

    /// Root directory of the tree
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared `docker/` subtree
    #[must_use]
    pub fn docker_dir(&self) -> PathBuf {
        self.root.join(DOCKER_DIR)
    }

    /// `compose/` directory holding generic fallbacks
    #[must_use]
    pub fn compose_dir(&self) -> PathBuf {
        self.root.join(COMPOSE_DIR)
    }

    /// `compose/<flavor>/` directory
    #[must_use]
    pub fn flavor_dir(&self, flavor: DbFlavor) -> PathBuf {
        self.compose_dir().join(flavor.as_str())
    }

    /// Whether the tree ships variants for `flavor`
    #[must_use]
    pub fn has_flavor(&self, fs: &dyn Filesystem, flavor: DbFlavor) -> bool {
        fs.is_dir(&self.flavor_dir(flavor))
    }

    /// Source for a compose file: the flavor variant if present, else the generic one
    #[must_use]
    pub fn compose_source(&self, fs: &dyn Filesystem, flavor: DbFlavor, file: &str) -> PathBuf {
        let specific = self.flavor_dir(flavor).join(file);
        if fs.exists(&specific) {
            return specific;
        }
        tracing::debug!(%flavor, file, "no flavor-specific compose file, using generic template");
        self.compose_dir().join(file)
    }

    /// Path of a standalone file at the tree root
    #[must_use]
    pub fn auxiliary(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Every file in `dir`, recursively; paths are relative to the embedded root
fn embedded_files(dir: &'static Dir<'static>) -> Vec<&'static File<'static>> {
    let mut files: Vec<_> = dir.files().collect();
    for sub in dir.dirs() {
        files.extend(embedded_files(sub));
    }
    files
}
