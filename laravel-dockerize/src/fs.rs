//! Filesystem capability
//!
//! Every read and write the installer performs goes through the [`Filesystem`]
//! trait so the orchestration can run against the local disk ([`LocalFs`]) or
//! an in-memory tree ([`MemoryFs`]) in tests.

use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem operations needed to install templates
pub trait Filesystem {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and all missing ancestors
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to` byte-for-byte, replacing `to` if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is missing or `to` cannot be written.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing it if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or the file cannot
    /// be written.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Read the full contents of a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Recursively list every file below `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be traversed.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Local disk filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// In-memory filesystem
///
/// Directories are tracked explicitly so that copying into a missing parent
/// fails the same way it does on disk.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
    unreadable: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    /// Create an empty filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
        self.files
            .lock()
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
    }

    /// Make reads of `path` fail with `PermissionDenied`; the file still exists
    pub fn deny_reads(&self, path: impl AsRef<Path>) {
        self.unreadable.lock().insert(path.as_ref().to_path_buf());
    }

    /// Contents of a file as UTF-8 text, if it exists
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Snapshot of every file and its contents
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files.lock().clone()
    }

    fn add_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.lock();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.is_dir(parent) => {
                Err(not_found(parent))
            }
            _ => Ok(()),
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("No such file or directory: {}", path.display()),
    )
}

impl Filesystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.is_file(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("File exists: {}", path.display()),
            ));
        }
        self.add_dirs(path);
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let contents = self.read(from)?;
        self.write(to, &contents)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.check_parent(path)?;
        self.files.lock().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.unreadable.lock().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Permission denied: {}", path.display()),
            ));
        }
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(not_found(dir));
        }
        Ok(self
            .files
            .lock()
            .keys()
            .filter(|path| path.starts_with(dir) && path.as_path() != dir)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_insert_creates_parents() {
        let fs = MemoryFs::new();
        fs.insert("/tpl/docker/php/Dockerfile", "FROM php");

        assert!(fs.is_dir(Path::new("/tpl")));
        assert!(fs.is_dir(Path::new("/tpl/docker/php")));
        assert!(fs.is_file(Path::new("/tpl/docker/php/Dockerfile")));
        assert!(!fs.is_dir(Path::new("/tpl/docker/php/Dockerfile")));
    }

    #[test]
    fn test_memory_copy_requires_parent() {
        let fs = MemoryFs::new();
        fs.insert("/tpl/a.txt", "a");

        let err = fs
            .copy(Path::new("/tpl/a.txt"), Path::new("/out/a.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.copy(Path::new("/tpl/a.txt"), Path::new("/out/a.txt"))
            .unwrap();
        assert_eq!(fs.contents("/out/a.txt").as_deref(), Some("a"));
    }

    #[test]
    fn test_memory_copy_missing_source() {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new("/out")).unwrap();
        let err = fs
            .copy(Path::new("/tpl/missing"), Path::new("/out/missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_denied_reads_fail() {
        let fs = MemoryFs::new();
        fs.insert("/app/docker-compose.yml", "image: mysql");
        fs.deny_reads("/app/docker-compose.yml");

        assert!(fs.is_file(Path::new("/app/docker-compose.yml")));
        let err = fs.read(Path::new("/app/docker-compose.yml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_memory_write_requires_parent() {
        let fs = MemoryFs::new();
        let err = fs.write(Path::new("/cache/a"), b"a").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs.create_dir_all(Path::new("/cache")).unwrap();
        fs.write(Path::new("/cache/a"), b"a").unwrap();
        assert_eq!(fs.contents("/cache/a").as_deref(), Some("a"));
    }

    #[test]
    fn test_memory_list_files_is_recursive() {
        let fs = MemoryFs::new();
        fs.insert("/tpl/docker/a", "");
        fs.insert("/tpl/docker/nested/b", "");
        fs.insert("/tpl/other", "");

        let files = fs.list_files(Path::new("/tpl/docker")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("/tpl/docker/a"),
                PathBuf::from("/tpl/docker/nested/b")
            ]
        );
    }

    #[test]
    fn test_local_list_files_walks_tree() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("docker");
        std::fs::create_dir_all(root.join("nginx")).unwrap();
        std::fs::write(root.join("nginx/default.conf"), "server {}").unwrap();
        std::fs::write(root.join("entrypoint.sh"), "#!/bin/sh").unwrap();

        let mut files = LocalFs.list_files(&root).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![root.join("entrypoint.sh"), root.join("nginx/default.conf")]
        );
    }
}
