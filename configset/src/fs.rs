//! File-tree reader abstraction.
//!
//! The loader never touches the filesystem directly; it goes through the
//! [`FileReader`] trait so tests (and embedders) can aggregate from an
//! in-memory tree. Both operations report a missing entry as
//! `io::ErrorKind::NotFound`, which keeps a missing configuration
//! directory distinguishable from other I/O failures.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of a file tree.
pub trait FileReader {
    /// List the files directly under `dir`.
    ///
    /// Only files are returned, not subdirectories. Implementations should
    /// return entries sorted by name so aggregation is deterministic across
    /// filesystems that do not guarantee listing order.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory cannot be listed;
    /// `ErrorKind::NotFound` if it does not exist.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read the full contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the file cannot be read.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileReader`] backed by the operating system filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileReader;

impl FileReader for OsFileReader {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory [`FileReader`] for tests and embedded defaults.
///
/// Adding a file implies all of its parent directories, so a reader built
/// from a handful of `add_file` calls behaves like a small real tree.
///
/// # Examples
///
/// ```
/// use configset::{FileReader, MemFileReader};
/// use std::path::Path;
///
/// let mut files = MemFileReader::new();
/// files.add_file("/etc/app/server.yaml", "port: 8080\n");
///
/// let listed = files.list_dir(Path::new("/etc/app")).unwrap();
/// assert_eq!(listed.len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemFileReader {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemFileReader {
    /// Create an empty in-memory tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents, creating implied parents.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> &mut Self {
        let path = path.into();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        self.files.insert(path, contents.into());
        self
    }

    /// Register an empty directory.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        self.dirs.insert(path);
        self
    }
}

impl FileReader for MemFileReader {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("open {}: file does not exist", dir.display()),
            ));
        }
        // BTreeMap keys come out sorted already.
        Ok(self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("open {}: file does not exist", path.display()),
            )
        })
    }
}
