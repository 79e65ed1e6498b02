//! Filesystem collaborators injected into the directory stores.
//!
//! The stores never touch `std::fs` directly; they go through [`DirFs`] so
//! tests can substitute an in-memory filesystem.

use std::io;
use std::path::Path;

/// One directory entry as seen by a store scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// File name without any directory components.
    pub name: String,
    pub is_dir: bool,
}

/// Filesystem port for the directory stores.
///
/// `read_dir` must return entries sorted by file name; listing order is the
/// order every scan, first-match resolution, and strict-failure semantics
/// depend on.
pub trait DirFs: Send + Sync {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate the file at `path`.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Production adapter backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    pub fn new() -> Self {
        Self
    }
}

impl DirFs for OsFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    // Non-UTF8 names cannot match an extension convention.
                    tracing::warn!(name = ?name, "skipping non-UTF8 directory entry");
                    continue;
                }
            };
            let is_dir = entry.file_type()?.is_dir();
            entries.push(DirEntryInfo { name, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(path, bytes)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
