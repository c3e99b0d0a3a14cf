//! Filesystem operations used by the conversion pipeline.
//!
//! The pipeline never touches `std::fs` directly; it goes through the
//! [`Filesystem`] trait so tests can observe (or refuse) writes and copies.
//! [`LocalFs`] is the production implementation.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the full contents of `path`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Give `to` the modification time of `from`.
    fn copy_modified_time(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Recursively copy the directory `from` to `to`.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] if `to` exists; never merges
    /// into an existing tree. Returns the number of files copied.
    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<u64>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy_modified_time(&self, from: &Path, to: &Path) -> io::Result<()> {
        let modified = fs::metadata(from)?.modified()?;
        fs::File::options()
            .write(true)
            .open(to)?
            .set_modified(modified)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<u64> {
        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::create_dir(to)?;

        let mut copied = 0;
        for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let target = to.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
                // Not every platform can set timestamps.
                let _ = self.copy_modified_time(entry.path(), &target);
                copied += 1;
            }
        }
        Ok(copied)
    }
}
