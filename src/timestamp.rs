//! Document creation timestamps.
//!
//! Posts are dated by when their source document was created. What "created"
//! means depends on the platform: [`FsTimestamps`] uses the filesystem birth
//! time where it is recorded and falls back to the modification time
//! elsewhere (some Linux filesystems, network mounts).

use chrono::{DateTime, Local, NaiveDateTime};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading metadata of {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Source of document creation times.
pub trait TimestampSource {
    fn created_at(&self, path: &Path) -> Result<NaiveDateTime, TimestampError>;
}

/// Reads creation time from filesystem metadata, in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTimestamps;

impl TimestampSource for FsTimestamps {
    fn created_at(&self, path: &Path) -> Result<NaiveDateTime, TimestampError> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TimestampError::NotFound(path.to_path_buf()),
            _ => TimestampError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        if metadata.is_dir() {
            return Err(TimestampError::NotFound(path.to_path_buf()));
        }
        let time = metadata
            .created()
            .or_else(|_| metadata.modified())
            .map_err(|e| TimestampError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(DateTime::<Local>::from(time).naive_local())
    }
}
