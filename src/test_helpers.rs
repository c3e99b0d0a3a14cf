//! Shared test utilities.
//!
//! Provides a fixture book, a fixed clock, a filesystem double that records
//! every operation before delegating to the real filesystem, and a log
//! capture for asserting on `tracing` events.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let fs = RecordingFs::default();
//! let clock = FixedTimestamps::default();
//! // build a PipelineConfig rooted at tmp.path().join("book") ...
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::filesystem::{Filesystem, LocalFs};
use crate::timestamp::{TimestampError, TimestampSource};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/book/` to `<tmp>/book` and return the temp dir.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/book");
    LocalFs.copy_tree(&fixtures, &tmp.path().join("book")).unwrap();
    tmp
}

/// Write a small book: `SUMMARY.md` plus the given documents.
pub fn write_book(root: &Path, outline: &str, documents: &[(&str, &str)]) {
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(root.join("SUMMARY.md"), outline).unwrap();
    for (rel, content) in documents {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

// =========================================================================
// Fixed clock
// =========================================================================

/// 2018-05-24 08:48:00, the default date of every test document.
pub fn fixed_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 5, 24)
        .unwrap()
        .and_hms_opt(8, 48, 0)
        .unwrap()
}

/// Dates existing files with [`fixed_date`] unless overridden per path.
/// Missing files are `NotFound`, like the real source.
#[derive(Default)]
pub struct FixedTimestamps {
    overrides: HashMap<PathBuf, NaiveDateTime>,
}

impl FixedTimestamps {
    pub fn with(mut self, path: PathBuf, date: NaiveDateTime) -> Self {
        self.overrides.insert(path, date);
        self
    }
}

impl TimestampSource for FixedTimestamps {
    fn created_at(&self, path: &Path) -> Result<NaiveDateTime, TimestampError> {
        if !path.is_file() {
            return Err(TimestampError::NotFound(path.to_path_buf()));
        }
        Ok(self.overrides.get(path).copied().unwrap_or_else(fixed_date))
    }
}

// =========================================================================
// Recording filesystem
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FsOp {
    CreateDirAll(PathBuf),
    Read(PathBuf),
    Write(PathBuf),
    Remove(PathBuf),
    CopyModifiedTime { from: PathBuf, to: PathBuf },
    CopyTree { from: PathBuf, to: PathBuf },
}

/// Records mutating and reading operations, then delegates to [`LocalFs`].
/// Uses Mutex (not RefCell) to match the trait's `&self` receivers.
#[derive(Default)]
pub struct RecordingFs {
    operations: Mutex<Vec<FsOp>>,
    fail_copies: bool,
    fail_writes: bool,
}

impl RecordingFs {
    /// A double whose `copy_tree` always fails with a permission error.
    pub fn failing_copies() -> Self {
        Self {
            fail_copies: true,
            ..Self::default()
        }
    }

    /// A double whose `write` leaves an empty file behind and then fails,
    /// like a full disk.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn operations(&self) -> Vec<FsOp> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, op: FsOp) {
        self.operations.lock().unwrap().push(op);
    }
}

impl Filesystem for RecordingFs {
    fn exists(&self, path: &Path) -> bool {
        LocalFs.exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record(FsOp::CreateDirAll(path.to_path_buf()));
        LocalFs.create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record(FsOp::Read(path.to_path_buf()));
        LocalFs.read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.record(FsOp::Write(path.to_path_buf()));
        if self.fail_writes {
            LocalFs.write(path, "")?;
            return Err(io::Error::other("no space left on test double"));
        }
        LocalFs.write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record(FsOp::Remove(path.to_path_buf()));
        LocalFs.remove_file(path)
    }

    fn copy_modified_time(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.record(FsOp::CopyModifiedTime {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        LocalFs.copy_modified_time(from, to)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<u64> {
        self.record(FsOp::CopyTree {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        if self.fail_copies {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "copy refused by test double",
            ));
        }
        LocalFs.copy_tree(from, to)
    }
}

// =========================================================================
// Log capture
// =========================================================================

/// Formatted `tracing` output collected in memory, one event per line.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines logged at WARN.
    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains("WARN"))
            .collect()
    }

    /// Position of the first line containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber that records DEBUG and above.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, LogCapture) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}
