//! Resource directory relocation.
//!
//! Book documents link to shared assets through a directory such as
//! `assets/` in the book root. After conversion, post links point at
//! `/assets/`, so the directory is copied next to the posts directory:
//!
//! ```text
//! book/assets/   →   blog/source/assets/     (posts in blog/source/_posts)
//! ```
//!
//! Relocation never fails the run. A missing source directory, an existing
//! destination or a failed copy each produce a single warning.

use crate::filesystem::Filesystem;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What relocation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelocateOutcome {
    Copied { from: PathBuf, to: PathBuf, files: u64 },
    SourceMissing { from: PathBuf },
    DestinationExists { to: PathBuf },
    Failed { from: PathBuf, to: PathBuf, reason: String },
}

impl RelocateOutcome {
    pub fn is_warning(&self) -> bool {
        !matches!(self, RelocateOutcome::Copied { .. })
    }
}

/// Where the resource directory lands: a sibling of `post_dir`.
pub fn resource_destination(post_dir: &Path, resource_dir: &str) -> PathBuf {
    match post_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(resource_dir),
        _ => Path::new(".").join(resource_dir),
    }
}

/// Copy `source_root/resource_dir` next to `post_dir`.
pub fn relocate(
    fs: &impl Filesystem,
    source_root: &Path,
    resource_dir: &str,
    post_dir: &Path,
) -> RelocateOutcome {
    let from = source_root.join(resource_dir);
    let to = resource_destination(post_dir, resource_dir);

    let outcome = if !fs.exists(&from) {
        RelocateOutcome::SourceMissing { from }
    } else if fs.exists(&to) {
        RelocateOutcome::DestinationExists { to }
    } else {
        tracing::info!(from = %from.display(), to = %to.display(), "copying {resource_dir}");
        match fs.copy_tree(&from, &to) {
            Ok(files) => RelocateOutcome::Copied { from, to, files },
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                RelocateOutcome::DestinationExists { to }
            }
            Err(e) => RelocateOutcome::Failed {
                from,
                to,
                reason: e.to_string(),
            },
        }
    };

    match &outcome {
        RelocateOutcome::Copied { files, .. } => {
            tracing::info!(files, "resources copied");
        }
        RelocateOutcome::SourceMissing { from } => {
            tracing::warn!(path = %from.display(), "resource directory not found, nothing copied");
        }
        RelocateOutcome::DestinationExists { to } => {
            tracing::warn!(path = %to.display(), "resource destination already exists, left untouched");
        }
        RelocateOutcome::Failed { to, reason, .. } => {
            tracing::warn!(path = %to.display(), %reason, "copying resources failed");
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::LocalFs;
    use crate::test_helpers::{FsOp, RecordingFs, capture_logs};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn destination_is_sibling_of_post_dir() {
        assert_eq!(
            resource_destination(Path::new("blog/source/_posts"), "assets"),
            PathBuf::from("blog/source/assets")
        );
    }

    #[test]
    fn destination_without_parent_uses_current_dir() {
        assert_eq!(
            resource_destination(Path::new("_posts"), "assets"),
            PathBuf::from("./assets")
        );
    }

    #[test]
    fn missing_source_copies_nothing() {
        let tmp = TempDir::new().unwrap();
        let fs_double = RecordingFs::default();
        let outcome = relocate(&fs_double, tmp.path(), "assets", &tmp.path().join("blog/_posts"));

        assert!(matches!(outcome, RelocateOutcome::SourceMissing { .. }));
        assert!(outcome.is_warning());
        assert!(
            !fs_double
                .operations()
                .iter()
                .any(|op| matches!(op, FsOp::CopyTree { .. }))
        );
    }

    #[test]
    fn missing_source_warns_once() {
        let tmp = TempDir::new().unwrap();

        let (_, logs) = capture_logs(|| {
            relocate(&LocalFs, tmp.path(), "assets", &tmp.path().join("blog/_posts"))
        });

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 1, "{warnings:#?}");
        assert!(warnings[0].contains("resource directory not found"));
    }

    #[test]
    fn existing_destination_warns_once() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("book/assets")).unwrap();
        fs::create_dir_all(tmp.path().join("blog/assets")).unwrap();

        let (outcome, logs) = capture_logs(|| {
            relocate(&LocalFs, &tmp.path().join("book"), "assets", &tmp.path().join("blog/_posts"))
        });

        assert!(matches!(outcome, RelocateOutcome::DestinationExists { .. }));
        assert_eq!(logs.warnings().len(), 1);
    }

    #[test]
    fn copies_full_tree() {
        let tmp = TempDir::new().unwrap();
        let book = tmp.path().join("book");
        fs::create_dir_all(book.join("assets/img")).unwrap();
        fs::write(book.join("assets/img/a.png"), "png").unwrap();
        fs::write(book.join("assets/b.css"), "css").unwrap();
        let posts = tmp.path().join("blog/_posts");

        let outcome = relocate(&LocalFs, &book, "assets", &posts);

        assert_eq!(
            outcome,
            RelocateOutcome::Copied {
                from: book.join("assets"),
                to: tmp.path().join("blog/assets"),
                files: 2,
            }
        );
        assert!(tmp.path().join("blog/assets/img/a.png").is_file());
        assert!(tmp.path().join("blog/assets/b.css").is_file());
    }

    #[test]
    fn existing_destination_is_left_untouched() {
        let tmp = TempDir::new().unwrap();
        let book = tmp.path().join("book");
        fs::create_dir_all(book.join("assets")).unwrap();
        fs::write(book.join("assets/new.png"), "new").unwrap();
        fs::create_dir_all(tmp.path().join("blog/assets")).unwrap();
        fs::write(tmp.path().join("blog/assets/old.png"), "old").unwrap();

        let fs_double = RecordingFs::default();
        let outcome = relocate(&fs_double, &book, "assets", &tmp.path().join("blog/_posts"));

        assert!(matches!(outcome, RelocateOutcome::DestinationExists { .. }));
        assert!(!tmp.path().join("blog/assets/new.png").exists());
        assert!(
            !fs_double
                .operations()
                .iter()
                .any(|op| matches!(op, FsOp::CopyTree { .. }))
        );
    }

    #[test]
    fn copy_failure_is_reported_not_raised() {
        let tmp = TempDir::new().unwrap();
        let book = tmp.path().join("book");
        fs::create_dir_all(book.join("assets")).unwrap();

        let fs_double = RecordingFs::failing_copies();
        let outcome = relocate(&fs_double, &book, "assets", &tmp.path().join("blog/_posts"));

        assert!(matches!(outcome, RelocateOutcome::Failed { .. }));
    }
}
