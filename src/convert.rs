//! The conversion pipeline: outline in, posts out.
//!
//! ```text
//! SUMMARY.md ──parse──▶ entries ──walk──▶ plan ──write──▶ _posts/*.md
//!                                                  └────▶ assets/ (once)
//! ```
//!
//! The walk visits outline entries in source order. Every entry updates the
//! [`CategoryTracker`]; entries with a document become a [`PlannedPost`]
//! dated by the document's creation time, or a [`SkippedEntry`] when the
//! document cannot be used. Each post is written as soon as the walk reaches
//! it, so log lines follow the outline. Writing reads the source document,
//! adds front matter, roots its resource links and writes the result to the
//! dated destination in one go, carrying over the source's modification time.
//! A document that cannot be read never leaves a file behind; a failed write
//! removes whatever it left.
//!
//! ## Failure isolation
//!
//! Only a missing or unreadable outline (or an uncreatable post directory)
//! stops a run. A problem with one entry skips that entry with a warning and
//! the walk carries on. Resource relocation never fails the run.
//!
//! ## Collisions
//!
//! Two leaves whose date and title slug coincide map to the same file. The
//! later post is flagged with `overwrites_earlier`, a warning is logged and
//! the later post wins.

use crate::category::CategoryTracker;
use crate::config::BookConfig;
use crate::filesystem::{Filesystem, LocalFs};
use crate::naming::post_filename;
use crate::outline;
use crate::post;
use crate::resources::{self, RelocateOutcome};
use crate::timestamp::{FsTimestamps, TimestampError, TimestampSource};
use crate::types::{CategoryPath, OutlineEntry, PostMetadata};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Outline not found: {0}")]
    OutlineNotFound(PathBuf),
    #[error("Cannot read outline {path}: {source}")]
    OutlineUnreadable { path: PathBuf, source: io::Error },
    #[error("Cannot create post directory {path}: {source}")]
    PostDir { path: PathBuf, source: io::Error },
}

/// Everything a run needs, resolved from [`BookConfig`] and the CLI.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_root: PathBuf,
    pub outline_file: String,
    pub post_dir: PathBuf,
    pub resource_dir: String,
    pub indent_width: usize,
    pub max_depth: usize,
}

impl PipelineConfig {
    pub fn from_book_config(source_root: &Path, config: &BookConfig) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            outline_file: config.outline.file.clone(),
            post_dir: PathBuf::from(&config.posts.dir),
            resource_dir: config.posts.resource_dir.clone(),
            indent_width: config.outline.indent_width,
            max_depth: config.outline.max_depth,
        }
    }

    pub fn outline_path(&self) -> PathBuf {
        self.source_root.join(&self.outline_file)
    }

    /// Source document for an outline link, which may be written root-relative.
    pub fn source_path(&self, link: &str) -> PathBuf {
        self.source_root.join(link.trim_start_matches(['/', '\\']))
    }
}

/// A leaf that will become a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPost {
    /// Outline title; names the file and is the fallback post title.
    pub title: String,
    /// Link as written in the outline.
    pub link: String,
    pub categories: CategoryPath,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub date: NaiveDateTime,
    /// An earlier leaf in this run maps to the same destination.
    pub overwrites_earlier: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    TooDeep { depth: usize, max_depth: usize },
    Unreadable { message: String },
    WriteFailed { message: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::TooDeep { depth, max_depth } => {
                write!(f, "depth {depth} exceeds the {max_depth} supported levels")
            }
            SkipReason::Unreadable { message } => write!(f, "unreadable: {message}"),
            SkipReason::WriteFailed { message } => write!(f, "write failed: {message}"),
        }
    }
}

/// A leaf that produced no post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub title: String,
    pub source_path: String,
    pub reason: SkipReason,
}

/// One step of the walk, in outline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanItem {
    Post(PlannedPost),
    Skipped(SkippedEntry),
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Posts written, in outline order.
    pub posts: Vec<PlannedPost>,
    /// Leaves that produced no post, in outline order.
    pub skipped: Vec<SkippedEntry>,
    pub resources: RelocateOutcome,
}

impl ConversionReport {
    pub fn warning_count(&self) -> usize {
        self.skipped.len()
            + self.posts.iter().filter(|p| p.overwrites_earlier).count()
            + usize::from(self.resources.is_warning())
    }
}

pub struct ConversionPipeline<'a, F, T> {
    config: &'a PipelineConfig,
    fs: &'a F,
    timestamps: &'a T,
}

impl<'a, F: Filesystem, T: TimestampSource> ConversionPipeline<'a, F, T> {
    pub fn new(config: &'a PipelineConfig, fs: &'a F, timestamps: &'a T) -> Self {
        Self {
            config,
            fs,
            timestamps,
        }
    }

    /// Read and parse the outline. A missing outline is fatal.
    pub fn read_outline(&self) -> Result<Vec<OutlineEntry>, ConvertError> {
        let path = self.config.outline_path();
        let text = self.fs.read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConvertError::OutlineNotFound(path.clone()),
            _ => ConvertError::OutlineUnreadable {
                path: path.clone(),
                source: e,
            },
        })?;
        Ok(outline::parse(&text, self.config.indent_width))
    }

    /// Walk the outline without writing anything.
    pub fn plan(&self) -> Result<Vec<PlanItem>, ConvertError> {
        let entries = self.read_outline()?;
        let mut items = Vec::new();
        self.walk(&entries, |item| items.push(item));
        Ok(items)
    }

    /// Visit every leaf in outline order.
    fn walk(&self, entries: &[OutlineEntry], mut visit: impl FnMut(PlanItem)) {
        let mut tracker = CategoryTracker::new(self.config.max_depth);
        let mut destinations = HashSet::new();

        for entry in entries {
            let categories = match tracker.observe(entry) {
                Ok(path) => path,
                Err(e) => {
                    if entry.is_group() {
                        tracing::warn!("{e}");
                    } else {
                        visit(PlanItem::Skipped(SkippedEntry {
                            title: entry.title.clone(),
                            source_path: entry.source_path.clone(),
                            reason: SkipReason::TooDeep {
                                depth: e.depth,
                                max_depth: e.max_depth,
                            },
                        }));
                    }
                    continue;
                }
            };

            if entry.is_group() {
                tracing::debug!(title = %entry.title, depth = entry.depth, "category");
                continue;
            }

            let source = self.config.source_path(&entry.source_path);
            let date = match self.timestamps.created_at(&source) {
                Ok(date) => date,
                Err(e) => {
                    let reason = match e {
                        TimestampError::NotFound(_) => SkipReason::NotFound,
                        TimestampError::Io { source, .. } => SkipReason::Unreadable {
                            message: source.to_string(),
                        },
                    };
                    visit(PlanItem::Skipped(SkippedEntry {
                        title: entry.title.clone(),
                        source_path: entry.source_path.clone(),
                        reason,
                    }));
                    continue;
                }
            };

            let destination = self
                .config
                .post_dir
                .join(post_filename(&date, &entry.title));
            let overwrites_earlier = !destinations.insert(destination.clone());

            visit(PlanItem::Post(PlannedPost {
                title: entry.title.clone(),
                link: entry.source_path.clone(),
                categories,
                source,
                destination,
                date,
                overwrites_earlier,
            }));
        }
    }

    /// Convert every leaf of the outline, then relocate resources.
    pub fn run(&self) -> Result<ConversionReport, ConvertError> {
        let entries = self.read_outline()?;
        let post_dir = &self.config.post_dir;
        self.fs
            .create_dir_all(post_dir)
            .map_err(|source| ConvertError::PostDir {
                path: post_dir.clone(),
                source,
            })?;

        let mut posts = Vec::new();
        let mut skipped = Vec::new();

        self.walk(&entries, |item| match item {
            PlanItem::Post(post) => match self.write_post(&post) {
                Ok(()) => posts.push(post),
                Err(reason) => {
                    let entry = SkippedEntry {
                        title: post.title,
                        source_path: post.link,
                        reason,
                    };
                    warn_skipped(&entry);
                    skipped.push(entry);
                }
            },
            PlanItem::Skipped(entry) => {
                warn_skipped(&entry);
                skipped.push(entry);
            }
        });

        let resources = resources::relocate(
            self.fs,
            &self.config.source_root,
            &self.config.resource_dir,
            post_dir,
        );

        tracing::info!(
            written = posts.len(),
            skipped = skipped.len(),
            "conversion finished"
        );
        Ok(ConversionReport {
            posts,
            skipped,
            resources,
        })
    }

    /// Read the source document, rewrite it as a post and write it once.
    fn write_post(&self, planned: &PlannedPost) -> Result<(), SkipReason> {
        let raw = self
            .fs
            .read_to_string(&planned.source)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SkipReason::NotFound,
                _ => SkipReason::Unreadable {
                    message: e.to_string(),
                },
            })?;
        let base = PostMetadata::new(&planned.title, planned.date, &planned.categories);
        let document = post::transform(&raw, &base, &self.config.resource_dir);

        if planned.overwrites_earlier {
            tracing::warn!(
                path = %planned.destination.display(),
                title = %planned.title,
                "destination already written in this run, overwriting"
            );
        }

        if let Err(e) = self.fs.write(&planned.destination, &document.to_string()) {
            // A partial post would still be published.
            match self.fs.remove_file(&planned.destination) {
                Err(remove) if remove.kind() != io::ErrorKind::NotFound => {
                    tracing::warn!(
                        path = %planned.destination.display(),
                        "cannot remove partial post: {remove}"
                    );
                }
                _ => {}
            }
            return Err(SkipReason::WriteFailed {
                message: e.to_string(),
            });
        }

        if let Err(e) = self
            .fs
            .copy_modified_time(&planned.source, &planned.destination)
        {
            tracing::debug!(
                path = %planned.destination.display(),
                "modification time not kept: {e}"
            );
        }

        tracing::info!(
            "{} {} -> {}",
            planned.categories.label(),
            planned.source.display(),
            planned.destination.display()
        );
        Ok(())
    }
}

fn warn_skipped(entry: &SkippedEntry) {
    tracing::warn!(
        title = %entry.title,
        source = %entry.source_path,
        "skipped: {}",
        entry.reason
    );
}

/// Run the pipeline against the real filesystem and clock.
pub fn convert(config: &PipelineConfig) -> Result<ConversionReport, ConvertError> {
    ConversionPipeline::new(config, &LocalFs, &FsTimestamps).run()
}

/// Plan a run against the real filesystem without writing anything.
pub fn plan(config: &PipelineConfig) -> Result<Vec<PlanItem>, ConvertError> {
    ConversionPipeline::new(config, &LocalFs, &FsTimestamps).plan()
}
