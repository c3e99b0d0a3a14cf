//! Shared types passed between the outline walk and the post writer.
//!
//! An outline run produces these in order: [`OutlineEntry`] values from the
//! parser, a [`CategoryPath`] snapshot per entry from the tracker, and one
//! [`PostMetadata`] per leaf that actually gets written.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used in front matter (`date:`).
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only layout used as the post filename prefix.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recognised bullet line from the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Nesting level: leading whitespace width divided by the indent width.
    pub depth: usize,
    /// Link text of the bullet.
    pub title: String,
    /// Link target. Empty for pure grouping headers.
    pub source_path: String,
}

impl OutlineEntry {
    pub fn new(depth: usize, title: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            depth,
            title: title.into(),
            source_path: source_path.into(),
        }
    }

    /// A grouping header names a category but has no document behind it.
    pub fn is_group(&self) -> bool {
        self.source_path.is_empty()
    }
}

/// Ancestor chain active at an outline entry, the entry's own title last.
///
/// `segments[d]` is the title last seen at depth `d`. Segments above the
/// entry's depth can be empty when the outline starts mid-tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPath {
    pub segments: Vec<String>,
}

impl CategoryPath {
    /// Depth of the entry this snapshot was taken for.
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Categories a post at this position belongs to.
    ///
    /// Top-level leaves are their own category; nested leaves belong to
    /// their ancestors.
    pub fn categories(&self) -> &[String] {
        match self.segments.len() {
            0 => &[],
            1 => &self.segments[..1],
            n => &self.segments[..n - 1],
        }
    }

    /// Front matter rendering: `[A, B]`.
    pub fn label(&self) -> String {
        format!("[{}]", self.categories().join(", "))
    }
}

/// Front matter of a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub layout: String,
    pub title: String,
    pub date: NaiveDateTime,
    pub categories: Vec<String>,
}

impl PostMetadata {
    pub fn new(title: impl Into<String>, date: NaiveDateTime, categories: &CategoryPath) -> Self {
        Self {
            layout: "post".to_string(),
            title: title.into(),
            date,
            categories: categories.categories().to_vec(),
        }
    }

    /// Fields in their fixed front matter order.
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("layout", self.layout.clone()),
            ("title", self.title.clone()),
            ("date", self.date.format(DATE_TIME_FORMAT).to_string()),
            ("categories", format!("[{}]", self.categories.join(", "))),
        ]
    }
}
