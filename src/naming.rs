//! Post filename convention: `YYYY-MM-DD-slug.md`.
//!
//! The slug is derived from the outline title (not the document heading):
//! whitespace runs collapse to a single `-` and the result is lower-cased.
//!
//! - `"My First   Post"` → `my-first-post`
//! - `"Getting Started"` on 2018-05-24 → `2018-05-24-getting-started.md`

use crate::types::DATE_FORMAT;
use chrono::NaiveDateTime;

/// Lower-case `title` and join its whitespace-separated words with `-`.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Filename for a post created at `date` with outline title `title`.
pub fn post_filename(date: &NaiveDateTime, title: &str) -> String {
    format!("{}-{}.md", date.format(DATE_FORMAT), slugify(title))
}
