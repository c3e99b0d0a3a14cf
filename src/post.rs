//! Post rewriting: front matter and resource links.
//!
//! [`transform`] is a pure function from a document's raw text to the text of
//! the post that replaces it:
//!
//! ```text
//! # Getting Started                 ---
//!                                   layout: post
//! ![logo](../../assets/logo.png) →  title: Getting Started
//!                                   date: 2018-05-24 08:48:00
//!                                   categories: [Guide]
//!                                   ---
//!                                   ![logo](/assets/logo.png)
//! ```
//!
//! The first `# ` heading becomes the post title and is removed from the body,
//! together with the blank lines after it. Relative links into the resource
//! directory (`../assets/`, `../../assets/`, ...) become root-anchored
//! (`/assets/`). No other link is touched.

use crate::types::PostMetadata;
use regex::{NoExpand, Regex};
use std::fmt;
use std::sync::LazyLock;

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("H1 regex"));

/// A post ready to be written: effective metadata plus rewritten body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedDocument {
    pub metadata: PostMetadata,
    pub body: String,
}

impl TransformedDocument {
    /// Front matter block including both `---` delimiters.
    pub fn front_matter(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in self.metadata.fields() {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out.push_str("---\n");
        out
    }
}

impl fmt::Display for TransformedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.front_matter(), self.body)
    }
}

/// Build the post for `raw` using `base` as the starting metadata.
pub fn transform(raw: &str, base: &PostMetadata, resource_dir: &str) -> TransformedDocument {
    // A byte order mark hides a heading on the first line.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut metadata = base.clone();
    let body = match extract_title(raw) {
        Some((title, rest)) => {
            metadata.title = title.to_string();
            rest
        }
        None => raw,
    };

    TransformedDocument {
        metadata,
        body: rewrite_resource_links(body, resource_dir),
    }
}

/// Split off the first level-1 heading.
///
/// Returns the heading text and whatever follows the heading line with its
/// leading whitespace removed.
pub fn extract_title(raw: &str) -> Option<(&str, &str)> {
    let caps = H1_RE.captures(raw)?;
    let whole = caps.get(0)?;
    let title = caps.get(1)?.as_str().trim_end_matches('\r');
    Some((title, raw[whole.end()..].trim_start()))
}

/// Replace every `(../)+<dir>/` with `/<dir>/`.
pub fn rewrite_resource_links(text: &str, resource_dir: &str) -> String {
    if resource_dir.is_empty() {
        return text.to_string();
    }
    let pattern = format!(r"(?:\.\./)+{}/", regex::escape(resource_dir));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };
    let replacement = format!("/{resource_dir}/");
    re.replace_all(text, NoExpand(&replacement)).into_owned()
}
