//! Outline (`SUMMARY.md`) parsing.
//!
//! A book outline is a nested bullet list of Markdown links:
//!
//! ```text
//! * [Introduction](README.md)
//! * [Guide]()
//!   * [Install](guide/install.md)
//!   * [Usage](guide/usage.md)
//! ```
//!
//! Each recognised line becomes an [`OutlineEntry`] whose depth is the width
//! of its leading whitespace divided by the indent width. Anything else in the
//! file (headings, prose, blank lines) is ignored. Entries come back in source
//! order, which the category walk relies on.

use crate::types::OutlineEntry;
use regex::Regex;
use std::sync::LazyLock;

/// Default whitespace characters per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// `<indent><bullet> [title](path)`; the path may hold one level of
/// balanced parentheses, as in `notes(1).md`.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)[*+-] *\[(.*?)\]\(((?:[^()\r\n]|\([^()\r\n]*\))*)\)")
        .expect("outline entry regex")
});

/// Parse outline text into entries. `indent_width` must be non-zero.
pub fn parse(text: &str, indent_width: usize) -> Vec<OutlineEntry> {
    let indent_width = indent_width.max(1);
    ENTRY_RE
        .captures_iter(text)
        .map(|caps| {
            let indent = caps[1].chars().count();
            OutlineEntry::new(indent / indent_width, &caps[2], caps[3].trim())
        })
        .collect()
}
