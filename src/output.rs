//! CLI output formatting for `convert` and `check`.
//!
//! Output is post-centric: each post leads with its positional index, its
//! categories and its title, with the source and destination paths shown as
//! indented context lines. Skipped entries and resource relocation follow in
//! their own sections.
//!
//! ```text
//! Posts
//! 001 [User Guide] Getting Started
//!     Source: book/guide/getting-started.md
//!     Post: _posts/2018-05-24-getting-started.md
//!
//! Skipped
//!     Troubleshooting (guide/troubleshooting.md): not found
//!
//! Resources
//!     book/assets → assets (4 files)
//!
//! Converted 1 post, 1 skipped, 1 warning
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*`
//! wrappers write them to stdout.

use crate::convert::{ConversionReport, PlanItem, PlannedPost, SkippedEntry};
use crate::resources::RelocateOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn post_lines(index: usize, post: &PlannedPost) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        format_index(index),
        post.categories.label(),
        post.title
    )];
    lines.push(format!("    Source: {}", post.source.display()));
    let marker = if post.overwrites_earlier {
        " (overwrites earlier post)"
    } else {
        ""
    };
    lines.push(format!("    Post: {}{}", post.destination.display(), marker));
    lines
}

fn skipped_line(entry: &SkippedEntry) -> String {
    format!(
        "    {} ({}): {}",
        entry.title, entry.source_path, entry.reason
    )
}

fn resource_line(outcome: &RelocateOutcome) -> String {
    match outcome {
        RelocateOutcome::Copied { from, to, files } => format!(
            "    {} \u{2192} {} ({})",
            from.display(),
            to.display(),
            plural(*files as usize, "file")
        ),
        RelocateOutcome::SourceMissing { from } => {
            format!("    Not found: {} (nothing copied)", from.display())
        }
        RelocateOutcome::DestinationExists { to } => {
            format!("    Already exists: {} (left untouched)", to.display())
        }
        RelocateOutcome::Failed { to, reason, .. } => {
            format!("    Failed: {} ({})", to.display(), reason)
        }
    }
}

/// Format the result of a `convert` run.
pub fn format_convert_output(report: &ConversionReport) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    for (i, post) in report.posts.iter().enumerate() {
        lines.extend(post_lines(i + 1, post));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        lines.extend(report.skipped.iter().map(skipped_line));
    }

    lines.push(String::new());
    lines.push("Resources".to_string());
    lines.push(resource_line(&report.resources));

    lines.push(String::new());
    lines.push(format!(
        "Converted {}, {} skipped, {}",
        plural(report.posts.len(), "post"),
        report.skipped.len(),
        plural(report.warning_count(), "warning")
    ));
    lines
}

/// Print convert output to stdout.
pub fn print_convert_output(report: &ConversionReport) {
    for line in format_convert_output(report) {
        println!("{}", line);
    }
}

/// Format a `check` plan: what `convert` would do, in outline order.
pub fn format_check_output(plan: &[PlanItem]) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    let mut skipped = Vec::new();
    let mut index = 0;
    for item in plan {
        match item {
            PlanItem::Post(post) => {
                index += 1;
                lines.extend(post_lines(index, post));
            }
            PlanItem::Skipped(entry) => skipped.push(skipped_line(entry)),
        }
    }

    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        let count = skipped.len();
        lines.extend(skipped);
        lines.push(String::new());
        lines.push(format!(
            "{} would be written, {} skipped",
            plural(index, "post"),
            count
        ));
    } else {
        lines.push(String::new());
        lines.push(format!("{} would be written", plural(index, "post")));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(plan: &[PlanItem]) {
    for line in format_check_output(plan) {
        println!("{}", line);
    }
}
