//! # book2blog
//!
//! Migrates a GitBook-style documentation tree into blog posts. The book's
//! outline (`SUMMARY.md`) is a nested list of links; every linked document
//! becomes one dated post with front matter, and the nesting becomes the
//! post's categories.
//!
//! ```text
//! book/                                  blog/source/
//! ├── SUMMARY.md                         ├── _posts/
//! │     * [Guide]()                      │   ├── 2018-05-24-install.md
//! │       * [Install](guide/install.md)  │   └── 2018-05-24-usage.md
//! │       * [Usage](guide/usage.md)      └── assets/
//! ├── guide/
//! │   ├── install.md
//! │   └── usage.md
//! └── assets/
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Parse     SUMMARY.md  →  outline entries (depth, title, link)
//! 2. Walk      entries     →  categories + dated destinations
//! 3. Write     each leaf   →  front matter + rooted links, one write
//! 4. Relocate  assets/     →  sibling of the posts directory (once)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | Parses outline bullet lines into ordered entries |
//! | [`category`] | Tracks the ancestor chain of titles during the walk |
//! | [`naming`] | `YYYY-MM-DD-slug.md` post filenames |
//! | [`post`] | Front matter and resource link rewriting (pure) |
//! | [`timestamp`] | Document creation times |
//! | [`filesystem`] | Filesystem trait and the local implementation |
//! | [`resources`] | Copies the shared resource directory next to the posts |
//! | [`convert`] | Orchestrates a run: plan, write, relocate |
//! | [`config`] | `book2blog.toml` loading, merging and validation |
//! | [`types`] | Shared types (`OutlineEntry`, `CategoryPath`, `PostMetadata`) |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Model
//!
//! A run either walks the whole outline or stops on a fatal configuration
//! problem (missing outline, invalid config). Everything else is isolated to
//! the entry it concerns: a missing document is skipped with a warning and the
//! walk continues. Resource relocation only ever warns.

pub mod category;
pub mod config;
pub mod convert;
pub mod filesystem;
pub mod naming;
pub mod outline;
pub mod output;
pub mod post;
pub mod resources;
pub mod timestamp;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
