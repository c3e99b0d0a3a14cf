//! Category context for the outline walk.
//!
//! The outline is a flat list standing in for a tree. [`CategoryTracker`]
//! keeps the title last seen at each depth so every entry can be given its
//! ancestor chain. Observing an entry at depth `d` overwrites slot `d`; slots
//! deeper than `d` go stale but are never read before a later entry at that
//! depth overwrites them, because a snapshot only covers `0..=d`.

use crate::types::{CategoryPath, OutlineEntry};
use thiserror::Error;

/// Default number of category levels.
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("outline entry '{title}' is at depth {depth}, deeper than the {max_depth} supported levels")]
pub struct DepthExceeded {
    pub title: String,
    pub depth: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone)]
pub struct CategoryTracker {
    slots: Vec<String>,
}

impl CategoryTracker {
    pub fn new(max_depth: usize) -> Self {
        Self {
            slots: vec![String::new(); max_depth],
        }
    }

    pub fn max_depth(&self) -> usize {
        self.slots.len()
    }

    /// Record `entry` at its depth and return the chain active there.
    ///
    /// Entries deeper than the tracker supports are rejected without
    /// touching any slot.
    pub fn observe(&mut self, entry: &OutlineEntry) -> Result<CategoryPath, DepthExceeded> {
        let depth = entry.depth;
        if depth >= self.slots.len() {
            return Err(DepthExceeded {
                title: entry.title.clone(),
                depth,
                max_depth: self.slots.len(),
            });
        }
        self.slots[depth] = entry.title.clone();
        Ok(CategoryPath {
            segments: self.slots[..=depth].to_vec(),
        })
    }
}

impl Default for CategoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
