//! Conversion configuration.
//!
//! Settings live in an optional `book2blog.toml` in the book root. Values in
//! the file are layered on top of the stock defaults, so the file only needs
//! the keys it wants to change:
//!
//! ```toml
//! [outline]
//! file = "SUMMARY.md"      # Outline file, relative to the book root
//! indent_width = 2         # Whitespace characters per nesting level
//! max_depth = 3            # Category levels
//!
//! [posts]
//! dir = "source/_posts"    # Where posts are written, relative to the working directory
//! resource_dir = "assets"  # Shared asset directory name
//! ```
//!
//! Unknown keys are rejected to catch typos early. Command-line flags override
//! whatever the file says; see [`BookConfig::with_overrides`].

use crate::category::DEFAULT_MAX_DEPTH;
use crate::outline::DEFAULT_INDENT_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the book root.
pub const CONFIG_FILE: &str = "book2blog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration, after defaults and overrides are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Outline location and shape.
    pub outline: OutlineConfig,
    /// Post output settings.
    pub posts: PostsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    /// Outline filename, relative to the book root.
    pub file: String,
    /// Leading whitespace characters per nesting level.
    pub indent_width: usize,
    /// Deepest supported nesting (number of category levels).
    pub max_depth: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            file: "SUMMARY.md".to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostsConfig {
    /// Destination directory for posts. A relative path resolves against the
    /// working directory, like `--dest`, not against the book root.
    pub dir: String,
    /// Name of the shared resource directory in the book root.
    pub resource_dir: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            dir: "source/_posts".to_string(),
            resource_dir: "assets".to_string(),
        }
    }
}

impl BookConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outline.file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "outline.file must not be empty".into(),
            ));
        }
        if self.outline.indent_width == 0 {
            return Err(ConfigError::Validation(
                "outline.indent_width must be greater than 0".into(),
            ));
        }
        if self.outline.max_depth == 0 {
            return Err(ConfigError::Validation(
                "outline.max_depth must be greater than 0".into(),
            ));
        }
        if self.posts.dir.trim().is_empty() {
            return Err(ConfigError::Validation("posts.dir must not be empty".into()));
        }
        let res = &self.posts.resource_dir;
        if res.is_empty() || res == "." || res == ".." || res.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "posts.resource_dir must be a single directory name, got '{res}'"
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides, then re-validate.
    pub fn with_overrides(
        mut self,
        post_dir: Option<&Path>,
        resource_dir: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = post_dir {
            self.posts.dir = dir.to_string_lossy().into_owned();
        }
        if let Some(res) = resource_dir {
            self.posts.resource_dir = res.to_string();
        }
        self.validate()?;
        Ok(self)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BookConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `book2blog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for the book rooted at `root`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<BookConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: BookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `book2blog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# book2blog Configuration
# ======================
# Place this file in the book root as book2blog.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Outline (table of contents)
# ---------------------------------------------------------------------------
[outline]
# Outline file, relative to the book root.
file = "SUMMARY.md"

# Leading whitespace characters per nesting level.
indent_width = 2

# Number of category levels. Deeper entries are skipped with a warning.
max_depth = 3

# ---------------------------------------------------------------------------
# Posts
# ---------------------------------------------------------------------------
[posts]
# Directory posts are written to. Overridden by --dest. A relative path is
# resolved against the directory book2blog runs in (usually the blog root),
# not against the book root.
dir = "source/_posts"

# Shared resource directory in the book root. It is copied next to the
# posts directory, and ../<resource_dir>/ links become /<resource_dir>/.
# Overridden by --resources.
resource_dir = "assets"
"##
}
