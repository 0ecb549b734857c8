//! Content configuration module.
//!
//! Handles loading and validating the optional `config.toml` that sits at the
//! root of the posts directory. Stock defaults are always the base layer; the
//! user file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! posts/
//! ├── config.toml              # Optional, overrides stock defaults
//! ├── 001-hello/
//! │   ├── meta.json
//! │   └── hello.md
//! └── 002-second/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! meta_file = "meta.json"   # Descriptor file name inside each post folder
//! order = "newest-first"    # Display order: "newest-first" or "oldest-first"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the posts root.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Descriptor file name used when nothing overrides it.
pub const DEFAULT_META_FILE: &str = "meta.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Descriptor file name looked up inside every post folder.
    pub meta_file: String,
    /// Order in which posts are presented.
    pub order: DisplayOrder,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            meta_file: DEFAULT_META_FILE.to_string(),
            order: DisplayOrder::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    ///
    /// `meta_file` must name a file directly inside the post folder, so it
    /// can be neither empty nor contain a path separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meta_file.trim().is_empty() {
            return Err(ConfigError::Validation("meta_file must not be empty".into()));
        }
        if self.meta_file.contains('/') || self.meta_file.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "meta_file must be a bare file name, got {:?}",
                self.meta_file
            )));
        }
        if self.meta_file == "." || self.meta_file == ".." {
            return Err(ConfigError::Validation(format!(
                "meta_file must be a file name, got {:?}",
                self.meta_file
            )));
        }
        Ok(())
    }
}

/// Presentation order of the loaded posts.
///
/// Posts are always stored oldest first (folder order); this only controls
/// how callers walk them for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Values given on the command line, applied on top of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub meta_file: Option<String>,
    pub order: Option<DisplayOrder>,
}

impl SiteConfig {
    /// Replace the fields `overrides` sets and re-validate.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(meta_file) = overrides.meta_file {
            self.meta_file = meta_file;
        }
        if let Some(order) = overrides.order {
            self.order = order;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Load config from `config.toml` in the posts root.
///
/// Missing file means stock defaults; keys left out keep their defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gb configuration
# ================
# All settings are optional. Values shown below are the defaults.
# Place this file at the root of the posts directory.
# Unknown keys will cause an error.

# Name of the descriptor file inside every post folder. The descriptor is a
# JSON object with "title", "visible", "path" (body file, relative to the
# folder) and "id".
meta_file = "meta.json"

# Display order of loaded posts: "newest-first" or "oldest-first".
# Posts are ordered by folder name; the last folder is the newest.
order = "newest-first"
"##
}
