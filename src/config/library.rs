//! Library configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigFormat;
use crate::error::ConfigError;
use crate::render::DEFAULT_CLASS_PREFIX;

/// Settings for a `DocumentLibrary`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Always re-render and show placeholders for unreadable documents
    pub debug: bool,
    /// Prefix for every CSS class in rendered markup
    pub class_prefix: String,
    /// Path or URL that download GUIDs are appended to
    pub download_prefix: String,
    /// `chrono` format string for caption dates
    pub date_format: String,
    pub store: StoreConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            debug: false,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            download_prefix: "/download".to_string(),
            date_format: "%B %-d, %Y".to_string(),
            store: StoreConfig::default(),
        }
    }
}

/// Backing store selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Records live only as long as the process
    #[default]
    Memory,
    /// Records persisted as JSON files under `path`
    JsonDir { path: PathBuf },
}

impl LibraryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_download_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.download_prefix = prefix.into();
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Parse configuration text in the given format.
    pub fn from_str_with(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        format.parse(text)
    }

    /// Load configuration from a file, picking the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            ConfigError::UnsupportedFormat(path.to_string_lossy().into_owned())
        })?;
        let text = std::fs::read_to_string(path)?;
        let config = format.parse(&text)?;
        tracing::debug!(path = %path.display(), %format, "loaded library config");
        Ok(config)
    }
}
