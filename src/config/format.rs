//! Config file formats.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Toml => write!(f, "toml"),
        }
    }
}

impl ConfigFormat {
    /// Parse a format name or extension.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        Self::from_name(ext)
    }

    /// Check if this format is available (feature enabled).
    pub fn is_available(&self) -> bool {
        match self {
            ConfigFormat::Json => true,
            ConfigFormat::Yaml => cfg!(feature = "yaml"),
            ConfigFormat::Toml => cfg!(feature = "toml"),
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(&self, text: &str) -> Result<T, ConfigError> {
        match self {
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::Invalid(Box::new(e)))
            }

            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::Invalid(Box::new(e)))
            }

            #[cfg(feature = "toml")]
            ConfigFormat::Toml => {
                toml::from_str(text).map_err(|e| ConfigError::Invalid(Box::new(e)))
            }

            #[allow(unreachable_patterns)]
            _ => Err(ConfigError::UnsupportedFormat(self.to_string())),
        }
    }
}
