//! Document I/O configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigSource, Error, Result};

/// Name written on the main label. Informational only, never read back.
pub const DEFAULT_ROOT_LABEL_NAME: &str = "DOCUMENT ROOT";

/// Container format used when nothing else is configured
pub const DEFAULT_FORMAT: &str = "BinShapeDoc";

/// Options for loading and saving documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Container format to create on save
    pub format: String,
    /// Create missing parent directories before saving
    pub create_parent_dirs: bool,
    /// Name stored on the main label
    pub root_label_name: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            create_parent_dirs: true,
            root_label_name: DEFAULT_ROOT_LABEL_NAME.to_string(),
        }
    }
}

impl IoConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Io(e),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Json(e),
        })
    }

    /// Get the default config file location
    pub fn default_path() -> PathBuf {
        // Use XDG config directory if available, otherwise fallback to ~/.config
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            });
        config_dir.join("shapedoc").join("config.json")
    }

    /// Load the default config file if it exists, else use defaults
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::from_json_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "create_parent_dirs": false }"#).unwrap();

        let config = IoConfig::from_json_file(&path).unwrap();
        assert!(!config.create_parent_dirs);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.root_label_name, DEFAULT_ROOT_LABEL_NAME);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = IoConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { source: ConfigSource::Json(_), .. }));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let err = IoConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Config { source: ConfigSource::Io(_), .. }));
    }

    #[test]
    fn default_path_ends_in_shapedoc_config() {
        let path = IoConfig::default_path();
        assert!(path.ends_with("shapedoc/config.json"));
    }
}
