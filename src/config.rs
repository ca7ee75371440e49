//! Preview configuration persistence
//!
//! Stores user preferences in `~/.config/markview/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::export::DEFAULT_EXPORT_FILENAME;
use crate::markdown::DARK_THEME_ID;
use crate::pipeline::ConvertOptions;

/// Preview configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Selected theme id ("default-dark" or "default-light")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// File name suggested when exporting HTML
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Apply syntax highlighting to fenced code blocks
    #[serde(default = "default_highlight_code")]
    pub highlight_code: bool,
}

fn default_theme() -> String {
    DARK_THEME_ID.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

fn default_highlight_code() -> bool {
    true
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            export_file_name: default_export_file_name(),
            highlight_code: default_highlight_code(),
        }
    }
}

impl PreviewConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Conversion settings derived from this config
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            highlight_code: self.highlight_code,
        }
    }
}
