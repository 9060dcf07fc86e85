//! User settings persistence.
//!
//! Connection details (never the password) and view preferences are kept
//! between sessions in `settings.json` under the platform config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::{SmoothingLevel, SmoothingMethod};
use crate::panels::ViewMode;

pub const DEFAULT_HOST: &str = "192.168.0.1";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_DIRECTORY: &str = "/G/USD_TPL/";

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default)]
    pub smoothing_level: SmoothingLevel,
    #[serde(default)]
    pub smoothing_method: SmoothingMethod,
    #[serde(default)]
    pub view_mode: ViewMode,
}

fn default_version() -> u32 {
    1
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_directory() -> String {
    DEFAULT_DIRECTORY.to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            host: default_host(),
            username: default_username(),
            directory: default_directory(),
            smoothing_level: SmoothingLevel::default(),
            smoothing_method: SmoothingMethod::default(),
            view_mode: ViewMode::default(),
        }
    }
}

impl UserSettings {
    /// Get the config directory path for EnvPlot
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("EnvPlot"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("EnvPlot"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("envplot"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
