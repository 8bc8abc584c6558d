//! Demo application settings

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Rows per table page
    pub page_size: usize,

    /// Theme name ("dark" or "light")
    pub theme: String,

    /// Search quiescence window in milliseconds
    pub debounce_ms: u64,

    /// Log file path
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            theme: "dark".to_string(),
            debounce_ms: 300,
            log_file: Self::config_dir()
                .join("demo.log")
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Settings {
    /// Load settings from file, writing defaults on first run
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Self = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.save(Some(&config_path))?;
            Ok(settings)
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&PathBuf>) -> Result<()> {
        let default_path = Self::default_config_path();
        let config_path = path.unwrap_or(&default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("com", "datagrid", "datagrid-demo")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
                    .join("datagrid-demo")
            })
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}
