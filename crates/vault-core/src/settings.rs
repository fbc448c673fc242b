//! Application settings management
//!
//! Stores configuration in a plain JSON file next to the credential data.
//! A missing or unreadable file falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::credential::{CREDENTIALS_KEY, DEFAULT_MIN_PASSWORD_LENGTH};
use crate::error::Result;

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// Key the credential list is stored under
    pub storage_key: String,
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Write indented JSON to the storage file
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            storage_key: CREDENTIALS_KEY.to_string(),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            pretty_json: false,
        }
    }
}

/// Settings manager
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    /// Create a new settings manager
    pub fn new(storage_dir: &Path) -> Self {
        let settings_file = storage_dir.join("settings.json");
        let settings = Self::load_from_file(&settings_file).unwrap_or_else(|e| {
            warn!("Could not read settings, using defaults: {}", e);
            Settings::default()
        });

        Self {
            settings_file,
            settings,
        }
    }

    /// Load settings from file
    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.settings)?;

        // Write atomically using temp file
        let temp_path = self.settings_file.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &self.settings_file)?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable settings
    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Update settings and save
    pub fn update(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.save()
    }

    /// Reset settings to defaults and delete settings file
    pub fn reset(&mut self) -> Result<()> {
        self.settings = Settings::default();

        if self.settings_file.exists() {
            std::fs::remove_file(&self.settings_file)?;
        }

        Ok(())
    }
}
