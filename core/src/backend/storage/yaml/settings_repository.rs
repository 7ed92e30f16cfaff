//! # YAML Settings Repository
//!
//! Stores the app settings in a single YAML file `settings.yaml` at the root
//! of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! install_date: 2017-03-14
//! data_format_version: "1.0"
//! created_at: "2017-03-14T08:12:00Z"
//! updated_at: "2017-03-14T08:12:00Z"
//! ```
//!
//! Writes go through a temp file and a rename so a crash never leaves a
//! half-written settings file behind.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::storage::SettingsStorage;

pub const SETTINGS_FILE_NAME: &str = "settings.yaml";
pub const DATA_FORMAT_VERSION: &str = "1.0";

/// Settings structure as persisted on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Day the app was first launched (None until onboarding finishes)
    pub install_date: Option<NaiveDate>,
    /// Data format version for future migrations
    pub data_format_version: String,
    /// When the settings file was first created
    pub created_at: String,
    /// When the settings file was last updated
    pub updated_at: String,
}

impl Default for SettingsFile {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            install_date: None,
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Settings repository backed by `settings.yaml`
#[derive(Debug, Clone)]
pub struct YamlSettingsRepository {
    base_directory: PathBuf,
}

impl YamlSettingsRepository {
    pub fn new(base_directory: impl AsRef<Path>) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    fn settings_path(&self) -> PathBuf {
        self.base_directory.join(SETTINGS_FILE_NAME)
    }

    /// Load settings from file, creating the default file if it doesn't exist
    fn load_or_create_settings(&self) -> Result<SettingsFile> {
        let settings_path = self.settings_path();

        if settings_path.exists() {
            let yaml_content = fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {:?}", settings_path))?;
            let settings: SettingsFile = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {:?}", settings_path))?;
            debug!("Loaded settings from {:?}", settings_path);
            Ok(settings)
        } else {
            let settings = SettingsFile::default();
            self.save_settings(&settings)?;
            info!("Created default settings at {:?}", settings_path);
            Ok(settings)
        }
    }

    fn save_settings(&self, settings: &SettingsFile) -> Result<()> {
        let settings_path = self.settings_path();

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)
                .with_context(|| format!("Failed to create {:?}", self.base_directory))?;
            info!("Created data directory: {:?}", self.base_directory);
        }

        let yaml_content = serde_yaml::to_string(settings)?;

        let temp_path = settings_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &settings_path)
            .with_context(|| format!("Failed to replace {:?}", settings_path))?;

        debug!("Saved settings to {:?}", settings_path);
        Ok(())
    }
}

impl SettingsStorage for YamlSettingsRepository {
    fn get_settings(&self) -> Result<SettingsFile> {
        self.load_or_create_settings()
    }

    fn set_install_date(&self, install_date: NaiveDate) -> Result<()> {
        let mut settings = self.load_or_create_settings()?;
        settings.install_date = Some(install_date);
        settings.updated_at = Utc::now().to_rfc3339();

        self.save_settings(&settings)?;
        info!("Set install date to {}", install_date);
        Ok(())
    }
}
