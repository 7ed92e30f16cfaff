use anyhow::Result;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use crate::backend::storage::yaml::SettingsFile;
use crate::backend::storage::SettingsStorage;

/// Settings storage that never touches the filesystem
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsRepository {
    settings: Arc<Mutex<SettingsFile>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_install_date(install_date: NaiveDate) -> Self {
        let settings = SettingsFile {
            install_date: Some(install_date),
            ..SettingsFile::default()
        };
        Self {
            settings: Arc::new(Mutex::new(settings)),
        }
    }
}

impl SettingsStorage for InMemorySettingsRepository {
    fn get_settings(&self) -> Result<SettingsFile> {
        let settings = self
            .settings
            .lock()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        Ok(settings.clone())
    }

    fn set_install_date(&self, install_date: NaiveDate) -> Result<()> {
        let mut settings = self
            .settings
            .lock()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        settings.install_date = Some(install_date);
        Ok(())
    }
}
