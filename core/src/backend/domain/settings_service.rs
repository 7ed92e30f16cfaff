//! Settings service for the calendar.
//!
//! Owns the install date, which together with today's date bounds the days
//! the calendar lets the user reach.

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::sync::{Arc, Mutex};

use crate::backend::domain::models::DateRange;
use crate::backend::domain::TimeService;
use crate::backend::storage::SettingsStorage;

#[derive(Clone)]
pub struct SettingsService {
    storage: Arc<dyn SettingsStorage>,
    time_service: Arc<dyn TimeService>,
    /// Cached copy of the persisted install date
    install_date: Arc<Mutex<Option<NaiveDate>>>,
}

impl SettingsService {
    /// Load the persisted settings
    pub fn load(storage: Arc<dyn SettingsStorage>, time_service: Arc<dyn TimeService>) -> Result<Self> {
        let settings = storage.get_settings()?;
        info!("Loaded settings, install date: {:?}", settings.install_date);

        Ok(Self {
            storage,
            time_service,
            install_date: Arc::new(Mutex::new(settings.install_date)),
        })
    }

    pub fn install_date(&self) -> Option<NaiveDate> {
        match self.install_date.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_install_date(&self, date: NaiveDate) -> Result<()> {
        self.storage.set_install_date(date)?;
        match self.install_date.lock() {
            Ok(mut guard) => *guard = Some(date),
            Err(poisoned) => *poisoned.into_inner() = Some(date),
        }
        Ok(())
    }

    /// Record today as the install date if none is set yet.
    /// Returns true on first launch.
    pub fn ensure_install_date(&self) -> Result<bool> {
        if self.install_date().is_some() {
            return Ok(false);
        }
        let today = self.time_service.today();
        info!("First launch, recording install date {}", today);
        self.set_install_date(today)?;
        Ok(true)
    }

    /// Oldest day the calendar may show
    pub fn min_valid_date(&self) -> NaiveDate {
        self.date_range().min_date()
    }

    /// Newest day the calendar may show (today)
    pub fn max_valid_date(&self) -> NaiveDate {
        self.date_range().max_date()
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::from_install_date(self.install_date(), self.time_service.today())
    }
}
