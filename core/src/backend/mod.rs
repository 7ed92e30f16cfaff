//! # Backend Module
//!
//! Non-UI logic for the calendar, layered as:
//! ```text
//! UI layer (calendar screen)
//!     ↓
//! Domain layer (CalendarRangeModel, services)
//!     ↓
//! Storage layer (settings file, time slot store)
//! ```
//!
//! [`AppServices`] is the composition root: it builds every service once and
//! hands them to each calendar session through plain constructor arguments.

pub mod domain;
pub mod storage;

use anyhow::{Context, Result};
use log::info;
use shared::{Category, TimeSlot};
use std::path::Path;
use std::sync::Arc;

pub use domain::*;
pub use storage::*;

/// Services shared by every screen of the app
#[derive(Clone)]
pub struct AppServices {
    pub time_service: Arc<dyn TimeService>,
    pub settings_service: SettingsService,
    pub time_slot_service: TimeSlotService,
    pub selected_date_service: SelectedDateService,
}

impl AppServices {
    /// Wire the services over the given storage backends. On first launch
    /// the install date is recorded and an uncategorized slot is opened.
    pub fn new(
        settings_storage: Arc<dyn SettingsStorage>,
        time_slot_storage: Arc<dyn TimeSlotStorage>,
        time_service: Arc<dyn TimeService>,
    ) -> Result<Self> {
        let settings_service = SettingsService::load(settings_storage, Arc::clone(&time_service))
            .context("Failed to load settings")?;
        let time_slot_service = TimeSlotService::new(time_slot_storage, Arc::clone(&time_service));

        if settings_service.ensure_install_date()? {
            let first_slot = TimeSlot::new(time_service.now(), Category::Unknown);
            time_slot_service
                .add_time_slot(first_slot)
                .context("Failed to add the first time slot")?;
        }

        let selected_date_service = SelectedDateService::new(time_service.today());

        Ok(Self {
            time_service,
            settings_service,
            time_slot_service,
            selected_date_service,
        })
    }

    /// Settings in `data_dir/settings.yaml`, time slots in memory
    pub fn initialize(data_dir: impl AsRef<Path>, time_service: Arc<dyn TimeService>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        info!("Initializing services with data directory {:?}", data_dir);

        Self::new(
            Arc::new(YamlSettingsRepository::new(data_dir)),
            Arc::new(InMemoryTimeSlotRepository::new()),
            time_service,
        )
    }

    /// A fresh model for one calendar screen session. The range is
    /// recomputed here, so a session opened after midnight includes the new
    /// day.
    pub fn calendar_model(&self) -> CalendarRangeModel<TimeSlotService> {
        CalendarRangeModel::from_settings(
            &self.settings_service,
            self.time_slot_service.clone(),
            self.selected_date_service.clone(),
        )
    }
}

/// Initialize the services against the wall clock
pub fn initialize_backend(data_dir: impl AsRef<Path>) -> Result<AppServices> {
    AppServices::initialize(data_dir, Arc::new(DefaultTimeService))
}
