//! # Storage Traits
//!
//! Storage abstractions the domain layer works against, so the services can
//! run over the YAML settings file, in-memory state in tests, or any other
//! backend without modification.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use shared::TimeSlot;

use super::yaml::SettingsFile;

/// Trait defining the interface for time slot storage operations
pub trait TimeSlotStorage: Send + Sync {
    /// Store a new time slot
    fn store_time_slot(&self, slot: &TimeSlot) -> Result<()>;

    /// List the slots that start on `date`, ordered by start time
    fn list_time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>>;

    /// The most recently started slot, if any
    fn get_latest_time_slot(&self) -> Result<Option<TimeSlot>>;

    /// The last slot that started strictly before `before`
    /// Used to find a slot still running across midnight
    fn get_latest_time_slot_before(&self, before: NaiveDateTime) -> Result<Option<TimeSlot>>;

    /// Replace the stored slot that starts at `slot.start_time`
    /// Returns false if no such slot exists
    fn update_time_slot(&self, slot: &TimeSlot) -> Result<bool>;
}

/// Trait defining the interface for settings storage operations
pub trait SettingsStorage: Send + Sync {
    /// Load the settings, falling back to defaults if none were saved
    fn get_settings(&self) -> Result<SettingsFile>;

    /// Persist the install date
    fn set_install_date(&self, install_date: NaiveDate) -> Result<()>;
}
