//! # Storage Module
//!
//! Persistence seams for the domain layer.
//!
//! - **traits**: `TimeSlotStorage` and `SettingsStorage`
//! - **memory**: in-process implementations of both traits
//! - **yaml**: the `settings.yaml` file backend

pub mod memory;
pub mod traits;
pub mod yaml;

pub use memory::{InMemorySettingsRepository, InMemoryTimeSlotRepository};
pub use traits::{SettingsStorage, TimeSlotStorage};
pub use yaml::{SettingsFile, YamlSettingsRepository, DATA_FORMAT_VERSION, SETTINGS_FILE_NAME};
