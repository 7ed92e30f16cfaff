//! # In-Memory Storage
//!
//! Storage backends that keep everything in process memory. Used by the
//! composition root for time slots and by tests for settings.

pub mod settings_repository;
pub mod time_slot_repository;

pub use settings_repository::*;
pub use time_slot_repository::*;
