//! # YAML Storage
//!
//! File-based storage for the small amount of configuration the app keeps
//! outside the time-slot store.

pub mod settings_repository;

pub use settings_repository::*;
