//! # Domain Module
//!
//! Business logic behind the calendar screen, independent of any UI
//! framework or storage mechanism.
//!
//! - **calendar_range**: the per-session `CalendarRangeModel`
//! - **calendar**: month arithmetic and six-row grid layout
//! - **settings_service**: install date and the valid date bounds
//! - **time_slot_service**: time slot recording and per-day category summaries
//! - **selected_date_service**: the selected day shared between screens
//! - **time_service**: the clock

pub mod calendar;
pub mod calendar_range;
pub mod error;
pub mod models;
pub mod selected_date_service;
pub mod settings_service;
pub mod time_service;
pub mod time_slot_service;

pub use calendar::*;
pub use calendar_range::*;
pub use error::*;
pub use selected_date_service::*;
pub use settings_service::*;
pub use time_service::*;
pub use time_slot_service::*;
