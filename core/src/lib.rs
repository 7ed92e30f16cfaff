//! # Teferi Core
//!
//! Non-UI logic behind the Teferi calendar screen: the date range the
//! calendar may show, the selected day, the visible month segment, and
//! per-day category summaries built from recorded time slots.
//!
//! The rendering layer owns a [`CalendarRangeModel`] per screen session and
//! reads cell state from it; everything else lives behind the services in
//! [`backend::domain`].

pub mod backend;
pub mod logging;

pub use backend::{AppServices, CalendarRangeModel, CalendarError};
