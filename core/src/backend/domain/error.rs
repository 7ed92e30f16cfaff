use chrono::NaiveDate;
use thiserror::Error;

/// Contract errors raised by the calendar domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid date range: {min} is after {max}")]
    InvalidRange { min: NaiveDate, max: NaiveDate },

    #[error("{date} is outside the valid range {min}..={max}")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}
