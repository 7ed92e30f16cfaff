//! Domain model for the span of days the calendar may show.
use chrono::NaiveDate;
use serde::Serialize;
use shared::CalendarFocusDate;

use crate::backend::domain::CalendarError;

/// Inclusive, non-empty range of selectable days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl DateRange {
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Result<Self, CalendarError> {
        if min_date > max_date {
            return Err(CalendarError::InvalidRange {
                min: min_date,
                max: max_date,
            });
        }
        Ok(Self { min_date, max_date })
    }

    /// Range from the install date up to today. An install date in the
    /// future collapses the range to today.
    pub fn from_install_date(install_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let min_date = install_date.map_or(today, |date| date.min(today));
        Self {
            min_date,
            max_date: today,
        }
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }

    pub fn min_month(&self) -> CalendarFocusDate {
        CalendarFocusDate::from_date(self.min_date)
    }

    pub fn max_month(&self) -> CalendarFocusDate {
        CalendarFocusDate::from_date(self.max_date)
    }

    /// Every month touched by the range, oldest first
    pub fn months(&self) -> Vec<CalendarFocusDate> {
        let last = self.max_month();
        let mut months = Vec::new();
        let mut month = self.min_month();
        while month <= last {
            months.push(month);
            month = month.next();
        }
        months
    }
}
