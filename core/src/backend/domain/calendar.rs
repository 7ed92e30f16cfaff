//! Calendar grid logic.
//!
//! Month names and six-row grid layout for the calendar screen. The
//! grid is Monday-first, always shows 42 days, and pads each month with the
//! trailing days of the previous month and the leading days of the next.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use shared::{CalendarCell, CalendarDayType, CalendarFocusDate, CalendarMonth, HeaderLabel};

pub const GRID_ROWS: u32 = 6;
pub const DAYS_PER_WEEK: u32 = 7;

/// Stateless helpers for month headers and grid layout
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Column of the first day of the month (0 = Monday, ..., 6 = Sunday)
    pub fn first_day_of_month(&self, month: u32, year: i32) -> u32 {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.weekday().num_days_from_monday())
            .unwrap_or(0)
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Header text for the month containing `date`
    pub fn header_label(&self, date: NaiveDate) -> HeaderLabel {
        HeaderLabel {
            month: self.month_name(date.month()).to_string(),
            year: date.year().to_string(),
        }
    }

    /// Lay out the six-row grid for `focus`. `month_day` builds the cell for
    /// each day that belongs to the month; padding cells are built here.
    pub fn generate_month_grid<F>(&self, focus: CalendarFocusDate, mut month_day: F) -> CalendarMonth
    where
        F: FnMut(NaiveDate, u32) -> CalendarCell,
    {
        let first_day_of_week = self.first_day_of_month(focus.month, focus.year);
        let days = match focus.first_day() {
            Some(first) => {
                let grid_start = first - Duration::days(i64::from(first_day_of_week));
                (0..GRID_ROWS * DAYS_PER_WEEK)
                    .map(|index| {
                        let date = grid_start + Duration::days(i64::from(index));
                        let row = index / DAYS_PER_WEEK;
                        if date < first {
                            CalendarCell::padding(date, row, CalendarDayType::PaddingBefore)
                        } else if focus.contains(date) {
                            month_day(date, row)
                        } else {
                            CalendarCell::padding(date, row, CalendarDayType::PaddingAfter)
                        }
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        debug!(
            "Generated grid for {}/{}: {} cells, first column {}",
            focus.month,
            focus.year,
            days.len(),
            first_day_of_week
        );

        CalendarMonth {
            month: focus.month,
            year: focus.year,
            days,
            first_day_of_week,
        }
    }
}
