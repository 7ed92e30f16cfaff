use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Category a tracked interval of the day is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Commute,
    Food,
    Friends,
    Work,
    Leisure,
    /// Fallback for slots the user has not categorized yet
    Unknown,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Commute,
        Category::Food,
        Category::Friends,
        Category::Work,
        Category::Leisure,
        Category::Unknown,
    ];

    /// Human-readable name shown next to the category color
    pub fn name(&self) -> &'static str {
        match self {
            Category::Commute => "Commute",
            Category::Food => "Food",
            Category::Friends => "Friends",
            Category::Work => "Work",
            Category::Leisure => "Leisure",
            Category::Unknown => "Unknown",
        }
    }

    /// Hex color used when drawing the category inside a calendar cell
    pub fn color(&self) -> &'static str {
        match self {
            Category::Commute => "#63D5EE",
            Category::Food => "#FF6453",
            Category::Friends => "#3EC0A8",
            Category::Work => "#FFC31B",
            Category::Leisure => "#DC7CE0",
            Category::Unknown => "#CECDCD",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded, categorized interval of the user's day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveDateTime,
    /// `None` while the slot is still running
    pub end_time: Option<NaiveDateTime>,
    pub category: Category,
}

impl TimeSlot {
    pub fn new(start_time: NaiveDateTime, category: Category) -> Self {
        Self {
            start_time,
            end_time: None,
            category,
        }
    }

    /// Calendar day the slot belongs to
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Share of a day's tracked time spent in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub category: Category,
    /// Fraction of the day's tracked time, in `0.0..=1.0`
    pub proportion: f64,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing day of the previous month shown before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Leading day of the next month filling the grid after the month ends
    PaddingAfter,
}

/// Render state for a single cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    /// Grid row (0..6), used to stagger the cell reveal
    pub row: u32,
    pub day_type: CalendarDayType,
    pub is_selected: bool,
    pub allows_scrolling: bool,
    pub category_slots: Vec<CategorySlot>,
}

impl CalendarCell {
    /// A cell outside the displayed month: not selectable, nothing to draw
    pub fn padding(date: NaiveDate, row: u32, day_type: CalendarDayType) -> Self {
        Self {
            date,
            day: date.day(),
            row,
            day_type,
            is_selected: false,
            allows_scrolling: false,
            category_slots: Vec::new(),
        }
    }

    pub fn belongs_to_month(&self) -> bool {
        self.day_type == CalendarDayType::MonthDay
    }
}

/// A six-row month page of the calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub days: Vec<CalendarCell>,
    pub first_day_of_week: u32, // 0 = Monday, 1 = Tuesday, etc.
}

impl CalendarMonth {
    /// Cells grouped by grid row
    pub fn rows(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.days.chunks(7)
    }
}

/// Month/year pair identifying a calendar segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarFocusDate {
    // Field order matters for the derived ordering
    pub year: i32,
    pub month: u32,
}

impl CalendarFocusDate {
    /// Truncate a date to its month
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month, `None` if the month is out of range
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl Default for CalendarFocusDate {
    fn default() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }
}

/// Font weight of a header label segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextWeight {
    Bold,
    Regular,
}

/// Month header shown above the calendar: bold month name followed by the year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderLabel {
    pub month: String,
    pub year: String,
}

impl HeaderLabel {
    /// Styled runs in display order
    pub fn segments(&self) -> [(&str, TextWeight); 2] {
        [
            (self.month.as_str(), TextWeight::Bold),
            (self.year.as_str(), TextWeight::Regular),
        ]
    }
}

impl fmt::Display for HeaderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
