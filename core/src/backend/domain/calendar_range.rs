//! Calendar range model.
//!
//! Display state for one calendar screen session: the selectable date range,
//! the selected day, the month segment scrolled into view, and the cell state
//! for each month page. All operations are synchronous reads and writes of
//! in-memory state; the only collaborator call is the per-day category
//! lookup.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use shared::{CalendarCell, CalendarDayType, CalendarFocusDate, CalendarMonth, CategorySlot, HeaderLabel};
use tokio::sync::watch;

use crate::backend::domain::models::DateRange;
use crate::backend::domain::{
    CalendarError, CalendarService, CategorySlotSource, SelectedDateService, SettingsService,
};

pub struct CalendarRangeModel<S> {
    range: DateRange,
    category_source: S,
    selected_dates: SelectedDateService,
    visible_segment: watch::Sender<CalendarFocusDate>,
    calendar: CalendarService,
}

impl<S: CategorySlotSource> CalendarRangeModel<S> {
    /// Build a model over `range`. A previously selected date that falls
    /// outside the range is replaced by the last valid day.
    pub fn new(range: DateRange, category_source: S, selected_dates: SelectedDateService) -> Self {
        let selected = selected_dates.current();
        if !range.contains(selected) {
            warn!(
                "Selected date {} outside {}..={}, selecting {}",
                selected,
                range.min_date(),
                range.max_date(),
                range.max_date()
            );
            selected_dates.set(range.max_date());
        }

        let (visible_segment, _) = watch::channel(CalendarFocusDate::from_date(selected_dates.current()));

        Self {
            range,
            category_source,
            selected_dates,
            visible_segment,
            calendar: CalendarService::new(),
        }
    }

    /// Build a model bounded by the install date and today
    pub fn from_settings(
        settings: &SettingsService,
        category_source: S,
        selected_dates: SelectedDateService,
    ) -> Self {
        Self::new(settings.date_range(), category_source, selected_dates)
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    pub fn min_valid_date(&self) -> NaiveDate {
        self.range.min_date()
    }

    pub fn max_valid_date(&self) -> NaiveDate {
        self.range.max_date()
    }

    /// Whether the user may navigate to `date`
    pub fn can_scroll(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }

    /// Category summary for `date`, exactly as the collaborator returns it
    pub fn category_slots(&self, date: NaiveDate) -> Vec<CategorySlot> {
        self.category_source.category_slots(date)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_dates.current()
    }

    /// Select `date`.
    ///
    /// The caller must check [`can_scroll`](Self::can_scroll) first; the model
    /// never clamps. Use [`select_date`](Self::select_date) for a checked
    /// variant.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        debug_assert!(
            self.can_scroll(date),
            "selected date {} outside {}..={}",
            date,
            self.range.min_date(),
            self.range.max_date()
        );
        self.selected_dates.set(date);
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), CalendarError> {
        if !self.can_scroll(date) {
            return Err(CalendarError::DateOutOfRange {
                date,
                min: self.range.min_date(),
                max: self.range.max_date(),
            });
        }
        self.selected_dates.set(date);
        Ok(())
    }

    pub fn subscribe_selected_date(&self) -> watch::Receiver<NaiveDate> {
        self.selected_dates.subscribe()
    }

    /// Month segment currently scrolled into view
    pub fn current_visible_calendar_date(&self) -> CalendarFocusDate {
        *self.visible_segment.borrow()
    }

    /// Record the segment scrolled into view; only the month of `date` is kept
    pub fn set_current_visible_calendar_date(&mut self, date: NaiveDate) {
        let segment = CalendarFocusDate::from_date(date);
        let changed = self.visible_segment.send_if_modified(|current| {
            if *current == segment {
                false
            } else {
                *current = segment;
                true
            }
        });

        if changed {
            debug!("Visible segment changed to {}/{}", segment.month, segment.year);
        }
    }

    /// Scroll-segment-changed handler; `first_month_date` is the first day of
    /// the page now in view
    pub fn on_segment_scrolled(&mut self, first_month_date: NaiveDate) {
        self.set_current_visible_calendar_date(first_month_date);
    }

    pub fn subscribe_visible_segment(&self) -> watch::Receiver<CalendarFocusDate> {
        self.visible_segment.subscribe()
    }

    /// Header label for the month containing `date`
    pub fn header_label(&self, date: NaiveDate) -> HeaderLabel {
        self.calendar.header_label(date)
    }

    /// Every month page the calendar can show, oldest first
    pub fn segments(&self) -> Vec<CalendarFocusDate> {
        self.range.months()
    }

    /// False once the first valid month is in view (dims the left button)
    pub fn can_scroll_to_previous_segment(&self) -> bool {
        self.current_visible_calendar_date() > self.range.min_month()
    }

    /// False once the last valid month is in view (dims the right button)
    pub fn can_scroll_to_next_segment(&self) -> bool {
        self.current_visible_calendar_date() < self.range.max_month()
    }

    pub fn scroll_to_previous_segment(&mut self) -> CalendarFocusDate {
        if self.can_scroll_to_previous_segment() {
            self.move_to_segment(self.current_visible_calendar_date().previous());
        }
        self.current_visible_calendar_date()
    }

    pub fn scroll_to_next_segment(&mut self) -> CalendarFocusDate {
        if self.can_scroll_to_next_segment() {
            self.move_to_segment(self.current_visible_calendar_date().next());
        }
        self.current_visible_calendar_date()
    }

    fn move_to_segment(&mut self, segment: CalendarFocusDate) {
        if let Some(first_day) = segment.first_day() {
            self.set_current_visible_calendar_date(first_day);
        }
    }

    /// Cell state for the six-row page of `focus`
    pub fn month_grid(&self, focus: CalendarFocusDate) -> CalendarMonth {
        let selected = self.selected_date();
        self.calendar
            .generate_month_grid(focus, |date, row| self.month_day_cell(date, row, selected))
    }

    /// Cell state for the page currently in view
    pub fn visible_month_grid(&self) -> CalendarMonth {
        self.month_grid(self.current_visible_calendar_date())
    }

    fn month_day_cell(&self, date: NaiveDate, row: u32, selected: NaiveDate) -> CalendarCell {
        CalendarCell {
            date,
            day: date.day(),
            row,
            day_type: CalendarDayType::MonthDay,
            is_selected: date == selected,
            allows_scrolling: self.can_scroll(date),
            category_slots: self.category_slots(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;
    use std::cell::Cell;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Canned summaries that also count lookups
    #[derive(Default)]
    struct StubSlots {
        days: HashMap<NaiveDate, Vec<CategorySlot>>,
        lookups: Cell<usize>,
    }

    impl StubSlots {
        fn with_day(mut self, day: NaiveDate, slots: Vec<CategorySlot>) -> Self {
            self.days.insert(day, slots);
            self
        }
    }

    impl CategorySlotSource for StubSlots {
        fn category_slots(&self, date: NaiveDate) -> Vec<CategorySlot> {
            self.lookups.set(self.lookups.get() + 1);
            self.days.get(&date).cloned().unwrap_or_default()
        }
    }

    fn slot(category: Category, proportion: f64) -> CategorySlot {
        CategorySlot { category, proportion }
    }

    fn year_2017(source: StubSlots) -> CalendarRangeModel<StubSlots> {
        let range = DateRange::new(date(2017, 1, 1), date(2017, 12, 31)).unwrap();
        CalendarRangeModel::new(range, source, SelectedDateService::new(date(2017, 12, 31)))
    }

    #[test]
    fn test_can_scroll_scenario() {
        let model = year_2017(StubSlots::default());

        assert!(!model.can_scroll(date(2016, 12, 31)));
        assert!(model.can_scroll(date(2017, 1, 1)));
        assert!(model.can_scroll(date(2017, 6, 15)));
        assert!(model.can_scroll(date(2017, 12, 31)));
        assert!(!model.can_scroll(date(2018, 1, 1)));
    }

    #[test]
    fn test_can_scroll_is_monotonic_under_widening() {
        let narrow = CalendarRangeModel::new(
            DateRange::new(date(2017, 3, 1), date(2017, 3, 31)).unwrap(),
            StubSlots::default(),
            SelectedDateService::new(date(2017, 3, 31)),
        );
        let wide = CalendarRangeModel::new(
            DateRange::new(date(2017, 2, 15), date(2017, 4, 15)).unwrap(),
            StubSlots::default(),
            SelectedDateService::new(date(2017, 3, 31)),
        );

        let mut day = date(2017, 2, 1);
        while day <= date(2017, 4, 30) {
            if narrow.can_scroll(day) {
                assert!(wide.can_scroll(day), "{} lost after widening", day);
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_category_slots_empty_without_activity() {
        let model = year_2017(StubSlots::default());
        assert!(model.category_slots(date(2017, 3, 3)).is_empty());
    }

    #[test]
    fn test_selected_day_slots_are_passed_through_unmodified() {
        let supplied = vec![
            slot(Category::Work, 0.5),
            slot(Category::Commute, 0.3),
            slot(Category::Food, 0.2),
        ];
        let mut model = year_2017(StubSlots::default().with_day(date(2017, 6, 15), supplied.clone()));

        model.set_selected_date(date(2017, 6, 15));

        assert_eq!(model.selected_date(), date(2017, 6, 15));
        assert_eq!(model.category_slots(date(2017, 6, 15)), supplied);
    }

    #[test]
    fn test_select_date_rejects_out_of_range() {
        let mut model = year_2017(StubSlots::default());

        let err = model.select_date(date(2018, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            CalendarError::DateOutOfRange {
                date: date(2018, 1, 1),
                min: date(2017, 1, 1),
                max: date(2017, 12, 31),
            }
        );
        assert_eq!(model.selected_date(), date(2017, 12, 31));

        model.select_date(date(2017, 2, 2)).unwrap();
        assert_eq!(model.selected_date(), date(2017, 2, 2));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_set_selected_date_out_of_range_is_a_contract_violation() {
        let mut model = year_2017(StubSlots::default());
        model.set_selected_date(date(2016, 12, 31));
    }

    #[test]
    fn test_out_of_range_initial_selection_falls_back_to_last_day() {
        let range = DateRange::new(date(2017, 1, 1), date(2017, 12, 31)).unwrap();
        let selected = SelectedDateService::new(date(2018, 2, 1));
        let model = CalendarRangeModel::new(range, StubSlots::default(), selected.clone());

        assert_eq!(model.selected_date(), date(2017, 12, 31));
        assert_eq!(selected.current(), date(2017, 12, 31));
        assert_eq!(model.current_visible_calendar_date(), CalendarFocusDate { year: 2017, month: 12 });
    }

    #[test]
    fn test_selection_is_shared_with_other_observers() {
        let selected = SelectedDateService::new(date(2017, 12, 31));
        let range = DateRange::new(date(2017, 1, 1), date(2017, 12, 31)).unwrap();
        let mut model = CalendarRangeModel::new(range, StubSlots::default(), selected.clone());
        let mut receiver = model.subscribe_selected_date();

        model.set_selected_date(date(2017, 6, 15));

        assert_eq!(selected.current(), date(2017, 6, 15));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), date(2017, 6, 15));
    }

    #[test]
    fn test_visible_date_is_truncated_to_month() {
        let mut model = year_2017(StubSlots::default());

        model.set_current_visible_calendar_date(date(2017, 6, 23));
        assert_eq!(model.current_visible_calendar_date(), CalendarFocusDate { year: 2017, month: 6 });

        model.on_segment_scrolled(date(2017, 6, 1));
        assert_eq!(model.current_visible_calendar_date(), CalendarFocusDate { year: 2017, month: 6 });
    }

    #[test]
    fn test_visible_segment_notifies_only_on_month_change() {
        let mut model = year_2017(StubSlots::default());
        let mut receiver = model.subscribe_visible_segment();

        model.set_current_visible_calendar_date(date(2017, 12, 5));
        assert!(!receiver.has_changed().unwrap());

        model.set_current_visible_calendar_date(date(2017, 11, 30));
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), CalendarFocusDate { year: 2017, month: 11 });
    }

    #[test]
    fn test_header_label() {
        let model = year_2017(StubSlots::default());
        let label = model.header_label(date(2017, 6, 15));
        assert_eq!(label.to_string(), "June 2017");
    }

    #[test]
    fn test_edge_segments() {
        let mut model = year_2017(StubSlots::default());
        assert_eq!(model.segments().len(), 12);

        // Starts on the selected month, the last one
        assert!(model.can_scroll_to_previous_segment());
        assert!(!model.can_scroll_to_next_segment());
        assert_eq!(model.scroll_to_next_segment(), CalendarFocusDate { year: 2017, month: 12 });

        for _ in 0..20 {
            model.scroll_to_previous_segment();
        }
        assert_eq!(model.current_visible_calendar_date(), CalendarFocusDate { year: 2017, month: 1 });
        assert!(!model.can_scroll_to_previous_segment());
        assert!(model.can_scroll_to_next_segment());

        assert_eq!(model.scroll_to_next_segment(), CalendarFocusDate { year: 2017, month: 2 });
    }

    #[test]
    fn test_single_month_range_disables_both_edges() {
        let model = CalendarRangeModel::new(
            DateRange::new(date(2017, 6, 10), date(2017, 6, 15)).unwrap(),
            StubSlots::default(),
            SelectedDateService::new(date(2017, 6, 15)),
        );
        assert!(!model.can_scroll_to_previous_segment());
        assert!(!model.can_scroll_to_next_segment());
    }

    #[test]
    fn test_month_grid_cell_state() {
        let supplied = vec![slot(Category::Leisure, 1.0)];
        let source = StubSlots::default()
            .with_day(date(2017, 6, 15), supplied.clone())
            .with_day(date(2017, 7, 1), vec![slot(Category::Work, 1.0)]);
        let mut model = CalendarRangeModel::new(
            DateRange::new(date(2017, 6, 10), date(2017, 7, 5)).unwrap(),
            source,
            SelectedDateService::new(date(2017, 6, 15)),
        );
        model.set_selected_date(date(2017, 6, 15));

        let grid = model.month_grid(CalendarFocusDate { year: 2017, month: 6 });
        assert_eq!(grid.days.len(), 42);

        let fifteenth = grid.days.iter().find(|c| c.date == date(2017, 6, 15)).unwrap();
        assert!(fifteenth.is_selected);
        assert!(fifteenth.allows_scrolling);
        assert_eq!(fifteenth.category_slots, supplied);
        assert_eq!(fifteenth.row, 2);

        // Before the install date: shown but not reachable
        let ninth = grid.days.iter().find(|c| c.date == date(2017, 6, 9)).unwrap();
        assert!(ninth.belongs_to_month());
        assert!(!ninth.allows_scrolling);

        // July 1 is in range but is an out-of-month cell on the June page
        let july_first = grid.days.iter().find(|c| c.date == date(2017, 7, 1)).unwrap();
        assert_eq!(july_first.day_type, CalendarDayType::PaddingAfter);
        assert!(!july_first.allows_scrolling);
        assert!(july_first.category_slots.is_empty());

        assert_eq!(grid.days.iter().filter(|c| c.is_selected).count(), 1);
    }

    #[test]
    fn test_padding_cells_do_not_query_the_collaborator() {
        let model = year_2017(StubSlots::default());
        let grid = model.month_grid(CalendarFocusDate { year: 2017, month: 6 });

        let month_days = grid.days.iter().filter(|c| c.belongs_to_month()).count();
        assert_eq!(model.category_source.lookups.get(), month_days);
    }

    #[test]
    fn test_visible_month_grid_follows_scrolling() {
        let mut model = year_2017(StubSlots::default());
        model.scroll_to_previous_segment();

        let grid = model.visible_month_grid();
        assert_eq!((grid.year, grid.month), (2017, 11));
    }
}
