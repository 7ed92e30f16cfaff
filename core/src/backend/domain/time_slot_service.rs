//! Time slot service.
//!
//! Records time slots and summarizes a day's slots into category
//! proportions for the calendar cells.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, error, info};
use shared::{Category, CategorySlot, TimeSlot};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::domain::TimeService;
use crate::backend::storage::TimeSlotStorage;

/// Per-day category summaries consumed by the calendar model
pub trait CategorySlotSource {
    /// Category proportions for `date`, largest first. Empty when nothing
    /// was tracked that day.
    fn category_slots(&self, date: NaiveDate) -> Vec<CategorySlot>;
}

#[derive(Clone)]
pub struct TimeSlotService {
    storage: Arc<dyn TimeSlotStorage>,
    time_service: Arc<dyn TimeService>,
}

impl TimeSlotService {
    pub fn new(storage: Arc<dyn TimeSlotStorage>, time_service: Arc<dyn TimeService>) -> Self {
        Self {
            storage,
            time_service,
        }
    }

    /// Persist a new slot, closing the slot that was running before it
    pub fn add_time_slot(&self, slot: TimeSlot) -> Result<()> {
        if let Some(mut previous) = self.storage.get_latest_time_slot()? {
            if previous.end_time.is_none() && previous.start_time < slot.start_time {
                previous.end_time = Some(slot.start_time);
                self.storage.update_time_slot(&previous)?;
                debug!("Closed time slot started at {}", previous.start_time);
            }
        }

        self.storage.store_time_slot(&slot)?;
        info!("Added {} time slot at {}", slot.category, slot.start_time);
        Ok(())
    }

    /// Slots starting on `date`, ordered by start time
    pub fn time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        self.storage.list_time_slots(date)
    }

    /// Summarize the time tracked on `date` into category proportions
    pub fn summarize_day(&self, date: NaiveDate) -> Result<Vec<CategorySlot>> {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = self.day_end(date);
        let slots = self.time_slots(date)?;
        let first_start = slots.first().map(|slot| slot.start_time);

        let mut totals: BTreeMap<Category, i64> = BTreeMap::new();

        // A slot started on an earlier day may still be running after midnight
        if let Some(carried) = self.storage.get_latest_time_slot_before(day_start)? {
            let end = carried.end_time.or(first_start).unwrap_or(day_end).min(day_end);
            add_duration(&mut totals, carried.category, day_start, end);
        }

        for (index, slot) in slots.iter().enumerate() {
            let end = slot
                .end_time
                .or_else(|| slots.get(index + 1).map(|next| next.start_time))
                .unwrap_or(day_end)
                .min(day_end);
            add_duration(&mut totals, slot.category, slot.start_time, end);
        }

        Ok(proportions(&totals))
    }

    /// Where tracked time on `date` stops counting: the next midnight, or
    /// now if that comes first
    fn day_end(&self, date: NaiveDate) -> NaiveDateTime {
        let midnight = date.and_time(NaiveTime::MIN) + Duration::days(1);
        midnight.min(self.time_service.now())
    }
}

impl CategorySlotSource for TimeSlotService {
    fn category_slots(&self, date: NaiveDate) -> Vec<CategorySlot> {
        match self.summarize_day(date) {
            Ok(slots) => slots,
            Err(e) => {
                error!("Failed to summarize time slots for {}: {}", date, e);
                Vec::new()
            }
        }
    }
}

fn add_duration(
    totals: &mut BTreeMap<Category, i64>,
    category: Category,
    start: NaiveDateTime,
    end: NaiveDateTime,
) {
    let seconds = (end - start).num_seconds();
    if seconds > 0 {
        *totals.entry(category).or_insert(0) += seconds;
    }
}

fn proportions(totals: &BTreeMap<Category, i64>) -> Vec<CategorySlot> {
    let total: i64 = totals.values().sum();
    if total <= 0 {
        return Vec::new();
    }

    let mut slots: Vec<CategorySlot> = totals
        .iter()
        .filter(|(_, seconds)| **seconds > 0)
        .map(|(category, seconds)| CategorySlot {
            category: *category,
            proportion: *seconds as f64 / total as f64,
        })
        .collect();

    // Stable sort keeps category order for ties
    slots.sort_by(|a, b| b.proportion.total_cmp(&a.proportion));
    slots
}
