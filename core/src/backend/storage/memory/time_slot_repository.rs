//! In-memory time slot store.
//!
//! Slots are kept in a `BTreeMap` keyed by start time, so day queries are a
//! range scan and ordering comes for free.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use shared::TimeSlot;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::storage::TimeSlotStorage;

#[derive(Debug, Clone, Default)]
pub struct InMemoryTimeSlotRepository {
    slots: Arc<Mutex<BTreeMap<NaiveDateTime, TimeSlot>>>,
}

impl InMemoryTimeSlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<NaiveDateTime, TimeSlot>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("time slot lock poisoned"))
    }
}

impl TimeSlotStorage for InMemoryTimeSlotRepository {
    fn store_time_slot(&self, slot: &TimeSlot) -> Result<()> {
        let mut slots = self.lock()?;
        if slots.insert(slot.start_time, slot.clone()).is_some() {
            debug!("Replaced time slot starting at {}", slot.start_time);
        }
        Ok(())
    }

    fn list_time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let start = date.and_time(NaiveTime::MIN);
        let slots = self.lock()?;

        let day_slots = match date.succ_opt() {
            Some(next_day) => slots
                .range(start..next_day.and_time(NaiveTime::MIN))
                .map(|(_, slot)| slot.clone())
                .collect(),
            None => slots.range(start..).map(|(_, slot)| slot.clone()).collect(),
        };

        Ok(day_slots)
    }

    fn get_latest_time_slot(&self) -> Result<Option<TimeSlot>> {
        let slots = self.lock()?;
        Ok(slots.values().next_back().cloned())
    }

    fn get_latest_time_slot_before(&self, before: NaiveDateTime) -> Result<Option<TimeSlot>> {
        let slots = self.lock()?;
        Ok(slots.range(..before).next_back().map(|(_, slot)| slot.clone()))
    }

    fn update_time_slot(&self, slot: &TimeSlot) -> Result<bool> {
        let mut slots = self.lock()?;
        match slots.get_mut(&slot.start_time) {
            Some(existing) => {
                *existing = slot.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_list_time_slots_filters_by_day() {
        let repo = InMemoryTimeSlotRepository::new();
        repo.store_time_slot(&TimeSlot::new(at(14, 23), Category::Leisure)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(15, 9), Category::Work)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(15, 0), Category::Unknown)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(16, 8), Category::Commute)).unwrap();

        let slots = repo.list_time_slots(NaiveDate::from_ymd_opt(2017, 6, 15).unwrap()).unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start_time, at(15, 0));
        assert_eq!(slots[1].start_time, at(15, 9));
    }

    #[test]
    fn test_get_latest_time_slot() {
        let repo = InMemoryTimeSlotRepository::new();
        assert!(repo.get_latest_time_slot().unwrap().is_none());

        repo.store_time_slot(&TimeSlot::new(at(15, 9), Category::Work)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(14, 9), Category::Food)).unwrap();

        let latest = repo.get_latest_time_slot().unwrap().unwrap();
        assert_eq!(latest.category, Category::Work);
    }

    #[test]
    fn test_get_latest_time_slot_before() {
        let repo = InMemoryTimeSlotRepository::new();
        repo.store_time_slot(&TimeSlot::new(at(14, 9), Category::Work)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(14, 22), Category::Friends)).unwrap();
        repo.store_time_slot(&TimeSlot::new(at(15, 0), Category::Unknown)).unwrap();

        let before_midnight = repo.get_latest_time_slot_before(at(15, 0)).unwrap().unwrap();
        assert_eq!(before_midnight.category, Category::Friends);

        assert!(repo.get_latest_time_slot_before(at(14, 9)).unwrap().is_none());
    }

    #[test]
    fn test_update_time_slot() {
        let repo = InMemoryTimeSlotRepository::new();
        let mut slot = TimeSlot::new(at(15, 9), Category::Unknown);
        repo.store_time_slot(&slot).unwrap();

        slot.category = Category::Friends;
        assert!(repo.update_time_slot(&slot).unwrap());

        let missing = TimeSlot::new(at(15, 10), Category::Work);
        assert!(!repo.update_time_slot(&missing).unwrap());

        let stored = repo.get_latest_time_slot().unwrap().unwrap();
        assert_eq!(stored.category, Category::Friends);
    }
}
