//! Shared "which day is the user looking at" state.
//!
//! The calendar writes it when a day is tapped; the timeline pages observe it
//! through [`SelectedDateService::subscribe`]. Backed by a `watch` channel,
//! so observers always see the latest value and never a backlog.

use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct SelectedDateService {
    sender: Arc<watch::Sender<NaiveDate>>,
}

impl SelectedDateService {
    pub fn new(initial: NaiveDate) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> NaiveDate {
        *self.sender.borrow()
    }

    /// Update the selected date. Observers are only notified on change.
    pub fn set(&self, date: NaiveDate) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == date {
                false
            } else {
                *current = date;
                true
            }
        });

        if changed {
            debug!("Selected date changed to {}", date);
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NaiveDate> {
        self.sender.subscribe()
    }
}
