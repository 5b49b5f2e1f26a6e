//! Availability checks for a room on a given day.
//!
//! Two distinct questions: does a window overlap an existing reservation,
//! and does a single instant fall inside one. They are not interchangeable.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{Result, TimeWindow};
use crate::infrastructure::Gateway;

/// Answers availability questions against the reservation store.
#[derive(Clone, Copy)]
pub struct AvailabilityChecker<'a> {
    gateway: &'a Gateway,
}

impl<'a> AvailabilityChecker<'a> {
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Whether no reservation of the room overlaps `window` on `date`.
    ///
    /// # Errors
    /// Returns error if the store cannot be queried.
    pub fn is_available(&self, room_id: i64, date: NaiveDate, window: TimeWindow) -> Result<bool> {
        Ok(self.gateway.count_overlapping(room_id, date, window)? == 0)
    }

    /// Whether `instant` falls outside every reservation of the room on `date`.
    ///
    /// # Errors
    /// Returns error if the store cannot be queried.
    pub fn is_available_at(
        &self,
        room_id: i64,
        date: NaiveDate,
        instant: NaiveTime,
    ) -> Result<bool> {
        Ok(self.gateway.count_covering(room_id, date, instant)? == 0)
    }
}
