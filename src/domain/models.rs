//! Domain models for rooms and reservations.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A bookable room. Rooms are provisioned outside this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Database-assigned identifier.
    pub id: i64,
    /// Unique, human-chosen name.
    pub name: String,
    /// Number of seats.
    pub capacity: u32,
}

/// The `[start, end)` time span of a reservation within its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `start` comes strictly before `end`.
    ///
    /// Nothing rejects backwards windows; callers only log them.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A stored booking of one room for one window on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    pub date: NaiveDate,
    pub window: TimeWindow,
}

/// Parsed input for a new reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub room_name: String,
    pub date: NaiveDate,
    pub window: TimeWindow,
}

/// Result of a reservation attempt that reached the availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The row was inserted.
    Created(Reservation),
    /// An existing reservation overlaps the requested window.
    Unavailable,
}

/// Marker returned by menu entries that exist but do nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotImplemented {
    pub operation: &'static str,
}

impl fmt::Display for NotImplemented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : fonctionnalité non disponible pour le moment.",
            self.operation
        )
    }
}
