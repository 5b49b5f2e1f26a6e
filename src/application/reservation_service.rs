//! Reservation use cases.
//!
//! Takes already-parsed input; prompting lives in the menu.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{
    AppError, NotImplemented, ReservationOutcome, ReservationRequest, Result, Room, TimeWindow,
};
use crate::infrastructure::Gateway;

use super::availability::AvailabilityChecker;

/// Menu label of the cancel entry.
pub const CANCEL_OPERATION: &str = "Annuler une réservation";
/// Menu label of the view entry.
pub const VIEW_OPERATION: &str = "Voir les réservations";

/// Service running reservation workflows against an injected gateway.
pub struct ReservationService<'a> {
    gateway: &'a Gateway,
    checker: AvailabilityChecker<'a>,
}

impl<'a> ReservationService<'a> {
    /// Create a service over an open gateway.
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            checker: AvailabilityChecker::new(gateway),
        }
    }

    /// Get every room.
    ///
    /// # Errors
    /// Returns error if the store cannot be queried.
    pub fn rooms(&self) -> Result<Vec<Room>> {
        self.gateway.list_rooms()
    }

    /// Book a room if the requested window is free.
    ///
    /// The check and the insert are separate statements; a concurrent
    /// writer can slip in between them.
    ///
    /// # Errors
    /// Returns `RoomNotFound` for an unknown room name, or a database error.
    pub fn create_reservation(&self, request: &ReservationRequest) -> Result<ReservationOutcome> {
        if !request.window.is_well_formed() {
            tracing::warn!(window = %request.window, "Window does not end after it starts");
        }

        let room_id = self
            .gateway
            .find_room_id(&request.room_name)?
            .ok_or_else(|| AppError::RoomNotFound {
                name: request.room_name.clone(),
            })?;

        if !self.checker.is_available(room_id, request.date, request.window)? {
            tracing::info!(
                room = %request.room_name,
                date = %request.date,
                window = %request.window,
                "Room unavailable"
            );
            return Ok(ReservationOutcome::Unavailable);
        }

        let reservation = self
            .gateway
            .insert_reservation(room_id, request.date, request.window)?;

        tracing::info!(
            id = reservation.id,
            room_id = reservation.room_id,
            date = %reservation.date,
            window = %reservation.window,
            "Reservation created"
        );

        Ok(ReservationOutcome::Created(reservation))
    }

    /// Get the rooms free at `instant` on `date`.
    ///
    /// # Errors
    /// Returns error if the store cannot be queried.
    pub fn available_rooms_at(&self, date: NaiveDate, instant: NaiveTime) -> Result<Vec<Room>> {
        let mut available = Vec::new();
        for room in self.gateway.list_rooms()? {
            if self.checker.is_available_at(room.id, date, instant)? {
                available.push(room);
            }
        }
        Ok(available)
    }

    /// Get the booked windows of one room on one day.
    ///
    /// # Errors
    /// Returns error if the store cannot be queried.
    pub fn room_schedule(&self, room_id: i64, date: NaiveDate) -> Result<Vec<TimeWindow>> {
        self.gateway.reservation_windows(room_id, date)
    }

    /// Cancelling reservations is not supported yet.
    #[must_use]
    pub const fn cancel_reservation(&self) -> NotImplemented {
        NotImplemented {
            operation: CANCEL_OPERATION,
        }
    }

    /// Listing reservations is not supported yet.
    #[must_use]
    pub const fn view_reservations(&self) -> NotImplemented {
        NotImplemented {
            operation: VIEW_OPERATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn request(room: &str, start: NaiveTime, end: NaiveTime) -> ReservationRequest {
        ReservationRequest {
            room_name: room.to_string(),
            date: day(),
            window: TimeWindow::new(start, end),
        }
    }

    /// "Alpha" (4 seats) booked 09:00-10:00, "Beta" (10 seats) free.
    fn seeded() -> Gateway {
        let gateway = Gateway::open_in_memory().unwrap();
        let alpha = gateway.insert_room("Alpha", 4).unwrap();
        gateway.insert_room("Beta", 10).unwrap();
        gateway
            .insert_reservation(alpha, day(), TimeWindow::new(hm(9, 0), hm(10, 0)))
            .unwrap();
        gateway
    }

    #[test]
    fn test_overlapping_request_is_rejected_without_insert() {
        let gateway = seeded();
        let service = ReservationService::new(&gateway);

        let outcome = service
            .create_reservation(&request("Alpha", hm(9, 30), hm(10, 30)))
            .unwrap();

        assert_eq!(outcome, ReservationOutcome::Unavailable);
        let alpha = gateway.find_room_id("Alpha").unwrap().unwrap();
        assert_eq!(service.room_schedule(alpha, day()).unwrap().len(), 1);
    }

    #[test]
    fn test_adjacent_request_is_created() {
        let gateway = seeded();
        let service = ReservationService::new(&gateway);

        let outcome = service
            .create_reservation(&request("Alpha", hm(10, 0), hm(11, 0)))
            .unwrap();

        let ReservationOutcome::Created(reservation) = outcome else {
            panic!("expected a reservation, got {outcome:?}");
        };
        assert_eq!(reservation.date, day());
        assert_eq!(reservation.window, TimeWindow::new(hm(10, 0), hm(11, 0)));

        let schedule = service.room_schedule(reservation.room_id, day()).unwrap();
        assert_eq!(schedule.len(), 2);

        // The new booking now blocks its own window.
        assert_eq!(
            service
                .create_reservation(&request("Alpha", hm(10, 30), hm(10, 45)))
                .unwrap(),
            ReservationOutcome::Unavailable
        );
    }

    #[test]
    fn test_unknown_room_is_a_recoverable_error() {
        let gateway = seeded();
        let service = ReservationService::new(&gateway);

        let err = service
            .create_reservation(&request("Omega", hm(9, 0), hm(10, 0)))
            .unwrap_err();

        assert!(matches!(&err, AppError::RoomNotFound { name } if name == "Omega"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_available_rooms_at_excludes_booked_room() {
        let gateway = seeded();
        let service = ReservationService::new(&gateway);

        let names = |rooms: Vec<Room>| rooms.into_iter().map(|r| r.name).collect::<Vec<_>>();

        assert_eq!(
            names(service.available_rooms_at(day(), hm(9, 30)).unwrap()),
            vec!["Beta"]
        );
        assert_eq!(
            names(service.available_rooms_at(day(), hm(10, 0)).unwrap()),
            vec!["Alpha", "Beta"]
        );
        assert_eq!(
            names(
                service
                    .available_rooms_at(day().succ_opt().unwrap(), hm(9, 30))
                    .unwrap()
            ),
            vec!["Alpha", "Beta"]
        );
    }

    #[test]
    fn test_cancel_and_view_are_explicit_stubs() {
        let gateway = seeded();
        let service = ReservationService::new(&gateway);

        assert_eq!(service.cancel_reservation().operation, CANCEL_OPERATION);
        assert_eq!(service.view_reservations().operation, VIEW_OPERATION);
        // Stubs leave the store untouched.
        assert_eq!(service.rooms().unwrap().len(), 2);
    }
}
