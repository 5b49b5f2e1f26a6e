//! `SQLite` gateway over the `rooms` and `reservations` tables.
//!
//! Dates are stored as `YYYY-MM-DD` text and times as `HH:MM:SS` text, so
//! string comparison in SQL orders them chronologically.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{AppError, Reservation, Result, Room, TimeWindow};

const DATE_COLUMN_FORMAT: &str = "%Y-%m-%d";
const TIME_COLUMN_FORMAT: &str = "%H:%M:%S";

/// Existing `[s1, e1)` overlaps candidate `[s2, e2)` when
/// `s1 <= s2 < e1` or `s2 <= s1 < e2`.
const OVERLAP_COUNT_SQL: &str = r"
    SELECT COUNT(*)
    FROM reservations
    WHERE room_id = ?1 AND date = ?2 AND (
        (start_time <= ?3 AND end_time > ?3) OR
        (?3 <= start_time AND start_time < ?4)
    )
";

/// The overlap predicate with the instant substituted for both candidate
/// bounds. The second clause can never hold, leaving `s1 <= t < e1`.
const POINT_COUNT_SQL: &str = r"
    SELECT COUNT(*)
    FROM reservations
    WHERE room_id = ?1 AND date = ?2 AND (
        (start_time <= ?3 AND end_time > ?3) OR
        (?3 <= start_time AND start_time < ?3)
    )
";

/// Owner of the single connection to the reservation store.
pub struct Gateway {
    conn: Connection,
}

impl Gateway {
    /// Opens or creates the reservation database and its schema.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create database directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;
        let gateway = Self::with_connection(conn)?;

        tracing::info!(path = %path.display(), "Database opened");

        Ok(gateway)
    }

    /// Opens a private in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory().map_err(AppError::database)?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(AppError::database)?;

        let gateway = Self { conn };
        gateway.init_schema()?;
        Ok(gateway)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS rooms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                capacity INTEGER NOT NULL CHECK (capacity > 0)
            );

            CREATE TABLE IF NOT EXISTS reservations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id INTEGER NOT NULL REFERENCES rooms(id),
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_reservations_room_date
                ON reservations(room_id, date);
            ",
            )
            .map_err(AppError::database)
    }

    /// Closes the connection, reporting any error `SQLite` raises on close.
    ///
    /// # Errors
    /// Returns error if the connection cannot be closed cleanly.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| AppError::database(e))?;
        tracing::debug!("Database closed");
        Ok(())
    }

    /// Get all rooms ordered by id.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, capacity FROM rooms ORDER BY id")
            .map_err(AppError::database)?;

        let rooms = stmt
            .query_map([], |row| {
                Ok(Room {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    capacity: row.get(2)?,
                })
            })
            .map_err(AppError::database)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(AppError::database)?;

        tracing::debug!("Fetched {} rooms", rooms.len());

        Ok(rooms)
    }

    /// Look up a room id by its exact name.
    pub fn find_room_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM rooms WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()
            .map_err(AppError::database)
    }

    /// Get the windows of every reservation of a room on a day.
    pub fn reservation_windows(&self, room_id: i64, date: NaiveDate) -> Result<Vec<TimeWindow>> {
        let mut stmt = self
            .conn
            .prepare(
                r"
            SELECT start_time, end_time
            FROM reservations
            WHERE room_id = ?1 AND date = ?2
            ORDER BY start_time
            ",
            )
            .map_err(AppError::database)?;

        let windows = stmt
            .query_map(params![room_id, date_param(date)], |row| {
                Ok(TimeWindow::new(time_column(row, 0)?, time_column(row, 1)?))
            })
            .map_err(AppError::database)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(AppError::database)?;

        Ok(windows)
    }

    /// Count reservations of a room/day overlapping `window`.
    pub fn count_overlapping(
        &self,
        room_id: i64,
        date: NaiveDate,
        window: TimeWindow,
    ) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row(
                OVERLAP_COUNT_SQL,
                params![
                    room_id,
                    date_param(date),
                    time_param(window.start),
                    time_param(window.end)
                ],
                |row| row.get(0),
            )
            .map_err(AppError::database)?;

        tracing::debug!(room_id, %date, %window, count, "Overlap check");

        Ok(count)
    }

    /// Count reservations of a room/day whose window contains `instant`.
    pub fn count_covering(
        &self,
        room_id: i64,
        date: NaiveDate,
        instant: NaiveTime,
    ) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row(
                POINT_COUNT_SQL,
                params![room_id, date_param(date), time_param(instant)],
                |row| row.get(0),
            )
            .map_err(AppError::database)?;

        tracing::debug!(room_id, %date, %instant, count, "Point-in-time check");

        Ok(count)
    }

    /// Insert a reservation and return it with its new id.
    pub fn insert_reservation(
        &self,
        room_id: i64,
        date: NaiveDate,
        window: TimeWindow,
    ) -> Result<Reservation> {
        self.conn
            .execute(
                r"
            INSERT INTO reservations (room_id, date, start_time, end_time)
            VALUES (?1, ?2, ?3, ?4)
            ",
                params![
                    room_id,
                    date_param(date),
                    time_param(window.start),
                    time_param(window.end)
                ],
            )
            .map_err(AppError::database)?;

        Ok(Reservation {
            id: self.conn.last_insert_rowid(),
            room_id,
            date,
            window,
        })
    }

    /// Insert a room. Rooms are provisioned externally in production.
    #[cfg(test)]
    pub fn insert_room(&self, name: &str, capacity: u32) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO rooms (name, capacity) VALUES (?1, ?2)",
                params![name, capacity],
            )
            .map_err(AppError::database)?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn date_param(date: NaiveDate) -> String {
    date.format(DATE_COLUMN_FORMAT).to_string()
}

fn time_param(time: NaiveTime) -> String {
    time.format(TIME_COLUMN_FORMAT).to_string()
}

/// Read an `HH:MM:SS` text column.
fn time_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveTime> {
    let text: String = row.get(idx)?;
    NaiveTime::parse_from_str(&text, TIME_COLUMN_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow::new(hm(start.0, start.1), hm(end.0, end.1))
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    /// Gateway with room "Alpha" booked 09:00-10:00 on 2024-01-10.
    fn booked_alpha() -> (Gateway, i64) {
        let gateway = Gateway::open_in_memory().unwrap();
        let alpha = gateway.insert_room("Alpha", 4).unwrap();
        gateway
            .insert_reservation(alpha, day(), window((9, 0), (10, 0)))
            .unwrap();
        (gateway, alpha)
    }

    #[test]
    fn test_open_creates_schema_on_disk() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("data").join("rooms.db");

        let gateway = Gateway::open(&db_path).unwrap();

        let count: i64 = gateway
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master \
                 WHERE type = 'table' AND name IN ('rooms', 'reservations')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);

        gateway.close().unwrap();
        assert!(db_path.exists());

        // Reopening keeps the existing schema.
        Gateway::open(&db_path).unwrap().close().unwrap();
    }

    #[test]
    fn test_list_rooms_and_lookup_by_name() {
        let gateway = Gateway::open_in_memory().unwrap();
        let alpha = gateway.insert_room("Alpha", 4).unwrap();
        let beta = gateway.insert_room("Beta", 12).unwrap();

        let rooms = gateway.list_rooms().unwrap();
        assert_eq!(
            rooms,
            vec![
                Room { id: alpha, name: "Alpha".into(), capacity: 4 },
                Room { id: beta, name: "Beta".into(), capacity: 12 },
            ]
        );

        assert_eq!(gateway.find_room_id("Beta").unwrap(), Some(beta));
        assert_eq!(gateway.find_room_id("beta").unwrap(), None);
        assert_eq!(gateway.find_room_id("Gamma").unwrap(), None);
    }

    #[test]
    fn test_room_capacity_must_be_positive() {
        let gateway = Gateway::open_in_memory().unwrap();
        assert!(matches!(
            gateway.insert_room("Closet", 0),
            Err(AppError::Database { .. })
        ));
    }

    #[test]
    fn test_reservation_requires_existing_room() {
        let gateway = Gateway::open_in_memory().unwrap();
        assert!(gateway
            .insert_reservation(42, day(), window((9, 0), (10, 0)))
            .is_err());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let (gateway, alpha) = booked_alpha();
        let overlaps = |w| gateway.count_overlapping(alpha, day(), w).unwrap() > 0;

        // Touching either edge is free.
        assert!(!overlaps(window((10, 0), (11, 0))));
        assert!(!overlaps(window((8, 0), (9, 0))));
        // Same start, partial overlaps, containment both ways.
        assert!(overlaps(window((9, 0), (9, 15))));
        assert!(overlaps(window((9, 30), (10, 30))));
        assert!(overlaps(window((8, 30), (9, 30))));
        assert!(overlaps(window((9, 15), (9, 45))));
        assert!(overlaps(window((8, 0), (11, 0))));
        // Fully disjoint.
        assert!(!overlaps(window((14, 0), (15, 0))));
    }

    #[test]
    fn test_overlap_is_scoped_to_room_and_date() {
        let (gateway, alpha) = booked_alpha();
        let beta = gateway.insert_room("Beta", 8).unwrap();
        let next_day = day().succ_opt().unwrap();
        let w = window((9, 0), (10, 0));

        assert_eq!(gateway.count_overlapping(alpha, day(), w).unwrap(), 1);
        assert_eq!(gateway.count_overlapping(alpha, next_day, w).unwrap(), 0);
        assert_eq!(gateway.count_overlapping(beta, day(), w).unwrap(), 0);
    }

    #[test]
    fn test_point_in_time_check() {
        let (gateway, alpha) = booked_alpha();
        let covering = |t| gateway.count_covering(alpha, day(), t).unwrap();

        assert_eq!(covering(hm(9, 0)), 1);
        assert_eq!(covering(hm(9, 30)), 1);
        assert_eq!(covering(hm(9, 59)), 1);
        assert_eq!(covering(hm(10, 0)), 0);
        assert_eq!(covering(hm(8, 59)), 0);
    }

    #[test]
    fn test_overlap_matches_interval_arithmetic() {
        let gateway = Gateway::open_in_memory().unwrap();
        let room = gateway.insert_room("Grid", 2).unwrap();
        let existing = [window((9, 0), (10, 0)), window((13, 0), (14, 30))];
        for w in existing {
            gateway.insert_reservation(room, day(), w).unwrap();
        }

        let hours: Vec<NaiveTime> = (7..17).flat_map(|h| [hm(h, 0), hm(h, 30)]).collect();
        for (i, &start) in hours.iter().enumerate() {
            for &end in &hours[i + 1..] {
                let candidate = TimeWindow::new(start, end);
                let expected = existing
                    .iter()
                    .filter(|e| e.start < candidate.end && candidate.start < e.end)
                    .count();
                assert_eq!(
                    gateway.count_overlapping(room, day(), candidate).unwrap() as usize,
                    expected,
                    "candidate {candidate}"
                );
            }
        }
    }

    #[test]
    fn test_reservation_windows_round_trip_times() {
        let (gateway, alpha) = booked_alpha();
        gateway
            .insert_reservation(alpha, day(), window((7, 15), (8, 45)))
            .unwrap();

        let windows = gateway.reservation_windows(alpha, day()).unwrap();
        assert_eq!(
            windows,
            vec![window((7, 15), (8, 45)), window((9, 0), (10, 0))]
        );
        assert!(gateway
            .reservation_windows(alpha, day().pred_opt().unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert_returns_fresh_ids() {
        let (gateway, alpha) = booked_alpha();
        let first = gateway
            .insert_reservation(alpha, day(), window((11, 0), (12, 0)))
            .unwrap();
        let second = gateway
            .insert_reservation(alpha, day(), window((12, 0), (13, 0)))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.room_id, alpha);
        assert_eq!(second.window, window((12, 0), (13, 0)));
    }
}
