//! Output formatting for rooms and reservations.
//!
//! Console lines for the menus, plus table and JSON views of the room inventory.

use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{Room, TimeWindow};

/// Output format options for the room inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Room line keyed by room id, as shown by the room browser.
pub fn format_room_line(room: &Room) -> String {
    format!("{}. {} (Capacité: {})", room.id, room.name, room.capacity)
}

/// Room line keyed by its 1-based position in a filtered list.
pub fn format_numbered_room(position: usize, room: &Room) -> String {
    format!("{position}. {} (Capacité : {})", room.name, room.capacity)
}

/// Reservation line keyed by its 1-based position in a room's schedule.
pub fn format_schedule_line(position: usize, window: &TimeWindow) -> String {
    format!("{position}. {window}")
}

/// Formats a table of rooms.
pub fn format_rooms_table(rooms: &[Room]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Salle", "Capacité"]);

    for room in rooms {
        table.add_row(vec![
            room.id.to_string(),
            room.name.clone(),
            room.capacity.to_string(),
        ]);
    }

    table.to_string()
}

/// Formats rooms as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_rooms_json(rooms: &[Room]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rooms)
}
