//! Parsing of dates, times and menu choices typed at the console.

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::error::{AppError, Result};

/// Accepted input format for calendar days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted input format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Parses a `YYYY-MM-DD` calendar day whose year lies in `[1, 9999]`.
///
/// # Errors
/// Returns `InvalidInput` if the text is not a valid day or the year is out of range.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        AppError::invalid_input(
            "Format de date invalide. Veuillez utiliser le format YYYY-MM-DD.",
        )
    })?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(AppError::invalid_input(format!(
            "L'année n'est pas dans l'intervalle [{MIN_YEAR}, {MAX_YEAR}] : {}",
            date.year()
        )));
    }

    Ok(date)
}

/// Parses an `HH:MM` time of day.
///
/// # Errors
/// Returns `InvalidInput` if the text is not a valid time.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| {
        AppError::invalid_input("Format d'heure invalide. Veuillez utiliser le format HH:MM.")
    })
}

/// Parses a numeric menu choice. Anything that is not a number yields `None`.
#[must_use]
pub fn parse_choice(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}
