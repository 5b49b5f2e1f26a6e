//! Domain-level error types for room-reservation.
//!
//! Every failure is typed with `thiserror`. Messages are shown as-is on the
//! console, so user-facing variants speak French like the rest of the menu.

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or query the database.
    #[error("Erreur de base de données : {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file missing, unreadable or malformed.
    #[error("Erreur de configuration : {message}")]
    Config { message: String },

    /// Console or filesystem operation failed.
    #[error("Erreur d'entrée/sortie : {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// JSON serialization or parsing failed.
    #[error("Erreur JSON : {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// User input that does not parse or is out of range.
    #[error("{message}")]
    InvalidInput { message: String },

    /// No room carries the requested name.
    #[error("Aucune salle nommée « {name} »")]
    RoomNotFound { name: String },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether the menu can report this error and carry on.
    ///
    /// Only a broken console is unrecoverable once the menu is running.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_failure_is_not_recoverable() {
        let err = AppError::io(
            "stdout closed",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"),
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_lookup_and_input_errors_are_recoverable() {
        assert!(AppError::RoomNotFound { name: "Zeta".into() }.is_recoverable());
        assert!(AppError::invalid_input("bad date").is_recoverable());
        assert!(AppError::database(rusqlite::Error::QueryReturnedNoRows).is_recoverable());
    }

    #[test]
    fn test_room_not_found_message_names_the_room() {
        let err = AppError::RoomNotFound {
            name: "Alpha".into(),
        };
        assert!(err.to_string().contains("Alpha"));
    }
}
