//! Application configuration: database credentials and location.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File extension appended to a bare database name.
const DB_EXTENSION: &str = "db";

/// Database credentials loaded once at startup.
///
/// JSON files use the camelCase keys (`dbUser`, `dbPassword`, `dbName`);
/// TOML files use the snake_case field names through the aliases.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Database user name.
    #[serde(alias = "db_user")]
    pub db_user: String,

    /// Database password. Never logged.
    #[serde(alias = "db_password")]
    pub db_password: String,

    /// Database name, resolved to a file next to the config file.
    #[serde(alias = "db_name")]
    pub db_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_user: "reservation".to_string(),
            db_password: String::new(),
            db_name: "reservations".to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .finish()
    }
}

impl AppConfig {
    /// Get the database file path, relative to `base_dir` unless absolute.
    ///
    /// A name without extension gets `.db` appended.
    #[must_use]
    pub fn database_path(&self, base_dir: &Path) -> PathBuf {
        let name = Path::new(&self.db_name);
        let file = if name.extension().is_some() {
            name.to_path_buf()
        } else {
            name.with_extension(DB_EXTENSION)
        };
        base_dir.join(file)
    }

    /// Get the per-user configuration directory.
    #[must_use]
    pub fn user_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("room-reservation")
    }
}
