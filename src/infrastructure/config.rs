//! Configuration file management.
//!
//! Loads the database credentials from JSON (default) or TOML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Resolves which configuration file to read.
///
/// An explicit path always wins. Otherwise `./config.json` is used when
/// present, then the per-user config directory, then `./config.json` again
/// so the missing-file error names the expected location.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }

    let user = AppConfig::user_config_dir().join(DEFAULT_CONFIG_FILE);
    if user.exists() {
        tracing::debug!("Using user config at: {}", user.display());
        return user;
    }

    local
}

/// Load configuration from a specific file.
///
/// Files ending in `.toml` are parsed as TOML, everything else as JSON.
///
/// # Errors
/// Returns error if the file cannot be read, cannot be parsed, or names no database.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: AppConfig = if is_toml {
        toml::from_str(&content).map_err(|e| AppError::Config {
            message: format!("Failed to parse config file {}: {e}", path.display()),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| AppError::Config {
            message: format!("Failed to parse config file {}: {e}", path.display()),
        })?
    };

    if config.db_name.trim().is_empty() {
        return Err(AppError::Config {
            message: format!("No database name in {}", path.display()),
        });
    }

    tracing::debug!(path = %path.display(), user = %config.db_user, "Configuration loaded");

    Ok(config)
}

/// Create a default configuration file if it doesn't exist.
///
/// Returns `true` when a new file was written.
///
/// # Errors
/// Returns error if the file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    let content =
        serde_json::to_string_pretty(&AppConfig::default()).map_err(AppError::json_parse)?;

    fs::write(path, content).map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}

/// Directory the database name is resolved against.
#[must_use]
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
