//! Infrastructure layer - external adapters (database, filesystem, console).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod console;
pub mod gateway;

pub use config::{config_base_dir, ensure_config_exists, load_config_from_file, resolve_config_path};
pub use console::Console;
pub use gateway::Gateway;
