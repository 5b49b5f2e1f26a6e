//! Application layer - use cases and orchestration.
//!
//! This layer contains the availability checks, the reservation workflows
//! and the interactive menus built on top of them.

pub mod availability;
pub mod formatter;
pub mod menu;
pub mod reservation_service;

pub use formatter::{format_rooms_json, format_rooms_table, OutputFormat};
pub use menu::{Menu, MenuExit};
pub use reservation_service::ReservationService;
