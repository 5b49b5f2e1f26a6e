//! Domain layer - core types and input rules.
//!
//! This layer contains rooms, reservations, configuration and error types
//! without any IO of its own.

pub mod config;
pub mod error;
pub mod input;
pub mod models;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use input::{parse_choice, parse_date, parse_time};
pub use models::{
    NotImplemented, Reservation, ReservationOutcome, ReservationRequest, Room, TimeWindow,
};
