//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// Room Reservation - browse meeting rooms and book time slots.
///
/// Without a subcommand the interactive menu starts.
#[derive(Parser, Debug)]
#[command(name = "room-reservation")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (JSON, or TOML with a .toml extension).
    #[arg(short, long, env = "ROOM_RESERVATION_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive menu (default).
    Menu,

    /// Pick a room and a day, then list its reservations.
    Browse,

    /// Print the room inventory.
    Rooms {
        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Write a default config file if missing and create the database schema.
    Init,
}

impl Cli {
    /// The subcommand to run, defaulting to the interactive menu.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Menu)
    }
}

impl Commands {
    /// Parse the output format argument of `rooms`.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        match self {
            Self::Rooms { format } => format.parse(),
            _ => Ok(OutputFormat::default()),
        }
    }
}
