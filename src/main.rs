//! Room Reservation - book meeting rooms from the console.
//!
//! Reads database credentials from a config file, opens the reservation
//! database and runs a French-language menu to list free rooms and book
//! time slots.
//!
//!   room-reservation                    # Interactive menu
//!   room-reservation browse             # Reservations of one room on one day
//!   room-reservation rooms -f json      # Room inventory
//!   room-reservation init               # Default config + database schema

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    format_rooms_json, format_rooms_table, Menu, MenuExit, OutputFormat, ReservationService,
};
use cli::{Cli, Commands};
use infrastructure::{
    config_base_dir, ensure_config_exists, load_config_from_file, resolve_config_path, Console,
    Gateway,
};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: &Cli) -> domain::Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let command = cli.command();

    match command {
        Commands::Init => cmd_init(&config_path),
        Commands::Menu => with_gateway(&config_path, cmd_menu),
        Commands::Browse => with_gateway(&config_path, cmd_browse),
        Commands::Rooms { .. } => {
            let format = command
                .output_format()
                .map_err(|message| domain::AppError::Config { message })?;
            with_gateway(&config_path, |gateway| cmd_rooms(gateway, format))
        }
    }
}

/// Load config, open the database, run `f`, then close the database.
///
/// The database is closed even when `f` fails; the first error wins.
fn with_gateway<F>(config_path: &Path, f: F) -> domain::Result<()>
where
    F: FnOnce(&Gateway) -> domain::Result<()>,
{
    let config = load_config_from_file(config_path)?;
    let db_path = config.database_path(&config_base_dir(config_path));
    tracing::info!(user = %config.db_user, database = %db_path.display(), "Connecting");

    let gateway = Gateway::open(&db_path)?;
    let result = f(&gateway);
    let closed = gateway.close();

    result.and(closed)
}

/// Interactive main menu.
fn cmd_menu(gateway: &Gateway) -> domain::Result<()> {
    let mut menu = Menu::new(ReservationService::new(gateway), Console::stdio());

    match menu.run()? {
        MenuExit::Quit => tracing::debug!("User quit"),
        MenuExit::EndOfInput => tracing::debug!("Input closed"),
    }

    Ok(())
}

/// Room browser command.
fn cmd_browse(gateway: &Gateway) -> domain::Result<()> {
    Menu::new(ReservationService::new(gateway), Console::stdio()).browse()
}

/// Room inventory command.
fn cmd_rooms(gateway: &Gateway, format: OutputFormat) -> domain::Result<()> {
    let rooms = ReservationService::new(gateway).rooms()?;

    let output = match format {
        OutputFormat::Table => format_rooms_table(&rooms),
        OutputFormat::Json => format_rooms_json(&rooms).map_err(domain::AppError::json_parse)?,
    };

    println!("{output}");
    Ok(())
}

/// Write a default config if needed and create the schema.
fn cmd_init(config_path: &Path) -> domain::Result<()> {
    if ensure_config_exists(config_path)? {
        println!("{} Created {}", "✓".green().bold(), config_path.display());
    }

    with_gateway(config_path, |_| Ok(()))?;

    println!("{} Database ready", "✓".green().bold());
    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
