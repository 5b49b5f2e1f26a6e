//! Interactive menus: the main menu, the post-booking navigation menu and
//! the room browser.
//!
//! The menus form a small state machine driven by an explicit loop. Any
//! recoverable error raised by a workflow is printed and the user lands
//! back on the main menu.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::domain::{
    parse_choice, parse_date, parse_time, AppError, ReservationOutcome, ReservationRequest,
    Result, TimeWindow,
};
use crate::infrastructure::Console;

use super::formatter::{format_numbered_room, format_room_line, format_schedule_line};
use super::reservation_service::ReservationService;

const SEPARATOR: &str = "-----------------------------------------------------";
const WELCOME: &str = "Bienvenue sur le service de réservation en ligne";
const FAREWELL: &str = "Merci d'utiliser notre service !";
const INVALID_OPTION: &str = "Option invalide. Veuillez réessayer.";
const CHOICE_PROMPT: &str = "Choisissez une option : ";

/// Why the menu loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// The user picked "Quitter".
    Quit,
    /// The console ran out of input.
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    Main,
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    To(MenuState),
    Exit(MenuExit),
}

/// Ends the current step when the console has no more input.
macro_rules! ask {
    ($console:expr, $label:expr) => {
        match $console.prompt($label)? {
            Some(answer) => answer,
            None => return Ok(Transition::Exit(MenuExit::EndOfInput)),
        }
    };
}

/// Console front end over the reservation service.
pub struct Menu<'a, R, W> {
    service: ReservationService<'a>,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub const fn new(service: ReservationService<'a>, console: Console<R, W>) -> Self {
        Self { service, console }
    }

    /// Run the main menu until the user quits or input ends.
    ///
    /// # Errors
    /// Returns error only when the console itself fails.
    pub fn run(&mut self) -> Result<MenuExit> {
        self.console.line(WELCOME.bold())?;

        let mut state = MenuState::Main;
        loop {
            let step = match state {
                MenuState::Main => self.main_menu(),
                MenuState::Navigation => self.navigation_menu(),
            };

            let transition = match step {
                Ok(transition) => transition,
                Err(e) if e.is_recoverable() => {
                    tracing::debug!("Operation aborted: {e}");
                    self.console.line(format!("{} {e}", "Erreur :".red().bold()))?;
                    Transition::To(MenuState::Main)
                }
                Err(e) => return Err(e),
            };

            match transition {
                Transition::To(next) => state = next,
                Transition::Exit(exit) => {
                    tracing::debug!(?exit, "Menu closed");
                    return Ok(exit);
                }
            }
        }
    }

    /// Show a room's reservations for a day, once.
    ///
    /// # Errors
    /// Returns error on invalid input, unknown room, or store failure.
    pub fn browse(&mut self) -> Result<()> {
        self.room_browser().map(|_| ())
    }

    /// Release the console, for inspecting captured output.
    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn main_menu(&mut self) -> Result<Transition> {
        self.console.line(SEPARATOR)?;
        self.console.line("1. Lister les salles disponibles")?;
        self.console.line("2. Créer une réservation")?;
        self.console.line("3. Annuler une réservation")?;
        self.console.line("4. Voir les réservations")?;
        self.console.line("5. Quitter")?;
        let choice = ask!(self.console, CHOICE_PROMPT);

        match parse_choice(&choice) {
            Some(1) => self.rooms_for_time(),
            Some(2) => self.create_reservation(),
            Some(3) => {
                let stub = self.service.cancel_reservation();
                self.console.line(stub)?;
                Ok(Transition::To(MenuState::Main))
            }
            Some(4) => {
                let stub = self.service.view_reservations();
                self.console.line(stub)?;
                Ok(Transition::To(MenuState::Main))
            }
            Some(5) => self.quit(),
            _ => {
                self.console.line(INVALID_OPTION)?;
                Ok(Transition::To(MenuState::Main))
            }
        }
    }

    fn navigation_menu(&mut self) -> Result<Transition> {
        self.console.line("1. Retourner au menu principal")?;
        self.console.line("2. Quitter")?;
        let choice = ask!(self.console, CHOICE_PROMPT);

        match parse_choice(&choice) {
            Some(1) => Ok(Transition::To(MenuState::Main)),
            Some(2) => self.quit(),
            _ => {
                self.console.line(INVALID_OPTION)?;
                Ok(Transition::To(MenuState::Navigation))
            }
        }
    }

    fn quit(&mut self) -> Result<Transition> {
        self.console.line(FAREWELL)?;
        Ok(Transition::Exit(MenuExit::Quit))
    }

    fn rooms_for_time(&mut self) -> Result<Transition> {
        let date = ask!(self.console, "Entrez la date (YYYY-MM-DD) : ");
        let time = ask!(self.console, "Entrez l'heure (HH:MM) : ");
        let date = parse_date(&date)?;
        let instant = parse_time(&time)?;

        let rooms = self.service.available_rooms_at(date, instant)?;

        self.console.line(format!(
            "Salles disponibles pour le {} à {} :",
            date.format("%Y-%m-%d"),
            instant.format("%H:%M")
        ))?;
        for (i, room) in rooms.iter().enumerate() {
            self.console.line(format_numbered_room(i + 1, room))?;
        }
        if rooms.is_empty() {
            self.console
                .line("Aucune salle disponible pour ce créneau horaire.")?;
        }

        Ok(Transition::To(MenuState::Main))
    }

    fn create_reservation(&mut self) -> Result<Transition> {
        self.console.line("Création d'une réservation...")?;
        let room_name = ask!(self.console, "Nom de la salle : ");
        let date = ask!(self.console, "Date (AAAA-MM-JJ) : ");
        let start = ask!(self.console, "Heure de début (HH:MM) : ");
        let end = ask!(self.console, "Heure de fin (HH:MM) : ");

        let request = ReservationRequest {
            room_name,
            date: parse_date(&date)?,
            window: TimeWindow::new(parse_time(&start)?, parse_time(&end)?),
        };

        match self.service.create_reservation(&request)? {
            ReservationOutcome::Created(reservation) => {
                self.console.line(format!(
                    "{} (n° {})",
                    "Réservation créée avec succès !".green().bold(),
                    reservation.id
                ))?;
                Ok(Transition::To(MenuState::Navigation))
            }
            ReservationOutcome::Unavailable => {
                self.console.line(
                    "La salle sélectionnée n'est pas disponible pour la date et l'heure indiquées."
                        .yellow(),
                )?;
                Ok(Transition::To(MenuState::Main))
            }
        }
    }

    fn room_browser(&mut self) -> Result<Transition> {
        let rooms = self.service.rooms()?;

        self.console.line("Salles disponibles :")?;
        for room in &rooms {
            self.console.line(format_room_line(room))?;
        }

        let selection = ask!(self.console, "Sélectionnez une salle : ");
        let date = ask!(self.console, "Entrez la date (YYYY-MM-DD) : ");

        let room = selection
            .parse::<i64>()
            .ok()
            .and_then(|id| rooms.iter().find(|r| r.id == id))
            .ok_or_else(|| AppError::invalid_input(format!("Salle inconnue : {selection}")))?;
        let date = parse_date(&date)?;

        let schedule = self.service.room_schedule(room.id, date)?;

        self.console.line(format!(
            "Réservations pour la salle {} le {} :",
            room.name,
            date.format("%Y-%m-%d")
        ))?;
        for (i, window) in schedule.iter().enumerate() {
            self.console.line(format_schedule_line(i + 1, window))?;
        }
        if schedule.is_empty() {
            self.console.line("Aucune réservation pour cette date.")?;
        }

        Ok(Transition::To(MenuState::Main))
    }
}
