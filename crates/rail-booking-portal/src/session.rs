//! 🎫 The interactive reservation session

use std::io::{self, BufRead, Write};

use eyre::Result;
use rail_booking_core::{BookingHandler, BookingOutcome, RejectReason, TicketCount, TravelClass};
use tracing::debug;

use crate::render::{self, EXIT_CHOICE};

/// Entry picked from the main menu
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MenuChoice {
    Book(TravelClass),
    Exit,
}

/// A reservation session reading commands from `input` and writing to
/// `output`
///
/// All inventory access goes through the [`BookingHandler`].
pub struct ReservationSession<H, R, W> {
    handler: H,
    input: R,
    output: W,
}

impl<H: BookingHandler, R: BufRead, W: Write> ReservationSession<H, R, W> {
    /// Create a new session
    pub fn new(handler: H, input: R, output: W) -> Self {
        Self {
            handler,
            input,
            output,
        }
    }

    /// Run the menu loop until the user exits or the input ends.
    ///
    /// Returns the handler so the final inventory can be inspected.
    pub fn run(mut self) -> Result<H> {
        render::welcome(&mut self.output)?;
        loop {
            render::menu(&mut self.output)?;
            let Some(line) = self.read_line()? else {
                debug!("input closed, leaving the portal");
                break;
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    render::invalid_input(&mut self.output, format_args!("`{}`", line.trim()))?;
                    continue;
                }
            };

            match Self::menu_choice(choice) {
                Some(MenuChoice::Book(class)) => self.handle_class(class)?,
                Some(MenuChoice::Exit) => break,
                None => render::invalid_choice(&mut self.output)?,
            }
        }

        render::goodbye(&mut self.output, self.handler.total_booked_seats())?;
        Ok(self.handler)
    }

    fn menu_choice(choice: i64) -> Option<MenuChoice> {
        let choice = u32::try_from(choice).ok()?;
        if choice == EXIT_CHOICE {
            return Some(MenuChoice::Exit);
        }
        TravelClass::from_menu_choice(choice).map(MenuChoice::Book)
    }

    /// Show the availability of `class` and book tickets in it.
    fn handle_class(&mut self, class: TravelClass) -> Result<()> {
        let coaches = self.handler.availability(class)?;
        let available = self.handler.available_seats(class)?;
        render::availability(&mut self.output, class, &coaches, available)?;

        if available == 0 {
            render::sold_out(&mut self.output, class)?;
        } else {
            render::ticket_prompt(&mut self.output, self.handler.per_request_cap())?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let count = match line.parse::<TicketCount>() {
                Ok(count) => count,
                Err(err) => {
                    // Nothing was attempted, so there is no status to report.
                    render::invalid_input(&mut self.output, err)?;
                    return Ok(());
                }
            };

            match self.handler.book(class, count)? {
                BookingOutcome::Confirmed(confirmation) => {
                    render::confirmed(&mut self.output, class, &confirmation)?
                }
                BookingOutcome::Rejected(reason) => {
                    render::rejected(&mut self.output, &reason)?;
                    if let RejectReason::ExceedsPerRequestCap { .. } = reason {
                        return Ok(());
                    }
                }
            }
        }

        let booked = self.handler.cumulative_booked(class)?;
        render::status(&mut self.output, class, booked)?;
        Ok(())
    }

    /// Read the next line, [`None`] once the input is exhausted
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
