//! 🏗 Text rendering of menus and booking results

use std::io::{self, Write};

use rail_booking_core::{CoachAvailability, Confirmation, RejectReason, TravelClass};

/// Number of the menu entry that leaves the portal
pub const EXIT_CHOICE: u32 = 4;

pub fn welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "🚂 Welcome to the Railway Ticket Reservation Portal! 🎫")?;
    writeln!(out, "-------------------------------------------------------")
}

pub fn menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "## 🎟️ Select a Ticket Type:")?;
    for class in TravelClass::ALL {
        writeln!(out, "{}. {}", class.menu_choice(), class)?;
    }
    writeln!(out, "{EXIT_CHOICE}. Exit Portal")?;
    write!(out, "Enter your choice (1-{EXIT_CHOICE}): ")?;
    out.flush()
}

pub fn invalid_input(out: &mut impl Write, reason: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "❌ Invalid input ({reason}). Please enter a number.")
}

pub fn invalid_choice(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "⚠️ Invalid choice. Please select from 1 to {EXIT_CHOICE}."
    )
}

/// Per-coach availability followed by the class total
pub fn availability(
    out: &mut impl Write,
    class: TravelClass,
    coaches: &[CoachAvailability],
    available: u32,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "### 🔎 Checking {class} Seat Availability...")?;
    writeln!(out)?;
    writeln!(out, "Available Seats per Coach:")?;
    for coach in coaches {
        // Coaches are numbered from 1 for passengers
        let number = coach.coach + 1;
        if coach.unavailable {
            writeln!(out, "Coach {number}: 🚧 Under Maintenance (Skipping check)")?;
        } else {
            writeln!(out, "Coach {number}: {} seats", coach.available)?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total Available Seats in {class}: **{available}**")?;
    writeln!(out, "---")
}

pub fn sold_out(out: &mut impl Write, class: TravelClass) -> io::Result<()> {
    writeln!(out, "🚫 No seats available in {class}.")
}

pub fn ticket_prompt(out: &mut impl Write, cap: u32) -> io::Result<()> {
    writeln!(out, "✅ Seats are available! Proceeding to booking...")?;
    write!(out, "How many tickets do you want to book (Max {cap})? ")?;
    out.flush()
}

pub fn confirmed(
    out: &mut impl Write,
    class: TravelClass,
    confirmation: &Confirmation,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "🌟 Successfully booked **{}** {class} tickets!",
        confirmation.seats
    )?;
    for deduction in &confirmation.coaches {
        writeln!(
            out,
            "   Coach {}: {} seats",
            deduction.coach + 1,
            deduction.seats
        )?;
    }
    Ok(())
}

pub fn rejected(out: &mut impl Write, reason: &RejectReason) -> io::Result<()> {
    writeln!(out)?;
    match reason {
        RejectReason::ExceedsPerRequestCap { cap, .. } => writeln!(
            out,
            "🛑 Booking limit exceeded! You can book a maximum of {cap} tickets at a time."
        ),
        RejectReason::InsufficientInventory {
            requested,
            available,
        } => writeln!(
            out,
            "😔 Insufficient seats. You requested {requested} but only {available} are available."
        ),
    }
}

/// Post-booking status block of a class
pub fn status(out: &mut impl Write, class: TravelClass, booked: u32) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Post-Booking Status Check ---")?;
    writeln!(
        out,
        "Total seats booked in {class} since the start of the program: **{booked}**"
    )?;
    writeln!(out, "---------------------------------")
}

pub fn goodbye(out: &mut impl Write, total_booked: u64) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "👋 Thank you for using the Railway Reservation Portal. Goodbye!"
    )?;
    writeln!(out, "📊 Total tickets booked today: {total_booked}")?;
    out.flush()
}
