use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

use crate::TravelClass;

/// Number of tickets requested in a single booking attempt
///
/// Always positive. Whether it is within the per-request cap is decided by
/// the allocator, not here.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TicketCount(NonZeroU32);

impl TicketCount {
    /// Create a ticket count, [`None`] if `count` is zero
    #[inline]
    pub fn new(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(Self)
    }

    /// Get the number of tickets
    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Error returned when user input does not describe a ticket count
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseTicketCountError {
    /// The input is not an integer (or does not fit one)
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// The input is zero or negative
    #[error("the number of tickets must be positive, got {0}")]
    NotPositive(i64),
}

impl FromStr for TicketCount {
    type Err = ParseTicketCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let n: i64 = s
            .parse()
            .map_err(|_| ParseTicketCountError::NotANumber(s.to_owned()))?;
        if n <= 0 {
            return Err(ParseTicketCountError::NotPositive(n));
        }
        u32::try_from(n)
            .ok()
            .and_then(TicketCount::new)
            .ok_or_else(|| ParseTicketCountError::NotANumber(s.to_owned()))
    }
}

/// Availability of a single coach, for display
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CoachAvailability {
    /// Index of the coach within its class (0-based)
    pub coach: usize,
    /// Seats left in the coach
    pub available: u32,
    /// The coach is out of service: its seats are neither offered nor booked
    pub unavailable: bool,
}

/// Seats taken from one coach by a confirmed booking
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CoachDeduction {
    /// Index of the coach within its class (0-based)
    pub coach: usize,
    /// Seats taken from the coach
    pub seats: u32,
}

/// A confirmed booking
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Confirmation {
    /// Number of seats booked
    pub seats: u32,
    /// How the seats were split over the coaches, in coach order
    pub coaches: Vec<CoachDeduction>,
}

/// Why a booking request was turned down
///
/// Rejections are ordinary outcomes. The seat pool is left untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum RejectReason {
    /// More tickets were requested than a single booking may hold
    #[error("booking limit exceeded: at most {cap} tickets can be booked at a time, {requested} requested")]
    ExceedsPerRequestCap {
        /// Requested number of tickets
        requested: u32,
        /// Per-request cap
        cap: u32,
    },
    /// The class has fewer seats left than requested
    #[error("insufficient seats: {requested} requested but only {available} available")]
    InsufficientInventory {
        /// Requested number of tickets
        requested: u32,
        /// Seats available in the class at the time of the request
        available: u32,
    },
}

/// Result of a booking attempt
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BookingOutcome {
    /// The seats were booked and deducted from the pool
    Confirmed(Confirmation),
    /// The request was turned down, nothing changed
    Rejected(RejectReason),
}

impl BookingOutcome {
    /// Number of seats this outcome booked (zero for rejections)
    pub fn booked_seats(&self) -> u32 {
        match self {
            BookingOutcome::Confirmed(confirmation) => confirmation.seats,
            BookingOutcome::Rejected(_) => 0,
        }
    }

    /// Whether the booking went through
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingOutcome::Confirmed(_))
    }
}

/// Errors that indicate a broken contract between caller and inventory
///
/// None of these can be caused by user input; the portal treats them as
/// fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The class is not part of the inventory
    #[error("{0} is not part of this inventory")]
    UnknownClass(TravelClass),
    /// A deduction exceeded the seats available in the pool
    #[error("cannot deduct {requested} seats, only {available} available")]
    Overdraw {
        /// Seats to be deducted
        requested: u32,
        /// Seats available in the pool
        available: u32,
    },
}

/// Interface for handling booking requests from the portal
///
/// 📌 Hint: The class registry implements this trait; the reservation session
/// only talks to the inventory through it.
pub trait BookingHandler {
    /// Per-coach availability of `class`, in coach order
    fn availability(&self, class: TravelClass) -> Result<Vec<CoachAvailability>, BookingError>;

    /// Seats available in `class`, excluding coaches out of service
    fn available_seats(&self, class: TravelClass) -> Result<u32, BookingError>;

    /// Seats booked in `class`, derived from the seat ceiling
    fn cumulative_booked(&self, class: TravelClass) -> Result<u32, BookingError>;

    /// Try to book `count` tickets in `class`
    fn book(
        &mut self,
        class: TravelClass,
        count: TicketCount,
    ) -> Result<BookingOutcome, BookingError>;

    /// Seats booked across all classes since the inventory was created
    fn total_booked_seats(&self) -> u64;

    /// Maximum number of tickets a single booking may request
    fn per_request_cap(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_counts() {
        assert_eq!("3".parse::<TicketCount>().map(TicketCount::get), Ok(3));
        assert_eq!(" 12\n".parse::<TicketCount>().map(TicketCount::get), Ok(12));
    }

    #[test]
    fn rejects_malformed_counts() {
        assert_eq!(
            "three".parse::<TicketCount>(),
            Err(ParseTicketCountError::NotANumber("three".into()))
        );
        assert_eq!(
            "0".parse::<TicketCount>(),
            Err(ParseTicketCountError::NotPositive(0))
        );
        assert_eq!(
            "-4".parse::<TicketCount>(),
            Err(ParseTicketCountError::NotPositive(-4))
        );
        assert_eq!(
            "99999999999".parse::<TicketCount>(),
            Err(ParseTicketCountError::NotANumber("99999999999".into()))
        );
        assert_eq!(TicketCount::new(0), None);
    }

    #[test]
    fn only_confirmations_book_seats() {
        let confirmed = BookingOutcome::Confirmed(Confirmation {
            seats: 4,
            coaches: vec![CoachDeduction { coach: 0, seats: 4 }],
        });
        assert!(confirmed.is_confirmed());
        assert_eq!(confirmed.booked_seats(), 4);

        let rejected = BookingOutcome::Rejected(RejectReason::ExceedsPerRequestCap {
            requested: 7,
            cap: 6,
        });
        assert!(!rejected.is_confirmed());
        assert_eq!(rejected.booked_seats(), 0);
    }
}
