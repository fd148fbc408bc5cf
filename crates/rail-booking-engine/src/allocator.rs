//! Validation of booking requests against a seat pool

use rail_booking_core::{BookingError, BookingOutcome, Confirmation, RejectReason, TicketCount};
use tracing::debug;

use crate::seat_pool::SeatPool;

/// Decides whether a booking request can be served and applies it
#[derive(Clone, Copy, Debug)]
pub struct BookingAllocator {
    per_request_cap: u32,
}

impl BookingAllocator {
    /// Create a new [`BookingAllocator`] accepting at most `per_request_cap`
    /// tickets per booking.
    pub const fn new(per_request_cap: u32) -> Self {
        Self { per_request_cap }
    }

    /// Maximum number of tickets a single booking may request
    pub fn per_request_cap(&self) -> u32 {
        self.per_request_cap
    }

    /// Try to book `requested` tickets from `pool`.
    ///
    /// The cap is checked before availability, so an oversized request is
    /// reported as such even when the pool could not serve it either. The
    /// pool is only mutated when the booking is confirmed.
    pub fn attempt_booking(
        &self,
        pool: &mut SeatPool,
        requested: TicketCount,
    ) -> Result<BookingOutcome, BookingError> {
        let requested = requested.get();
        if requested > self.per_request_cap {
            debug!(requested, cap = self.per_request_cap, "request exceeds cap");
            return Ok(BookingOutcome::Rejected(
                RejectReason::ExceedsPerRequestCap {
                    requested,
                    cap: self.per_request_cap,
                },
            ));
        }

        let available = pool.available_seats();
        if requested > available {
            debug!(requested, available, "not enough seats");
            return Ok(BookingOutcome::Rejected(
                RejectReason::InsufficientInventory {
                    requested,
                    available,
                },
            ));
        }

        let coaches = pool.deduct(requested)?;
        Ok(BookingOutcome::Confirmed(Confirmation {
            seats: requested,
            coaches,
        }))
    }
}
