//! Seat pools of all travel classes and the running booking total

use std::collections::BTreeMap;

use rail_booking_core::{
    BookingError, BookingHandler, BookingOutcome, CoachAvailability, Config, ConfigError,
    TicketCount, TravelClass,
};
use rand::Rng;
use tracing::{debug, error, info};

use crate::allocator::BookingAllocator;
use crate::seat_pool::SeatPool;

/// Inventory of all travel classes
#[derive(Clone, Debug)]
pub struct ClassRegistry {
    pools: BTreeMap<TravelClass, SeatPool>,
    allocator: BookingAllocator,
    /// Seats booked across all classes since creation
    total_booked_seats: u64,
}

impl ClassRegistry {
    /// Provision a seat pool for each of `classes` from `rng`.
    ///
    /// Classes are seeded in the order given, coaches in ascending order, so a
    /// fixed seed always yields the same inventory. The coach layout, the
    /// unavailable coaches and the per-request cap are taken from `config`;
    /// its seed is ignored in favour of `rng`. A class listed twice is
    /// provisioned once; the repeat does not consume random draws.
    pub fn initialize<R: Rng + ?Sized>(
        classes: &[TravelClass],
        config: &Config,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut pools = BTreeMap::new();
        for &class in classes {
            if pools.contains_key(&class) {
                debug!(%class, "class listed twice, keeping the first pool");
                continue;
            }
            let pool = SeatPool::seeded(
                rng,
                config.coaches_per_class,
                &config.unavailable_coaches,
                config.seat_ceiling,
            )?;
            pools.insert(class, pool);
        }
        Ok(Self::from_pools(pools, config.per_request_cap))
    }

    /// Create a [`ClassRegistry`] from already provisioned pools.
    pub fn from_pools(
        pools: impl IntoIterator<Item = (TravelClass, SeatPool)>,
        per_request_cap: u32,
    ) -> Self {
        Self {
            pools: pools.into_iter().collect(),
            allocator: BookingAllocator::new(per_request_cap),
            total_booked_seats: 0,
        }
    }

    /// Travel classes in this inventory, in menu order
    pub fn classes(&self) -> impl Iterator<Item = TravelClass> + '_ {
        self.pools.keys().copied()
    }

    /// Get the seat pool of `class`.
    pub fn pool(&self, class: TravelClass) -> Result<&SeatPool, BookingError> {
        self.pools
            .get(&class)
            .ok_or(BookingError::UnknownClass(class))
    }

    /// Try to book `requested` tickets in `class`.
    ///
    /// Confirmed bookings are added to [`Self::total_booked_seats()`].
    pub fn booking_for(
        &mut self,
        class: TravelClass,
        requested: TicketCount,
    ) -> Result<BookingOutcome, BookingError> {
        let pool = self
            .pools
            .get_mut(&class)
            .ok_or(BookingError::UnknownClass(class))?;

        let outcome = self
            .allocator
            .attempt_booking(pool, requested)
            .inspect_err(|err| error!(%class, %err, "seat pool invariant violated"))?;

        if let BookingOutcome::Confirmed(confirmation) = &outcome {
            self.total_booked_seats += u64::from(confirmation.seats);
            info!(
                %class,
                seats = confirmation.seats,
                left = pool.available_seats(),
                total = self.total_booked_seats,
                "booking confirmed"
            );
        }
        Ok(outcome)
    }

    /// Seats booked across all classes since creation
    pub fn total_booked_seats(&self) -> u64 {
        self.total_booked_seats
    }

    /// Maximum number of tickets a single booking may request
    pub fn per_request_cap(&self) -> u32 {
        self.allocator.per_request_cap()
    }
}

impl BookingHandler for ClassRegistry {
    fn availability(&self, class: TravelClass) -> Result<Vec<CoachAvailability>, BookingError> {
        Ok(self.pool(class)?.per_coach_availability())
    }

    fn available_seats(&self, class: TravelClass) -> Result<u32, BookingError> {
        Ok(self.pool(class)?.available_seats())
    }

    fn cumulative_booked(&self, class: TravelClass) -> Result<u32, BookingError> {
        Ok(self.pool(class)?.cumulative_booked())
    }

    fn book(
        &mut self,
        class: TravelClass,
        count: TicketCount,
    ) -> Result<BookingOutcome, BookingError> {
        self.booking_for(class, count)
    }

    fn total_booked_seats(&self) -> u64 {
        ClassRegistry::total_booked_seats(self)
    }

    fn per_request_cap(&self) -> u32 {
        ClassRegistry::per_request_cap(self)
    }
}
