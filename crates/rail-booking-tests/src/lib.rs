use std::collections::BTreeMap;

use eyre::{eyre, Result};
use rail_booking_core::{Config, TravelClass};
use rail_booking_engine::{ClassRegistry, SeatPool};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use rail_booking_core::{BookingOutcome, RejectReason, TicketCount};

pub struct TestCtxBuilder {
    /// Inventory configuration; `seed` seeds every class not given explicitly
    pub config: Config,
    /// Classes provisioned with fixed seat counts instead of random ones
    pub fixed: BTreeMap<TravelClass, Vec<u32>>,
}

impl TestCtxBuilder {
    /// Create a new test context builder with the default layout and seed 0
    pub fn new() -> Self {
        TestCtxBuilder {
            config: Config {
                seed: Some(0),
                ..Config::default()
            },
            fixed: BTreeMap::new(),
        }
    }

    /// Set the seed the random classes are provisioned from
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Provision `class` with exactly `seats`
    pub fn with_coaches(mut self, class: TravelClass, seats: &[u32]) -> Self {
        self.fixed.insert(class, seats.to_vec());
        self
    }

    /// Set the number of coaches per class
    pub fn with_coaches_per_class(mut self, coaches: usize) -> Self {
        self.config.coaches_per_class = coaches;
        self
    }

    /// Set the seat ceiling
    pub fn with_seat_ceiling(mut self, ceiling: u32) -> Self {
        self.config.seat_ceiling = ceiling;
        self
    }

    /// Set the coaches that are out of service
    pub fn with_unavailable_coaches(mut self, coaches: &[usize]) -> Self {
        self.config.unavailable_coaches = coaches.to_vec();
        self
    }

    /// Set the per-request cap
    pub fn with_per_request_cap(mut self, cap: u32) -> Self {
        assert_ne!(cap, 0);
        self.config.per_request_cap = cap;
        self
    }

    /// Build the test context
    ///
    /// Without fixed classes this provisions exactly what
    /// [`rail_booking_engine::launch`] would for the same configuration.
    pub fn build(self) -> Result<TestCtx> {
        self.config.validate()?;
        let seed = self
            .config
            .seed
            .ok_or_else(|| eyre!("test contexts must be seeded"))?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut pools = Vec::new();
        for class in TravelClass::ALL {
            // Draw for every class so fixing one does not shift the others
            let seeded = SeatPool::seeded(
                &mut rng,
                self.config.coaches_per_class,
                &self.config.unavailable_coaches,
                self.config.seat_ceiling,
            )?;
            let pool = match self.fixed.get(&class) {
                Some(seats) => SeatPool::new(
                    seats.clone(),
                    self.config.unavailable_coaches.iter().copied(),
                    self.config.seat_ceiling,
                )?,
                None => seeded,
            };
            pools.push((class, pool));
        }

        Ok(TestCtx {
            registry: ClassRegistry::from_pools(pools, self.config.per_request_cap),
            config: self.config,
        })
    }
}

impl Default for TestCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Test context
pub struct TestCtx {
    /// Inventory under test
    pub registry: ClassRegistry,
    /// Configuration the inventory was built from
    pub config: Config,
}

impl TestCtx {
    /// Book `count` tickets in `class`
    pub fn book(&mut self, class: TravelClass, count: u32) -> Result<BookingOutcome> {
        let count = TicketCount::new(count).ok_or_else(|| eyre!("cannot book zero tickets"))?;
        Ok(self.registry.booking_for(class, count)?)
    }

    /// Current seat counts of every coach of `class`
    pub fn coaches(&self, class: TravelClass) -> Result<Vec<u32>> {
        Ok(self.registry.pool(class)?.coaches().to_vec())
    }

    /// Seats available in `class`
    pub fn available(&self, class: TravelClass) -> Result<u32> {
        Ok(self.registry.pool(class)?.available_seats())
    }
}
