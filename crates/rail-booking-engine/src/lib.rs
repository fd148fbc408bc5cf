//! 🚂 Seat inventory and booking allocation for the railway reservation
//! portal.
//!
//! The inventory is made up of a [seat pool][SeatPool] per travel class, kept
//! in a [class registry][ClassRegistry]. Bookings are validated and spread
//! over the coaches by the [allocator][BookingAllocator].

use rail_booking_core::{Config, ConfigError, TravelClass};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

mod allocator;
mod registry;
mod seat_pool;

pub use allocator::BookingAllocator;
pub use registry::ClassRegistry;
pub use seat_pool::SeatPool;

/// Entrypoint of the inventory
///
/// Provisions every [`TravelClass`] according to `config`. With a configured
/// seed the inventory is reproducible, otherwise it is drawn from the
/// operating system's entropy.
pub fn launch(config: &Config) -> Result<ClassRegistry, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let registry = ClassRegistry::initialize(&TravelClass::ALL, config, &mut rng)?;

    info!(
        seed = ?config.seed,
        coaches = config.coaches_per_class,
        ceiling = config.seat_ceiling,
        cap = config.per_request_cap,
        "seat inventory provisioned"
    );
    Ok(registry)
}
