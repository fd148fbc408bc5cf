//! 🏗 Shared vocabulary of the seat booking system: configuration, travel
//! classes, booking outcomes and the interface the portal drives.
#![warn(missing_docs)]

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

mod booking;
mod class;

pub use booking::{
    BookingError, BookingHandler, BookingOutcome, CoachAvailability, CoachDeduction,
    Confirmation, ParseTicketCountError, RejectReason, TicketCount,
};
pub use class::TravelClass;

/// Configuration of the seat booking system
///
/// Every travel class is provisioned with the same coach layout.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Number of coaches per travel class
    pub coaches_per_class: usize,
    /// Seats each coach holds at most
    ///
    /// Initial seat counts are drawn from `0..=seat_ceiling`.
    pub seat_ceiling: u32,
    /// Maximum number of tickets a single booking may request
    pub per_request_cap: u32,
    /// Indices of coaches that are out of service in every class
    pub unavailable_coaches: Vec<usize>,
    /// Seed for the random source used to provision the coaches
    ///
    /// Without a seed the operating system's entropy is used.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coaches_per_class: 5,
            seat_ceiling: 20,
            per_request_cap: 6,
            unavailable_coaches: vec![2],
            seed: None,
        }
    }
}

impl Config {
    /// Check that the configuration describes a usable inventory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coaches_per_class == 0 {
            return Err(ConfigError::NoCoaches);
        }
        if self.per_request_cap == 0 {
            return Err(ConfigError::ZeroRequestCap);
        }
        if let Some(&coach) = self
            .unavailable_coaches
            .iter()
            .find(|&&coach| coach >= self.coaches_per_class)
        {
            return Err(ConfigError::CoachOutOfRange {
                coach,
                coaches: self.coaches_per_class,
            });
        }
        let flagged: BTreeSet<usize> = self.unavailable_coaches.iter().copied().collect();
        if flagged.len() == self.coaches_per_class {
            return Err(ConfigError::AllCoachesUnavailable);
        }
        capacity(self.coaches_per_class, self.seat_ceiling)?;
        Ok(())
    }
}

/// Total number of seats `coaches` coaches of `seat_ceiling` seats provide
///
/// Fails if the product does not fit into a [`u32`].
pub fn capacity(coaches: usize, seat_ceiling: u32) -> Result<u32, ConfigError> {
    u32::try_from(coaches)
        .ok()
        .and_then(|n| n.checked_mul(seat_ceiling))
        .ok_or(ConfigError::CapacityOverflow {
            coaches,
            seat_ceiling,
        })
}

/// Reasons a configuration or a seat layout is rejected
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A travel class needs at least one coach
    #[error("a travel class needs at least one coach")]
    NoCoaches,
    /// A per-request cap of zero would reject every booking
    #[error("the per-request cap must be at least 1")]
    ZeroRequestCap,
    /// An unavailable coach index does not name a coach
    #[error("coach index {coach} is out of range for {coaches} coaches")]
    CoachOutOfRange {
        /// Offending index
        coach: usize,
        /// Number of coaches per class
        coaches: usize,
    },
    /// Every coach is flagged unavailable
    #[error("at least one coach must be in service")]
    AllCoachesUnavailable,
    /// A coach holds more seats than the ceiling allows
    #[error("coach {coach} holds {seats} seats, above the ceiling of {seat_ceiling}")]
    SeatsAboveCeiling {
        /// Offending coach index
        coach: usize,
        /// Seats in that coach
        seats: u32,
        /// Configured ceiling
        seat_ceiling: u32,
    },
    /// The class capacity does not fit into a [`u32`]
    #[error("{coaches} coaches of {seat_ceiling} seats exceed the supported capacity")]
    CapacityOverflow {
        /// Number of coaches
        coaches: usize,
        /// Configured ceiling
        seat_ceiling: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_layouts() {
        let config = Config {
            coaches_per_class: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoCoaches));

        let config = Config {
            per_request_cap: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRequestCap));

        let config = Config {
            unavailable_coaches: vec![5],
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CoachOutOfRange {
                coach: 5,
                coaches: 5
            })
        );

        let config = Config {
            coaches_per_class: 2,
            unavailable_coaches: vec![1, 0, 1],
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AllCoachesUnavailable));

        let config = Config {
            seat_ceiling: u32::MAX,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn capacity_multiplies_coaches_and_ceiling() {
        assert_eq!(capacity(5, 20), Ok(100));
        assert_eq!(capacity(0, 20), Ok(0));
    }
}
