//! Seat inventory of a single travel class

use std::collections::BTreeSet;

use rail_booking_core::{capacity, BookingError, CoachAvailability, CoachDeduction, ConfigError};
use rand::Rng;
use tracing::debug;

/// Seat inventory of one travel class, split into coaches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatPool {
    /// Seats left in each coach
    coaches: Vec<u32>,
    /// Coaches out of service: never offered, never deducted from
    unavailable: BTreeSet<usize>,
    /// Seats every coach is assumed to have been provisioned with
    seat_ceiling: u32,
}

impl SeatPool {
    /// Create a [`SeatPool`] from explicit per-coach seat counts.
    pub fn new(
        coaches: Vec<u32>,
        unavailable: impl IntoIterator<Item = usize>,
        seat_ceiling: u32,
    ) -> Result<Self, ConfigError> {
        if coaches.is_empty() {
            return Err(ConfigError::NoCoaches);
        }
        capacity(coaches.len(), seat_ceiling)?;
        if let Some((coach, &seats)) = coaches
            .iter()
            .enumerate()
            .find(|&(_, &seats)| seats > seat_ceiling)
        {
            return Err(ConfigError::SeatsAboveCeiling {
                coach,
                seats,
                seat_ceiling,
            });
        }

        let unavailable: BTreeSet<usize> = unavailable.into_iter().collect();
        if let Some(&coach) = unavailable.iter().find(|&&coach| coach >= coaches.len()) {
            return Err(ConfigError::CoachOutOfRange {
                coach,
                coaches: coaches.len(),
            });
        }

        Ok(Self {
            coaches,
            unavailable,
            seat_ceiling,
        })
    }

    /// Create a [`SeatPool`] of `num_coaches` coaches, each holding a number of
    /// seats drawn uniformly from `0..=seat_ceiling`.
    ///
    /// Unavailable coaches are drawn as well, so the values of the other
    /// coaches do not depend on which coaches are out of service.
    pub fn seeded<R: Rng + ?Sized>(
        rng: &mut R,
        num_coaches: usize,
        unavailable: &[usize],
        seat_ceiling: u32,
    ) -> Result<Self, ConfigError> {
        let coaches = (0..num_coaches)
            .map(|_| rng.gen_range(0..=seat_ceiling))
            .collect();
        Self::new(coaches, unavailable.iter().copied(), seat_ceiling)
    }

    /// Seats left in each coach, including coaches out of service
    pub fn coaches(&self) -> &[u32] {
        &self.coaches
    }

    /// Whether `coach` is out of service
    pub fn is_unavailable(&self, coach: usize) -> bool {
        self.unavailable.contains(&coach)
    }

    /// Seats every coach is assumed to have been provisioned with
    pub fn seat_ceiling(&self) -> u32 {
        self.seat_ceiling
    }

    /// Seats the class was provisioned with under the ceiling assumption
    pub fn total_capacity(&self) -> u32 {
        // `new` checked that this product fits
        self.coaches.len() as u32 * self.seat_ceiling
    }

    /// Get the number of seats that can be booked.
    pub fn available_seats(&self) -> u32 {
        self.coaches
            .iter()
            .enumerate()
            .filter(|(coach, _)| !self.is_unavailable(*coach))
            .map(|(_, &seats)| seats)
            .sum()
    }

    /// Availability of every coach, in coach order
    pub fn per_coach_availability(&self) -> Vec<CoachAvailability> {
        self.coaches
            .iter()
            .enumerate()
            .map(|(coach, &available)| CoachAvailability {
                coach,
                available,
                unavailable: self.is_unavailable(coach),
            })
            .collect()
    }

    /// Seats consumed since the class was provisioned at the ceiling
    ///
    /// Coaches out of service count towards the provisioned capacity but are
    /// never booked, so they only ever contribute what they were seeded with.
    pub fn cumulative_booked(&self) -> u32 {
        self.total_capacity() - self.coaches.iter().sum::<u32>()
    }

    /// Deduct `count` seats.
    ///
    /// Coaches are filled first-fit from the lowest index, skipping coaches
    /// out of service. Returns the seats taken from each touched coach.
    ///
    /// Fails with [`BookingError::Overdraw`] (leaving the pool untouched) if
    /// fewer than `count` seats are available.
    pub fn deduct(&mut self, count: u32) -> Result<Vec<CoachDeduction>, BookingError> {
        let available = self.available_seats();
        if count > available {
            return Err(BookingError::Overdraw {
                requested: count,
                available,
            });
        }

        let mut remaining = count;
        let mut split = Vec::new();
        for (coach, seats) in self.coaches.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            if self.unavailable.contains(&coach) || *seats == 0 {
                continue;
            }

            let taken = (*seats).min(remaining);
            *seats -= taken;
            remaining -= taken;
            debug!(coach, taken, left = *seats, "deducted seats from coach");
            split.push(CoachDeduction {
                coach,
                seats: taken,
            });
        }
        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn pool(coaches: &[u32]) -> SeatPool {
        SeatPool::new(coaches.to_vec(), [2], 20).unwrap()
    }

    #[test]
    fn availability_skips_unavailable_coach() {
        let pool = pool(&[4, 4, 4, 4, 4]);
        assert_eq!(pool.available_seats(), 16);
        assert_eq!(pool.total_capacity(), 100);
        assert_eq!(pool.cumulative_booked(), 80);

        let coaches = pool.per_coach_availability();
        assert_eq!(coaches.len(), 5);
        assert!(coaches[2].unavailable);
        assert!(coaches.iter().filter(|c| c.unavailable).count() == 1);
        assert_eq!(coaches[3].available, 4);
    }

    #[test]
    fn deduct_fills_first_fit_left_to_right() {
        let mut pool = SeatPool::new(vec![5, 0, 999, 3, 10], [2], 1_000).unwrap();
        let split = pool.deduct(7).unwrap();
        assert_eq!(pool.coaches(), &[0, 0, 999, 1, 10]);
        assert_eq!(
            split,
            vec![
                CoachDeduction { coach: 0, seats: 5 },
                CoachDeduction { coach: 3, seats: 2 },
            ]
        );
    }

    #[test]
    fn deduct_can_drain_every_available_coach() {
        let mut pool = pool(&[1, 2, 20, 3, 4]);
        pool.deduct(10).unwrap();
        assert_eq!(pool.coaches(), &[0, 0, 20, 0, 0]);
        assert_eq!(pool.available_seats(), 0);
    }

    #[test]
    fn overdraw_leaves_pool_untouched() {
        let mut pool = pool(&[1, 1, 20, 1, 1]);
        assert_eq!(
            pool.deduct(5),
            Err(BookingError::Overdraw {
                requested: 5,
                available: 4
            })
        );
        assert_eq!(pool.coaches(), &[1, 1, 20, 1, 1]);
    }

    #[test]
    fn rejects_inconsistent_layouts() {
        assert_eq!(
            SeatPool::new(vec![], None, 20),
            Err(ConfigError::NoCoaches)
        );
        assert_eq!(
            SeatPool::new(vec![3, 21], None, 20),
            Err(ConfigError::SeatsAboveCeiling {
                coach: 1,
                seats: 21,
                seat_ceiling: 20
            })
        );
        assert_eq!(
            SeatPool::new(vec![3, 4], [2], 20),
            Err(ConfigError::CoachOutOfRange {
                coach: 2,
                coaches: 2
            })
        );
    }

    #[test]
    fn seeded_pools_stay_within_ceiling() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let pool = SeatPool::seeded(&mut rng, 5, &[2], 20).unwrap();
            assert_eq!(pool.coaches().len(), 5);
            assert!(pool.coaches().iter().all(|&seats| seats <= 20));
        }
    }

    #[test]
    fn seeding_is_reproducible() {
        let a = SeatPool::seeded(&mut ChaCha8Rng::seed_from_u64(42), 5, &[2], 20).unwrap();
        let b = SeatPool::seeded(&mut ChaCha8Rng::seed_from_u64(42), 5, &[2], 20).unwrap();
        assert_eq!(a, b);
    }
}
