// SPDX-License-Identifier: MIT OR Apache-2.0
//! The random-number collaborator used by the demonstration drivers.
//!
//! The lock never draws random numbers; only the drivers in
//! [`demo`](crate::demo) do, to vary how many operations each thread performs
//! and how long it pauses in between.

use crate::config::check_range;
use crate::error::ConfigError;
use rand::Rng;

/// Produces integers uniformly distributed over a fixed inclusive range.
pub trait RandomGenerator: Send + Sync {
    /// Draws the next number.
    fn number(&self) -> u64;
}

impl<G: RandomGenerator + ?Sized> RandomGenerator for &G {
    fn number(&self) -> u64 {
        (**self).number()
    }
}

impl<G: RandomGenerator + ?Sized> RandomGenerator for std::sync::Arc<G> {
    fn number(&self) -> u64 {
        (**self).number()
    }
}

/// Uniform integers in `[min, max]`, drawn from the thread-local generator.
///
/// ```
/// use readers_writers::random::{RandomGenerator, UniformRandom};
///
/// let dice = UniformRandom::new(1, 6).unwrap();
/// let roll = dice.number();
/// assert!((1..=6).contains(&roll));
///
/// assert!(UniformRandom::new(6, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRandom {
    min: u64,
    max: u64,
}

impl UniformRandom {
    /// A generator over `min..=max`.
    ///
    /// Fails with [`ConfigError::EmptyRange`] when `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, ConfigError> {
        check_range(min, max)?;
        Ok(UniformRandom { min, max })
    }

    /// Lower bound, inclusive.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound, inclusive.
    pub fn max(&self) -> u64 {
        self.max
    }
}

impl RandomGenerator for UniformRandom {
    fn number(&self) -> u64 {
        rand::rng().random_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_inclusive_bounds() {
        let generator = UniformRandom::new(3, 5).unwrap();
        let mut seen = [false; 3];
        for _ in 0..500 {
            let n = generator.number();
            assert!((3..=5).contains(&n), "{n} out of range");
            seen[(n - 3) as usize] = true;
        }
        // 500 draws over three values: every value shows up
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn single_value_range() {
        let generator = UniformRandom::new(4, 4).unwrap();
        assert_eq!(generator.number(), 4);
        assert_eq!((generator.min(), generator.max()), (4, 4));
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            UniformRandom::new(10, 2),
            Err(ConfigError::EmptyRange { min: 10, max: 2 })
        );
    }
}
