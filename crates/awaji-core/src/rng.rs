//! Random number abstraction for the die.
//!
//! Production code rolls with an OS-seeded [`StdRng`]; tests inject a
//! scripted implementation so every roll is known in advance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on the game die.
pub const DIE_FACES: u32 = 6;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Rolls one six-sided die.
    fn roll_die(&mut self) -> u8 {
        let face = self.next_u32_range(1, DIE_FACES).clamp(1, DIE_FACES);
        u8::try_from(face).unwrap_or(1)
    }
}

/// [`DeterministicRng`] backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds from a fixed value, for reproducible play-throughs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}
