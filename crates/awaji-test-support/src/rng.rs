//! Test RNG — scripted `DeterministicRng` implementation.

use awaji_core::rng::DeterministicRng;

/// Returns die faces from a predetermined sequence. Panics if the sequence
/// is exhausted, so a test that rolls more often than it scripted fails
/// loudly.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
