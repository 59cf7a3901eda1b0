//! Shared test doubles for the Awaji life board game.

mod clock;
mod rng;
mod story;

pub use clock::{FixedClock, fixed_clock};
pub use rng::SequenceRng;
pub use story::{StaticStorySource, sample_story};
