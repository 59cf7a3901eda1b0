//! Awaji Life Board — board model and outcome evaluation.
//!
//! Builds the immutable track for a branch selection, grades a final score,
//! and turns story text into the lookup the board labels its cells with.
//! Everything in `domain` is pure; `application` holds the story loaders.

pub mod application;
pub mod domain;

pub use application::story::{FileStorySource, StorySource, StoryText, parse_story};
pub use domain::cell::{Branch, Cell, Segment};
pub use domain::outcome::{Grade, Outcome, evaluate};
pub use domain::track::{Track, build_track, verify_track};
