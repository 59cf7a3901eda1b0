//! In-memory story sources.

use async_trait::async_trait;
use awaji_board::application::story::{StorySource, StoryText};
use awaji_core::error::DomainError;

/// A handful of story lines covering the common track and both branches.
#[must_use]
pub fn sample_story() -> StoryText {
    [
        ("1", "Arrive at Iwaya port"),
        ("7", "Help with the onion harvest"),
        ("13", "Decide where to live"),
        ("14A", "Move into a farmhouse"),
        ("14B", "Back to the Tokyo office"),
        ("30A", "Become a local organiser"),
        ("30B", "Bring colleagues to the island"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// A story source that returns a fixed lookup, or fails if constructed with
/// [`StaticStorySource::failing`].
#[derive(Debug, Clone)]
pub struct StaticStorySource {
    story: Option<StoryText>,
}

impl StaticStorySource {
    /// A source that always yields `story`.
    #[must_use]
    pub fn new(story: StoryText) -> Self {
        Self { story: Some(story) }
    }

    /// A source that always fails to load.
    #[must_use]
    pub fn failing() -> Self {
        Self { story: None }
    }
}

#[async_trait]
impl StorySource for StaticStorySource {
    async fn load(&self) -> Result<StoryText, DomainError> {
        self.story
            .clone()
            .ok_or_else(|| DomainError::StoryText("story unavailable".into()))
    }
}
