//! Story text lookup.
//!
//! The board labels each cell with a line from the story file. Lines look
//! like `14A：Move into an old farmhouse`, optionally prefixed with `No.`.
//! Keys are `"{number}"` for common cells and `"{number}{A|B}"` for branch
//! cells. A missing or unreadable story is never fatal for the board.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use awaji_core::error::DomainError;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::debug;

static STORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:No\.?\s*)?(\d{1,2})([AB])?\s*[：:.\-、．]*\s*(.+)$")
        .expect("story line pattern is valid")
});

/// Mapping from story key to display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryText(HashMap<String, String>);

impl StoryText {
    /// Text for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for StoryText {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<String, String>> for StoryText {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Parses the line-oriented story format. Lines that do not start with a
/// cell number are skipped; a later line for the same key wins.
#[must_use]
pub fn parse_story(raw: &str) -> StoryText {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| STORY_LINE.captures(line))
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str();
            let letter = caps.get(2).map_or("", |m| m.as_str());
            let text = caps.get(3)?.as_str().trim();
            (!text.is_empty()).then(|| (format!("{number}{letter}"), text.to_owned()))
        })
        .collect()
}

/// Parses a YAML document mapping story keys to text. Numeric keys are
/// accepted for common cells (`7: Walk the beach`).
///
/// # Errors
///
/// Returns `DomainError::StoryText` if the document is not a mapping.
pub fn parse_story_yaml(raw: &str) -> Result<StoryText, DomainError> {
    let mapping: Mapping = serde_yaml::from_str(raw)
        .map_err(|e| DomainError::StoryText(format!("invalid story YAML: {e}")))?;

    Ok(mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let key = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            match value {
                Value::String(text) if !text.trim().is_empty() => {
                    Some((key, text.trim().to_owned()))
                }
                _ => None,
            }
        })
        .collect())
}

/// Supplies the story text lookup, possibly after the engine has started.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Loads the complete lookup.
    async fn load(&self) -> Result<StoryText, DomainError>;
}

/// Reads a story from disk. `.yaml`/`.yml` files are parsed as a key/text
/// mapping, anything else with the line format.
#[derive(Debug, Clone)]
pub struct FileStorySource {
    path: PathBuf,
}

impl FileStorySource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
    }
}

#[async_trait]
impl StorySource for FileStorySource {
    async fn load(&self) -> Result<StoryText, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::StoryText(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let raw = String::from_utf8_lossy(&bytes);

        let story = if self.is_yaml() {
            parse_story_yaml(&raw)?
        } else {
            parse_story(&raw)
        };
        debug!(path = %self.path.display(), entries = story.len(), "story text loaded");
        Ok(story)
    }
}
