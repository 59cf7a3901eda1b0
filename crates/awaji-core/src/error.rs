//! Domain error types.

use thiserror::Error;

/// Errors surfaced by the board, the story loader and the session host.
///
/// Illegal actions for the current phase are not errors; the engine ignores
/// them.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Board data breaks a structural invariant (e.g. no terminal cell).
    #[error("invalid board data: {0}")]
    InvalidBoard(String),

    /// The story text could not be read or parsed.
    #[error("story text error: {0}")]
    StoryText(String),

    /// A finished-game query was made before the terminal cell was reached.
    #[error("game has not finished yet")]
    GameNotFinished,

    /// A host-side failure, such as a poisoned lock.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
