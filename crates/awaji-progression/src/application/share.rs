//! Result sharing text.

use awaji_board::{Branch, Outcome};
use awaji_core::error::DomainError;

use crate::domain::state::ProgressionState;

/// Formats the shareable result line for a finished game.
#[must_use]
pub fn share_summary(score: i32, branch: Option<Branch>, outcome: &Outcome) -> String {
    let route = branch.map_or("No route chosen", Branch::route_name);
    format!(
        "Awaji Life Game result: {} {} / RP {score}\nRoute: {route}\n#AwajiIsland #RelationshipPopulation",
        outcome.grade.emoji(),
        outcome.grade.title(),
    )
}

/// Share text for `state`.
///
/// # Errors
///
/// Returns `DomainError::GameNotFinished` until the terminal cell has been
/// graded.
pub fn share_state(state: &ProgressionState) -> Result<String, DomainError> {
    let outcome = state.outcome().ok_or(DomainError::GameNotFinished)?;
    Ok(share_summary(state.score(), state.branch(), outcome))
}
