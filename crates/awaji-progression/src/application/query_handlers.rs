//! Read-only views of the progression state.
//!
//! These are the snapshots republished to the presentation layer after
//! every transition.

use awaji_board::{Cell, Outcome, Segment};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::state::{HistoryEntry, ProgressionState};

/// Read-only view of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Stable identifier.
    pub id: String,
    /// Index in the active track.
    pub position: usize,
    /// Printed cell number.
    pub number: u8,
    /// Segment the cell belongs to.
    pub segment: Segment,
    /// Board label.
    pub display_text: String,
    /// Score delta applied on a stop.
    pub score_delta: i32,
    /// Whether this is the branch point.
    pub is_branch_point: bool,
    /// Whether this ends the game.
    pub is_terminal: bool,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            id: cell.id.clone(),
            position: cell.position,
            number: cell.number,
            segment: cell.segment,
            display_text: cell.display_text.clone(),
            score_delta: cell.score_delta,
            is_branch_point: cell.is_branch_point,
            is_terminal: cell.is_terminal,
        }
    }
}

/// Read-only view of one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    /// Position stopped on.
    pub position: usize,
    /// Delta applied.
    pub score_delta: i32,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl From<&HistoryEntry> for HistoryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            position: entry.position,
            score_delta: entry.score_delta,
            timestamp: entry.timestamp,
        }
    }
}

/// Read-only view of the final grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeView {
    /// Grade letter.
    pub grade: String,
    /// Summary line.
    pub summary: String,
    /// Grade emoji.
    pub emoji: String,
    /// Grade title.
    pub title: String,
    /// Grade description.
    pub description: String,
}

impl From<&Outcome> for OutcomeView {
    fn from(outcome: &Outcome) -> Self {
        Self {
            grade: outcome.grade.to_string(),
            summary: outcome.summary.clone(),
            emoji: outcome.grade.emoji().to_owned(),
            title: outcome.grade.title().to_owned(),
            description: outcome.grade.description().to_owned(),
        }
    }
}

/// Read-only view of a play-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Current phase as a string.
    pub phase: String,
    /// Marker position.
    pub position: usize,
    /// Chosen branch letter, if any.
    pub branch: Option<String>,
    /// Running score.
    pub score: i32,
    /// Steps owed after the branch choice.
    pub pending_steps: u32,
    /// Last die face shown.
    pub last_roll: Option<u8>,
    /// Stops made so far.
    pub history: Vec<HistoryView>,
    /// Active track.
    pub track: Vec<CellView>,
    /// Final grade, once reached.
    pub outcome: Option<OutcomeView>,
    /// Cell under the marker.
    pub current_cell: Option<CellView>,
    /// Whether a roll would be accepted.
    pub can_roll: bool,
}

/// Builds the published snapshot for `state`.
#[must_use]
pub fn game_view(state: &ProgressionState) -> GameView {
    GameView {
        phase: state.phase().name().to_owned(),
        position: state.position(),
        branch: state.branch().map(|b| b.to_string()),
        score: state.score(),
        pending_steps: state.pending_steps(),
        last_roll: state.last_roll(),
        history: state.history().iter().map(HistoryView::from).collect(),
        track: state.track().cells().iter().map(CellView::from).collect(),
        outcome: state.outcome().map(OutcomeView::from),
        current_cell: state.current_cell().map(CellView::from),
        can_roll: state.can_roll(),
    }
}
