//! Domain events for the progression context.

use awaji_board::{Branch, Grade};
use awaji_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::state::Phase;

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressionEventKind {
    /// The intro gate was passed.
    GameStarted,
    /// The phase changed.
    PhaseChanged {
        /// Phase before the transition.
        from: Phase,
        /// Phase after the transition.
        to: Phase,
    },
    /// The die settled.
    DieRolled {
        /// Face shown.
        value: u8,
    },
    /// The marker advanced one cell (or was clamped to the last one).
    Moved {
        /// New position.
        position: usize,
        /// Steps left after this one.
        remaining: u32,
    },
    /// The arrival effect was applied.
    CellStopped {
        /// Position stopped on.
        position: usize,
        /// Delta applied.
        score_delta: i32,
        /// Score after applying the delta.
        score: i32,
    },
    /// Movement suspended on the branch point.
    BranchReached {
        /// Branch-point position.
        position: usize,
        /// Steps owed once a branch is chosen.
        pending_steps: u32,
    },
    /// A branch was chosen.
    BranchChosen {
        /// The chosen branch.
        branch: Branch,
        /// Steps resumed on the new suffix.
        pending_steps: u32,
    },
    /// The terminal cell was reached and graded.
    GameFinished {
        /// Final grade.
        grade: Grade,
        /// Final score.
        score: i32,
    },
    /// The play-through was abandoned.
    GameReset,
    /// The active track was rebuilt.
    TrackRebuilt {
        /// Branch the new track was built for.
        branch: Option<Branch>,
        /// Number of cells on the new track.
        cells: usize,
    },
}

impl ProgressionEventKind {
    /// Type name of the event.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::GameStarted => "progression.game_started",
            Self::PhaseChanged { .. } => "progression.phase_changed",
            Self::DieRolled { .. } => "progression.die_rolled",
            Self::Moved { .. } => "progression.moved",
            Self::CellStopped { .. } => "progression.cell_stopped",
            Self::BranchReached { .. } => "progression.branch_reached",
            Self::BranchChosen { .. } => "progression.branch_chosen",
            Self::GameFinished { .. } => "progression.game_finished",
            Self::GameReset => "progression.game_reset",
            Self::TrackRebuilt { .. } => "progression.track_rebuilt",
        }
    }
}

/// Domain event envelope for the progression context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ProgressionEventKind,
}

impl DomainEvent for ProgressionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ProgressionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_tagged_with_snake_case_type() {
        let payload = serde_json::to_value(ProgressionEventKind::BranchChosen {
            branch: Branch::A,
            pending_steps: 3,
        })
        .unwrap();

        assert_eq!(payload["type"], "branch_chosen");
        assert_eq!(payload["branch"], "A");
        assert_eq!(payload["pending_steps"], 3);
    }

    #[test]
    fn test_phase_changed_serializes_phase_names() {
        let payload = serde_json::to_value(ProgressionEventKind::PhaseChanged {
            from: Phase::DiceResult,
            to: Phase::Moving,
        })
        .unwrap();

        assert_eq!(payload["from"], "dice_result");
        assert_eq!(payload["to"], "moving");
    }
}
