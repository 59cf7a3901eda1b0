//! Player actions.

use awaji_board::Branch;
use awaji_core::command::Command;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The action surface offered to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Leave the intro screen.
    StartGame,
    /// Throw the die.
    RollDie,
    /// Dismiss the rolled value and start moving.
    AcknowledgeRoll,
    /// Resolve the branch point.
    ChooseBranch(Branch),
    /// Dismiss the stop dialog.
    AcknowledgeStop,
    /// Abandon the play-through and start over.
    Reset,
}

impl Action {
    /// Command type name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StartGame => "progression.start_game",
            Self::RollDie => "progression.roll_die",
            Self::AcknowledgeRoll => "progression.acknowledge_roll",
            Self::ChooseBranch(_) => "progression.choose_branch",
            Self::AcknowledgeStop => "progression.acknowledge_stop",
            Self::Reset => "progression.reset",
        }
    }
}

/// An [`Action`] tagged with a correlation ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameCommand {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What the player asked for.
    pub action: Action,
}

impl GameCommand {
    /// Wraps `action` with a fresh correlation ID.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            action,
        }
    }
}

impl Command for GameCommand {
    fn command_type(&self) -> &'static str {
        self.action.name()
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
