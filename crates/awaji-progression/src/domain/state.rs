//! The progression state: single source of truth for a play-through.

use std::fmt;
use std::sync::Arc;

use awaji_board::{Branch, Cell, Outcome, StoryText, Track, build_track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State-machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Title screen; no game data yet.
    Intro,
    /// Waiting for the player to roll.
    Idle,
    /// The die is tumbling.
    Rolling,
    /// The rolled value is shown and awaits acknowledgement.
    DiceResult,
    /// The marker is advancing one cell per tick.
    Moving,
    /// Movement is suspended on the branch point.
    BranchChoice,
    /// The player stopped on a cell and sees its effect.
    Stopped,
    /// The terminal cell was reached; the play-through is over.
    Result,
}

impl Phase {
    /// Snake-case name used in views and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Idle => "idle",
            Self::Rolling => "rolling",
            Self::DiceResult => "dice_result",
            Self::Moving => "moving",
            Self::BranchChoice => "branch_choice",
            Self::Stopped => "stopped",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stop on a cell. Appended once per stop, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position the player stopped on.
    pub position: usize,
    /// Score delta that was applied.
    pub score_delta: i32,
    /// When the stop happened.
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of a play-through.
///
/// Every transition produces a new value; nothing is patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    pub(crate) phase: Phase,
    pub(crate) position: usize,
    pub(crate) branch: Option<Branch>,
    pub(crate) score: i32,
    pub(crate) pending_steps: u32,
    pub(crate) last_roll: Option<u8>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) track: Arc<Track>,
    pub(crate) outcome: Option<Outcome>,
}

impl ProgressionState {
    /// State shown behind the intro gate.
    #[must_use]
    pub fn new(story: &StoryText) -> Self {
        Self {
            phase: Phase::Intro,
            ..Self::new_game(story)
        }
    }

    /// A fresh play-through, ready to roll.
    #[must_use]
    pub fn new_game(story: &StoryText) -> Self {
        Self {
            phase: Phase::Idle,
            position: 0,
            branch: None,
            score: 0,
            pending_steps: 0,
            last_roll: None,
            history: Vec::new(),
            track: Arc::new(build_track(story, None)),
            outcome: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current index into the active track.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Chosen branch, once the branch point has been resolved.
    #[must_use]
    pub fn branch(&self) -> Option<Branch> {
        self.branch
    }

    /// Running relationship score.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Steps still owed after a branch suspension.
    #[must_use]
    pub fn pending_steps(&self) -> u32 {
        self.pending_steps
    }

    /// Last die value shown.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// Stops made so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The active track.
    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Final grade, present once the terminal cell has been resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Cell under the player's marker.
    #[must_use]
    pub fn current_cell(&self) -> Option<&Cell> {
        self.track.cell(self.position)
    }

    /// Whether a roll would be accepted right now.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Whether the play-through has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Result
    }
}
