//! Single-step movement reduction.
//!
//! Multi-cell moves are decomposed into one call per cell so the host can
//! animate each step. The engine calls [`step`] once per timer tick.

use awaji_board::Track;

/// Result of advancing (at most) one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved one cell; more steps remain.
    Continue {
        /// New position.
        position: usize,
        /// Steps still to take.
        remaining: u32,
    },
    /// Entered the unresolved branch point; movement halts until a branch is
    /// chosen.
    SuspendAtBranch {
        /// Branch-point position.
        position: usize,
        /// Steps owed after the choice.
        pending: u32,
    },
    /// Movement is over; the player stops here.
    Arrive {
        /// Landing position.
        position: usize,
    },
}

/// Advances from `position` with `steps` left to take.
///
/// * `steps == 0` arrives where the marker stands.
/// * Entering the branch point of a branch-less track always suspends, and
///   the step spent reaching it is consumed.
/// * Reaching the last cell arrives there, whatever is left of the roll;
///   running past it clamps.
#[must_use]
pub fn step(track: &Track, position: usize, steps: u32) -> MoveOutcome {
    if steps == 0 {
        return MoveOutcome::Arrive { position };
    }

    let next = position + 1;
    if track.branch().is_none() && track.is_branch_point(next) {
        return MoveOutcome::SuspendAtBranch {
            position: next,
            pending: steps - 1,
        };
    }

    if next >= track.last_position() {
        return MoveOutcome::Arrive {
            position: track.last_position(),
        };
    }

    match steps - 1 {
        0 => MoveOutcome::Arrive { position: next },
        remaining => MoveOutcome::Continue {
            position: next,
            remaining,
        },
    }
}
