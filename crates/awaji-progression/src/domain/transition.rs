//! The transition function: `(state, input) -> transition`.
//!
//! Timed work (the die settling, each movement tick) is never performed
//! here. A transition instead names the [`Continuation`] the host must
//! deliver back after the configured delay.

use std::sync::Arc;

use awaji_board::{Branch, StoryText, build_track, evaluate};
use awaji_core::clock::Clock;
use awaji_core::rng::DeterministicRng;

use super::commands::Action;
use super::events::ProgressionEventKind;
use super::movement::{MoveOutcome, step};
use super::state::{HistoryEntry, Phase, ProgressionState};

/// Delayed work a transition asks the host to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Settle the die and reveal its value.
    SettleRoll,
    /// Advance one cell with `remaining` steps left to take.
    Step {
        /// Steps left, including the one this tick takes.
        remaining: u32,
    },
}

/// What the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A player action.
    Action(Action),
    /// A scheduled continuation coming due.
    Resume(Continuation),
}

/// Collaborators a transition may consult.
pub struct Context<'a> {
    /// Story lookup for track rebuilds.
    pub story: &'a StoryText,
    /// Timestamp source for history entries.
    pub clock: &'a dyn Clock,
    /// The die.
    pub rng: &'a mut dyn DeterministicRng,
}

/// An accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The replacement state.
    pub state: ProgressionState,
    /// Continuation to schedule, if any. Replaces whatever was pending.
    pub next: Option<Continuation>,
    /// What happened, in order.
    pub events: Vec<ProgressionEventKind>,
}

impl Transition {
    fn settled(state: ProgressionState, events: Vec<ProgressionEventKind>) -> Self {
        Self {
            state,
            next: None,
            events,
        }
    }

    fn scheduling(state: ProgressionState, next: Continuation) -> Self {
        Self {
            state,
            next: Some(next),
            events: Vec::new(),
        }
    }
}

/// Computes the next state for `input`, or `None` when the input is not
/// legal in the current phase (the input is then ignored).
///
/// `Reset` is accepted in every phase.
pub fn reduce(
    state: &ProgressionState,
    input: Input,
    ctx: &mut Context<'_>,
) -> Option<Transition> {
    let mut transition = match (state.phase, input) {
        (_, Input::Action(Action::Reset)) => Transition::settled(
            ProgressionState::new_game(ctx.story),
            vec![ProgressionEventKind::GameReset],
        ),
        (Phase::Intro, Input::Action(Action::StartGame)) => Transition::settled(
            with_phase(state, Phase::Idle),
            vec![ProgressionEventKind::GameStarted],
        ),
        (Phase::Idle, Input::Action(Action::RollDie)) => {
            Transition::scheduling(with_phase(state, Phase::Rolling), Continuation::SettleRoll)
        }
        (Phase::Rolling, Input::Resume(Continuation::SettleRoll)) => settle_roll(state, ctx),
        (Phase::DiceResult, Input::Action(Action::AcknowledgeRoll)) => {
            let steps = u32::from(state.last_roll?);
            Transition::scheduling(
                with_phase(state, Phase::Moving),
                Continuation::Step { remaining: steps },
            )
        }
        (Phase::Moving, Input::Resume(Continuation::Step { remaining })) => {
            advance(state.clone(), remaining, ctx.clock)
        }
        (Phase::BranchChoice, Input::Action(Action::ChooseBranch(branch))) => {
            choose_branch(state, branch, ctx.story)
        }
        (Phase::Stopped, Input::Action(Action::AcknowledgeStop)) => {
            let to = if state.outcome.is_some() {
                Phase::Result
            } else {
                Phase::Idle
            };
            Transition::settled(with_phase(state, to), Vec::new())
        }
        _ => return None,
    };

    if transition.state.phase != state.phase {
        transition.events.insert(
            0,
            ProgressionEventKind::PhaseChanged {
                from: state.phase,
                to: transition.state.phase,
            },
        );
    }
    Some(transition)
}

fn with_phase(state: &ProgressionState, phase: Phase) -> ProgressionState {
    ProgressionState {
        phase,
        ..state.clone()
    }
}

fn settle_roll(state: &ProgressionState, ctx: &mut Context<'_>) -> Transition {
    let value = ctx.rng.roll_die();
    let next = ProgressionState {
        phase: Phase::DiceResult,
        last_roll: Some(value),
        ..state.clone()
    };
    Transition::settled(next, vec![ProgressionEventKind::DieRolled { value }])
}

/// Takes one movement tick.
fn advance(mut next: ProgressionState, steps: u32, clock: &dyn Clock) -> Transition {
    let mut events = Vec::new();

    match step(&next.track, next.position, steps) {
        MoveOutcome::Continue {
            position,
            remaining,
        } => {
            next.position = position;
            events.push(ProgressionEventKind::Moved {
                position,
                remaining,
            });
            return Transition {
                state: next,
                next: Some(Continuation::Step { remaining }),
                events,
            };
        }
        MoveOutcome::SuspendAtBranch { position, pending } => {
            next.position = position;
            events.push(ProgressionEventKind::Moved {
                position,
                remaining: pending,
            });
            // The branch cell's effect applies on entry, whether or not
            // movement resumes after the choice.
            apply_arrival(&mut next, clock, &mut events);
            next.pending_steps = pending;
            next.phase = Phase::BranchChoice;
            events.push(ProgressionEventKind::BranchReached {
                position,
                pending_steps: pending,
            });
        }
        MoveOutcome::Arrive { position } => {
            if position != next.position {
                next.position = position;
                events.push(ProgressionEventKind::Moved {
                    position,
                    remaining: 0,
                });
            }
            apply_arrival(&mut next, clock, &mut events);
            finish_or_stop(&mut next, &mut events);
        }
    }

    Transition::settled(next, events)
}

/// Applies the stopped-on cell's delta and records the stop.
fn apply_arrival(
    state: &mut ProgressionState,
    clock: &dyn Clock,
    events: &mut Vec<ProgressionEventKind>,
) {
    let Some(cell) = state.track.cell(state.position) else {
        return;
    };
    let score_delta = cell.score_delta;
    state.score += score_delta;
    state.history.push(HistoryEntry {
        position: state.position,
        score_delta,
        timestamp: clock.now(),
    });
    events.push(ProgressionEventKind::CellStopped {
        position: state.position,
        score_delta,
        score: state.score,
    });
}

/// Grades the game on a terminal cell; otherwise waits for acknowledgement.
/// A clamped stop on a non-terminal last cell never produces an outcome.
fn finish_or_stop(state: &mut ProgressionState, events: &mut Vec<ProgressionEventKind>) {
    let terminal = state.current_cell().is_some_and(|c| c.is_terminal);
    if terminal {
        let outcome = evaluate(state.score);
        events.push(ProgressionEventKind::GameFinished {
            grade: outcome.grade,
            score: state.score,
        });
        state.outcome = Some(outcome);
        state.phase = Phase::Result;
    } else {
        state.phase = Phase::Stopped;
    }
}

fn choose_branch(state: &ProgressionState, branch: Branch, story: &StoryText) -> Transition {
    let track = build_track(story, Some(branch));
    let pending = state.pending_steps;
    let events = vec![
        ProgressionEventKind::BranchChosen {
            branch,
            pending_steps: pending,
        },
        ProgressionEventKind::TrackRebuilt {
            branch: Some(branch),
            cells: track.len(),
        },
    ];
    let next = ProgressionState {
        branch: Some(branch),
        pending_steps: 0,
        track: Arc::new(track),
        phase: if pending > 0 {
            Phase::Moving
        } else {
            Phase::Stopped
        },
        ..state.clone()
    };

    Transition {
        state: next,
        next: (pending > 0).then_some(Continuation::Step { remaining: pending }),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awaji_board::Grade;
    use awaji_test_support::{SequenceRng, fixed_clock};

    fn story() -> StoryText {
        StoryText::default()
    }

    fn run(
        state: &ProgressionState,
        input: Input,
        rng: &mut SequenceRng,
    ) -> Option<Transition> {
        let story = story();
        let clock = fixed_clock();
        let mut ctx = Context {
            story: &story,
            clock: &clock,
            rng,
        };
        reduce(state, input, &mut ctx)
    }

    fn idle() -> ProgressionState {
        ProgressionState::new_game(&story())
    }

    fn act(action: Action) -> Input {
        Input::Action(action)
    }

    #[test]
    fn test_start_game_leaves_intro() {
        let state = ProgressionState::new(&story());
        let t = run(&state, act(Action::StartGame), &mut SequenceRng::new(vec![])).unwrap();

        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.next.is_none());
        assert_eq!(
            t.events,
            vec![
                ProgressionEventKind::PhaseChanged {
                    from: Phase::Intro,
                    to: Phase::Idle
                },
                ProgressionEventKind::GameStarted,
            ]
        );
    }

    #[test]
    fn test_roll_schedules_settle() {
        let t = run(&idle(), act(Action::RollDie), &mut SequenceRng::new(vec![])).unwrap();

        assert_eq!(t.state.phase, Phase::Rolling);
        assert_eq!(t.next, Some(Continuation::SettleRoll));
    }

    #[test]
    fn test_roll_outside_idle_is_ignored() {
        let mut state = idle();
        state.phase = Phase::Moving;
        assert!(run(&state, act(Action::RollDie), &mut SequenceRng::new(vec![])).is_none());
    }

    #[test]
    fn test_settle_roll_records_die_value() {
        let mut state = idle();
        state.phase = Phase::Rolling;
        let mut rng = SequenceRng::new(vec![4]);

        let t = run(&state, Input::Resume(Continuation::SettleRoll), &mut rng).unwrap();

        assert_eq!(t.state.phase, Phase::DiceResult);
        assert_eq!(t.state.last_roll, Some(4));
        assert!(t.events.contains(&ProgressionEventKind::DieRolled { value: 4 }));
    }

    #[test]
    fn test_acknowledge_roll_schedules_first_step() {
        let mut state = idle();
        state.phase = Phase::DiceResult;
        state.last_roll = Some(5);

        let t = run(&state, act(Action::AcknowledgeRoll), &mut SequenceRng::new(vec![])).unwrap();

        assert_eq!(t.state.phase, Phase::Moving);
        assert_eq!(t.state.position, 0);
        assert_eq!(t.next, Some(Continuation::Step { remaining: 5 }));
    }

    #[test]
    fn test_step_moves_one_cell_without_touching_score() {
        let mut state = idle();
        state.phase = Phase::Moving;

        let t = run(
            &state,
            Input::Resume(Continuation::Step { remaining: 3 }),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.position, 1);
        assert_eq!(t.state.score, 0);
        assert!(t.state.history.is_empty());
        assert_eq!(t.next, Some(Continuation::Step { remaining: 2 }));
    }

    #[test]
    fn test_final_step_stops_and_applies_landing_cell_only() {
        let mut state = idle();
        state.phase = Phase::Moving;
        state.position = 6;

        let t = run(
            &state,
            Input::Resume(Continuation::Step { remaining: 1 }),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.phase, Phase::Stopped);
        assert_eq!(t.state.position, 7);
        assert_eq!(t.state.score, 2);
        assert_eq!(t.state.history.len(), 1);
        assert_eq!(t.state.history[0].position, 7);
        assert_eq!(t.state.history[0].timestamp, fixed_clock().0);
        assert!(t.next.is_none());
    }

    #[test]
    fn test_entering_branch_point_suspends_and_applies_its_delta() {
        let mut state = idle();
        state.phase = Phase::Moving;
        state.position = 11;

        let t = run(
            &state,
            Input::Resume(Continuation::Step { remaining: 4 }),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.phase, Phase::BranchChoice);
        assert_eq!(t.state.position, 12);
        assert_eq!(t.state.pending_steps, 3);
        assert_eq!(t.state.score, 2);
        assert_eq!(t.state.history.len(), 1);
        assert!(t.next.is_none());
    }

    #[test]
    fn test_choose_branch_with_pending_steps_resumes_movement() {
        let mut state = idle();
        state.phase = Phase::BranchChoice;
        state.position = 12;
        state.pending_steps = 3;

        let t = run(
            &state,
            act(Action::ChooseBranch(Branch::A)),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.phase, Phase::Moving);
        assert_eq!(t.state.branch, Some(Branch::A));
        assert_eq!(t.state.pending_steps, 0);
        assert_eq!(t.state.track.len(), 30);
        assert_eq!(t.next, Some(Continuation::Step { remaining: 3 }));
    }

    #[test]
    fn test_choose_branch_without_pending_steps_stops_on_branch_cell() {
        let mut state = idle();
        state.phase = Phase::BranchChoice;
        state.position = 12;
        state.score = 2;

        let t = run(
            &state,
            act(Action::ChooseBranch(Branch::B)),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.phase, Phase::Stopped);
        assert_eq!(t.state.position, 12);
        assert_eq!(t.state.score, 2);
        assert!(t.next.is_none());
    }

    #[test]
    fn test_choose_branch_outside_branch_choice_is_ignored() {
        assert!(
            run(
                &idle(),
                act(Action::ChooseBranch(Branch::A)),
                &mut SequenceRng::new(vec![])
            )
            .is_none()
        );
    }

    #[test]
    fn test_acknowledge_stop_returns_to_idle() {
        let mut state = idle();
        state.phase = Phase::Stopped;

        let t = run(&state, act(Action::AcknowledgeStop), &mut SequenceRng::new(vec![])).unwrap();
        assert_eq!(t.state.phase, Phase::Idle);
    }

    #[test]
    fn test_acknowledge_stop_with_outcome_yields_result() {
        let mut state = idle();
        state.phase = Phase::Stopped;
        state.outcome = Some(evaluate(18));

        let t = run(&state, act(Action::AcknowledgeStop), &mut SequenceRng::new(vec![])).unwrap();
        assert_eq!(t.state.phase, Phase::Result);
    }

    #[test]
    fn test_acknowledge_in_result_is_ignored() {
        let mut state = idle();
        state.phase = Phase::Result;
        state.outcome = Some(evaluate(30));

        assert!(run(&state, act(Action::AcknowledgeStop), &mut SequenceRng::new(vec![])).is_none());
    }

    #[test]
    fn test_terminal_arrival_grades_the_game() {
        let mut state = idle();
        state.track = Arc::new(build_track(&story(), Some(Branch::B)));
        state.branch = Some(Branch::B);
        state.phase = Phase::Moving;
        state.position = 27;
        state.score = 20;

        let t = run(
            &state,
            Input::Resume(Continuation::Step { remaining: 6 }),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();
        assert_eq!(t.state.position, 28);
        let t = run(&t.state, Input::Resume(t.next.unwrap()), &mut SequenceRng::new(vec![]))
            .unwrap();

        assert_eq!(t.state.position, 29);
        assert_eq!(t.state.phase, Phase::Result);
        assert_eq!(t.state.score, 20);
        let outcome = t.state.outcome.as_ref().unwrap();
        assert_eq!(outcome.grade, Grade::S);
        assert!(t.events.contains(&ProgressionEventKind::GameFinished {
            grade: Grade::S,
            score: 20
        }));
    }

    #[test]
    fn test_clamped_stop_without_terminal_has_no_outcome() {
        let common = build_track(&story(), None);
        let mut state = idle();
        state.track = Arc::new(awaji_board::Track::from_cells(
            common.cells().to_vec(),
            Some(Branch::A),
        ));
        state.branch = Some(Branch::A);
        state.phase = Phase::Moving;
        state.position = 12;

        let t = run(
            &state,
            Input::Resume(Continuation::Step { remaining: 4 }),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(t.state.position, 12);
        assert_eq!(t.state.phase, Phase::Stopped);
        assert!(t.state.outcome.is_none());
    }

    #[test]
    fn test_reset_is_accepted_in_every_phase() {
        for phase in [
            Phase::Intro,
            Phase::Idle,
            Phase::Rolling,
            Phase::DiceResult,
            Phase::Moving,
            Phase::BranchChoice,
            Phase::Stopped,
            Phase::Result,
        ] {
            let mut state = idle();
            state.phase = phase;
            state.position = 9;
            state.score = 7;
            state.branch = Some(Branch::A);

            let t = run(&state, act(Action::Reset), &mut SequenceRng::new(vec![])).unwrap();
            assert_eq!(t.state, idle(), "reset from {phase}");
            assert!(t.next.is_none());
        }
    }

    #[test]
    fn test_resume_in_wrong_phase_is_ignored() {
        assert!(
            run(
                &idle(),
                Input::Resume(Continuation::Step { remaining: 2 }),
                &mut SequenceRng::new(vec![])
            )
            .is_none()
        );
    }
}
