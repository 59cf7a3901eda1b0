//! The progression engine.
//!
//! Wraps the pure transition function with its collaborators and the
//! single-slot timer bookkeeping. The engine never sleeps: when a
//! transition needs delayed work it hands back a [`Scheduled`] ticket, and
//! the host calls [`Engine::fire`] with that ticket once the delay elapses.
//! Tickets from an earlier play-through, or superseded by a newer
//! transition, are ignored.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use awaji_board::{Cell, StoryText, Track, build_track, verify_track};
use awaji_core::clock::Clock;
use awaji_core::command::Command;
use awaji_core::event::EventMetadata;
use awaji_core::rng::DeterministicRng;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::commands::{Action, GameCommand};
use crate::domain::events::{ProgressionEvent, ProgressionEventKind};
use crate::domain::state::ProgressionState;
use crate::domain::transition::{Context, Continuation, Input, Transition, reduce};

/// Presentation delays for timed continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long the die tumbles before its value is revealed.
    pub roll_delay: Duration,
    /// Pause between single-cell movement steps.
    pub step_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roll_delay: Duration::from_millis(500),
            step_delay: Duration::from_millis(200),
        }
    }
}

impl EngineConfig {
    /// Delay before `continuation` should be delivered.
    #[must_use]
    pub fn delay_for(&self, continuation: Continuation) -> Duration {
        match continuation {
            Continuation::SettleRoll => self.roll_delay,
            Continuation::Step { .. } => self.step_delay,
        }
    }
}

/// Identifies one scheduled continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    play_through: u64,
    serial: u64,
}

/// A continuation the host must deliver via [`Engine::fire`] after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// Ticket to hand back.
    pub ticket: Ticket,
    /// How long to wait first.
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    ticket: Ticket,
    continuation: Continuation,
    correlation_id: Uuid,
}

/// Owns the progression state and is its only writer.
pub struct Engine {
    state: ProgressionState,
    story: StoryText,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    play_through: u64,
    next_serial: u64,
    next_sequence: i64,
    timer: Option<PendingTimer>,
    journal: Vec<ProgressionEvent>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("play_through", &self.play_through)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine showing the intro gate.
    #[must_use]
    pub fn new(
        story: StoryText,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        let state = ProgressionState::new(&story);
        check_board(state.track());
        Self {
            state,
            story,
            config,
            clock,
            rng,
            play_through: 1,
            next_serial: 0,
            next_sequence: 0,
            timer: None,
            journal: Vec::new(),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Cell under the marker.
    #[must_use]
    pub fn current_cell(&self) -> Option<&Cell> {
        self.state.current_cell()
    }

    /// Whether `RollDie` would be accepted.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.state.can_roll()
    }

    /// Whether a continuation is outstanding.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Current play-through number; incremented by every reset.
    #[must_use]
    pub fn play_through(&self) -> u64 {
        self.play_through
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<ProgressionEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Applies a player action. Actions that are illegal in the current phase
    /// are ignored.
    ///
    /// Returns the continuation to schedule, if the transition needs one.
    pub fn handle(&mut self, command: &GameCommand) -> Option<Scheduled> {
        let Some(transition) = self.transition(Input::Action(command.action)) else {
            debug!(
                command = command.command_type(),
                phase = %self.state.phase(),
                "action ignored in current phase"
            );
            return None;
        };

        if command.action == Action::Reset {
            self.play_through += 1;
            self.timer = None;
        }
        debug!(
            command = command.command_type(),
            from = %self.state.phase(),
            to = %transition.state.phase(),
            "action applied"
        );
        self.commit(transition, command.correlation_id())
    }

    /// Delivers a scheduled continuation. Stale or superseded tickets are
    /// ignored.
    pub fn fire(&mut self, ticket: Ticket) -> Option<Scheduled> {
        let Some(pending) = self.timer.take_if(|p| p.ticket == ticket) else {
            debug!(?ticket, "stale timer ignored");
            return None;
        };

        let transition = self.transition(Input::Resume(pending.continuation))?;
        self.commit(transition, pending.correlation_id)
    }

    /// Rebuilds the active track from a new story lookup, keeping phase,
    /// position, score, branch and history.
    pub fn replace_story(&mut self, story: StoryText) {
        let track = build_track(&story, self.state.branch());
        check_board(&track);
        let cells = track.len();
        self.story = story;
        self.state = ProgressionState {
            track: Arc::new(track),
            ..self.state.clone()
        };

        let now = self.clock.now();
        self.record(
            ProgressionEventKind::TrackRebuilt {
                branch: self.state.branch(),
                cells,
            },
            Uuid::new_v4(),
            now,
        );
        info!(entries = self.story.len(), cells, "story text replaced");
    }

    fn transition(&mut self, input: Input) -> Option<Transition> {
        let mut ctx = Context {
            story: &self.story,
            clock: self.clock.as_ref(),
            rng: self.rng.as_mut(),
        };
        reduce(&self.state, input, &mut ctx)
    }

    fn commit(&mut self, transition: Transition, correlation_id: Uuid) -> Option<Scheduled> {
        let Transition {
            state,
            next,
            events,
        } = transition;
        self.state = state;

        let now = self.clock.now();
        for kind in events {
            self.record(kind, correlation_id, now);
        }

        let Some(continuation) = next else {
            self.timer = None;
            return None;
        };
        self.next_serial += 1;
        let ticket = Ticket {
            play_through: self.play_through,
            serial: self.next_serial,
        };
        self.timer = Some(PendingTimer {
            ticket,
            continuation,
            correlation_id,
        });
        Some(Scheduled {
            ticket,
            delay: self.config.delay_for(continuation),
        })
    }

    fn record(&mut self, kind: ProgressionEventKind, correlation_id: Uuid, now: DateTime<Utc>) {
        self.next_sequence += 1;
        self.journal.push(ProgressionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                play_through: self.play_through,
                sequence_number: self.next_sequence,
                correlation_id,
                occurred_at: now,
            },
            kind,
        });
    }
}

fn check_board(track: &Track) {
    if let Err(e) = verify_track(track) {
        warn!(error = %e, "board data failed integrity check");
    }
}
