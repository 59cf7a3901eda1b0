//! Hosts one game: serializes commands into the engine and turns the
//! engine's scheduled continuations into tokio timers.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use awaji_board::{StorySource, StoryText};
use awaji_core::error::DomainError;
use awaji_core::event::DomainEvent;
use awaji_progression::application::engine::{Engine, Scheduled, Ticket};
use awaji_progression::application::query_handlers::{GameView, game_view};
use awaji_progression::application::share::share_state;
use awaji_progression::domain::commands::GameCommand;
use awaji_progression::domain::events::{ProgressionEvent, ProgressionEventKind};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

/// A single hosted play-through sequence.
///
/// Lock order is engine, then timer.
#[derive(Debug)]
pub struct GameSession {
    engine: Mutex<Engine>,
    timer: Mutex<Option<AbortHandle>>,
    views: watch::Sender<GameView>,
}

impl GameSession {
    /// Wraps `engine` in a shareable session.
    #[must_use]
    pub fn new(engine: Engine) -> Arc<Self> {
        let (views, _) = watch::channel(game_view(engine.state()));
        Arc::new(Self {
            engine: Mutex::new(engine),
            timer: Mutex::new(None),
            views,
        })
    }

    /// Applies a player command and returns the resulting snapshot.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a session lock is poisoned.
    pub fn dispatch(self: &Arc<Self>, command: &GameCommand) -> Result<GameView, DomainError> {
        let mut engine = self.lock_engine()?;
        let scheduled = engine.handle(command);
        self.settle(&mut engine, scheduled)
    }

    /// Swaps the story text without touching phase, position or score.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the engine lock is poisoned.
    pub fn replace_story(&self, story: StoryText) -> Result<GameView, DomainError> {
        let mut engine = self.lock_engine()?;
        engine.replace_story(story);
        log_events(engine.take_events());
        Ok(self.publish(&engine))
    }

    /// Loads story text in the background and swaps it in once available.
    /// On failure the placeholder texts stay.
    pub fn spawn_story_load(self: &Arc<Self>, source: Arc<dyn StorySource>) -> JoinHandle<()> {
        let session = Arc::downgrade(self);
        tokio::spawn(async move {
            match source.load().await {
                Ok(story) => {
                    let Some(session) = session.upgrade() else {
                        return;
                    };
                    if let Err(err) = session.replace_story(story) {
                        warn!(error = %err, "failed to apply story text");
                    }
                }
                Err(err) => warn!(error = %err, "story text unavailable, keeping placeholders"),
            }
        })
    }

    /// Current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the engine lock is poisoned.
    pub fn snapshot(&self) -> Result<GameView, DomainError> {
        let engine = self.lock_engine()?;
        Ok(game_view(engine.state()))
    }

    /// Shareable result text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GameNotFinished` before the terminal cell is
    /// reached.
    pub fn share_text(&self) -> Result<String, DomainError> {
        let engine = self.lock_engine()?;
        share_state(engine.state())
    }

    /// Receives every snapshot published after a transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameView> {
        self.views.subscribe()
    }

    fn fire(self: &Arc<Self>, ticket: Ticket) -> Result<GameView, DomainError> {
        let mut engine = self.lock_engine()?;
        let scheduled = engine.fire(ticket);
        self.settle(&mut engine, scheduled)
    }

    fn settle(
        self: &Arc<Self>,
        engine: &mut Engine,
        scheduled: Option<Scheduled>,
    ) -> Result<GameView, DomainError> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("timer lock poisoned: {e}")))?;

        if (scheduled.is_some() || !engine.has_pending_timer())
            && let Some(handle) = timer.take()
        {
            handle.abort();
        }
        if let Some(scheduled) = scheduled {
            *timer = Some(spawn_timer(Arc::downgrade(self), scheduled));
        }
        drop(timer);

        log_events(engine.take_events());
        Ok(self.publish(engine))
    }

    fn publish(&self, engine: &Engine) -> GameView {
        let view = game_view(engine.state());
        self.views.send_replace(view.clone());
        view
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, Engine>, DomainError> {
        self.engine
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("engine lock poisoned: {e}")))
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Ok(slot) = self.timer.get_mut()
            && let Some(handle) = slot.take()
        {
            handle.abort();
        }
    }
}

fn spawn_timer(session: Weak<GameSession>, scheduled: Scheduled) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(scheduled.delay).await;
        let Some(session) = session.upgrade() else {
            return;
        };
        if let Err(err) = session.fire(scheduled.ticket) {
            warn!(error = %err, "scheduled continuation failed");
        }
    })
    .abort_handle()
}

fn log_events(events: Vec<ProgressionEvent>) {
    for event in events {
        let meta = event.metadata();
        if matches!(event.kind, ProgressionEventKind::Moved { .. }) {
            debug!(
                event_type = event.event_type(),
                play_through = meta.play_through,
                sequence_number = meta.sequence_number,
                payload = %event.to_payload(),
                "progression event"
            );
        } else {
            info!(
                event_type = event.event_type(),
                play_through = meta.play_through,
                sequence_number = meta.sequence_number,
                correlation_id = %meta.correlation_id,
                payload = %event.to_payload(),
                "progression event"
            );
        }
    }
}
