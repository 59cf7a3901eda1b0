//! Command abstractions.

use uuid::Uuid;

/// Something a player (or the presentation layer on their behalf) asks the
/// engine to do.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs, e.g. `progression.roll_die`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried by every event the command causes, including
    /// events emitted later by timers it scheduled.
    fn correlation_id(&self) -> Uuid;
}
