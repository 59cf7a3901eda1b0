//! Awaji Life Board — progression state machine.
//!
//! Owns the phase, position, score and history of a play-through. The
//! transition function in [`domain::transition`] is pure; the
//! [`application::engine::Engine`] wraps it with a clock, a die, a story
//! lookup and single-slot timer bookkeeping so a host can drive it with
//! whatever timer facility it has.

pub mod application;
pub mod domain;
