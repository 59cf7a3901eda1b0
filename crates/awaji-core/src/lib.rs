//! Awaji Core — shared abstractions for the board game.
//!
//! Time, randomness, commands, the event envelope and the error type live
//! here so that the board and progression crates stay free of any host
//! concerns such as timers and HTTP.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
