//! Awaji Life Board — HTTP host.
//!
//! Hosts one in-memory game session behind an axum router and drives its
//! timed continuations with tokio.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
