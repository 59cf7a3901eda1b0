//! Engine, read-only views and the share summary.

pub mod engine;
pub mod query_handlers;
pub mod share;
