//! State, actions, movement and the transition function.

pub mod commands;
pub mod events;
pub mod movement;
pub mod state;
pub mod transition;
