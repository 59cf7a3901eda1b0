//! Story text lookup and the sources it is loaded from.

pub mod story;
