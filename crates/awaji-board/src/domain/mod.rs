//! Pure board data: cells, tracks and grades.

pub mod cell;
pub mod outcome;
pub mod tables;
pub mod track;
