//! Cells and the segments they belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two continuations offered at the branch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// Relocation route: the player moves to the island.
    A,
    /// Tokyo route: the player stays in the city and keeps in touch.
    B,
}

impl Branch {
    /// Letter used in story keys (`"14A"`, `"14B"`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }

    /// Human-readable route name.
    #[must_use]
    pub const fn route_name(self) -> &'static str {
        match self {
            Self::A => "Relocation route",
            Self::B => "Tokyo route",
        }
    }

    /// The segment a branch's suffix cells belong to.
    #[must_use]
    pub const fn segment(self) -> Segment {
        match self {
            Self::A => Segment::BranchA,
            Self::B => Segment::BranchB,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Which part of the board a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Shared prefix every player walks.
    Common,
    /// Suffix of branch A.
    BranchA,
    /// Suffix of branch B.
    BranchB,
}

/// A single position on the active track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Stable identifier, e.g. `common-13` or `branch-b-20`.
    pub id: String,
    /// Zero-based index in the active track.
    pub position: usize,
    /// Printed cell number, 1-based and shared by both branches.
    pub number: u8,
    /// Segment the cell belongs to.
    pub segment: Segment,
    /// Short board label.
    pub display_text: String,
    /// Relationship points applied when the player stops here.
    pub score_delta: i32,
    /// Movement suspends here until a branch is chosen.
    pub is_branch_point: bool,
    /// Stopping here ends the game.
    pub is_terminal: bool,
}

impl Cell {
    /// Story lookup key, `"{number}"` or `"{number}{letter}"`.
    #[must_use]
    pub fn story_key(&self) -> String {
        match self.segment {
            Segment::Common => self.number.to_string(),
            Segment::BranchA => format!("{}{}", self.number, Branch::A.letter()),
            Segment::BranchB => format!("{}{}", self.number, Branch::B.letter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(number: u8, segment: Segment) -> Cell {
        Cell {
            id: String::new(),
            position: 0,
            number,
            segment,
            display_text: String::new(),
            score_delta: 0,
            is_branch_point: false,
            is_terminal: false,
        }
    }

    #[test]
    fn test_story_key_for_common_cell_is_bare_number() {
        assert_eq!(cell(7, Segment::Common).story_key(), "7");
    }

    #[test]
    fn test_story_key_for_branch_cells_carries_letter() {
        assert_eq!(cell(14, Segment::BranchA).story_key(), "14A");
        assert_eq!(cell(30, Segment::BranchB).story_key(), "30B");
    }

    #[test]
    fn test_branch_serializes_as_letter() {
        assert_eq!(serde_yaml::to_string(&Branch::A).unwrap().trim(), "A");
        assert_eq!(Branch::B.to_string(), "B");
    }
}
