//! Outcome evaluator: maps a final score to a grade.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final categorical result, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Emoji shown next to the grade.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::S => "🌸",
            Self::A => "🌾",
            Self::B => "🌊",
            Self::C => "☁️",
            Self::D => "🌫️",
        }
    }

    /// Short title, e.g. `Rank S`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::S => "Rank S",
            Self::A => "Rank A",
            Self::B => "Rank B",
            Self::C => "Rank C",
            Self::D => "Rank D",
        }
    }

    /// What the grade says about the player's ties to the island.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::S => "One of Awaji's own",
            Self::A => "A friend of Awaji",
            Self::B => "An Awaji fan",
            Self::C => "Just a sightseeing trip",
            Self::D => "Still just getting started",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(letter)
    }
}

/// A graded result with its summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The grade reached.
    pub grade: Grade,
    /// One-line summary for the result screen.
    pub summary: String,
}

/// Inclusive lower bounds, highest first. Anything below the last row is
/// [`Grade::D`].
const GRADE_TABLE: [(i32, Grade, &str); 4] = [
    (20, Grade::S, "A key person with deep ties to the island community"),
    (15, Grade::A, "Shows continuing involvement with the island"),
    (8, Grade::B, "A first step towards building relationships"),
    (0, Grade::C, "The next step will widen your circle"),
];

const FLOOR_SUMMARY: &str = "Still just getting started";

/// Grades `score` by the highest threshold it meets or exceeds.
#[must_use]
pub fn evaluate(score: i32) -> Outcome {
    GRADE_TABLE
        .iter()
        .find(|(min, _, _)| score >= *min)
        .map_or_else(
            || Outcome {
                grade: Grade::D,
                summary: FLOOR_SUMMARY.to_owned(),
            },
            |(_, grade, summary)| Outcome {
                grade: *grade,
                summary: (*summary).to_owned(),
            },
        )
}
