//! Board tuning data.
//!
//! Effect tables and the grade thresholds in [`super::outcome`] are
//! companion data: typical play (13 RP on average) should spread across
//! the grades.

/// Number of cells in the shared prefix.
pub const COMMON_LEN: usize = 13;

/// Number of cells in each branch suffix.
pub const SUFFIX_LEN: usize = 17;

/// Printed number of the first suffix cell.
pub const FIRST_SUFFIX_NUMBER: u8 = 14;

/// Display labels longer than this are truncated.
pub const DISPLAY_TEXT_MAX_CHARS: usize = 25;

/// Score deltas for cells 1..=13.
pub const COMMON_EFFECTS: [i32; COMMON_LEN] = [0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2];

/// Score deltas for cells 14A..=30A (relocation route).
pub const BRANCH_A_EFFECTS: [i32; SUFFIX_LEN] =
    [1, 2, 2, 2, 3, -2, 2, 3, 1, 2, 3, 2, 0, 3, 2, 3, 0];

/// Score deltas for cells 14B..=30B (Tokyo route).
pub const BRANCH_B_EFFECTS: [i32; SUFFIX_LEN] =
    [1, 1, 2, 3, 2, -2, 1, 3, 2, 3, 2, 2, 2, 3, 2, 3, 0];
