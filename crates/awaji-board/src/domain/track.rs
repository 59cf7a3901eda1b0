//! The board model: builds the active track for a branch selection.

use std::sync::LazyLock;

use awaji_core::error::DomainError;
use regex::Regex;
use serde::Serialize;

use super::cell::{Branch, Cell, Segment};
use super::tables::{
    BRANCH_A_EFFECTS, BRANCH_B_EFFECTS, COMMON_EFFECTS, DISPLAY_TEXT_MAX_CHARS,
    FIRST_SUFFIX_NUMBER,
};
use crate::application::story::StoryText;

/// Leading cell number some story lines repeat before their text.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[AB]?\s*").expect("leading-number pattern is valid"));

/// Ordered cells currently in play.
///
/// A track is never mutated: choosing a branch or receiving new story text
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    cells: Vec<Cell>,
    branch_points: Vec<usize>,
    branch: Option<Branch>,
}

impl Track {
    /// Assembles a track from prebuilt cells. Branch points are taken from
    /// the cells' own flags.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, branch: Option<Branch>) -> Self {
        let branch_points = cells
            .iter()
            .filter(|c| c.is_branch_point)
            .map(|c| c.position)
            .collect();
        Self {
            cells,
            branch_points,
            branch,
        }
    }

    /// All cells in play order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the track has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `position`, if any.
    #[must_use]
    pub fn cell(&self, position: usize) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Highest valid position (0 for an empty track).
    #[must_use]
    pub fn last_position(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Branch this track was built for.
    #[must_use]
    pub fn branch(&self) -> Option<Branch> {
        self.branch
    }

    /// Positions of branch-point cells.
    #[must_use]
    pub fn branch_points(&self) -> &[usize] {
        &self.branch_points
    }

    /// Whether `position` holds a branch point.
    #[must_use]
    pub fn is_branch_point(&self, position: usize) -> bool {
        self.branch_points.contains(&position)
    }
}

/// Builds the track for `branch`: the common prefix, followed by the chosen
/// branch's suffix once a branch has been picked.
///
/// Missing story entries fall back to placeholder labels.
#[must_use]
pub fn build_track(story: &StoryText, branch: Option<Branch>) -> Track {
    let mut cells = common_cells(story);
    if let Some(branch) = branch {
        cells.extend(suffix_cells(story, branch, cells.len()));
    }
    Track::from_cells(cells, branch)
}

fn common_cells(story: &StoryText) -> Vec<Cell> {
    let last = COMMON_EFFECTS.len() - 1;
    COMMON_EFFECTS
        .iter()
        .enumerate()
        .map(|(i, &delta)| {
            let number = cell_number(i + 1);
            labelled(
                Cell {
                    id: format!("common-{number}"),
                    position: i,
                    number,
                    segment: Segment::Common,
                    display_text: String::new(),
                    score_delta: delta,
                    is_branch_point: i == last,
                    is_terminal: false,
                },
                story,
            )
        })
        .collect()
}

fn suffix_cells(story: &StoryText, branch: Branch, offset: usize) -> Vec<Cell> {
    let effects: &[i32] = match branch {
        Branch::A => &BRANCH_A_EFFECTS,
        Branch::B => &BRANCH_B_EFFECTS,
    };
    let last = effects.len().saturating_sub(1);
    let slug = branch.letter().to_ascii_lowercase();
    effects
        .iter()
        .enumerate()
        .map(|(i, &delta)| {
            let number = FIRST_SUFFIX_NUMBER.saturating_add(cell_number(i));
            labelled(
                Cell {
                    id: format!("branch-{slug}-{number}"),
                    position: offset + i,
                    number,
                    segment: branch.segment(),
                    display_text: String::new(),
                    score_delta: delta,
                    is_branch_point: false,
                    is_terminal: i == last,
                },
                story,
            )
        })
        .collect()
}

fn labelled(mut cell: Cell, story: &StoryText) -> Cell {
    let key = cell.story_key();
    cell.display_text = display_text(story, &key, &format!("Cell {key}"));
    cell
}

fn cell_number(n: usize) -> u8 {
    u8::try_from(n).unwrap_or(u8::MAX)
}

/// Resolves a board label: strips a repeated leading cell number and
/// truncates long lines with an ellipsis.
fn display_text(story: &StoryText, key: &str, placeholder: &str) -> String {
    let Some(raw) = story.get(key) else {
        return placeholder.to_owned();
    };
    let text = LEADING_NUMBER.replace(raw, "");
    if text.is_empty() {
        return placeholder.to_owned();
    }
    if text.chars().count() > DISPLAY_TEXT_MAX_CHARS {
        let head: String = text.chars().take(DISPLAY_TEXT_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.into_owned()
    }
}

/// Checks the structural invariants the engine relies on.
///
/// # Errors
///
/// Returns `DomainError::InvalidBoard` when positions are not contiguous from
/// zero, when there is not exactly one branch point, or when a branch track
/// does not end in its single terminal cell.
pub fn verify_track(track: &Track) -> Result<(), DomainError> {
    if let Some(cell) = track
        .cells()
        .iter()
        .enumerate()
        .find(|(i, c)| c.position != *i)
        .map(|(_, c)| c)
    {
        return Err(DomainError::InvalidBoard(format!(
            "cell {} has non-contiguous position {}",
            cell.id, cell.position
        )));
    }

    if track.branch_points().len() != 1 {
        return Err(DomainError::InvalidBoard(format!(
            "expected exactly one branch point, found {}",
            track.branch_points().len()
        )));
    }

    let terminals: Vec<&Cell> = track.cells().iter().filter(|c| c.is_terminal).collect();
    match track.branch() {
        None if !terminals.is_empty() => Err(DomainError::InvalidBoard(
            "branch-less track must not contain a terminal cell".to_owned(),
        )),
        None => Ok(()),
        Some(branch) => match terminals.as_slice() {
            [terminal] if terminal.position == track.last_position() => Ok(()),
            [terminal] => Err(DomainError::InvalidBoard(format!(
                "terminal cell {} is not the last cell of branch {branch}",
                terminal.id
            ))),
            _ => Err(DomainError::InvalidBoard(format!(
                "branch {branch} track has {} terminal cells, expected 1",
                terminals.len()
            ))),
        },
    }
}
