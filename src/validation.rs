//! Structural validators for boards, positions, swaps, and puzzle records.
//!
//! `validate_puzzle` is a diagnostic surface for puzzle-authoring tools: it
//! checks every rule and reports all violations at once instead of failing
//! on the first.

use crate::board::{Board, Position};
use crate::objects::OBJECT_COUNT;
use crate::puzzles::PuzzleDefinition;

/// Lowest difficulty tier (tutorial).
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest difficulty tier (expert).
pub const MAX_DIFFICULTY: u8 = 5;

/// Outcome of an aggregate validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Whether a board contains each object id 1-9 exactly once.
///
/// The sole structural correctness predicate for start and target boards.
/// Dimension errors cannot reach here: `Board` is 3x3 by type.
pub fn is_valid_board(board: &Board) -> bool {
    let mut cells = board.to_flat();
    cells.sort_unstable();
    cells
        .iter()
        .enumerate()
        .all(|(i, &cell)| cell as usize == i + 1)
}

/// Whether a position lies on the 3x3 grid.
pub fn is_valid_position(pos: Position) -> bool {
    pos.in_bounds()
}

/// Whether two positions form a legal swap: both on the grid and distinct.
///
/// A same-cell swap is rejected outright, never treated as a free no-op.
pub fn is_valid_swap(pos_a: Position, pos_b: Position) -> bool {
    is_valid_position(pos_a) && is_valid_position(pos_b) && pos_a != pos_b
}

/// Whether an id names a catalog object (1-9).
pub fn is_valid_object_id(id: u8) -> bool {
    id >= 1 && id as usize <= OBJECT_COUNT
}

/// Whether a weight is in the legal range (1-9).
pub fn is_valid_weight(weight: u8) -> bool {
    weight >= 1 && weight as usize <= OBJECT_COUNT
}

/// Check a puzzle definition against every authoring rule.
pub fn validate_puzzle(puzzle: &PuzzleDefinition) -> ValidationReport {
    let mut errors = Vec::new();

    if puzzle.id.trim().is_empty() {
        errors.push("puzzle must have a non-empty id".to_string());
    }

    if puzzle.name.trim().is_empty() {
        errors.push("puzzle must have a non-empty name".to_string());
    }

    if puzzle.difficulty < MIN_DIFFICULTY || puzzle.difficulty > MAX_DIFFICULTY {
        errors.push(format!(
            "difficulty must be {}-{}, got {}",
            MIN_DIFFICULTY, MAX_DIFFICULTY, puzzle.difficulty
        ));
    }

    if !is_valid_board(&puzzle.start_board) {
        errors.push("invalid start board".to_string());
    }

    if puzzle.target_patterns.is_empty() {
        errors.push("at least one target pattern required".to_string());
    } else {
        for (index, target) in puzzle.target_patterns.iter().enumerate() {
            if !is_valid_board(target) {
                errors.push(format!("invalid target pattern at index {}", index));
            }
        }
    }

    // An already-solved puzzle is degenerate.
    if let Some(first_target) = puzzle.target_patterns.first() {
        if puzzle.start_board == *first_target {
            errors.push("start board cannot equal target pattern".to_string());
        }
    }

    if puzzle.par.swaps < 1 {
        errors.push("par swaps must be a positive integer".to_string());
    }

    if puzzle.par.energy < 1 {
        errors.push("par energy must be a positive integer".to_string());
    }

    if puzzle.created_at.trim().is_empty() {
        errors.push("puzzle must have a created-at timestamp".to_string());
    }

    ValidationReport::from_errors(errors)
}
