//! Engine error kinds.
//!
//! Every fallible engine call surfaces one of these at the point of the
//! offending call; nothing is deferred. `InvalidPuzzle` is the one aggregate:
//! it carries the full rule-violation list from puzzle validation.

use crate::board::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Swap positions are equal or out of bounds. Hosts should treat this as
    /// "change selection", never as a hard failure.
    #[error("invalid swap: {from} -> {to}")]
    InvalidSwap { from: Position, to: Position },

    /// Position lookup outside the 3x3 grid.
    #[error("position {0} is outside the 3x3 grid")]
    OutOfBounds(Position),

    /// Board conversion given the wrong number of cells.
    #[error("board shape mismatch: expected {expected} cells, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Catalog lookup for an identifier outside 1-9.
    #[error("unknown object id: {0}")]
    UnknownObjectId(u8),

    /// Loader given an unregistered puzzle id.
    #[error("puzzle not found: {0}")]
    PuzzleNotFound(String),

    /// Puzzle validation rejected a record; carries every violated rule.
    #[error("invalid puzzle {id}: {}", .errors.join(", "))]
    InvalidPuzzle { id: String, errors: Vec<String> },

    /// Raw puzzle data that does not even parse.
    #[error("malformed puzzle data: {0}")]
    Malformed(#[from] serde_json::Error),
}
