//! Heft - weighted swap-puzzle engine.
//!
//! Nine uniquely-weighted objects on a 3x3 grid; each swap of two objects
//! costs energy proportional to their combined weight and Manhattan
//! distance; a puzzle is solved when the board matches any of its target
//! patterns. This crate is the pure game-state and scoring engine plus the
//! two host-side collaborators (session store, best-score book). Rendering
//! and input belong to the embedding application.

pub mod board;
pub mod energy;
pub mod error;
pub mod game;
pub mod objects;
pub mod puzzles;
pub mod scores;
pub mod store;
pub mod validation;

pub use board::{Board, Position};
pub use error::GameError;
pub use game::{GameState, Move};
pub use puzzles::{Par, PuzzleCatalog, PuzzleDefinition};
