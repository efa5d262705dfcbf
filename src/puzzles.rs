//! Puzzle definitions, the validated catalog, and the shipped puzzle set.
//!
//! The catalog is the only way sessions obtain puzzles: every record passes
//! through `validate_puzzle` on registration, so downstream code can assume
//! start and target boards are structurally sound.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::GameError;
use crate::validation::{validate_puzzle, ValidationReport};

/// Par values a completed session is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Par {
    pub swaps: u32,
    pub energy: u32,
}

/// An authored puzzle: start layout, acceptable targets, par, metadata.
///
/// Field names serialize camelCase to match the bundled puzzle JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    pub id: String,
    pub name: String,
    /// 1 = tutorial .. 5 = expert. Range-checked at validation, kept as a
    /// plain number so out-of-range authored data is representable and
    /// reportable.
    pub difficulty: u8,
    pub start_board: Board,
    /// Solving means matching ANY one of these.
    pub target_patterns: Vec<Board>,
    pub par: Par,
    #[serde(default)]
    pub hints: Vec<String>,
    /// ISO-8601, opaque to the engine.
    pub created_at: String,
}

/// Ordered, validated puzzle registry.
///
/// Insertion order is progression order; `next_after`/`previous_before` walk
/// it. The raw records can come from anywhere that produces
/// `PuzzleDefinition`s (bundled JSON, a database, an editor).
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    puzzles: Vec<PuzzleDefinition>,
}

impl PuzzleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of puzzles shipped with the game, in progression order.
    pub fn builtin() -> Self {
        // Validated as a body of content by the test suite rather than at
        // every startup.
        Self {
            puzzles: builtin_puzzles(),
        }
    }

    /// Parse a JSON array of puzzle definitions and register each in order.
    pub fn from_json(data: &str) -> Result<Self, GameError> {
        let records: Vec<PuzzleDefinition> = serde_json::from_str(data)?;
        let mut catalog = Self::new();
        for record in records {
            catalog.register(record)?;
        }
        Ok(catalog)
    }

    /// Add a puzzle after checking every authoring rule.
    pub fn register(&mut self, puzzle: PuzzleDefinition) -> Result<(), GameError> {
        let report = validate_puzzle(&puzzle);
        if !report.valid {
            return Err(GameError::InvalidPuzzle {
                id: puzzle.id,
                errors: report.errors,
            });
        }
        if self.puzzles.iter().any(|p| p.id == puzzle.id) {
            return Err(GameError::InvalidPuzzle {
                id: puzzle.id.clone(),
                errors: vec![format!("duplicate puzzle id: {}", puzzle.id)],
            });
        }
        debug!(id = %puzzle.id, difficulty = puzzle.difficulty, "registered puzzle");
        self.puzzles.push(puzzle);
        Ok(())
    }

    /// Resolve a puzzle id to its validated definition.
    pub fn load(&self, puzzle_id: &str) -> Result<&PuzzleDefinition, GameError> {
        self.puzzles
            .iter()
            .find(|p| p.id == puzzle_id)
            .ok_or_else(|| GameError::PuzzleNotFound(puzzle_id.to_string()))
    }

    /// All puzzle ids in progression order.
    pub fn all_ids(&self) -> Vec<&str> {
        self.puzzles.iter().map(|p| p.id.as_str()).collect()
    }

    /// All puzzles in progression order.
    pub fn all(&self) -> &[PuzzleDefinition] {
        &self.puzzles
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Puzzles of one difficulty tier, in progression order.
    pub fn by_difficulty(&self, difficulty: u8) -> Vec<&PuzzleDefinition> {
        self.puzzles
            .iter()
            .filter(|p| p.difficulty == difficulty)
            .collect()
    }

    /// The puzzle after `puzzle_id` in progression order, if any.
    pub fn next_after(&self, puzzle_id: &str) -> Option<&PuzzleDefinition> {
        let index = self.puzzles.iter().position(|p| p.id == puzzle_id)?;
        self.puzzles.get(index + 1)
    }

    /// The puzzle before `puzzle_id` in progression order, if any.
    pub fn previous_before(&self, puzzle_id: &str) -> Option<&PuzzleDefinition> {
        let index = self.puzzles.iter().position(|p| p.id == puzzle_id)?;
        index.checked_sub(1).and_then(|i| self.puzzles.get(i))
    }

    /// Uniform random pick, optionally restricted to one difficulty tier.
    ///
    /// `None` when the (filtered) set is empty.
    pub fn random<R: Rng>(
        &self,
        difficulty: Option<u8>,
        rng: &mut R,
    ) -> Option<&PuzzleDefinition> {
        match difficulty {
            Some(tier) => self.by_difficulty(tier).choose(rng).copied(),
            None => self.puzzles.choose(rng),
        }
    }

    /// Re-check every registered puzzle, aggregating all violations.
    ///
    /// Registration already gates on validity; this exists for authoring
    /// tools auditing a whole content set at once.
    pub fn validate_all(&self) -> ValidationReport {
        let mut errors = Vec::new();
        for puzzle in &self.puzzles {
            let report = validate_puzzle(puzzle);
            if !report.valid {
                errors.push(format!("puzzle {}: {}", puzzle.id, report.errors.join(", ")));
            }
        }
        ValidationReport::from_errors(errors)
    }
}

fn builtin_puzzles() -> Vec<PuzzleDefinition> {
    vec![
        PuzzleDefinition {
            id: "tutorial-01".to_string(),
            name: "First Steps".to_string(),
            difficulty: 1,
            start_board: Board::new([[2, 1, 3], [4, 5, 6], [7, 8, 9]]),
            target_patterns: vec![Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]])],
            par: Par { swaps: 1, energy: 3 },
            hints: vec!["Swap the two lightest objects back into order.".to_string()],
            created_at: "2025-01-10T09:00:00Z".to_string(),
        },
        PuzzleDefinition {
            id: "easy-01".to_string(),
            name: "Corner Trade".to_string(),
            difficulty: 2,
            start_board: Board::new([[9, 8, 3], [4, 5, 6], [7, 2, 1]]),
            target_patterns: vec![Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]])],
            par: Par { swaps: 2, energy: 60 },
            hints: vec!["The heaviest pieces sit in each other's homes.".to_string()],
            created_at: "2025-01-10T09:30:00Z".to_string(),
        },
        PuzzleDefinition {
            id: "medium-01".to_string(),
            name: "Cross Shuffle".to_string(),
            difficulty: 3,
            start_board: Board::new([[1, 4, 3], [8, 5, 2], [7, 6, 9]]),
            target_patterns: vec![Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]])],
            par: Par { swaps: 3, energy: 60 },
            hints: vec![
                "Only the edge pieces moved.".to_string(),
                "Start with the lightest pair.".to_string(),
            ],
            created_at: "2025-01-12T14:00:00Z".to_string(),
        },
        PuzzleDefinition {
            id: "hard-01".to_string(),
            name: "Heavy Diagonal".to_string(),
            difficulty: 4,
            start_board: Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]),
            target_patterns: vec![Board::new([[9, 8, 7], [6, 5, 4], [3, 2, 1]])],
            par: Par { swaps: 4, energy: 120 },
            hints: vec!["Every piece except the center trades places.".to_string()],
            created_at: "2025-01-14T11:00:00Z".to_string(),
        },
        PuzzleDefinition {
            id: "expert-01".to_string(),
            name: "Mirror Maze".to_string(),
            difficulty: 5,
            start_board: Board::new([[5, 3, 1], [8, 9, 2], [7, 4, 6]]),
            target_patterns: vec![
                Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]),
                Board::new([[9, 8, 7], [6, 5, 4], [3, 2, 1]]),
            ],
            par: Par { swaps: 6, energy: 150 },
            hints: vec!["Either ordering counts - chase the cheaper one.".to_string()],
            created_at: "2025-01-18T16:00:00Z".to_string(),
        },
    ]
}
