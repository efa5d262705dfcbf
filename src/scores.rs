//! Best-score persistence.
//!
//! The engine only computes values; this host-side book is what keeps them.
//! One JSON file keyed by puzzle id under the platform config directory,
//! loaded whole and rewritten whole on every improvement.

use chrono::Utc;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::game::{is_new_best, GameState, NewBest};

/// Best recorded result for one puzzle. The two metrics improve
/// independently, so they may come from different sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestScore {
    pub puzzle_id: String,
    pub best_swaps: u32,
    pub best_energy: u32,
    pub achieved_at: String,
}

/// File-backed map of puzzle id to best score.
pub struct ScoreBook {
    path: PathBuf,
    scores: HashMap<String, BestScore>,
}

impl ScoreBook {
    /// Open the score book at the platform config location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "heft").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Self::with_path(config_dir.join("best_scores.json"))
    }

    /// Open a score book at an explicit path, loading any existing file.
    pub fn with_path(path: PathBuf) -> io::Result<Self> {
        let scores = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        } else {
            HashMap::new()
        };

        Ok(Self { path, scores })
    }

    /// Best score on record for a puzzle, if any.
    pub fn best_for(&self, puzzle_id: &str) -> Option<&BestScore> {
        self.scores.get(puzzle_id)
    }

    /// Record a completed session, keeping whichever metrics improved.
    ///
    /// Unfinished sessions are ignored; counters from an abandoned attempt
    /// are not scores. Returns which metrics were new bests.
    pub fn record(&mut self, state: &GameState) -> io::Result<NewBest> {
        if !state.completed {
            return Ok(NewBest {
                swaps: false,
                energy: false,
            });
        }

        let previous = self.scores.get(&state.puzzle.id);
        let result = is_new_best(
            state,
            previous.map(|b| b.best_swaps),
            previous.map(|b| b.best_energy),
        );

        if !result.swaps && !result.energy {
            return Ok(result);
        }

        let entry = BestScore {
            puzzle_id: state.puzzle.id.clone(),
            best_swaps: match previous {
                Some(b) => b.best_swaps.min(state.swaps_used),
                None => state.swaps_used,
            },
            best_energy: match previous {
                Some(b) => b.best_energy.min(state.energy_used),
                None => state.energy_used,
            },
            achieved_at: Utc::now().to_rfc3339(),
        };
        debug!(
            puzzle = %entry.puzzle_id,
            swaps = entry.best_swaps,
            energy = entry.best_energy,
            "new best recorded"
        );
        self.scores.insert(state.puzzle.id.clone(), entry);
        self.save()?;

        Ok(result)
    }

    fn save(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.scores)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::game::{apply_move, init_game};
    use crate::puzzles::PuzzleCatalog;
    use std::env;

    fn temp_book(tag: &str) -> ScoreBook {
        let path = env::temp_dir().join(format!(
            "heft_scores_{}_{}.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        ScoreBook::with_path(path).unwrap()
    }

    fn solved_tutorial() -> GameState {
        let catalog = PuzzleCatalog::builtin();
        let state = init_game(catalog.load("tutorial-01").unwrap());
        apply_move(&state, Position::new(0, 0), Position::new(0, 1)).unwrap()
    }

    #[test]
    fn test_first_completion_is_a_new_best() {
        let mut book = temp_book("first");
        let state = solved_tutorial();
        assert!(state.completed);

        let result = book.record(&state).unwrap();
        assert!(result.swaps && result.energy);

        let best = book.best_for("tutorial-01").unwrap();
        assert_eq!(best.best_swaps, 1);
        assert_eq!(best.best_energy, 3);
        assert!(!best.achieved_at.is_empty());
    }

    #[test]
    fn test_equal_result_is_not_a_new_best() {
        let mut book = temp_book("equal");
        let state = solved_tutorial();
        book.record(&state).unwrap();

        let result = book.record(&state).unwrap();
        assert!(!result.swaps && !result.energy);
    }

    #[test]
    fn test_unfinished_session_is_ignored() {
        let mut book = temp_book("unfinished");
        let catalog = PuzzleCatalog::builtin();
        let state = init_game(catalog.load("hard-01").unwrap());

        let result = book.record(&state).unwrap();
        assert!(!result.swaps && !result.energy);
        assert!(book.best_for("hard-01").is_none());
    }

    #[test]
    fn test_scores_survive_reopen() {
        let path = env::temp_dir().join(format!("heft_scores_reopen_{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut book = ScoreBook::with_path(path.clone()).unwrap();
        book.record(&solved_tutorial()).unwrap();
        drop(book);

        let reopened = ScoreBook::with_path(path.clone()).unwrap();
        assert_eq!(reopened.best_for("tutorial-01").unwrap().best_swaps, 1);
        let _ = fs::remove_file(&path);
    }
}
