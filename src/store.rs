//! Host-side session holder.
//!
//! The engine is pure; something has to own "the current game". This store
//! is that single writer: it keeps the latest `GameState` snapshot plus the
//! selected cell, and turns two taps into a swap. UI frameworks wrap this
//! in whatever reactive cell they like.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Position;
use crate::error::GameError;
use crate::game::{apply_move, init_game, reset_game, GameState};
use crate::puzzles::PuzzleCatalog;

/// Player preferences. An opaque blob from the engine's point of view; the
/// host persists it wherever it keeps settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub haptics_enabled: bool,
    pub tutorial_completed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptics_enabled: true,
            tutorial_completed: false,
        }
    }
}

/// Owns the active session and the cell selection.
#[derive(Debug, Default)]
pub struct SessionStore {
    catalog: PuzzleCatalog,
    game: Option<GameState>,
    selected: Option<Position>,
    current_puzzle_id: Option<String>,
}

impl SessionStore {
    pub fn new(catalog: PuzzleCatalog) -> Self {
        Self {
            catalog,
            game: None,
            selected: None,
            current_puzzle_id: None,
        }
    }

    /// Load a puzzle from the catalog and start a fresh session on it.
    pub fn start_puzzle(&mut self, puzzle_id: &str) -> Result<(), GameError> {
        let puzzle = self.catalog.load(puzzle_id)?;
        debug!(id = puzzle_id, "starting puzzle");
        self.game = Some(init_game(puzzle));
        self.selected = None;
        self.current_puzzle_id = Some(puzzle_id.to_string());
        Ok(())
    }

    /// Handle a cell tap.
    ///
    /// No selection: select the cell. Same cell again: deselect. Different
    /// cell: attempt the swap; an `InvalidSwap` just moves the selection,
    /// it is never surfaced as a failure.
    pub fn select_cell(&mut self, pos: Position) {
        let Some(game) = &self.game else {
            return;
        };

        let Some(selected) = self.selected else {
            self.selected = Some(pos);
            return;
        };

        if selected == pos {
            self.selected = None;
            return;
        }

        match apply_move(game, selected, pos) {
            Ok(next) => {
                self.game = Some(next);
                self.selected = None;
            }
            Err(err) => {
                warn!(%err, "swap rejected, moving selection");
                self.selected = Some(pos);
            }
        }
    }

    /// Restart the current puzzle from its start board.
    pub fn reset(&mut self) {
        if let Some(game) = &self.game {
            self.game = Some(reset_game(game));
            self.selected = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn current_puzzle_id(&self) -> Option<&str> {
        self.current_puzzle_id.as_deref()
    }

    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }
}
