//! Game session engine.
//!
//! A session is a pure value: `apply_move`, `reset_game`, and `undo_move`
//! all return a brand-new `GameState` and never touch their input. Hosts
//! hold the latest snapshot and replace it wholesale (single writer); the
//! engine itself keeps no state between calls.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::energy::energy_cost;
use crate::error::GameError;
use crate::objects::object;
use crate::puzzles::PuzzleDefinition;
use crate::validation::is_valid_swap;

/// One recorded swap. Append-only inside a session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub energy_cost: u32,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A snapshot of one puzzle attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub puzzle: PuzzleDefinition,
    pub board: Board,
    pub swaps_used: u32,
    pub energy_used: u32,
    pub move_history: Vec<Move>,
    pub completed: bool,
}

/// Start a fresh session for a puzzle.
///
/// Assumes the puzzle already passed catalog validation; the loader never
/// hands out anything else.
pub fn init_game(puzzle: &PuzzleDefinition) -> GameState {
    GameState {
        puzzle: puzzle.clone(),
        board: puzzle.start_board,
        swaps_used: 0,
        energy_used: 0,
        move_history: Vec::new(),
        completed: false,
    }
}

/// Apply a swap, producing the next session snapshot.
///
/// Rejects with `InvalidSwap` before any board work when the positions are
/// equal or off the grid; the input state is untouched either way.
pub fn apply_move(
    state: &GameState,
    pos_a: Position,
    pos_b: Position,
) -> Result<GameState, GameError> {
    apply_move_at(state, pos_a, pos_b, Utc::now().timestamp_millis())
}

/// `apply_move` with an explicit timestamp.
///
/// Replay paths use this to preserve the originally recorded move times, so
/// a rebuilt session is identical to the one forward play produced.
fn apply_move_at(
    state: &GameState,
    pos_a: Position,
    pos_b: Position,
    timestamp: i64,
) -> Result<GameState, GameError> {
    if !is_valid_swap(pos_a, pos_b) {
        return Err(GameError::InvalidSwap {
            from: pos_a,
            to: pos_b,
        });
    }

    let object_a = object(state.board.object_at(pos_a)?)?;
    let object_b = object(state.board.object_at(pos_b)?)?;
    let cost = energy_cost(object_a, pos_a, object_b, pos_b);

    let board = state.board.swap(pos_a, pos_b)?;
    let completed = board.matches_any(&state.puzzle.target_patterns);

    let mut move_history = state.move_history.clone();
    move_history.push(Move {
        from: pos_a,
        to: pos_b,
        energy_cost: cost,
        timestamp,
    });

    Ok(GameState {
        puzzle: state.puzzle.clone(),
        board,
        swaps_used: state.swaps_used + 1,
        energy_used: state.energy_used + cost,
        move_history,
        completed,
    })
}

/// Back to the puzzle's start board with everything cleared.
pub fn reset_game(state: &GameState) -> GameState {
    init_game(&state.puzzle)
}

/// Remove the last move by replaying everything before it.
///
/// No inverse-swap bookkeeping: rebuilding from scratch is O(history) but
/// agrees with forward play by construction. Recorded timestamps are kept,
/// so the result is exactly the pre-move state. Empty history is a no-op,
/// not an error.
pub fn undo_move(state: &GameState) -> Result<GameState, GameError> {
    if state.move_history.is_empty() {
        return Ok(state.clone());
    }

    let mut rebuilt = init_game(&state.puzzle);
    for mv in &state.move_history[..state.move_history.len() - 1] {
        rebuilt = apply_move_at(&rebuilt, mv.from, mv.to, mv.timestamp)?;
    }
    Ok(rebuilt)
}

/// Reconstruct a session from a persisted move log.
///
/// Fails if any recorded move would not have been legal, which flags a
/// corrupt or mismatched log.
pub fn replay_moves(puzzle: &PuzzleDefinition, moves: &[Move]) -> Result<GameState, GameError> {
    let mut state = init_game(puzzle);
    for mv in moves {
        state = apply_move_at(&state, mv.from, mv.to, mv.timestamp)?;
    }
    Ok(state)
}

/// How a session measures up against its puzzle's par.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub swaps: u32,
    pub energy: u32,
    pub par_swaps: u32,
    pub par_energy: u32,
    pub swaps_delta: i64,
    pub energy_delta: i64,
    pub is_under_par_swaps: bool,
    pub is_under_par_energy: bool,
    /// Both metrics exactly at par, not merely under.
    pub is_perfect: bool,
}

pub fn performance_summary(state: &GameState) -> PerformanceSummary {
    let par = state.puzzle.par;
    let swaps_delta = i64::from(state.swaps_used) - i64::from(par.swaps);
    let energy_delta = i64::from(state.energy_used) - i64::from(par.energy);

    PerformanceSummary {
        swaps: state.swaps_used,
        energy: state.energy_used,
        par_swaps: par.swaps,
        par_energy: par.energy,
        swaps_delta,
        energy_delta,
        is_under_par_swaps: state.swaps_used <= par.swaps,
        is_under_par_energy: state.energy_used <= par.energy,
        is_perfect: state.swaps_used == par.swaps && state.energy_used == par.energy,
    }
}

/// Score a session: 100 base, swap and energy deltas, perfect bonus.
///
/// Over par: -5 per extra swap, -1 per full 5 extra energy. Under par:
/// +10 per saved swap, +2 per full 5 saved energy. Exactly at par both
/// delta terms are zero. +50 when perfect. Never negative.
pub fn calculate_score(state: &GameState) -> u32 {
    let summary = performance_summary(state);
    let mut score: i64 = 100;

    if summary.swaps_delta > 0 {
        score -= summary.swaps_delta * 5;
    } else {
        score += -summary.swaps_delta * 10;
    }

    if summary.energy_delta > 0 {
        score -= summary.energy_delta / 5;
    } else {
        score += -summary.energy_delta / 5 * 2;
    }

    if summary.is_perfect {
        score += 50;
    }

    score.max(0) as u32
}

/// Whole seconds between the first and last recorded moves; 0 with no moves.
///
/// A derived statistic over wall-clock stamps, not a game clock.
pub fn time_taken(state: &GameState) -> i64 {
    match (state.move_history.first(), state.move_history.last()) {
        (Some(first), Some(last)) => (last.timestamp - first.timestamp) / 1000,
        _ => 0,
    }
}

/// Per-metric new-best flags for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBest {
    pub swaps: bool,
    pub energy: bool,
}

/// Compare against previous bests; absent previous best means any result
/// is a new best. The two checks are independent.
pub fn is_new_best(
    state: &GameState,
    previous_best_swaps: Option<u32>,
    previous_best_energy: Option<u32>,
) -> NewBest {
    NewBest {
        swaps: previous_best_swaps.map_or(true, |best| state.swaps_used < best),
        energy: previous_best_energy.map_or(true, |best| state.energy_used < best),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles::Par;

    fn reversal_puzzle() -> PuzzleDefinition {
        PuzzleDefinition {
            id: "reversal".to_string(),
            name: "Reversal".to_string(),
            difficulty: 4,
            start_board: Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]),
            target_patterns: vec![Board::new([[9, 8, 7], [6, 5, 4], [3, 2, 1]])],
            par: Par {
                swaps: 4,
                energy: 120,
            },
            hints: vec![],
            created_at: "2025-01-14T11:00:00Z".to_string(),
        }
    }

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    /// The four swaps that reverse the ordered board: corner pairs cost 40
    /// each, edge pairs 20 each, 120 total.
    const REVERSAL_SWAPS: [(Position, Position); 4] = [
        (Position::new(0, 0), Position::new(2, 2)),
        (Position::new(0, 1), Position::new(2, 1)),
        (Position::new(0, 2), Position::new(2, 0)),
        (Position::new(1, 0), Position::new(1, 2)),
    ];

    fn play_reversal() -> GameState {
        let mut state = init_game(&reversal_puzzle());
        for (a, b) in REVERSAL_SWAPS {
            state = apply_move(&state, a, b).unwrap();
        }
        state
    }

    #[test]
    fn test_init_game_starts_clean() {
        let puzzle = reversal_puzzle();
        let state = init_game(&puzzle);
        assert_eq!(state.board, puzzle.start_board);
        assert_eq!(state.swaps_used, 0);
        assert_eq!(state.energy_used, 0);
        assert!(state.move_history.is_empty());
        assert!(!state.completed);
    }

    #[test]
    fn test_first_corner_swap_costs_forty() {
        let state = init_game(&reversal_puzzle());
        let next = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();

        // Objects 1 and 9 across distance 4.
        assert_eq!(next.energy_used, 40);
        assert_eq!(next.swaps_used, 1);
        assert_eq!(next.board.grid, [[9, 2, 3], [4, 5, 6], [7, 8, 1]]);
        assert!(!next.completed);

        // Input snapshot untouched.
        assert_eq!(state.swaps_used, 0);
        assert_eq!(state.board, reversal_puzzle().start_board);
    }

    #[test]
    fn test_invalid_swap_rejected_before_any_mutation() {
        let state = init_game(&reversal_puzzle());
        let same = apply_move(&state, pos(1, 1), pos(1, 1));
        assert!(matches!(same, Err(GameError::InvalidSwap { .. })));
        let off_grid = apply_move(&state, pos(0, 0), pos(5, 5));
        assert!(matches!(off_grid, Err(GameError::InvalidSwap { .. })));
    }

    #[test]
    fn test_full_reversal_completes_at_par() {
        let state = play_reversal();
        assert!(state.completed);
        assert_eq!(state.swaps_used, 4);
        assert_eq!(state.energy_used, 120);

        let summary = performance_summary(&state);
        assert_eq!(summary.swaps_delta, 0);
        assert_eq!(summary.energy_delta, 0);
        assert!(summary.is_under_par_swaps);
        assert!(summary.is_under_par_energy);
        assert!(summary.is_perfect);
    }

    #[test]
    fn test_perfect_run_scores_one_fifty() {
        let state = play_reversal();
        // 100 base + 50 perfect bonus, zero delta terms.
        assert_eq!(calculate_score(&state), 150);
    }

    #[test]
    fn test_score_penalties_over_par() {
        let mut state = play_reversal();
        // Tighten par after the fact: 2 swaps over, 80 energy over.
        state.puzzle.par = Par {
            swaps: 2,
            energy: 40,
        };
        // 100 - 2*5 - 80/5 = 74.
        assert_eq!(calculate_score(&state), 74);
    }

    #[test]
    fn test_score_bonuses_under_par() {
        let mut state = play_reversal();
        // Loosen par: 1 swap under, 33 energy under.
        state.puzzle.par = Par {
            swaps: 5,
            energy: 153,
        };
        // 100 + 1*10 + (33/5)*2 = 100 + 10 + 12 = 122. Floor division.
        assert_eq!(calculate_score(&state), 122);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut state = play_reversal();
        state.puzzle.par = Par {
            swaps: 1,
            energy: 1,
        };
        // 100 - 3*5 - floor(119/5) = 100 - 15 - 23 = 62... still positive;
        // push it negative with a long detour.
        for _ in 0..30 {
            state = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();
            state = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();
        }
        assert_eq!(calculate_score(&state), 0);
    }

    #[test]
    fn test_undo_restores_exact_prior_state() {
        let before = play_reversal();
        let after = apply_move(&before, pos(0, 0), pos(0, 1)).unwrap();
        let undone = undo_move(&after).unwrap();
        assert_eq!(undone, before);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let state = init_game(&reversal_puzzle());
        let undone = undo_move(&state).unwrap();
        assert_eq!(undone, state);
    }

    #[test]
    fn test_undo_clears_completion() {
        let state = play_reversal();
        assert!(state.completed);
        let undone = undo_move(&state).unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.swaps_used, 3);
    }

    #[test]
    fn test_reset_discards_everything() {
        let state = play_reversal();
        let reset = reset_game(&state);
        assert_eq!(reset.board, state.puzzle.start_board);
        assert_eq!(reset.swaps_used, 0);
        assert_eq!(reset.energy_used, 0);
        assert!(reset.move_history.is_empty());
        assert!(!reset.completed);
    }

    #[test]
    fn test_replay_reconstructs_identical_session() {
        let state = play_reversal();
        let replayed = replay_moves(&state.puzzle, &state.move_history).unwrap();
        assert_eq!(replayed, state);
    }

    #[test]
    fn test_replay_rejects_corrupt_log() {
        let puzzle = reversal_puzzle();
        let moves = [Move {
            from: pos(0, 0),
            to: pos(0, 0),
            energy_cost: 0,
            timestamp: 0,
        }];
        assert!(matches!(
            replay_moves(&puzzle, &moves),
            Err(GameError::InvalidSwap { .. })
        ));
    }

    #[test]
    fn test_time_taken_from_move_stamps() {
        let mut state = init_game(&reversal_puzzle());
        assert_eq!(time_taken(&state), 0);

        state = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();
        state = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();
        // Pin the stamps: 5000 ms apart reads as 5 whole seconds.
        state.move_history[0].timestamp = 1_700_000_000_000;
        state.move_history[1].timestamp = 1_700_000_005_000;
        assert_eq!(time_taken(&state), 5);
    }

    #[test]
    fn test_new_best_checks_are_independent() {
        let state = play_reversal(); // 4 swaps, 120 energy

        let both = is_new_best(&state, None, None);
        assert!(both.swaps && both.energy);

        let swaps_only = is_new_best(&state, Some(5), Some(100));
        assert!(swaps_only.swaps);
        assert!(!swaps_only.energy);

        let neither = is_new_best(&state, Some(4), Some(120));
        assert!(!neither.swaps && !neither.energy);
    }

    #[test]
    fn test_match_any_target_completes() {
        let mut puzzle = reversal_puzzle();
        // Accept the one-corner-swap layout as a second target.
        puzzle
            .target_patterns
            .push(Board::new([[9, 2, 3], [4, 5, 6], [7, 8, 1]]));
        let state = init_game(&puzzle);
        let next = apply_move(&state, pos(0, 0), pos(2, 2)).unwrap();
        assert!(next.completed);
    }
}
