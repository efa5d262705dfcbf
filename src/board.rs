//! Board representation and pure grid operations.
//!
//! A board is a 3x3 grid of object ids. Boards are plain `Copy` values:
//! every "mutating" operation returns a new board, so a session snapshot can
//! never alias storage owned elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;

/// Board edge length. The whole engine assumes a 3x3 grid.
pub const GRID_SIZE: usize = 3;

/// Number of cells on a board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A cell coordinate on the grid. Rows and columns run 0..=2, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on the 3x3 grid.
    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < GRID_SIZE && (self.col as usize) < GRID_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A 3x3 arrangement of object ids.
///
/// The grid is public so puzzle data can be written as plain literals; the
/// "each id exactly once" rule is enforced at the validation boundary, not on
/// every intermediate board (swaps are permutations and preserve it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub grid: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    pub const fn new(grid: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { grid }
    }

    /// Object id at a position.
    pub fn object_at(&self, pos: Position) -> Result<u8, GameError> {
        if !pos.in_bounds() {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(self.grid[pos.row as usize][pos.col as usize])
    }

    /// A new board with `object_id` written at `pos`.
    ///
    /// Does not check that `object_id` names a real object; callers building
    /// boards from raw data validate separately.
    pub fn with_object_at(&self, pos: Position, object_id: u8) -> Result<Self, GameError> {
        if !pos.in_bounds() {
            return Err(GameError::OutOfBounds(pos));
        }
        let mut grid = self.grid;
        grid[pos.row as usize][pos.col as usize] = object_id;
        Ok(Self { grid })
    }

    /// A new board with the objects at the two positions exchanged.
    ///
    /// A same-cell swap returns an equal board; the session engine rejects
    /// that case before it ever gets here.
    pub fn swap(&self, pos_a: Position, pos_b: Position) -> Result<Self, GameError> {
        let object_a = self.object_at(pos_a)?;
        let object_b = self.object_at(pos_b)?;
        let swapped = self.with_object_at(pos_a, object_b)?;
        swapped.with_object_at(pos_b, object_a)
    }

    /// Whether this board equals any pattern in the set.
    ///
    /// Multiple acceptable targets model puzzles where rotations or
    /// reflections all count as solved.
    pub fn matches_any(&self, patterns: &[Board]) -> bool {
        patterns.iter().any(|pattern| self == pattern)
    }

    /// Build a board from a length-9 row-major cell sequence.
    pub fn from_flat(cells: &[u8]) -> Result<Self, GameError> {
        if cells.len() != CELL_COUNT {
            return Err(GameError::ShapeMismatch {
                expected: CELL_COUNT,
                got: cells.len(),
            });
        }
        let mut grid = [[0u8; GRID_SIZE]; GRID_SIZE];
        for (i, &cell) in cells.iter().enumerate() {
            grid[i / GRID_SIZE][i % GRID_SIZE] = cell;
        }
        Ok(Self { grid })
    }

    /// Build a board from row vectors, e.g. freshly parsed puzzle data.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GameError> {
        let got: usize = rows.iter().map(Vec::len).sum();
        if rows.len() != GRID_SIZE || rows.iter().any(|row| row.len() != GRID_SIZE) {
            return Err(GameError::ShapeMismatch {
                expected: CELL_COUNT,
                got,
            });
        }
        let mut grid = [[0u8; GRID_SIZE]; GRID_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                grid[r][c] = cell;
            }
        }
        Ok(Self { grid })
    }

    /// The cells in row-major order.
    pub fn to_flat(&self) -> [u8; CELL_COUNT] {
        let mut cells = [0u8; CELL_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = self.grid[i / GRID_SIZE][i % GRID_SIZE];
        }
        cells
    }
}

/// All 9 positions in row-major order. Deterministic, for consumer iteration.
pub fn all_positions() -> [Position; CELL_COUNT] {
    let mut positions = [Position::new(0, 0); CELL_COUNT];
    for (i, pos) in positions.iter_mut().enumerate() {
        *pos = Position::new((i / GRID_SIZE) as u8, (i % GRID_SIZE) as u8);
    }
    positions
}

/// Orthogonal in-bounds neighbors of a position.
///
/// Corners get 2, edges 3, the center cell all 4.
pub fn adjacent_positions(pos: Position) -> Vec<Position> {
    let mut adjacent = Vec::with_capacity(4);

    if pos.row > 0 {
        adjacent.push(Position::new(pos.row - 1, pos.col));
    }
    if (pos.row as usize) < GRID_SIZE - 1 {
        adjacent.push(Position::new(pos.row + 1, pos.col));
    }
    if pos.col > 0 {
        adjacent.push(Position::new(pos.row, pos.col - 1));
    }
    if (pos.col as usize) < GRID_SIZE - 1 {
        adjacent.push(Position::new(pos.row, pos.col + 1));
    }

    adjacent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_board() -> Board {
        Board::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]])
    }

    #[test]
    fn test_object_at_reads_cells() {
        let board = ordered_board();
        assert_eq!(board.object_at(Position::new(0, 0)).unwrap(), 1);
        assert_eq!(board.object_at(Position::new(1, 2)).unwrap(), 6);
        assert_eq!(board.object_at(Position::new(2, 2)).unwrap(), 9);
    }

    #[test]
    fn test_object_at_rejects_out_of_bounds() {
        let board = ordered_board();
        assert!(matches!(
            board.object_at(Position::new(3, 0)),
            Err(GameError::OutOfBounds(_))
        ));
        assert!(matches!(
            board.object_at(Position::new(0, 7)),
            Err(GameError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_with_object_at_leaves_original_untouched() {
        let board = ordered_board();
        let updated = board.with_object_at(Position::new(1, 1), 42).unwrap();
        assert_eq!(updated.object_at(Position::new(1, 1)).unwrap(), 42);
        assert_eq!(board.object_at(Position::new(1, 1)).unwrap(), 5);
    }

    #[test]
    fn test_swap_exchanges_two_cells() {
        let board = ordered_board();
        let swapped = board
            .swap(Position::new(0, 0), Position::new(2, 2))
            .unwrap();
        assert_eq!(swapped.grid, [[9, 2, 3], [4, 5, 6], [7, 8, 1]]);
    }

    #[test]
    fn test_swap_is_its_own_inverse() {
        let board = ordered_board();
        let a = Position::new(0, 1);
        let b = Position::new(2, 0);
        let round_trip = board.swap(a, b).unwrap().swap(a, b).unwrap();
        assert_eq!(round_trip, board);
    }

    #[test]
    fn test_same_cell_swap_is_identity() {
        let board = ordered_board();
        let pos = Position::new(1, 1);
        assert_eq!(board.swap(pos, pos).unwrap(), board);
    }

    #[test]
    fn test_matches_any_is_or_not_and() {
        let board = ordered_board();
        let other = board
            .swap(Position::new(0, 0), Position::new(0, 1))
            .unwrap();
        assert!(board.matches_any(&[other, board]));
        assert!(!board.matches_any(&[other]));
        assert!(!board.matches_any(&[]));
    }

    #[test]
    fn test_flat_round_trip() {
        let board = ordered_board();
        let flat = board.to_flat();
        assert_eq!(flat, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(Board::from_flat(&flat).unwrap(), board);
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        assert!(matches!(
            Board::from_flat(&[1, 2, 3]),
            Err(GameError::ShapeMismatch {
                expected: 9,
                got: 3
            })
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let rows = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8]];
        assert!(matches!(
            Board::from_rows(&rows),
            Err(GameError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_all_positions_row_major() {
        let positions = all_positions();
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(0, 1));
        assert_eq!(positions[8], Position::new(2, 2));
    }

    #[test]
    fn test_adjacent_counts_by_cell_kind() {
        // Corner
        assert_eq!(adjacent_positions(Position::new(0, 0)).len(), 2);
        // Edge
        assert_eq!(adjacent_positions(Position::new(0, 1)).len(), 3);
        // Center
        let center = adjacent_positions(Position::new(1, 1));
        assert_eq!(center.len(), 4);
        for pos in [
            Position::new(0, 1),
            Position::new(2, 1),
            Position::new(1, 0),
            Position::new(1, 2),
        ] {
            assert!(center.contains(&pos));
        }
    }
}
