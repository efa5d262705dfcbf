//! Energy cost model.
//!
//! A swap costs (weight_a + weight_b) x Manhattan distance, in exact integer
//! arithmetic. On a 3x3 grid distances run 0..=4, so per-swap costs run from
//! 2 (two weight-1 objects, adjacent) to 72 (two weight-9 objects, opposite
//! corners).

use crate::board::{Position, GRID_SIZE};
use crate::objects::GameObject;

/// Cheapest possible swap: two weight-1 objects at distance 1.
pub const MIN_SWAP_COST: u32 = 2;

/// Most expensive possible swap: two weight-9 objects at distance 4.
pub const MAX_SWAP_COST: u32 = 72;

/// Manhattan distance between two grid positions.
pub fn manhattan_distance(pos_a: Position, pos_b: Position) -> u32 {
    u32::from(pos_a.row.abs_diff(pos_b.row)) + u32::from(pos_a.col.abs_diff(pos_b.col))
}

/// Energy cost of swapping `object_a` at `pos_a` with `object_b` at `pos_b`.
pub fn energy_cost(
    object_a: &GameObject,
    pos_a: Position,
    object_b: &GameObject,
    pos_b: Position,
) -> u32 {
    (u32::from(object_a.weight) + u32::from(object_b.weight)) * manhattan_distance(pos_a, pos_b)
}

/// Distances for all 81 position pairs, indexed `[row_a][col_a][row_b][col_b]`.
///
/// A lookup cache only: values must agree with `manhattan_distance` for every
/// pair, which the tests check exhaustively.
pub const DISTANCE_TABLE: [[[[u8; GRID_SIZE]; GRID_SIZE]; GRID_SIZE]; GRID_SIZE] =
    build_distance_table();

const fn build_distance_table() -> [[[[u8; GRID_SIZE]; GRID_SIZE]; GRID_SIZE]; GRID_SIZE] {
    let mut table = [[[[0u8; GRID_SIZE]; GRID_SIZE]; GRID_SIZE]; GRID_SIZE];
    let mut r1 = 0;
    while r1 < GRID_SIZE {
        let mut c1 = 0;
        while c1 < GRID_SIZE {
            let mut r2 = 0;
            while r2 < GRID_SIZE {
                let mut c2 = 0;
                while c2 < GRID_SIZE {
                    let row_diff = if r1 > r2 { r1 - r2 } else { r2 - r1 };
                    let col_diff = if c1 > c2 { c1 - c2 } else { c2 - c1 };
                    table[r1][c1][r2][c2] = (row_diff + col_diff) as u8;
                    c2 += 1;
                }
                r2 += 1;
            }
            c1 += 1;
        }
        r1 += 1;
    }
    table
}

/// Table-backed distance lookup.
pub fn table_distance(pos_a: Position, pos_b: Position) -> u32 {
    DISTANCE_TABLE[pos_a.row as usize][pos_a.col as usize][pos_b.row as usize][pos_b.col as usize]
        as u32
}

/// Energy cost from bare weights using the precomputed distances.
pub fn energy_cost_fast(weight_a: u8, pos_a: Position, weight_b: u8, pos_b: Position) -> u32 {
    (u32::from(weight_a) + u32::from(weight_b)) * table_distance(pos_a, pos_b)
}

/// Rough energy estimate for planning `num_swaps` swaps of average objects.
pub fn estimate_energy_for_swaps(num_swaps: u32, avg_weight: f64, avg_distance: f64) -> u32 {
    (num_swaps as f64 * (avg_weight * 2.0) * avg_distance).round() as u32
}
