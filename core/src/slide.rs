//! Slide-and-merge of a single row towards index 0.
//!
//! Every direction is reduced to this one kernel by rotating the board first
//! (see [`crate::moves`]).

use crate::board::{Tile, GRID_SIZE};

/// A row of tiles, left to right.
pub type Row = [Tile; GRID_SIZE];

/// Slide `row` to the left and merge equal neighbours.
///
/// Returns the new row and the points earned (the sum of every merged tile).
///
/// Algorithm:
/// 1. Compact: drop empty cells, keeping tile order
/// 2. Merge in one greedy left-to-right pass: an equal adjacent pair becomes a
///    single doubled tile and the scan skips past both inputs, so a merged
///    tile never merges again in the same move (`[2, 2, 2, 2]` -> `[4, 4]`)
/// 3. Pad with empty cells on the right
pub fn slide_row(row: &Row) -> (Row, u32) {
    let mut compact = [0; GRID_SIZE];
    let mut len = 0;
    for &val in row.iter().filter(|&&v| v != 0) {
        compact[len] = val;
        len += 1;
    }

    let mut out = [0; GRID_SIZE];
    let mut write_idx = 0;
    let mut score = 0;
    let mut i = 0;
    while i < len {
        if i + 1 < len && compact[i] == compact[i + 1] {
            let merged = compact[i] * 2;
            out[write_idx] = merged;
            score += merged;
            i += 2;
        } else {
            out[write_idx] = compact[i];
            i += 1;
        }
        write_idx += 1;
    }

    (out, score)
}
