//! Random tile placement. The only source of nondeterminism in the crate; the
//! RNG is always passed in by the caller.

use log::trace;
use rand::Rng;

use crate::board::{Board, Tile};

/// Chance that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// A full board is returned unchanged.
pub fn add_random_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let empty_cells = board.empty_cells();
    if empty_cells.is_empty() {
        return *board;
    }

    let cell = empty_cells[rng.gen_range(0..empty_cells.len())];
    let value: Tile = if rng.gen_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
    trace!("spawned {} at ({}, {})", value, cell.row, cell.col);
    board.with_tile(cell, value)
}

/// An empty board with two random tiles, the starting position of a game.
pub fn initialize_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let board = add_random_tile(&Board::empty(), rng);
    add_random_tile(&board, rng)
}
