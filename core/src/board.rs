//! The 4x4 grid value and its pure queries and geometric transforms.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width and height of the square board.
pub const GRID_SIZE: usize = 4;

/// A game is won as soon as any tile reaches this value.
pub const WINNING_TILE: Tile = 2048;

/// Value of a single cell: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u32;

/// A (row, column) coordinate, both 0-indexed and in `0..GRID_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

/// An immutable 4x4 board.
///
/// Every transform returns a new `Board`; `Board` is `Copy`, so callers keep
/// their original value untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board([[Tile; GRID_SIZE]; GRID_SIZE]);

impl Board {
    /// A board with every cell empty.
    pub const fn empty() -> Self {
        Board([[0; GRID_SIZE]; GRID_SIZE])
    }

    /// Build a board from its rows, top to bottom.
    pub const fn from_rows(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        Board(rows)
    }

    /// Borrow the rows, top to bottom.
    pub fn rows(&self) -> &[[Tile; GRID_SIZE]; GRID_SIZE] {
        &self.0
    }

    /// Consume the board, returning its rows.
    pub fn into_rows(self) -> [[Tile; GRID_SIZE]; GRID_SIZE] {
        self.0
    }

    /// Value at `cell`.
    ///
    /// Panics if `cell` is outside the grid.
    pub fn get(&self, cell: Cell) -> Tile {
        self.0[cell.row][cell.col]
    }

    /// A copy of this board with `cell` set to `value`.
    ///
    /// Panics if `cell` is outside the grid.
    #[must_use]
    pub fn with_tile(mut self, cell: Cell, value: Tile) -> Self {
        self.0[cell.row][cell.col] = value;
        self
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells().filter(|&(_, v)| v == 0).map(|(c, _)| c).collect()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells().filter(|&(_, v)| v == 0).count()
    }

    /// Largest tile on the board, 0 for an empty board.
    pub fn max_tile(&self) -> Tile {
        self.cells().map(|(_, v)| v).max().unwrap_or(0)
    }

    /// Sum of all tiles. Moves conserve it; spawns add 2 or 4.
    pub fn tile_sum(&self) -> u64 {
        self.cells().map(|(_, v)| u64::from(v)).sum()
    }

    /// Whether any tile has reached [`WINNING_TILE`].
    pub fn has_won(&self) -> bool {
        self.cells().any(|(_, v)| v == WINNING_TILE)
    }

    /// Whether at least one direction can still change the board: an empty
    /// cell exists, or two horizontally or vertically adjacent cells are equal.
    ///
    /// Always computed from the current contents.
    pub fn can_move(&self) -> bool {
        if self.empty_count() > 0 {
            return true;
        }

        let rows = &self.0;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE - 1 {
                if rows[row][col] == rows[row][col + 1] {
                    return true;
                }
            }
        }
        for row in 0..GRID_SIZE - 1 {
            for col in 0..GRID_SIZE {
                if rows[row][col] == rows[row + 1][col] {
                    return true;
                }
            }
        }
        false
    }

    /// Rotate the board clockwise by `quarter_turns` x 90 degrees.
    ///
    /// Values are only relocated, never changed; `quarter_turns` is taken mod 4.
    #[must_use]
    pub fn rotate(&self, quarter_turns: u8) -> Board {
        let mut board = *self;
        for _ in 0..quarter_turns % 4 {
            board = board.rotate_clockwise();
        }
        board
    }

    /// Mirror the board left-to-right.
    #[must_use]
    pub fn mirror(&self) -> Board {
        let mut rows = self.0;
        for row in rows.iter_mut() {
            row.reverse();
        }
        Board(rows)
    }

    fn rotate_clockwise(&self) -> Board {
        let mut out = [[0; GRID_SIZE]; GRID_SIZE];
        for (r, out_row) in out.iter_mut().enumerate() {
            for (c, slot) in out_row.iter_mut().enumerate() {
                *slot = self.0[GRID_SIZE - 1 - c][r];
            }
        }
        Board(out)
    }

    fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &v)| (Cell::new(r, c), v))
        })
    }
}

impl From<[[Tile; GRID_SIZE]; GRID_SIZE]> for Board {
    fn from(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        Board(rows)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in &self.0 {
            for &val in row {
                if val == 0 {
                    write!(f, "    .")?;
                } else {
                    write!(f, "{:5}", val)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "+------".repeat(GRID_SIZE) + "+";
        writeln!(f, "{border}")?;
        for row in &self.0 {
            write!(f, "|")?;
            for &val in row {
                if val == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{border}")?;
        }
        Ok(())
    }
}
