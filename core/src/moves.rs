//! Directional moves.
//!
//! Only "left" is implemented directly (row by row via [`slide_row`]). The other
//! directions rotate the board so the target edge faces left, move left, and
//! rotate back.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::DirectionError;
use crate::slide::slide_row;

/// The four possible move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Clockwise quarter turns that bring each direction's edge to the left,
/// indexed by `Direction as usize`.
const QUARTER_TURNS: [u8; 4] = [
    3, // Up: counterclockwise
    1, // Down: clockwise
    0, // Left
    2, // Right: half turn
];

impl Direction {
    /// All directions, in discriminant order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert a u8 to a Direction (0=Up, 1=Down, 2=Left, 3=Right).
    /// Returns None for invalid values.
    pub fn from_u8(value: u8) -> Option<Direction> {
        Self::ALL.get(usize::from(value)).copied()
    }

    fn quarter_turns(self) -> u8 {
        QUARTER_TURNS[self as usize]
    }
}

impl TryFrom<u8> for Direction {
    type Error = DirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::from_u8(value).ok_or(DirectionError::Code(value))
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    /// Accepts `up`/`down`/`left`/`right` and the `w`/`s`/`a`/`d` keys, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(DirectionError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Outcome of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveResult {
    /// The board after the slide (no tile spawned).
    pub board: Board,
    /// Points earned from merges in this move.
    pub score: u32,
    /// Whether any cell differs from the input board.
    pub moved: bool,
}

/// Slide and merge `board` towards `direction`. The input is not modified.
pub fn move_board(board: &Board, direction: Direction) -> MoveResult {
    let turns = direction.quarter_turns();
    let result = move_left(&board.rotate(turns));
    MoveResult {
        board: result.board.rotate((4 - turns) % 4),
        ..result
    }
}

/// Which directions would change `board`, in [`Direction::ALL`] order.
pub fn legal_directions(board: &Board) -> [bool; 4] {
    Direction::ALL.map(|direction| move_board(board, direction).moved)
}

fn move_left(board: &Board) -> MoveResult {
    let mut rows = board.into_rows();
    let mut score = 0;
    let mut moved = false;

    for row in rows.iter_mut() {
        let (slid, row_score) = slide_row(row);
        score += row_score;
        moved |= slid != *row;
        *row = slid;
    }

    MoveResult {
        board: Board::from_rows(rows),
        score,
        moved,
    }
}
