//! # 2048 Game Core Engine
//!
//! Pure board transformations for the 2048 sliding-tile puzzle, plus a small
//! session type that strings them together into a game.
//!
//! Every board operation takes a [`Board`] value and returns a new one. The
//! only randomness is tile spawning, and the RNG is always supplied by the
//! caller, so games are reproducible from a seed.
//!
//! ## Example
//!
//! ```rust
//! use tile2048_core::{move_board, Board, Direction};
//!
//! let board = Board::from_rows([[0, 0, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
//! let result = move_board(&board, Direction::Left);
//! assert_eq!(result.board.rows()[1], [4, 0, 0, 0]);
//! assert_eq!(result.score, 4);
//! assert!(result.moved);
//! ```
//!
//! Driving a whole session:
//!
//! ```rust
//! use tile2048_core::{Direction, Game};
//!
//! let mut game = Game::new(42); // seed 42
//! let result = game.step(Direction::Left);
//! println!("Score: {}, moved: {}", game.score(), result.moved);
//! ```

pub mod board;
pub mod error;
pub mod moves;
pub mod session;
pub mod slide;
pub mod spawn;

pub use board::{Board, Cell, Tile, GRID_SIZE, WINNING_TILE};
pub use error::DirectionError;
pub use moves::{legal_directions, move_board, Direction, MoveResult};
pub use session::{Game, StepResult};
pub use slide::slide_row;
pub use spawn::{add_random_tile, initialize_board, SPAWN_TWO_PROBABILITY};
