//! A single play session: current board, cumulative score, and win/stalemate
//! flags, driven one [`Direction`] at a time.

use std::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, Tile};
use crate::moves::{legal_directions, move_board, Direction};
use crate::spawn::{add_random_tile, initialize_board};

/// Result of executing a step (move) in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepResult {
    /// Whether the board changed (and a new tile was spawned).
    pub moved: bool,
    /// Points earned from merges in this move.
    pub reward: u32,
    /// Whether the session has been won.
    pub won: bool,
    /// Whether the session has ended, by a win or a stalemate.
    pub game_over: bool,
}

/// The 2048 session state.
///
/// Owns a seeded `SmallRng` so that equal seeds replay identical games.
/// Reaching [`WINNING_TILE`](crate::WINNING_TILE) ends the session.
#[derive(Clone)]
pub struct Game {
    board: Board,
    score: u32,
    won: bool,
    game_over: bool,
    rng: SmallRng,
}

impl Game {
    /// Create a new game with the given seed.
    ///
    /// The game starts with two random tiles (90% chance of 2, 10% chance of 4).
    pub fn new(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = initialize_board(&mut rng);
        Self::with_parts(board, rng)
    }

    /// Start a session from an existing board. Spawns after each move use `seed`.
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self::with_parts(board, SmallRng::seed_from_u64(seed))
    }

    /// Restart: equivalent to `Game::new(seed)`.
    pub fn reset(&mut self, seed: u64) {
        *self = Game::new(seed);
    }

    /// Slide towards `direction`; if anything moved, spawn a tile, add the
    /// merge points to the score and re-evaluate the terminal flags.
    ///
    /// Once the game is over every step is a no-op.
    pub fn step(&mut self, direction: Direction) -> StepResult {
        if self.game_over {
            return self.result(false, 0);
        }

        let outcome = move_board(&self.board, direction);
        debug!(
            "step {}: moved={} reward={}",
            direction, outcome.moved, outcome.score
        );
        if !outcome.moved {
            return self.result(false, 0);
        }

        self.board = add_random_tile(&outcome.board, &mut self.rng);
        self.score += outcome.score;

        if self.board.has_won() && !self.won {
            self.won = true;
            self.game_over = true;
            info!("reached {} with score {}", crate::WINNING_TILE, self.score);
        } else if !self.board.can_move() {
            self.game_over = true;
            info!(
                "no moves left: score {}, max tile {}",
                self.score,
                self.max_tile()
            );
        }

        self.result(true, outcome.score)
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the winning tile has been reached.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Get the maximum tile value on the board.
    pub fn max_tile(&self) -> Tile {
        self.board.max_tile()
    }

    /// Directions that would change the board, as [Up, Down, Left, Right].
    pub fn legal_directions(&self) -> [bool; 4] {
        legal_directions(&self.board)
    }

    fn with_parts(board: Board, rng: SmallRng) -> Self {
        let won = board.has_won();
        Game {
            board,
            score: 0,
            won,
            game_over: won || !board.can_move(),
            rng,
        }
    }

    fn result(&self, moved: bool, reward: u32) -> StepResult {
        StepResult {
            moved,
            reward,
            won: self.won,
            game_over: self.game_over,
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("score", &self.score)
            .field("won", &self.won)
            .field("game_over", &self.game_over)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.board)
    }
}
