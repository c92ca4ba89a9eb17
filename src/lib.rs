//! A computer opponent for gravity-drop four-in-a-row games
//!
//! The agent picks its moves with a depth-limited minimax search using
//! alpha-beta pruning, backed by a per-search transposition table that
//! remembers the weight of every position it has already evaluated.
//!
//! # Basic Usage
//!
//! ```
//! use drop_four::{board::{Board, Player}, solver::choose_move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves(7, 6, "001122")?;
//! let column = choose_move(&board, Player::One, Player::Two, 3)?;
//!
//! assert_eq!(column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod heuristic;

pub mod transposition_table;

pub mod solver;

pub mod config;

pub mod error;


pub use board::{Board, Cell, GameState, Player};
pub use config::{CacheMode, SearchConfig};
pub use error::Error;
pub use solver::{choose_move, SearchOutcome, Solver};
pub use transposition_table::TranspositionTable;

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The default search depth in plies
pub const LOOK_AHEAD: usize = 5;

/// The default number of buckets in the transposition table
pub const TABLE_SIZE: usize = 32000;

/// The default number of boards held by a single transposition bucket
pub const TABLE_BIN_SIZE: usize = 10;

/// The weight of a won position, negated for a lost one
pub const WIN_SCORE: i32 = 1000;

/// The number of aligned pieces needed to win
pub const LINE_LENGTH: usize = 4;

// a line of four must fit on the default board in at least one direction
const_assert!(WIDTH >= LINE_LENGTH || HEIGHT >= LINE_LENGTH);
const_assert!(TABLE_SIZE > 0 && TABLE_BIN_SIZE > 0);
// the open-line heuristic can never reach a terminal weight on the default board
const_assert!(((WIDTH * HEIGHT * LINE_LENGTH) as i32) < WIN_SCORE);
