//! Game state and the rules that drive it.
//!
//! This module provides the mutable side of the engine:
//!
//! - [`Board`] - The grid, placed blocks, current piece and game-over state
//! - [`PieceFactory`] - Seeded random piece source
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameStats`] - Score and line clear counters
//! - [`BoardConfig`] - Construction parameters
//!
//! # Game Flow
//!
//! 1. Create a [`Board`]; the first piece spawns at `(width / 2, 1)`
//! 2. The driver moves and rotates the piece; rejected moves are ignored
//! 3. Each tick pushes the piece down one row
//! 4. A piece that cannot move down locks, completed rows are cleared and scored
//! 5. A new piece spawns; if it does not fit, the game is over
//!
//! # Example
//!
//! ```
//! use fallblock_engine::{Board, DropOutcome};
//!
//! let mut board = Board::new(10, 20).unwrap();
//!
//! for _ in 0..1000 {
//!     board.move_right();
//!     match board.push_current_piece_down() {
//!         Ok(DropOutcome::Locked(report)) => assert!(report.cleared_rows().len() <= 4),
//!         Ok(DropOutcome::Fell) => {}
//!         Err(_) => break,
//!     }
//! }
//! ```

pub use self::{board::*, config::*, game_stats::*, piece_factory::*};

mod board;
mod config;
mod game_stats;
mod piece_factory;
