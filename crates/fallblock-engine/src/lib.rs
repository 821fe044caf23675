//! Rules engine for a falling-block puzzle game.
//!
//! The engine is split into two layers:
//!
//! - [`core`] - Immutable value types: [`Block`], [`Piece`], [`PieceKind`] and the
//!   [`RenderBoard`] occupancy grid
//! - [`engine`] - Mutable game state: [`Board`], [`PieceFactory`], [`GameStats`]
//!   and [`BoardConfig`]
//!
//! Front ends (graphical, terminal or headless) drive a [`Board`] through its
//! command methods and read it back through its query methods. The engine does
//! no I/O and keeps no timers; the caller decides when a tick happens.
//!
//! # Example
//!
//! ```
//! use fallblock_engine::{Board, PieceSeed};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut board = Board::with_seed(10, 20, seed).unwrap();
//!
//! board.move_left();
//! board.rotate_clockwise();
//! let report = board.hard_drop().unwrap();
//!
//! assert_eq!(report.score_delta(), 0);
//! assert_eq!(board.placed_blocks().count(), 4);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting current piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SetPieceError {
    #[display("game is over")]
    GameOver,
    #[display("cannot set the current piece")]
    PieceCollision(PieceCollisionError),
}

/// Returned when a piece is placed where it does not fit.
///
/// Only internal logic errors should ever trigger this: the board validates the
/// current piece before locking it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("cannot place an invalid piece: {piece:?}")]
pub struct InvalidPlacementError {
    piece: Piece,
}

impl InvalidPlacementError {
    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "board dimensions must be between 1 and {}, got {width}x{height}",
    Board::MAX_DIMENSION
)]
pub struct BoardSizeError {
    width: i32,
    height: i32,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum TickError {
    #[display("game is over")]
    GameOver,
    #[display("failed to lock the current piece")]
    InvalidPlacement(InvalidPlacementError),
}
