use std::{collections::BTreeMap, fmt, mem};

use serde::Serialize;

use crate::{
    BoardSizeError, InvalidPlacementError, PieceCollisionError, SetPieceError, TickError,
    core::{Block, Piece, RenderBoard, RenderCell},
};

use super::{
    config::BoardConfig,
    game_stats::GameStats,
    piece_factory::{PieceFactory, PieceSeed},
};

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The current piece moved down one row.
    Fell,
    /// The current piece could not move down and was locked.
    Locked(LockReport),
}

/// What happened when a piece locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockReport {
    locked_piece: Piece,
    cleared_rows: Vec<i32>,
    score_delta: usize,
    game_over: bool,
}

impl LockReport {
    #[must_use]
    pub fn locked_piece(&self) -> &Piece {
        &self.locked_piece
    }

    /// Rows that were complete right after the lock, ascending.
    #[must_use]
    pub fn cleared_rows(&self) -> &[i32] {
        &self.cleared_rows
    }

    #[must_use]
    pub fn score_delta(&self) -> usize {
        self.score_delta
    }

    /// Whether the piece spawned after this lock did not fit.
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game_over
    }
}

/// The playing field: grid dimensions, locked blocks, the falling piece and score.
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell
/// - X increases rightward, up to `width - 1`
/// - Y increases downward, up to `height - 1`
///
/// # Commands
///
/// Player moves ([`move_left`](Self::move_left), [`move_right`](Self::move_right),
/// [`rotate_clockwise`](Self::rotate_clockwise), [`soft_drop`](Self::soft_drop))
/// never fail: an illegal move leaves the board unchanged and returns `false`.
/// Ticks ([`push_current_piece_down`](Self::push_current_piece_down),
/// [`hard_drop`](Self::hard_drop)) fail once the game is over.
///
/// # Example
///
/// ```
/// use fallblock_engine::{Board, Piece};
///
/// let mut board = Board::new(10, 20).unwrap();
/// board.set_current_piece(Piece::square(0, 18)).unwrap();
///
/// // Flush against the left wall
/// assert!(!board.move_left());
/// assert_eq!(board.current_piece(), Piece::square(0, 18));
///
/// // Already on the floor, so the next tick locks it
/// assert!(board.push_current_piece_down().unwrap().is_locked());
/// assert!(board.block_at(0, 19).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    // Keyed by (y, x) so that iteration is row-major.
    placed_blocks: BTreeMap<(i32, i32), Block>,
    current_piece: Piece,
    piece_factory: PieceFactory,
    stats: GameStats,
    game_over: bool,
}

impl Board {
    /// Largest accepted width or height.
    pub const MAX_DIMENSION: i32 = 1000;

    /// Creates a board with a randomly seeded piece sequence.
    pub fn new(width: i32, height: i32) -> Result<Self, BoardSizeError> {
        Self::with_factory(width, height, PieceFactory::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    pub fn with_seed(width: i32, height: i32, seed: PieceSeed) -> Result<Self, BoardSizeError> {
        Self::with_factory(width, height, PieceFactory::with_seed(seed))
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardSizeError> {
        let factory = config
            .seed
            .map_or_else(PieceFactory::new, PieceFactory::with_seed);
        Self::with_factory(config.width, config.height, factory)
    }

    /// Creates a board that draws its pieces from `piece_factory`.
    ///
    /// The first piece spawns immediately. If it does not fit (the board is too
    /// small for it), the board starts out in the game-over state.
    pub fn with_factory(
        width: i32,
        height: i32,
        mut piece_factory: PieceFactory,
    ) -> Result<Self, BoardSizeError> {
        let range = 1..=Self::MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(BoardSizeError { width, height });
        }
        let (x, y) = spawn_position(width);
        let current_piece = piece_factory.next_piece(x, y);
        let mut board = Self {
            width,
            height,
            placed_blocks: BTreeMap::new(),
            current_piece,
            piece_factory,
            stats: GameStats::new(),
            game_over: false,
        };
        board.game_over = !board.is_piece_valid(&current_piece);
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Where new pieces are anchored: `(width / 2, 1)`.
    #[must_use]
    pub fn spawn_position(&self) -> (i32, i32) {
        spawn_position(self.width)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.piece_factory.seed()
    }

    #[must_use]
    pub fn current_piece(&self) -> Piece {
        self.current_piece
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the locked blocks in row-major order.
    pub fn placed_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.placed_blocks.values().copied()
    }

    /// Returns the locked block at `(x, y)`, if any.
    #[must_use]
    pub fn block_at(&self, x: i32, y: i32) -> Option<Block> {
        self.placed_blocks.get(&(y, x)).copied()
    }

    /// Returns the `width` slots of row `y`, left to right.
    #[must_use]
    pub fn row(&self, y: i32) -> Vec<Option<Block>> {
        (0..self.width).map(|x| self.block_at(x, y)).collect()
    }

    /// Is every slot of row `y` occupied?
    #[must_use]
    pub fn is_row_complete(&self, y: i32) -> bool {
        self.row(y).iter().all(Option::is_some)
    }

    /// Returns the indexes of all complete rows, ascending.
    #[must_use]
    pub fn find_completed_rows(&self) -> Vec<i32> {
        (0..self.height)
            .filter(|&y| self.is_row_complete(y))
            .collect()
    }

    fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Is the block inside the grid and on a free cell?
    #[must_use]
    pub fn is_block_valid(&self, block: &Block) -> bool {
        self.is_in_bounds(block.x(), block.y()) && self.block_at(block.x(), block.y()).is_none()
    }

    /// Is every block of the piece valid?
    ///
    /// Blocks of the piece are not checked against each other.
    #[must_use]
    pub fn is_piece_valid(&self, piece: &Piece) -> bool {
        piece.blocks().iter().all(|b| self.is_block_valid(b))
    }

    /// Adds the piece's blocks to the locked blocks.
    ///
    /// This does not touch the current piece, clear rows or score.
    pub fn place_piece(&mut self, piece: &Piece) -> Result<(), InvalidPlacementError> {
        if !self.is_piece_valid(piece) {
            return Err(InvalidPlacementError { piece: *piece });
        }
        for block in piece.blocks() {
            self.placed_blocks.insert((block.y(), block.x()), *block);
        }
        Ok(())
    }

    /// Removes every locked block on row `y` and moves the blocks above it down
    /// one row. Blocks below `y` stay where they are.
    pub fn remove_row(&mut self, y: i32) {
        self.placed_blocks = mem::take(&mut self.placed_blocks)
            .into_values()
            .filter(|b| b.y() != y)
            .map(|b| if b.y() < y { b.down() } else { b })
            .map(|b| ((b.y(), b.x()), b))
            .collect();
    }

    /// Would moving the piece down one row make it invalid?
    #[must_use]
    pub fn is_piece_on_bottom(&self, piece: &Piece) -> bool {
        !self.is_piece_valid(&piece.down())
    }

    /// Returns where the current piece would land if dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut dropped = self.current_piece;
        while !self.is_piece_on_bottom(&dropped) {
            dropped = dropped.down();
        }
        dropped
    }

    /// Replaces the current piece if the game is running and the new one fits.
    pub fn set_current_piece(&mut self, piece: Piece) -> Result<(), SetPieceError> {
        if self.game_over {
            return Err(SetPieceError::GameOver);
        }
        if !self.is_piece_valid(&piece) {
            return Err(SetPieceError::PieceCollision(PieceCollisionError));
        }
        self.current_piece = piece;
        Ok(())
    }

    fn try_commit(&mut self, candidate: Piece) -> bool {
        if self.game_over || !self.is_piece_valid(&candidate) {
            return false;
        }
        self.current_piece = candidate;
        true
    }

    /// Moves the current piece one column left; returns whether the move was made.
    pub fn move_left(&mut self) -> bool {
        self.try_commit(self.current_piece.left())
    }

    /// Moves the current piece one column right; returns whether the move was made.
    pub fn move_right(&mut self) -> bool {
        self.try_commit(self.current_piece.right())
    }

    /// Rotates the current piece clockwise; returns whether the rotation was made.
    ///
    /// There are no wall kicks: a rotation that does not fit in place is rejected.
    pub fn rotate_clockwise(&mut self) -> bool {
        self.try_commit(self.current_piece.rotated_clockwise())
    }

    /// Moves the current piece down one row if it fits. Never locks the piece.
    pub fn soft_drop(&mut self) -> bool {
        self.try_commit(self.current_piece.down())
    }

    /// Advances the game by one tick.
    ///
    /// If the current piece can move down, it does. Otherwise it is locked, the
    /// completed rows are removed one at a time in ascending order, the score is
    /// updated and a new piece spawns. When the new piece does not fit, the game
    /// is over; the locked blocks are left as they are.
    pub fn push_current_piece_down(&mut self) -> Result<DropOutcome, TickError> {
        if self.game_over {
            return Err(TickError::GameOver);
        }
        if !self.is_piece_on_bottom(&self.current_piece) {
            self.current_piece = self.current_piece.down();
            return Ok(DropOutcome::Fell);
        }
        let report = self.lock_current_piece()?;
        Ok(DropOutcome::Locked(report))
    }

    /// Ticks until the current piece locks.
    pub fn hard_drop(&mut self) -> Result<LockReport, TickError> {
        loop {
            if let DropOutcome::Locked(report) = self.push_current_piece_down()? {
                return Ok(report);
            }
        }
    }

    fn lock_current_piece(&mut self) -> Result<LockReport, TickError> {
        let locked_piece = self.current_piece;
        self.place_piece(&locked_piece)
            .map_err(TickError::InvalidPlacement)?;

        let cleared_rows = self.find_completed_rows();
        for &y in &cleared_rows {
            self.remove_row(y);
        }
        let score_delta = self.stats.complete_piece_drop(cleared_rows.len());

        self.spawn_next_piece();

        Ok(LockReport {
            locked_piece,
            cleared_rows,
            score_delta,
            game_over: self.game_over,
        })
    }

    fn spawn_next_piece(&mut self) {
        let (x, y) = self.spawn_position();
        self.current_piece = self.piece_factory.next_piece(x, y);
        if !self.is_piece_valid(&self.current_piece) {
            self.game_over = true;
        }
    }

    /// Builds a per-cell snapshot of the board.
    ///
    /// Locked blocks, the ghost of the current piece and the current piece are
    /// drawn in that order. After game over the ghost is omitted.
    #[must_use]
    pub fn render_board(&self) -> RenderBoard {
        #[expect(clippy::cast_sign_loss)]
        let mut render = RenderBoard::new(self.width as usize, self.height as usize);
        for block in self.placed_blocks.values() {
            render.fill_block_as(block, RenderCell::Placed(block.color()));
        }
        if !self.game_over {
            render.fill_piece_as(&self.ghost_piece(), RenderCell::Ghost);
        }
        render.fill_piece_as(
            &self.current_piece,
            RenderCell::Falling(self.current_piece.color()),
        );
        render
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_board().fmt(f)
    }
}

fn spawn_position(width: i32) -> (i32, i32) {
    (width / 2, 1)
}
