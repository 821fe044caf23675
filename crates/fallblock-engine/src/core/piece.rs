use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::block::{Block, Color};

/// Offsets of the four cells of a shape, relative to its anchor.
pub type ShapeOffsets = [(i32, i32); Piece::LEN];

/// A falling piece: four colored blocks and the pivot they rotate around.
///
/// Pieces are immutable - movement and rotation operations return new `Piece` instances.
/// None of the operations check bounds or collisions; deciding whether a piece
/// fits is the board's job.
///
/// Two pieces are equal when they cover the same cells around the same center
/// and have the same color.
///
/// # Example
///
/// ```
/// use fallblock_engine::Piece;
///
/// let piece = Piece::l_shape1(4, 1);
/// let moved = piece.right();
/// let rotated = moved.rotated_clockwise();
/// assert_eq!(rotated.center().position(), (5, 1));
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Piece {
    center: Block,
    blocks: [Block; Piece::LEN],
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        // `Block` compares positions only
        self.color() == other.color()
            && self.center == other.center
            && self.blocks == other.blocks
    }
}

impl Eq for Piece {}

impl Piece {
    /// Number of blocks in a piece.
    pub const LEN: usize = 4;

    #[must_use]
    pub const fn new(center: Block, blocks: [Block; Piece::LEN]) -> Self {
        Self { center, blocks }
    }

    /// Builds a piece anchored at `(x, y)`.
    ///
    /// The center is the anchor itself and each block is the anchor shifted by
    /// the corresponding offset, kept in table order.
    #[must_use]
    pub fn from_offsets(x: i32, y: i32, offsets: &ShapeOffsets, color: Color) -> Self {
        Self {
            center: Block::new(x, y, color),
            blocks: (*offsets).map(|(dx, dy)| Block::new(x + dx, y + dy, color)),
        }
    }

    #[must_use]
    pub fn line(x: i32, y: i32) -> Self {
        PieceKind::Line.piece_at(x, y)
    }

    #[must_use]
    pub fn square(x: i32, y: i32) -> Self {
        PieceKind::Square.piece_at(x, y)
    }

    #[must_use]
    pub fn l_shape1(x: i32, y: i32) -> Self {
        PieceKind::LShape1.piece_at(x, y)
    }

    #[must_use]
    pub fn l_shape2(x: i32, y: i32) -> Self {
        PieceKind::LShape2.piece_at(x, y)
    }

    #[must_use]
    pub fn n_shape1(x: i32, y: i32) -> Self {
        PieceKind::NShape1.piece_at(x, y)
    }

    #[must_use]
    pub fn n_shape2(x: i32, y: i32) -> Self {
        PieceKind::NShape2.piece_at(x, y)
    }

    /// Picks one of the six shapes uniformly at random and anchors it at `(x, y)`.
    ///
    /// The random source is injected so that callers can pin the sequence.
    ///
    /// ```
    /// use fallblock_engine::Piece;
    /// use rand::SeedableRng as _;
    /// use rand_pcg::Pcg32;
    ///
    /// let mut rng = Pcg32::seed_from_u64(7);
    /// let piece = Piece::new_random(&mut rng, 5, 1);
    /// assert_eq!(piece.center().position(), (5, 1));
    /// ```
    #[must_use]
    pub fn new_random<R>(rng: &mut R, x: i32, y: i32) -> Self
    where
        R: Rng + ?Sized,
    {
        let kind: PieceKind = rng.random();
        kind.piece_at(x, y)
    }

    #[must_use]
    pub const fn center(&self) -> Block {
        self.center
    }

    #[must_use]
    pub const fn blocks(&self) -> &[Block; Piece::LEN] {
        &self.blocks
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.center.color()
    }

    /// Returns `true` if one of the piece's blocks sits at `(x, y)`.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.blocks.iter().any(|b| b.position() == (x, y))
    }

    fn map_blocks(&self, f: impl Fn(&Block) -> Block) -> Self {
        Self {
            center: f(&self.center),
            blocks: self.blocks.map(|b| f(&b)),
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.map_blocks(Block::down)
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.map_blocks(Block::left)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.map_blocks(Block::right)
    }

    /// Rotates the piece 90° clockwise around its center.
    ///
    /// The center stays in place; a block at offset `(dx, dy)` from the center
    /// moves to `(cx - dy, cy + dx)`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let center = self.center;
        Self {
            center,
            blocks: self.blocks.map(|b| b.rotated_clockwise_around(center)),
        }
    }
}

/// Enum representing the shape of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// Four cells in a vertical line.
    Line = 0,
    /// 2×2 square.
    Square = 1,
    /// Three in a row with a cell hanging below the right end.
    LShape1 = 2,
    /// Three in a row with a cell sticking above the right end.
    LShape2 = 3,
    /// Two offset pairs stepping down to the right.
    NShape1 = 4,
    /// Two offset pairs stepping up to the right.
    NShape2 = 5,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..PieceKind::LEN) {
            0 => PieceKind::Line,
            1 => PieceKind::Square,
            2 => PieceKind::LShape1,
            3 => PieceKind::LShape2,
            4 => PieceKind::NShape1,
            _ => PieceKind::NShape2,
        }
    }
}

impl PieceKind {
    /// Number of piece shapes (6).
    pub const LEN: usize = 6;

    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::Line,
        PieceKind::Square,
        PieceKind::LShape1,
        PieceKind::LShape2,
        PieceKind::NShape1,
        PieceKind::NShape2,
    ];

    #[must_use]
    pub fn color(self) -> Color {
        SHAPE_TABLE[self as usize].0
    }

    /// Returns the offsets of the shape's cells relative to its anchor.
    ///
    /// The anchor `(0, 0)` is always one of the cells.
    #[must_use]
    pub fn offsets(self) -> &'static ShapeOffsets {
        &SHAPE_TABLE[self as usize].1
    }

    /// Builds a piece of this shape anchored at `(x, y)`.
    #[must_use]
    pub fn piece_at(self, x: i32, y: i32) -> Piece {
        Piece::from_offsets(x, y, self.offsets(), self.color())
    }
}

/// Colors and anchor-relative offsets of every shape, indexed by `PieceKind`.
static SHAPE_TABLE: [(Color, ShapeOffsets); PieceKind::LEN] = [
    // Line
    (Color::DarkBlue, [(0, -1), (0, 0), (0, 1), (0, 2)]),
    // Square
    (Color::Red, [(0, 0), (1, 0), (1, 1), (0, 1)]),
    // LShape1
    (Color::Orange, [(-1, 0), (0, 0), (1, 0), (1, 1)]),
    // LShape2
    (Color::LightBlue, [(-1, 0), (0, 0), (1, 0), (1, -1)]),
    // NShape1
    (Color::Green, [(-1, 0), (0, 0), (0, 1), (1, 1)]),
    // NShape2
    (Color::Yellow, [(-1, 0), (0, 0), (0, -1), (1, -1)]),
];
