use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use super::{
    block::{Block, Color},
    piece::Piece,
};

/// A single cell of a [`RenderBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    /// Ghost piece preview (shows where the current piece will land).
    Ghost,
    /// Block of the falling piece.
    Falling(Color),
    /// Locked block.
    Placed(Color),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }

    /// Returns the character used by the text form of the board.
    ///
    /// Placed blocks use the uppercase color character, falling blocks the
    /// lowercase one.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            RenderCell::Empty => '.',
            RenderCell::Ghost => '+',
            RenderCell::Falling(color) => color.as_char().to_ascii_lowercase(),
            RenderCell::Placed(color) => color.as_char(),
        }
    }
}

/// Cell-by-cell snapshot of a board for rendering.
///
/// Front ends read this once per frame instead of querying the board cell by
/// cell. Writes outside the grid are ignored, so a piece hanging over the top
/// edge can be drawn as is.
///
/// The text form (used by [`fmt::Display`] and serde) is one string per row,
/// top to bottom; see [`RenderCell::as_char`].
///
/// # Example
///
/// ```
/// use fallblock_engine::{Piece, RenderBoard, RenderCell};
///
/// let mut board = RenderBoard::new(4, 3);
/// board.fill_piece(&Piece::square(1, 1));
///
/// assert!(board.cell(0, 0).unwrap().is_empty());
/// assert!(matches!(board.cell(2, 2), Some(RenderCell::Placed(_))));
/// assert_eq!(board.to_string(), "....\n.RR.\n.RR.\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBoard {
    width: usize,
    height: usize,
    cells: Vec<RenderCell>,
}

impl RenderBoard {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "render board must not be empty");
        Self {
            width,
            height,
            cells: vec![RenderCell::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<RenderCell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.cells.chunks(self.width)
    }

    /// Fills a single block's cell with `cell`.
    pub fn fill_block_as(&mut self, block: &Block, cell: RenderCell) {
        if let Some(i) = self.index(block.x(), block.y()) {
            self.cells[i] = cell;
        }
    }

    /// Fills the piece's cells as placed blocks of the piece's color.
    pub fn fill_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, RenderCell::Placed(piece.color()));
    }

    /// Fills the piece's cells with a specific cell type.
    ///
    /// Useful for rendering the falling piece or its ghost.
    pub fn fill_piece_as(&mut self, piece: &Piece, cell: RenderCell) {
        for block in piece.blocks() {
            self.fill_block_as(block, cell);
        }
    }

    fn row_string(row: &[RenderCell]) -> String {
        row.iter().map(|cell| cell.as_char()).collect()
    }
}

impl fmt::Display for RenderBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", Self::row_string(row))?;
        }
        Ok(())
    }
}

impl Serialize for RenderBoard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.height))?;
        for row in self.rows() {
            seq.serialize_element(&Self::row_string(row))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = RenderBoard::new(3, 2);
        assert_eq!(board.rows().count(), 2);
        assert!(board.rows().all(|row| row.len() == 3));
        assert!(board.rows().flatten().all(|cell| cell.is_empty()));
        assert_eq!(board.to_string(), "...\n...\n");
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut board = RenderBoard::new(3, 3);
        // Line at (1, 0) spans rows -1..=2
        board.fill_piece_as(&Piece::line(1, 0), RenderCell::Falling(Color::DarkBlue));
        assert_eq!(board.to_string(), ".b.\n.b.\n.b.\n");
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, 3), None);
    }

    #[test]
    fn test_cell_kinds() {
        let mut board = RenderBoard::new(3, 1);
        board.fill_block_as(&Block::new(0, 0, Color::Green), RenderCell::Ghost);
        board.fill_block_as(
            &Block::new(1, 0, Color::Green),
            RenderCell::Falling(Color::Green),
        );
        board.fill_block_as(
            &Block::new(2, 0, Color::Green),
            RenderCell::Placed(Color::Green),
        );
        assert_eq!(board.to_string(), "+gG\n");
    }

    #[test]
    fn test_serialization() {
        let mut board = RenderBoard::new(2, 2);
        board.fill_block_as(
            &Block::new(1, 1, Color::Yellow),
            RenderCell::Placed(Color::Yellow),
        );
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["..",".Y"]"#);
    }
}
