use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Color of a block.
///
/// Each piece shape is bound to one color. Mapping a color to an actual display
/// value is left to the renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[display("red")]
    Red,
    #[display("orange")]
    Orange,
    #[display("light blue")]
    LightBlue,
    #[display("dark blue")]
    DarkBlue,
    #[display("green")]
    Green,
    #[display("yellow")]
    Yellow,
}

impl Color {
    /// Returns the single character used by text renderers.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_engine::Color;
    ///
    /// assert_eq!(Color::Red.as_char(), 'R');
    /// assert_eq!(Color::LightBlue.as_char(), 'C');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::LightBlue => 'C',
            Color::DarkBlue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
        }
    }
}

/// A single colored cell at an integer grid position.
///
/// Blocks are immutable values: the movement operations return new blocks.
///
/// Equality and hashing only look at the position. The color is payload, so two
/// blocks at the same cell compare equal regardless of their colors.
///
/// # Coordinate System
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
/// - Coordinates may be negative or out of range; validity is decided by the board
///
/// # Example
///
/// ```
/// use fallblock_engine::{Block, Color};
///
/// let block = Block::new(3, 4, Color::Green);
/// assert_eq!(block.down().position(), (3, 5));
/// assert_eq!(block.left().position(), (2, 4));
/// assert_eq!(block.right().color(), Color::Green);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Block {
    x: i32,
    y: i32,
    color: Color,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position().hash(state);
    }
}

impl Block {
    #[must_use]
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, color }
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        Self::new(self.x, self.y + 1, self.color)
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        Self::new(self.x - 1, self.y, self.color)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        Self::new(self.x + 1, self.y, self.color)
    }

    /// Rotates this block 90° clockwise around `center`.
    ///
    /// An offset `(dx, dy)` from the center becomes `(-dy, dx)`. Only the
    /// position of `center` is used.
    #[must_use]
    pub const fn rotated_clockwise_around(&self, center: Block) -> Self {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self::new(center.x - dy, center.y + dx, self.color)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_movement() {
        let block = Block::new(1, 1, Color::Red);
        assert_eq!(block.down().position(), (1, 2));
        assert_eq!(block.left().position(), (0, 1));
        assert_eq!(block.right().position(), (2, 1));

        // The original is untouched
        assert_eq!(block.position(), (1, 1));
        assert_eq!(block.down().color(), Color::Red);
    }

    #[test]
    fn test_equality_ignores_color() {
        let a = Block::new(2, 3, Color::Red);
        let b = Block::new(2, 3, Color::Yellow);
        let c = Block::new(3, 2, Color::Red);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Block> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_rotation_around_center() {
        let center = Block::new(5, 5, Color::Green);
        let block = Block::new(6, 5, Color::Green);

        // Right of center -> below center -> left -> above -> back
        let r1 = block.rotated_clockwise_around(center);
        assert_eq!(r1.position(), (5, 6));
        let r2 = r1.rotated_clockwise_around(center);
        assert_eq!(r2.position(), (4, 5));
        let r3 = r2.rotated_clockwise_around(center);
        assert_eq!(r3.position(), (5, 4));
        let r4 = r3.rotated_clockwise_around(center);
        assert_eq!(r4.position(), (6, 5));

        assert_eq!(center.rotated_clockwise_around(center), center);
    }

    #[test]
    fn test_color_serialization() {
        let json = serde_json::to_string(&Color::LightBlue).unwrap();
        assert_eq!(json, "\"light_blue\"");
        let color: Color = serde_json::from_str("\"dark_blue\"").unwrap();
        assert_eq!(color, Color::DarkBlue);
    }
}
