use serde::{Deserialize, Serialize};

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 10 points
/// - 2 lines: 25 points
/// - 3 lines: 40 points
/// - 4 lines: 55 points
///
/// Clearing more than 4 lines at once scores nothing.
const SCORE_TABLE: [usize; 5] = [0, 10, 25, 40, 55];

/// Returns the score awarded for clearing `cleared_lines` rows with one lock.
///
/// # Examples
///
/// ```
/// use fallblock_engine::score_for_lines;
///
/// assert_eq!(score_for_lines(0), 0);
/// assert_eq!(score_for_lines(2), 25);
/// assert_eq!(score_for_lines(4), 55);
/// assert_eq!(score_for_lines(5), 0);
/// ```
#[must_use]
pub const fn score_for_lines(cleared_lines: usize) -> usize {
    if cleared_lines < SCORE_TABLE.len() {
        SCORE_TABLE[cleared_lines]
    } else {
        0
    }
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: Points earned from line clears, never decreases
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks clearing 0, 1, 2, 3 and 4 lines
///
/// # Example
///
/// ```
/// use fallblock_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 55);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines they cleared.
    ///
    /// Locks clearing more than 4 lines are only counted in the totals.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and returns the score gained.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        let delta = score_for_lines(cleared_lines);
        self.score += delta;
        delta
    }
}
