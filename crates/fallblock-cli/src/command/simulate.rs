use std::path::PathBuf;

use anyhow::Context as _;
use fallblock_engine::{Board, LockReport, TickError};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use super::{BoardArg, OutputFormat, summary::GameSummary};

const DEFAULT_MAX_PIECES: usize = 1000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Stop after this many pieces have locked
    #[arg(long, default_value_t = DEFAULT_MAX_PIECES)]
    max_pieces: usize,
    /// Seed for the driver's moves (random when omitted)
    #[arg(long)]
    driver_seed: Option<u64>,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            max_pieces: DEFAULT_MAX_PIECES,
            driver_seed: None,
            format: OutputFormat::default(),
            output: None,
        }
    }
}

/// Plays by rotating and shifting each piece a random amount, then hard dropping it.
#[derive(Debug, Clone)]
struct RandomDriver {
    rng: Pcg32,
}

impl RandomDriver {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn play_piece(&mut self, board: &mut Board) -> Result<LockReport, TickError> {
        for _ in 0..self.rng.random_range(0..4) {
            board.rotate_clockwise();
        }
        let reach = board.width() / 2;
        let shift = self.rng.random_range(-reach..=reach);
        for _ in 0..shift.unsigned_abs() {
            if shift < 0 {
                board.move_left();
            } else {
                board.move_right();
            }
        }
        board.hard_drop()
    }

    /// Plays until the game is over or `max_pieces` pieces have locked.
    ///
    /// Returns the number of pieces locked.
    fn play(&mut self, board: &mut Board, max_pieces: usize) -> Result<usize, TickError> {
        let mut pieces = 0;
        while pieces < max_pieces && !board.is_game_over() {
            self.play_piece(board)?;
            pieces += 1;
        }
        Ok(pieces)
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        max_pieces,
        driver_seed,
        format,
        output,
    } = arg;

    let mut board = board.build_board()?;
    let driver_seed = driver_seed.unwrap_or_else(|| rand::rng().random());

    eprintln!(
        "Simulating up to {max_pieces} pieces on a {}x{} board (piece seed {}, driver seed {driver_seed})...",
        board.width(),
        board.height(),
        board.seed(),
    );
    let pieces = RandomDriver::new(driver_seed)
        .play(&mut board, *max_pieces)
        .context("Simulation failed")?;
    eprintln!("Locked {pieces} pieces");

    GameSummary::new(&board).write(*format, output.as_deref())
}

#[cfg(test)]
mod tests {
    use fallblock_engine::PieceSeed;

    use super::*;

    fn board(width: i32, height: i32) -> Board {
        Board::with_seed(width, height, PieceSeed::from_bytes([9; 16])).unwrap()
    }

    #[test]
    fn test_play_is_reproducible() {
        let mut board1 = board(8, 16);
        let mut board2 = board(8, 16);
        let pieces1 = RandomDriver::new(5).play(&mut board1, 30).unwrap();
        let pieces2 = RandomDriver::new(5).play(&mut board2, 30).unwrap();

        assert_eq!(pieces1, pieces2);
        assert_eq!(board1.to_string(), board2.to_string());
        assert_eq!(board1.stats(), board2.stats());
    }

    #[test]
    fn test_play_respects_piece_limit() {
        let mut board = board(10, 40);
        let pieces = RandomDriver::new(1).play(&mut board, 5).unwrap();
        assert_eq!(pieces, 5);
        assert_eq!(board.stats().completed_pieces(), 5);
        assert!(!board.is_game_over());
    }

    #[test]
    fn test_play_stops_at_game_over() {
        let mut board = board(4, 6);
        let pieces = RandomDriver::new(2).play(&mut board, 10_000).unwrap();
        assert!(board.is_game_over());
        assert_eq!(pieces, board.stats().completed_pieces());
    }
}
