use std::path::PathBuf;

use anyhow::Context as _;
use fallblock_engine::{Board, TickError};

use super::{BoardArg, OutputFormat, summary::GameSummary};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScriptArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Commands to apply: l (left), r (right), c (rotate clockwise),
    /// d (soft drop), t (tick), h (hard drop); whitespace is ignored
    commands: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptCommand {
    Left,
    Right,
    Rotate,
    SoftDrop,
    Tick,
    HardDrop,
}

impl ScriptCommand {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(ScriptCommand::Left),
            'r' => Some(ScriptCommand::Right),
            'c' => Some(ScriptCommand::Rotate),
            'd' => Some(ScriptCommand::SoftDrop),
            't' => Some(ScriptCommand::Tick),
            'h' => Some(ScriptCommand::HardDrop),
            _ => None,
        }
    }

    fn apply(self, board: &mut Board) -> Result<(), TickError> {
        match self {
            ScriptCommand::Left => _ = board.move_left(),
            ScriptCommand::Right => _ = board.move_right(),
            ScriptCommand::Rotate => _ = board.rotate_clockwise(),
            ScriptCommand::SoftDrop => _ = board.soft_drop(),
            ScriptCommand::Tick => _ = board.push_current_piece_down()?,
            ScriptCommand::HardDrop => _ = board.hard_drop()?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command '{character}' at index {index} (expected one of l, r, c, d, t, h)")]
struct ParseScriptError {
    character: char,
    index: usize,
}

fn parse_script(script: &str) -> Result<Vec<ScriptCommand>, ParseScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(index, character)| {
            ScriptCommand::from_char(character).ok_or(ParseScriptError { character, index })
        })
        .collect()
}

/// Applies `commands` in order, stopping early if the game ends.
///
/// Returns the number of commands applied.
fn run_script(board: &mut Board, commands: &[ScriptCommand]) -> Result<usize, TickError> {
    for (i, command) in commands.iter().enumerate() {
        if board.is_game_over() {
            return Ok(i);
        }
        command.apply(board)?;
    }
    Ok(commands.len())
}

pub(crate) fn run(arg: &ScriptArg) -> anyhow::Result<()> {
    let ScriptArg {
        board,
        format,
        output,
        commands,
    } = arg;

    let commands = parse_script(commands).context("Failed to parse command script")?;
    let mut board = board.build_board()?;

    let applied = run_script(&mut board, &commands).context("Failed to run command script")?;
    if applied < commands.len() {
        eprintln!(
            "Game over after {applied} commands; skipped the remaining {}",
            commands.len() - applied
        );
    }

    GameSummary::new(&board).write(*format, output.as_deref())
}

#[cfg(test)]
mod tests {
    use fallblock_engine::{Piece, PieceSeed};

    use super::*;

    fn board() -> Board {
        Board::with_seed(10, 20, PieceSeed::from_bytes([4; 16])).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let commands = parse_script("lr c\ndth").unwrap();
        assert_eq!(
            commands,
            [
                ScriptCommand::Left,
                ScriptCommand::Right,
                ScriptCommand::Rotate,
                ScriptCommand::SoftDrop,
                ScriptCommand::Tick,
                ScriptCommand::HardDrop,
            ]
        );
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_script_error() {
        let err = parse_script("ll x").unwrap_err();
        assert_eq!(
            err,
            ParseScriptError {
                character: 'x',
                index: 3
            }
        );
        assert!(err.to_string().contains("'x' at index 3"));
    }

    #[test]
    fn test_moves_and_hard_drop() {
        let mut board = board();
        board.set_current_piece(Piece::square(4, 5)).unwrap();

        let commands = parse_script("llllllh").unwrap();
        assert_eq!(run_script(&mut board, &commands).unwrap(), 7);

        // Four moves reach the wall, the rest are ignored
        assert!(board.block_at(0, 19).is_some());
        assert!(board.block_at(1, 18).is_some());
        assert_eq!(board.placed_blocks().count(), 4);
    }

    #[test]
    fn test_ticks_and_soft_drops() {
        let mut board = board();
        let start = board.current_piece();

        let commands = parse_script("ttdd").unwrap();
        run_script(&mut board, &commands).unwrap();
        assert_eq!(board.current_piece(), start.down().down().down().down());
    }

    #[test]
    fn test_stops_at_game_over() {
        let mut board = Board::with_seed(4, 4, PieceSeed::from_bytes([4; 16])).unwrap();
        let commands = parse_script(&"h".repeat(100)).unwrap();
        let applied = run_script(&mut board, &commands).unwrap();
        assert!(board.is_game_over());
        assert!(applied < commands.len());
    }
}
