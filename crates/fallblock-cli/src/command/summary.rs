use std::{
    fmt, fs,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context as _;
use fallblock_engine::{Board, GameStats, PieceSeed, RenderBoard};
use serde::Serialize;

use super::OutputFormat;

/// Final state of a game, as printed by every mode.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GameSummary {
    seed: PieceSeed,
    width: i32,
    height: i32,
    game_over: bool,
    score: usize,
    stats: GameStats,
    board: RenderBoard,
}

impl GameSummary {
    pub(crate) fn new(board: &Board) -> Self {
        Self {
            seed: board.seed(),
            width: board.width(),
            height: board.height(),
            game_over: board.is_game_over(),
            score: board.score(),
            stats: board.stats().clone(),
            board: board.render_board(),
        }
    }

    /// Formats the summary as a newline-terminated document.
    pub(crate) fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)
                    .context("Failed to serialize game summary")?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Writes the summary to `path`, or to stdout when no path is given.
    pub(crate) fn write(&self, format: OutputFormat, path: Option<&Path>) -> anyhow::Result<()> {
        let document = self.render(format)?;
        match path {
            Some(path) => fs::write(path, document)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?,
            None => io::stdout()
                .lock()
                .write_all(document.as_bytes())
                .context("Failed to write summary to stdout")?,
        }
        Ok(())
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{}", "-".repeat(self.board.width()))?;
        writeln!(f, "Seed:          {}", self.seed)?;
        writeln!(f, "Board:         {}x{}", self.width, self.height)?;
        writeln!(f, "Score:         {}", self.score)?;
        writeln!(f, "Pieces locked: {}", self.stats.completed_pieces())?;
        writeln!(f, "Lines cleared: {}", self.stats.total_cleared_lines())?;
        let counter = self.stats.line_cleared_counter();
        writeln!(
            f,
            "Clears:        single {} / double {} / triple {} / quad {}",
            counter[1], counter[2], counter[3], counter[4]
        )?;
        writeln!(
            f,
            "State:         {}",
            if self.game_over { "game over" } else { "playing" }
        )
    }
}
