use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fallblock_engine::{Board, BoardConfig, PieceSeed};

use crate::util;

use self::{script::ScriptArg, simulate::SimulateArg};

mod script;
mod simulate;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a headless game with a random driver
    Simulate(#[clap(flatten)] SimulateArg),
    /// Apply a string of commands to a fresh board
    Script(#[clap(flatten)] ScriptArg),
}

/// Board options shared by every mode.
///
/// Values given on the command line override the configuration file, which
/// overrides the defaults.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Path to a board configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in cells
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=i64::from(Board::MAX_DIMENSION)))]
    width: Option<i32>,
    /// Board height in cells
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=i64::from(Board::MAX_DIMENSION)))]
    height: Option<i32>,
    /// Piece sequence seed (32 hex digits)
    #[arg(long)]
    seed: Option<PieceSeed>,
}

impl BoardArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_board_config_file(path)?,
            None => BoardConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }

    pub(crate) fn build_board(&self) -> anyhow::Result<Board> {
        let config = self.to_config()?;
        let board = Board::from_config(&config).context("Invalid board configuration")?;
        Ok(board)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Board drawing followed by statistics
    #[default]
    Text,
    /// JSON summary
    Json,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::Simulate(SimulateArg::default()))
    {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Script(arg) => script::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardArg::default().to_config().unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = BoardArg {
            width: Some(6),
            seed: Some(PieceSeed::from_bytes([1; 16])),
            ..BoardArg::default()
        };
        let config = arg.to_config().unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, BoardConfig::DEFAULT_HEIGHT);
        assert_eq!(config.seed, Some(PieceSeed::from_bytes([1; 16])));
    }

    #[test]
    fn test_oversized_board_is_rejected() {
        let arg = BoardArg {
            width: Some(100_000),
            height: Some(100_000),
            ..BoardArg::default()
        };
        let err = arg.build_board().unwrap_err();
        assert!(err.to_string().contains("Invalid board configuration"));
    }

    #[test]
    fn test_missing_config_file() {
        let arg = BoardArg {
            config: Some(PathBuf::from("/nonexistent/fallblock.json")),
            ..BoardArg::default()
        };
        let err = arg.to_config().unwrap_err();
        assert!(err.to_string().contains("board config"));
    }

    #[test]
    fn test_parse_command_line() {
        let args = CommandArgs::try_parse_from([
            "fallblock",
            "script",
            "--width",
            "8",
            "--seed",
            "0123456789abcdeffedcba9876543210",
            "llch",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Script(_))));

        let result = CommandArgs::try_parse_from(["fallblock", "simulate", "--width", "0"]);
        assert!(result.is_err());
        let result = CommandArgs::try_parse_from(["fallblock", "simulate", "--height", "100000"]);
        assert!(result.is_err());
        let result = CommandArgs::try_parse_from(["fallblock", "simulate", "--seed", "zz"]);
        assert!(result.is_err());
    }
}
