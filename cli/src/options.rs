//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapper_core::{Difficulty, LossPolicy, SessionOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Play minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Options {
    /// Difficulty preset
    #[arg(value_enum, short, long, default_value_t = Level::Easy)]
    pub difficulty: Level,

    /// Custom board width, overrides the preset
    #[arg(long, requires_all = ["height", "mines"])]
    pub width: Option<u8>,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"])]
    pub height: Option<u8>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    pub mines: Option<u16>,

    /// Seed for a reproducible board
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Name the scores are saved under
    #[arg(short, long, default_value = "player")]
    pub user: String,

    /// Score file
    #[arg(long, default_value = "scores.json")]
    pub scores: PathBuf,

    /// Record lost games with a time of zero
    #[arg(long, default_value_t = false)]
    pub submit_losses: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Options {
    pub fn difficulty(&self) -> sapper_core::Result<Difficulty> {
        match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => Difficulty::custom(width, height, mines),
            _ => Ok(self.difficulty.into()),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            seed: self.seed,
            loss_policy: if self.submit_losses {
                LossPolicy::SubmitZero
            } else {
                LossPolicy::SubmitNothing
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn options_are_consistent() {
        Options::command().debug_assert();
    }

    #[test]
    fn defaults_to_easy() {
        let options = Options::try_parse_from(["sapper"]).unwrap();

        assert_eq!(options.difficulty().unwrap(), Difficulty::Easy);
        assert_eq!(options.session_options(), SessionOptions::default());
    }

    #[test]
    fn custom_board_needs_all_three_values() {
        assert!(Options::try_parse_from(["sapper", "--width", "9"]).is_err());

        let options = Options::try_parse_from([
            "sapper", "--width", "9", "--height", "9", "--mines", "10", "--seed", "4",
        ])
        .unwrap();
        assert_eq!(options.difficulty(), Difficulty::custom(9, 9, 10));
        assert_eq!(options.session_options().seed, Some(4));
    }

    #[test]
    fn overfull_custom_board_is_rejected() {
        let options = Options::try_parse_from([
            "sapper", "--width", "3", "--height", "3", "--mines", "9",
        ])
        .unwrap();
        assert!(options.difficulty().is_err());
    }

    #[test]
    fn loss_policy_flag() {
        let options = Options::try_parse_from(["sapper", "-d", "hard", "--submit-losses"]).unwrap();

        assert_eq!(options.difficulty().unwrap(), Difficulty::Hard);
        assert_eq!(options.session_options().loss_policy, LossPolicy::SubmitZero);
    }
}
