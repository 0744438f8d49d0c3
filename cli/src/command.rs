//! Parsing of the commands typed during a game.

use std::str::FromStr;

use anyhow::{Context, bail};
use sapper_core::{Coord2, Difficulty};

pub const HELP: &str = "\
commands:
  r ROW COL      reveal a tile
  f ROW COL      toggle a flag
  n [SEED]       new game
  d LEVEL        easy, medium, hard, or WIDTH HEIGHT MINES
  b              best times
  h              this help
  q              quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Option<u64>),
    SetDifficulty(Difficulty),
    Best,
    Help,
    Quit,
}

fn parse_coords(args: &[&str]) -> anyhow::Result<Coord2> {
    let [row, col] = args else {
        bail!("expected ROW COL");
    };
    let row = row.parse().with_context(|| format!("bad row {row:?}"))?;
    let col = col.parse().with_context(|| format!("bad column {col:?}"))?;
    Ok((row, col))
}

fn parse_difficulty(args: &[&str]) -> anyhow::Result<Difficulty> {
    match args {
        [name] => Difficulty::from_name(name).with_context(|| format!("unknown level {name:?}")),
        [width, height, mines] => {
            let width = width.parse().context("bad width")?;
            let height = height.parse().context("bad height")?;
            let mines = mines.parse().context("bad mine count")?;
            Ok(Difficulty::custom(width, height, mines)?)
        }
        _ => bail!("expected a level or WIDTH HEIGHT MINES"),
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            bail!("empty command");
        };

        Ok(match (name.to_ascii_lowercase().as_str(), args) {
            ("r" | "reveal", args) => Command::Reveal(parse_coords(args)?),
            ("f" | "flag", args) => Command::Flag(parse_coords(args)?),
            ("n" | "new", []) => Command::NewGame(None),
            ("n" | "new", [seed]) => {
                Command::NewGame(Some(seed.parse().with_context(|| format!("bad seed {seed:?}"))?))
            }
            ("d" | "difficulty", args) => Command::SetDifficulty(parse_difficulty(args)?),
            ("b" | "best", []) => Command::Best,
            ("h" | "help" | "?", []) => Command::Help,
            ("q" | "quit", []) => Command::Quit,
            _ => bail!("unknown command {line:?}, try h"),
        })
    }
}
