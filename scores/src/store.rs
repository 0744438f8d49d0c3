//! Save and restore the [`Leaderboard`] as JSON.

use log::debug;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{Leaderboard, Result};

/// Location of the saved leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!("Score file: {path:?}");
        Self { path }
    }

    /// Score file named `scores.json` inside `data_dir`.
    pub fn in_dir(mut data_dir: PathBuf) -> Self {
        data_dir.push("scores.json");
        Self::new(data_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the leaderboard, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Leaderboard> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("No score file yet, starting empty");
                return Ok(Leaderboard::new());
            }
            Err(error) => return Err(error.into()),
        };
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, leaderboard: &Leaderboard) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, leaderboard)?;
        writer.flush()?;
        Ok(())
    }

    /// Deletes the score file, ignoring a missing one.
    pub fn delete(&self) {
        let _ = remove_file(&self.path);
    }
}
