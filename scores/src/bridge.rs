use sapper_core::{Difficulty, ScoringBridge};

use crate::{Leaderboard, Result, ScoreFile};

/// [`ScoringBridge`] that persists every new best time to a [`ScoreFile`].
///
/// Write failures are logged and otherwise ignored, the in-memory leaderboard stays current.
#[derive(Debug)]
pub struct FileScoringBridge {
    file: ScoreFile,
    leaderboard: Leaderboard,
}

impl FileScoringBridge {
    pub fn open(file: ScoreFile) -> Result<Self> {
        let leaderboard = file.load()?;
        Ok(Self { file, leaderboard })
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn file(&self) -> &ScoreFile {
        &self.file
    }
}

impl ScoringBridge for FileScoringBridge {
    fn submit_score(&mut self, difficulty: Difficulty, elapsed_ticks: u32, user: &str) {
        if !self.leaderboard.submit(difficulty, elapsed_ticks, user) {
            return;
        }
        if let Err(error) = self.file.save(&self.leaderboard) {
            log::error!("Cannot save scores to {:?}: {error}", self.file.path());
        }
    }

    fn best_time(&self, difficulty: Difficulty, user: &str) -> Option<u32> {
        self.leaderboard
            .best_time(difficulty, user)
            .map(|best| best.ticks)
    }
}
