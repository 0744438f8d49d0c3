use serde::{Deserialize, Serialize};

use crate::Difficulty;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Final record of a finished game, handed to score storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub difficulty: Difficulty,
    pub elapsed_ticks: u32,
    pub outcome: GameOutcome,
}

/// What a lost game sends to the [`ScoringBridge`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossPolicy {
    #[default]
    SubmitNothing,
    SubmitZero,
}

impl LossPolicy {
    /// The time to submit for `result`, if any.
    pub const fn score_for(self, result: &GameResult) -> Option<u32> {
        match (result.outcome, self) {
            (GameOutcome::Won, _) => Some(result.elapsed_ticks),
            (GameOutcome::Lost, Self::SubmitZero) => Some(0),
            (GameOutcome::Lost, Self::SubmitNothing) => None,
        }
    }
}

/// Persistent best-time storage living outside the engine.
///
/// Submissions are fire-and-forget: implementations deal with their own failures.
pub trait ScoringBridge {
    fn submit_score(&mut self, difficulty: Difficulty, elapsed_ticks: u32, user: &str);

    fn best_time(&self, difficulty: Difficulty, user: &str) -> Option<u32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: GameOutcome) -> GameResult {
        GameResult {
            difficulty: Difficulty::Easy,
            elapsed_ticks: 42,
            outcome,
        }
    }

    #[test]
    fn wins_always_submit_time() {
        for policy in [LossPolicy::SubmitNothing, LossPolicy::SubmitZero] {
            assert_eq!(policy.score_for(&result(GameOutcome::Won)), Some(42));
        }
    }

    #[test]
    fn losses_follow_policy() {
        let lost = result(GameOutcome::Lost);
        assert_eq!(LossPolicy::SubmitNothing.score_for(&lost), None);
        assert_eq!(LossPolicy::SubmitZero.score_for(&lost), Some(0));
    }
}
