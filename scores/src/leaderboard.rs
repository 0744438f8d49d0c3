use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sapper_core::Difficulty;
use serde::{Deserialize, Serialize};

/// Fastest win of a player on one difficulty.
///
/// A stored time of zero stands for "no score" and is never reported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTime {
    /// Elapsed seconds of the winning game.
    pub ticks: u32,

    /// When that game was won.
    pub achieved_at: DateTime<Utc>,
}

/// Everything stored about one player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub created_at: DateTime<Utc>,

    /// Best times indexed by [`Difficulty::key`].
    best: BTreeMap<String, BestTime>,
}

impl PlayerRecord {
    fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            best: BTreeMap::new(),
        }
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<BestTime> {
        self.best
            .get(&difficulty.key())
            .copied()
            .filter(|best| best.ticks != 0)
    }
}

/// Best times of every player, per difficulty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    players: BTreeMap<String, PlayerRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `user` if unknown, returning their record.
    pub fn add_player(&mut self, user: &str) -> &mut PlayerRecord {
        self.players.entry(user.to_owned()).or_insert_with(|| {
            log::debug!("New player {user:?}");
            PlayerRecord::new(Utc::now())
        })
    }

    pub fn player(&self, user: &str) -> Option<&PlayerRecord> {
        self.players.get(user)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    /// Records a win, returning whether it beat the player's previous best.
    ///
    /// A zero (a lost game) only registers the player.
    pub fn submit(&mut self, difficulty: Difficulty, ticks: u32, user: &str) -> bool {
        self.submit_at(difficulty, ticks, user, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        difficulty: Difficulty,
        ticks: u32,
        user: &str,
        when: DateTime<Utc>,
    ) -> bool {
        let record = self.add_player(user);
        if ticks == 0 {
            return false;
        }
        if record.best_time(difficulty).is_some_and(|best| best.ticks <= ticks) {
            return false;
        }
        let key = difficulty.key();
        log::debug!("New best time for {user:?} on {key}: {ticks}");
        record.best.insert(
            key,
            BestTime {
                ticks,
                achieved_at: when,
            },
        );
        true
    }

    pub fn best_time(&self, difficulty: Difficulty, user: &str) -> Option<BestTime> {
        self.player(user)?.best_time(difficulty)
    }

    /// The `count` fastest players on `difficulty`, fastest first.
    ///
    /// Equal times are ordered by who got there first.
    pub fn top(&self, difficulty: Difficulty, count: usize) -> Vec<(&str, BestTime)> {
        let mut entries: Vec<(&str, BestTime)> = self
            .players
            .iter()
            .filter_map(|(user, record)| Some((user.as_str(), record.best_time(difficulty)?)))
            .collect();
        entries.sort_by_key(|(_, best)| (best.ticks, best.achieved_at));
        entries.truncate(count);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn only_faster_times_replace_best() {
        let mut board = Leaderboard::new();

        assert!(board.submit_at(Difficulty::Easy, 120, "ana", at(10)));
        assert!(!board.submit_at(Difficulty::Easy, 130, "ana", at(20)));
        assert!(!board.submit_at(Difficulty::Easy, 120, "ana", at(30)));
        assert!(board.submit_at(Difficulty::Easy, 95, "ana", at(40)));

        assert_eq!(
            board.best_time(Difficulty::Easy, "ana"),
            Some(BestTime {
                ticks: 95,
                achieved_at: at(40)
            })
        );
        assert_eq!(board.best_time(Difficulty::Medium, "ana"), None);
        assert_eq!(board.best_time(Difficulty::Easy, "bo"), None);
    }

    #[test]
    fn zero_is_no_score() {
        let mut board = Leaderboard::new();

        assert!(!board.submit_at(Difficulty::Easy, 0, "ana", at(1)));
        assert!(board.player("ana").is_some());
        assert_eq!(board.best_time(Difficulty::Easy, "ana"), None);

        assert!(board.submit_at(Difficulty::Easy, 5, "ana", at(2)));
        assert!(!board.submit_at(Difficulty::Easy, 0, "ana", at(3)));
        assert_eq!(board.best_time(Difficulty::Easy, "ana").map(|b| b.ticks), Some(5));
        assert_eq!(
            board.top(Difficulty::Easy, 3),
            [("ana", BestTime { ticks: 5, achieved_at: at(2) })]
        );
    }

    #[test]
    fn stored_zero_is_replaced_and_hidden() {
        let json = r#"{"players":{"ana":{"created_at":"2024-01-01T00:00:00Z","best":{"easy":{"ticks":0,"achieved_at":"2024-01-01T00:00:00Z"}}}}}"#;
        let mut board: Leaderboard = serde_json::from_str(json).unwrap();

        assert_eq!(board.best_time(Difficulty::Easy, "ana"), None);
        assert!(board.top(Difficulty::Easy, 3).is_empty());
        assert!(board.submit_at(Difficulty::Easy, 42, "ana", at(5)));
        assert_eq!(board.best_time(Difficulty::Easy, "ana").map(|b| b.ticks), Some(42));
    }

    #[test]
    fn top_sorts_across_players() {
        let mut board = Leaderboard::new();
        board.submit_at(Difficulty::Hard, 300, "ana", at(1));
        board.submit_at(Difficulty::Hard, 250, "bo", at(2));
        board.submit_at(Difficulty::Hard, 300, "cy", at(0));
        board.submit_at(Difficulty::Easy, 10, "dee", at(3));

        let top: Vec<_> = board
            .top(Difficulty::Hard, 2)
            .into_iter()
            .map(|(user, best)| (user, best.ticks))
            .collect();

        assert_eq!(top, [("bo", 250), ("cy", 300)]);
        assert_eq!(board.top(Difficulty::Hard, 10).len(), 3);
    }

    #[test]
    fn adding_a_player_twice_keeps_the_record() {
        let mut board = Leaderboard::new();
        board.submit_at(Difficulty::Medium, 80, "ana", at(5));
        board.add_player("ana");

        assert_eq!(board.players().collect::<Vec<_>>(), ["ana"]);
        assert_eq!(board.best_time(Difficulty::Medium, "ana").map(|b| b.ticks), Some(80));
    }

    #[test]
    fn custom_difficulties_are_kept_apart() {
        let mut board = Leaderboard::new();
        let small = Difficulty::custom(5, 5, 3).unwrap();
        let large = Difficulty::custom(30, 30, 150).unwrap();
        board.submit_at(small, 4, "ana", at(1));

        assert_eq!(board.best_time(small, "ana").map(|b| b.ticks), Some(4));
        assert_eq!(board.best_time(large, "ana"), None);
    }
}
