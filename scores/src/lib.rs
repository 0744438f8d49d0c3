//! Best-time storage for finished games.
//!
//! [`Leaderboard`] keeps, for every player, the fastest win on each difficulty. [`ScoreFile`]
//! saves and restores it as JSON, and [`FileScoringBridge`] ties both together behind the
//! engine's [`sapper_core::ScoringBridge`] trait.

pub use bridge::*;
pub use error::*;
pub use leaderboard::*;
pub use store::*;

mod bridge;
mod error;
mod leaderboard;
mod store;
