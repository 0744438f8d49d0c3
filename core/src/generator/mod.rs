use serde::{Deserialize, Serialize};

use crate::*;
pub use clustered::*;

mod clustered;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}

/// How much of the board around the first click is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartTile {
    /// Only the clicked tile.
    SimpleSafe,
    /// The clicked tile and all of its neighbors, so the first reveal opens a region.
    AlwaysZero,
}

/// What the generator does when no candidate satisfies the cluster limit anymore.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exhaustion {
    /// Place the remaining mines ignoring the limit.
    Relax,
    /// Give up with [`GameError::GenerationExhausted`].
    Fail,
}

/// Caps how densely mines may cluster.
///
/// A mine is only placed if every 3×3 window containing it ends up with at most
/// `max_neighbors + 1` mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterPolicy {
    pub max_neighbors: u8,
    pub on_exhausted: Exhaustion,
}

impl ClusterPolicy {
    pub const fn window_cap(&self) -> usize {
        self.max_neighbors as usize + 1
    }
}

impl Default for ClusterPolicy {
    fn default() -> Self {
        Self {
            max_neighbors: 3,
            on_exhausted: Exhaustion::Relax,
        }
    }
}
