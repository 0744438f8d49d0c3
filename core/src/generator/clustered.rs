use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Random placement that keeps the first click safe and limits mine clusters.
///
/// Candidates are drawn uniformly from a pool of unprotected tiles. A candidate that would
/// overfill some 3×3 window is dropped from the pool for good: windows only gain mines, so it
/// can never become valid again. That bounds the loop by the pool size.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteredMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
    cluster: ClusterPolicy,
}

impl ClusteredMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, cluster: ClusterPolicy) -> Self {
        Self {
            seed,
            start,
            start_tile: StartTile::AlwaysZero,
            cluster,
        }
    }

    pub fn with_start_tile(mut self, start_tile: StartTile) -> Self {
        self.start_tile = start_tile;
        self
    }
}

/// Whether adding a mine at `candidate` keeps every window around it within `cap`.
fn fits_cluster_limit(mines: &Array2<bool>, candidate: Coord2, cap: usize) -> bool {
    core::iter::once(candidate)
        .chain(mines.iter_neighbors(candidate))
        .all(|center| {
            let existing = core::iter::once(center)
                .chain(mines.iter_neighbors(center))
                .filter(|pos| mines[pos.to_nd_index()])
                .count();
            existing < cap
        })
}

impl MinefieldGenerator for ClusteredMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        use rand::prelude::*;
        use StartTile::*;

        let config = config.validated()?;
        let start = config.validate_coords(self.start)?;
        let total_tiles = config.total_tiles();

        let mut protected: Array2<bool> = Array2::default(config.dim().to_nd_index());
        let zone_size = 1 + protected.iter_neighbors(start).count() as CellCount;
        let actual_start_tile = match self.start_tile {
            AlwaysZero if config.mines + zone_size > total_tiles => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            start_tile => start_tile,
        };
        protected[start.to_nd_index()] = true;
        if actual_start_tile == AlwaysZero {
            for coords in protected.iter_neighbors(start) {
                protected[coords.to_nd_index()] = true;
            }
        }

        let mut mines: Array2<bool> = Array2::default(config.dim().to_nd_index());
        let unprotected = |mines: &Array2<bool>| -> Vec<Coord2> {
            protected
                .indexed_iter()
                .filter(|&(index, &is_protected)| !is_protected && !mines[index])
                .map(|((row, col), _)| (row as Coord, col as Coord))
                .collect()
        };
        let mut pool = unprotected(&mines);
        let mut relaxed = false;
        let mut placed: CellCount = 0;
        let mut rejected = 0usize;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < config.mines {
            if pool.is_empty() {
                if relaxed || self.cluster.on_exhausted == Exhaustion::Fail {
                    log::debug!(
                        "Cluster limit left no room, placed {} of {} mines",
                        placed,
                        config.mines
                    );
                    return Err(GameError::GenerationExhausted {
                        placed,
                        requested: config.mines,
                    });
                }
                log::warn!(
                    "Cluster limit left no room after {} of {} mines, relaxing it",
                    placed,
                    config.mines
                );
                relaxed = true;
                pool = unprotected(&mines);
                continue;
            }

            let candidate = pool.swap_remove(rng.random_range(0..pool.len()));
            if !relaxed && !fits_cluster_limit(&mines, candidate, self.cluster.window_cap()) {
                rejected += 1;
                continue;
            }
            mines[candidate.to_nd_index()] = true;
            placed += 1;
        }

        log::debug!(
            "Generated {}x{} minefield with {} mines around {:?}, {} candidates rejected",
            config.width,
            config.height,
            placed,
            start,
            rejected
        );
        Ok(Minefield::from_mine_mask(mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_counts(field: &Minefield) -> impl Iterator<Item = usize> + '_ {
        let (rows, cols) = field.dim();
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| {
                let center = (row, col);
                usize::from(field[center]) + usize::from(field.adjacent_mine_count(center))
            })
        })
    }

    #[test]
    fn places_exact_mine_count_outside_start_zone() {
        let config = GameConfig::new(10, 8, 10).unwrap();
        let field = ClusteredMinefieldGenerator::new(17, (0, 0), ClusterPolicy::default())
            .generate(config)
            .unwrap();

        assert_eq!(field.mine_count(), 10);
        assert!(!field.contains_mine((0, 0)));
        assert!(!field.contains_mine((0, 1)));
        assert!(!field.contains_mine((1, 0)));
        assert!(!field.contains_mine((1, 1)));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(24, 20, 99).unwrap();
        let generate = || {
            ClusteredMinefieldGenerator::new(42, (10, 12), ClusterPolicy::default())
                .generate(config)
                .unwrap()
        };

        assert_eq!(generate(), generate());
    }

    #[test]
    fn windows_stay_under_cluster_cap() {
        for seed in 0..20 {
            let config = GameConfig::new(24, 20, 99).unwrap();
            let field = ClusteredMinefieldGenerator::new(seed, (5, 5), ClusterPolicy::default())
                .generate(config)
                .unwrap();

            assert!(window_counts(&field).all(|count| count <= 4), "seed {seed}");
        }
    }

    #[test]
    fn crowded_board_falls_back_to_simple_safe() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        let cluster = ClusterPolicy {
            max_neighbors: 8,
            on_exhausted: Exhaustion::Fail,
        };
        let field = ClusteredMinefieldGenerator::new(1, (1, 1), cluster)
            .generate(config)
            .unwrap();

        assert_eq!(field.mine_count(), 8);
        assert!(!field.contains_mine((1, 1)));
    }

    #[test]
    fn simple_safe_protects_only_the_click() {
        let config = GameConfig::new(4, 1, 3).unwrap();
        let cluster = ClusterPolicy {
            max_neighbors: 8,
            on_exhausted: Exhaustion::Fail,
        };
        let field = ClusteredMinefieldGenerator::new(9, (0, 0), cluster)
            .with_start_tile(StartTile::SimpleSafe)
            .generate(config)
            .unwrap();

        assert_eq!(field.iter_mines().collect::<Vec<_>>(), [(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn strict_policy_reports_exhaustion() {
        // 2x5 board with a safe zone at the left edge: only a handful of tiles can hold mines
        // before every window is full.
        let config = GameConfig::new(5, 2, 5).unwrap();
        let cluster = ClusterPolicy {
            max_neighbors: 0,
            on_exhausted: Exhaustion::Fail,
        };
        let result = ClusteredMinefieldGenerator::new(3, (0, 0), cluster).generate(config);

        assert!(matches!(
            result,
            Err(GameError::GenerationExhausted { requested: 5, .. })
        ));
    }

    #[test]
    fn relaxed_policy_still_places_everything() {
        let config = GameConfig::new(5, 2, 5).unwrap();
        let cluster = ClusterPolicy {
            max_neighbors: 0,
            on_exhausted: Exhaustion::Relax,
        };
        let field = ClusteredMinefieldGenerator::new(3, (0, 0), cluster)
            .generate(config)
            .unwrap();

        assert_eq!(field.mine_count(), 5);
        assert!(!field.contains_mine((0, 0)));
    }

    #[test]
    fn start_outside_board_is_rejected() {
        let config = GameConfig::new(4, 4, 2).unwrap();
        let result =
            ClusteredMinefieldGenerator::new(0, (4, 0), ClusterPolicy::default()).generate(config);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }
}
