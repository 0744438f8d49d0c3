use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Owns every tile of one game and performs generation and reveals.
///
/// The mines are placed lazily: the first [`Board::reveal`] generates the minefield around the
/// revealed tile, so that tile and its neighbors are always safe.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    tiles: Array2<Tile>,
    unrevealed_count: CellCount,
    flagged_count: CellCount,
    generated: bool,
    seed: Option<u64>,
    cluster: ClusterPolicy,
    triggered_mine: Option<Coord2>,
}

fn entropy_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

impl Board {
    pub fn new(config: GameConfig, seed: Option<u64>, cluster: ClusterPolicy) -> Result<Self> {
        let config = config.validated()?;
        let tiles = Array2::from_shape_fn(config.dim().to_nd_index(), |(row, col)| {
            Tile::new((row as Coord, col as Coord))
        });
        Ok(Self {
            config,
            tiles,
            unrevealed_count: config.total_tiles(),
            flagged_count: 0,
            generated: false,
            seed,
            cluster,
            triggered_mine: None,
        })
    }

    /// Builds an already generated board from a known layout.
    pub fn from_minefield(minefield: &Minefield) -> Result<Self> {
        let mut board = Self::new(minefield.game_config()?, None, ClusterPolicy::default())?;
        board.apply_minefield(minefield);
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Dimensions as `(rows, cols)`.
    pub fn dim(&self) -> Coord2 {
        self.config.dim()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.unrevealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Every tile still hidden is a mine.
    pub fn is_cleared(&self) -> bool {
        self.generated && self.unrevealed_count == self.config.mines
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Places the mines keeping `safe` and its neighbors free.
    ///
    /// Can only succeed once per board, later calls return [`GameError::AlreadyGenerated`].
    pub fn generate(&mut self, safe: Coord2) -> Result<()> {
        if self.generated {
            return Err(GameError::AlreadyGenerated);
        }
        let safe = self.config.validate_coords(safe)?;
        let seed = self.seed.unwrap_or_else(entropy_seed);
        log::debug!("Generating board with seed {} around {:?}", seed, safe);

        let minefield =
            ClusteredMinefieldGenerator::new(seed, safe, self.cluster).generate(self.config)?;
        self.apply_minefield(&minefield);
        Ok(())
    }

    fn apply_minefield(&mut self, minefield: &Minefield) {
        debug_assert_eq!(minefield.dim(), self.dim());
        for tile in self.tiles.iter_mut() {
            let coords = tile.coords();
            if minefield.contains_mine(coords) {
                tile.arm();
            } else {
                tile.set_adjacent_mine_count(minefield.adjacent_mine_count(coords));
            }
        }
        self.generated = true;
    }

    /// Reveals a tile, generating the minefield first if this is the first reveal.
    ///
    /// A zero tile floods its whole zero region plus the numbered border. A mine reveals every
    /// mine on the board.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.generated {
            self.generate(coords)?;
        }

        let Some(was_flagged) = self.tiles[coords.to_nd_index()].reveal() else {
            return Ok(RevealOutcome::NoChange);
        };
        self.count_revealed(was_flagged);

        let tile = self.tiles[coords.to_nd_index()];
        if tile.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.detonate();
            return Ok(RevealOutcome::HitMine);
        }

        log::debug!(
            "Revealed tile at {:?}, mine count: {}",
            coords,
            tile.adjacent_mine_count()
        );
        if tile.adjacent_mine_count() == 0 {
            self.flood_fill(coords);
        }

        if self.is_cleared() {
            self.mark_hidden_mines_dirty();
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.closed_neighbors(start).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let tile = &mut self.tiles[visit_coords.to_nd_index()];
            // queued more than once, or flagged in the meantime
            if tile.is_flagged() || tile.reveal().is_none() {
                continue;
            }
            let visit_count = tile.adjacent_mine_count();
            self.count_revealed(false);
            log::trace!(
                "Flood opened tile at {:?}, mine count: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                to_visit.extend(self.closed_neighbors(visit_coords));
            }
        }
    }

    /// Neighbors that are neither revealed nor flagged.
    fn closed_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.tiles.iter_neighbors(coords).filter(|&pos| {
            let tile = &self.tiles[pos.to_nd_index()];
            !tile.is_revealed() && !tile.is_flagged()
        })
    }

    fn detonate(&mut self) {
        let mut flags_cleared: CellCount = 0;
        let mut revealed: CellCount = 0;
        for tile in self.tiles.iter_mut() {
            if tile.is_mine() {
                if let Some(was_flagged) = tile.reveal() {
                    revealed += 1;
                    flags_cleared += CellCount::from(was_flagged);
                }
            } else if tile.is_flagged() {
                // shown as a wrong flag from now on
                tile.mark_dirty();
            }
        }
        self.unrevealed_count -= revealed;
        self.flagged_count -= flags_cleared;
        log::debug!("Detonation revealed {} more mines", revealed);
    }

    fn mark_hidden_mines_dirty(&mut self) {
        for tile in self.tiles.iter_mut().filter(|tile| tile.is_mine()) {
            tile.mark_dirty();
        }
    }

    fn count_revealed(&mut self, was_flagged: bool) {
        self.unrevealed_count -= 1;
        if was_flagged {
            self.flagged_count -= 1;
        }
    }

    /// Flips the flag on a hidden tile. Revealed tiles are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        Ok(match self.tiles[coords.to_nd_index()].toggle_flag() {
            Some(true) => {
                self.flagged_count += 1;
                MarkOutcome::Changed
            }
            Some(false) => {
                self.flagged_count -= 1;
                MarkOutcome::Changed
            }
            None => MarkOutcome::NoChange,
        })
    }

    /// Player-visible state of a tile, given how the game ended if it did.
    pub fn view(&self, coords: Coord2, ending: Option<GameOutcome>) -> Option<TileView> {
        let tile = self.tile(coords)?;
        Some(match (tile.is_revealed(), tile.is_flagged(), tile.is_mine()) {
            (true, _, true) if self.triggered_mine == Some(coords) => TileView::Detonated,
            (true, _, true) => TileView::Mine,
            (true, _, false) => TileView::Open(tile.adjacent_mine_count()),
            (false, true, false) if ending == Some(GameOutcome::Lost) => TileView::WrongFlag,
            (false, true, _) => TileView::Flagged,
            (false, false, true) => match ending {
                Some(GameOutcome::Won) => TileView::Flagged,
                Some(GameOutcome::Lost) => TileView::Mine,
                None => TileView::Hidden,
            },
            (false, false, false) => TileView::Hidden,
        })
    }

    /// Coordinates of every tile changed since the last call, clearing their dirty bits.
    pub fn take_dirty(&mut self) -> Vec<Coord2> {
        self.tiles
            .iter_mut()
            .filter_map(|tile| tile.take_dirty().then(|| tile.coords()))
            .collect()
    }
}
