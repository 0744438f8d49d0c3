use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Coord2;

bitflags! {
    /// Per-tile state bits.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TileFlags: u8 {
        const MINE = 1 << 0;
        const REVEALED = 1 << 1;
        const FLAGGED = 1 << 2;
        /// Changed since the renderer last drained the board.
        const DIRTY = 1 << 3;
    }
}

/// One cell of the minefield.
///
/// `REVEALED` only ever goes from unset to set, and `FLAGGED` is cleared the moment a tile is
/// revealed, so the two are never set together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    row: u8,
    col: u8,
    flags: TileFlags,
    adjacent_mines: u8,
}

impl Tile {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            flags: TileFlags::DIRTY,
            adjacent_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.flags.contains(TileFlags::MINE)
    }

    pub const fn is_revealed(&self) -> bool {
        self.flags.contains(TileFlags::REVEALED)
    }

    pub const fn is_flagged(&self) -> bool {
        self.flags.contains(TileFlags::FLAGGED)
    }

    pub const fn is_dirty(&self) -> bool {
        self.flags.contains(TileFlags::DIRTY)
    }

    /// Number of mines among the neighbors, always 0 for a mine.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn arm(&mut self) {
        self.flags.insert(TileFlags::MINE);
        self.adjacent_mines = 0;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        debug_assert!(count <= 8);
        if !self.is_mine() {
            self.adjacent_mines = count;
        }
    }

    /// Marks the tile revealed, returning `Some(was_flagged)` the first time and `None` after.
    pub(crate) fn reveal(&mut self) -> Option<bool> {
        if self.is_revealed() {
            return None;
        }
        let was_flagged = self.is_flagged();
        self.flags.remove(TileFlags::FLAGGED);
        self.flags.insert(TileFlags::REVEALED | TileFlags::DIRTY);
        Some(was_flagged)
    }

    /// Flips the flag on a hidden tile, returning the new flag state or `None` if revealed.
    pub(crate) fn toggle_flag(&mut self) -> Option<bool> {
        if self.is_revealed() {
            return None;
        }
        self.flags.toggle(TileFlags::FLAGGED);
        self.flags.insert(TileFlags::DIRTY);
        Some(self.is_flagged())
    }

    pub(crate) fn take_dirty(&mut self) -> bool {
        let dirty = self.is_dirty();
        self.flags.remove(TileFlags::DIRTY);
        dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.flags.insert(TileFlags::DIRTY);
    }
}

/// What a renderer is allowed to know about a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    #[default]
    Hidden,
    Flagged,
    Open(u8),
    /// A mine exposed by detonation or shown once the game is over.
    Mine,
    /// The mine whose reveal lost the game.
    Detonated,
    /// A flag left on a safe tile after a loss.
    WrongFlag,
}

impl TileView {
    // whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::WrongFlag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_clears_flag_once() {
        let mut tile = Tile::new((2, 3));
        assert_eq!(tile.toggle_flag(), Some(true));

        assert_eq!(tile.reveal(), Some(true));
        assert!(tile.is_revealed());
        assert!(!tile.is_flagged());

        assert_eq!(tile.reveal(), None);
    }

    #[test]
    fn flag_cannot_be_set_on_revealed_tile() {
        let mut tile = Tile::new((0, 0));
        tile.reveal();

        assert_eq!(tile.toggle_flag(), None);
        assert!(!tile.is_flagged());
    }

    #[test]
    fn mines_keep_zero_count() {
        let mut tile = Tile::new((1, 1));
        tile.arm();
        tile.set_adjacent_mine_count(4);

        assert!(tile.is_mine());
        assert_eq!(tile.adjacent_mine_count(), 0);
    }

    #[test]
    fn default_view_is_hidden() {
        assert_eq!(TileView::default(), TileView::Hidden);
        assert!(TileView::default().is_closed());
    }

    #[test]
    fn dirty_bit_is_drained() {
        let mut tile = Tile::new((0, 0));
        assert!(tile.take_dirty());
        assert!(!tile.take_dirty());

        tile.toggle_flag();
        assert!(tile.is_dirty());
        assert_eq!(tile.coords(), (0, 0));
    }
}
