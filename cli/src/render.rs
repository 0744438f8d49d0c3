//! Text rendering of a session.

use sapper_core::{Coord2, Session, SessionState, TileView};

pub fn glyph(view: TileView) -> char {
    match view {
        TileView::Hidden => '#',
        TileView::Flagged => 'F',
        TileView::Open(0) => '.',
        TileView::Open(count) => char::from(b'0' + count),
        TileView::Mine => '*',
        TileView::Detonated => 'X',
        TileView::WrongFlag => '!',
    }
}

/// Character grid kept in sync with a session, redrawing only the tiles it reports as changed.
#[derive(Debug)]
pub struct Screen {
    dim: Coord2,
    cells: Vec<char>,
}

impl Screen {
    pub fn new(dim: Coord2) -> Self {
        let (rows, cols) = dim;
        Self {
            dim,
            cells: vec![glyph(TileView::Hidden); usize::from(rows) * usize::from(cols)],
        }
    }

    /// Pulls changed tiles from `session`, returning how many were redrawn.
    pub fn update(&mut self, session: &mut Session) -> usize {
        if session.board().dim() != self.dim {
            *self = Self::new(session.board().dim());
        }
        let changes = session.take_changes();
        for &coords in &changes {
            if let Some(view) = session.tile_view(coords) {
                let index = self.index(coords);
                self.cells[index] = glyph(view);
            }
        }
        changes.len()
    }

    fn index(&self, (row, col): Coord2) -> usize {
        usize::from(row) * usize::from(self.dim.1) + usize::from(col)
    }

    pub fn render(&self) -> String {
        let (rows, cols) = self.dim;
        let mut out = String::from("    ");
        for col in 0..cols {
            out.push_str(&format!("{:>3}", col));
        }
        out.push('\n');
        for row in 0..rows {
            out.push_str(&format!("{:>3} ", row));
            for col in 0..cols {
                out.push_str(&format!("{:>3}", self.cells[self.index((row, col))]));
            }
            out.push('\n');
        }
        out
    }
}

pub fn status_line(session: &Session) -> String {
    let state = match session.state() {
        SessionState::NotStarted => "ready",
        SessionState::Running => "playing",
        SessionState::Won => "you win!",
        SessionState::Lost => "you died!",
    };
    format!(
        "{} | flags {} | time {:03} | {}",
        session.difficulty(),
        session.flags_remaining(),
        session.elapsed_ticks(),
        state
    )
}
