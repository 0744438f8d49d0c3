use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines: {mines} requested but the board only has {cells} tiles")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Minefield was already generated for this board")]
    AlreadyGenerated,
    #[error("Could only place {placed} of {requested} mines under the cluster limit")]
    GenerationExhausted {
        placed: CellCount,
        requested: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
