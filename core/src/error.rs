use thiserror::Error;

use crate::{Coord2, Tile};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board state: {0}")]
    InvalidBoardState(BoardDefect),
}

/// What made a caller-supplied grid unusable.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardDefect {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell {coords:?} holds {value}, which is neither empty nor a power of two")]
    BadTile { coords: Coord2, value: Tile },
}

impl From<BoardDefect> for GameError {
    fn from(defect: BoardDefect) -> Self {
        Self::InvalidBoardState(defect)
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("High score storage is unavailable")]
    Unavailable,
    #[error("Stored high score could not be read")]
    Corrupt,
}

pub type Result<T> = core::result::Result<T, GameError>;
