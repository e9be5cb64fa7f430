use thiserror::Error;

use crate::{CellCount, CellId};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board side length must be at least 1")]
    EmptyBoard,
    #[error("{mines} mines do not fit a board of {cells} cells, at least one cell must stay safe")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Layout holds {actual} mines but {expected} were requested")]
    MineCountMismatch { expected: CellCount, actual: usize },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Cell id {0} is outside the board")]
    InvalidCellId(CellId),
    #[error("Cell id {0} is listed as a mine more than once")]
    DuplicateMine(CellId),
}

pub type Result<T> = core::result::Result<T, GameError>;
