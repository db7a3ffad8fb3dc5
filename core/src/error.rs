use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Mine count must be lower than the number of cells")]
    InvalidMineCount,
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Saved board state is inconsistent: {0}")]
    InconsistentState(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
