use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid width and height must both be positive")]
    InvalidSize,
    #[error("Difficulty must be a mine chance between 0 and 1")]
    InvalidDifficulty,
    #[error("Square is already revealed")]
    AlreadyRevealed,
    #[error("Square is flagged, remove the flag before revealing it")]
    Flagged,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Coarse classification a request layer can map onto its own failure codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    IllegalStateTransition,
    /// Failure outside of the game rules, e.g. in storage
    Internal,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            InvalidCoords | InvalidSize | InvalidDifficulty => ErrorKind::InvalidInput,
            AlreadyRevealed | Flagged | AlreadyEnded => ErrorKind::IllegalStateTransition,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
