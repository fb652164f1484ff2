use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a client may know about a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub grid: GridView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub width: Coord,
    pub height: Coord,
    pub squares: Vec<SquareView>,
    /// Apparent remaining mines
    pub mine_count: CellCount,
}

/// Result of revealing a square
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "data")]
pub enum RevealOutcome {
    /// The square was safe; `revealed` holds every square the reveal opened
    #[serde(rename = "success")]
    Success {
        revealed: Vec<SquareView>,
        game_status: GameStatus,
        mine_count: CellCount,
    },
    /// A mine was hit and the game is lost
    #[serde(rename = "fail")]
    Failure {
        incorrect_flags: Vec<SquareView>,
        unflagged_mines: Vec<SquareView>,
        mine_count: CellCount,
    },
}

impl RevealOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status of the game right after the reveal
    pub const fn game_status(&self) -> GameStatus {
        match self {
            Self::Success { game_status, .. } => *game_status,
            Self::Failure { .. } => GameStatus::Lost,
        }
    }

    pub const fn mine_count(&self) -> CellCount {
        match self {
            Self::Success { mine_count, .. } | Self::Failure { mine_count, .. } => *mine_count,
        }
    }
}
