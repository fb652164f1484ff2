//! Messages exchanged between a request layer and the game service.

use core::fmt;
use serde::{Deserialize, Serialize};
use sweeper_core::{CellCount, Coord, Coord2, ErrorKind, GameView, RevealOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A square is addressed by its game and its position in that game's grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareId {
    pub game: GameId,
    pub x: Coord,
    pub y: Coord,
}

impl SquareId {
    pub const fn new(game: GameId, (x, y): Coord2) -> Self {
        Self { game, x, y }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateGame { difficulty: f64 },
    GetGame { id: GameId },
    SetFlag { square: SquareId },
    ClearFlag { square: SquareId },
    Reveal { square: SquareId },
    AbandonGame { id: GameId },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedGame {
    pub id: GameId,
    pub game: GameView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Response {
    Created(CreatedGame),
    Game(GameView),
    /// Apparent remaining mines after a flag change
    MineCount { mine_count: CellCount },
    Reveal(RevealOutcome),
    Abandoned { id: GameId },
    Error(ErrorResponse),
}

impl Response {
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
