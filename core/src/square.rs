use serde::{Deserialize, Serialize};

use crate::*;

/// One position of the grid and everything the server knows about it.
///
/// Mine placement and the neighbor count are fixed when the grid is generated; only the flag and
/// the revealed marker change during play, and only through [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    x: Coord,
    y: Coord,
    has_mine: bool,
    has_flag: bool,
    is_revealed: bool,
    adjacent_mines: u8,
}

impl Square {
    pub(crate) const fn new((x, y): Coord2, has_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            x,
            y,
            has_mine,
            has_flag: false,
            is_revealed: false,
            adjacent_mines,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn x(&self) -> Coord {
        self.x
    }

    pub const fn y(&self) -> Coord {
        self.y
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn has_flag(&self) -> bool {
        self.has_flag
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Safe and still hidden, i.e. standing between the player and a win.
    pub const fn is_pending_safe(&self) -> bool {
        !self.has_mine && !self.is_revealed
    }

    pub(crate) fn set_flag(&mut self, has_flag: bool) {
        self.has_flag = has_flag;
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    /// What a client is allowed to see of this square.
    pub const fn public_view(&self) -> SquareView {
        let state = if self.is_revealed {
            SquareState::Revealed {
                has_mine: self.has_mine,
                adjacent_mines: self.adjacent_mines,
            }
        } else {
            SquareState::Hidden {
                has_flag: self.has_flag,
            }
        };
        SquareView {
            x: self.x,
            y: self.y,
            state,
        }
    }
}

/// Client-facing state of a square. Mine data only exists once the square is revealed and the
/// flag only exists while it is not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SquareState {
    Hidden { has_flag: bool },
    Revealed { has_mine: bool, adjacent_mines: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareView {
    pub x: Coord,
    pub y: Coord,
    #[serde(flatten)]
    pub state: SquareState,
}
