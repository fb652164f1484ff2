use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every square of one game, laid out as an `x` by `y` matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    squares: Array2<Square>,
    total_mines: CellCount,
    flag_count: CellCount,
}

impl Grid {
    /// Builds the squares from a finished mine mask.
    ///
    /// Counting happens only after every mine is in place, so no square ever sees a partially
    /// populated field.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let squares = Array2::from_shape_fn(mine_mask.raw_dim(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
            Square::new(coords, mine_mask[[x, y]], adjacent_mines)
        });
        let total_mines = mine_mask.iter().filter(|&&has_mine| has_mine).count() as CellCount;

        Self {
            squares,
            total_mines,
            flag_count: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        nd_size(&self.squares)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_squares(&self) -> CellCount {
        self.squares.len() as CellCount
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Apparent remaining mines: placed mines minus placed flags, never below zero.
    pub fn mine_count(&self) -> CellCount {
        self.total_mines.saturating_sub(self.flag_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Square> {
        self.squares.get(coords.to_nd_index())
    }

    pub fn square(&self, coords: Coord2) -> Result<&Square> {
        self.get(coords).ok_or(GameError::InvalidCoords)
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    pub fn adjacent_squares(&self, coords: Coord2) -> impl Iterator<Item = &Square> {
        self.iter_neighbors(coords)
            .map(move |pos| &self.squares[pos.to_nd_index()])
    }

    /// No safe square is left unrevealed.
    pub fn all_safe_revealed(&self) -> bool {
        !self.squares.iter().any(Square::is_pending_safe)
    }

    /// Places or removes the flag on a hidden square.
    pub fn set_flag(&mut self, coords: Coord2, has_flag: bool) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let square = &mut self.squares[coords.to_nd_index()];

        if square.is_revealed() {
            return Err(GameError::AlreadyRevealed);
        }
        if square.has_flag() == has_flag {
            return Ok(MarkOutcome::NoChange);
        }

        square.set_flag(has_flag);
        self.flag_count = if has_flag {
            self.flag_count.saturating_add(1)
        } else {
            self.flag_count.saturating_sub(1)
        };
        Ok(MarkOutcome::Changed)
    }

    /// Applies a batch of reveals computed beforehand. Coordinates are trusted to be in bounds.
    pub(crate) fn reveal_all(&mut self, batch: &[Coord2]) {
        for &coords in batch {
            self.squares[coords.to_nd_index()].reveal();
        }
    }

    pub fn public_view(&self) -> GridView {
        GridView {
            width: self.width(),
            height: self.height(),
            squares: self.squares.iter().map(Square::public_view).collect(),
            mine_count: self.mine_count(),
        }
    }
}

impl NeighborIterExt for Grid {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, self.size())
    }
}

impl Index<Coord2> for Grid {
    type Output = Square;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.squares[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
