use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Squares opened by a safe reveal starting at `start`, in the order they were reached.
///
/// Only squares without adjacent mines spread the reveal further; a square with a nonzero count
/// is opened but stays a border. Mines and flagged squares stop the flood. Squares that are
/// already revealed are never part of the result, but a revealed zero still carries the flood
/// through to whatever is hidden behind it. Every square is looked at once at most, so the
/// result never holds duplicates and is bounded by the grid area.
///
/// The grid is not touched; callers apply the result as one batch.
pub fn flood_fill(grid: &Grid, start: Coord2) -> Vec<Coord2> {
    let mut revealed = Vec::from([start]);
    let mut seen: HashSet<Coord2> = HashSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        if grid[visit_coords].adjacent_mines() != 0 {
            continue;
        }

        for pos in grid.iter_neighbors(visit_coords) {
            if !seen.insert(pos) {
                continue;
            }

            let square = &grid[pos];
            if square.has_mine() || square.has_flag() {
                log::trace!("Flood fill skips {:?}", pos);
                continue;
            }

            if !square.is_revealed() {
                log::trace!(
                    "Flood opened square at {:?}, mine count: {}",
                    pos,
                    square.adjacent_mines()
                );
                revealed.push(pos);
            }
            if square.adjacent_mines() == 0 {
                to_visit.push_back(pos);
            }
        }
    }

    revealed
}

/// Everything uncovered when the player steps on a mine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MineDisclosure {
    /// Mines without a flag, which get revealed.
    pub unflagged_mines: Vec<Coord2>,
    /// Flags placed on squares without a mine.
    pub incorrect_flags: Vec<Coord2>,
}

/// Single pass over the whole grid collecting what a lost game discloses.
pub fn disclose_mines(grid: &Grid) -> MineDisclosure {
    let mut disclosure = MineDisclosure::default();

    for square in grid.squares() {
        match (square.has_mine(), square.has_flag()) {
            (true, false) => disclosure.unflagged_mines.push(square.coords()),
            (false, true) => disclosure.incorrect_flags.push(square.coords()),
            _ => {}
        }
    }

    disclosure
}
