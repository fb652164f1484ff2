use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for mine, flag, and square counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// At most eight neighbors, kept inline.
pub type Neighbors = SmallVec<[Coord2; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of an ndarray matrix as grid coordinates.
///
/// Matrices are only ever allocated from a `Coord2`, so the dimensions always fit.
pub(crate) fn nd_size<T>(matrix: &Array2<T>) -> Coord2 {
    let (x, y) = matrix.dim();
    (x as Coord, y as Coord)
}

/// Every existing cell within one step (diagonals included) of `center`, without `center`
/// itself and without wrapping around the edges.
pub fn adjacent_cells(size: Coord2, center: Coord2) -> Neighbors {
    NeighborIter::new(center, size).collect()
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    fn adjacent_cells(&self, index: Coord2) -> Neighbors {
        self.iter_neighbors(index).collect()
    }
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, nd_size(self))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Bounds-clipped walk over the up-to-eight neighbors of a cell.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sorted(mut cells: Neighbors) -> Vec<Coord2> {
        cells.sort_unstable();
        cells.into_vec()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let cells = sorted(adjacent_cells((3, 3), (1, 1)));

        assert_eq!(
            cells,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corner_cell_is_clipped() {
        assert_eq!(sorted(adjacent_cells((3, 3), (0, 0))), [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(sorted(adjacent_cells((3, 3), (2, 2))), [(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn edge_cell_does_not_wrap() {
        let cells = sorted(adjacent_cells((4, 2), (3, 0)));

        assert_eq!(cells, [(2, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(adjacent_cells((1, 1), (0, 0)).is_empty());
    }

    #[test]
    fn matrix_extension_uses_matrix_bounds() {
        let matrix: Array2<bool> = Array2::default([2, 5]);

        assert_eq!(matrix.adjacent_cells((1, 4)).len(), 3);
        assert_eq!(matrix.iter_neighbors((0, 2)).count(), 5);
    }

    #[test]
    fn max_coordinates_do_not_overflow() {
        let size = (Coord::MAX, Coord::MAX);
        let cells = adjacent_cells(size, (Coord::MAX - 1, Coord::MAX - 1));

        assert_eq!(cells.len(), 3);
    }
}
