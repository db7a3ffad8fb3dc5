use ndarray::Array2;

use crate::{GameError, Result};

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

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

/// Returns `coords` unchanged when they lie on a board of `size`.
pub fn validate_coords(coords: Coord2, size: Coord2) -> Result<Coord2> {
    if coords.0 < size.0 && coords.1 < size.1 {
        Ok(coords)
    } else {
        Err(GameError::OutOfBounds {
            row: coords.0,
            col: coords.1,
        })
    }
}

/// Shape of an `Array2` as board coordinates.
///
/// Boards are only ever allocated from `Coord2` sizes, so the dimensions always fit.
pub(crate) fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let (rows, cols) = array.dim();
    (rows as Coord, cols as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self))
    }
}

/// Offsets of the eight cells at Chebyshev distance one, row-major.
pub(crate) const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds neighbors of a cell in row-major order, without wraparound.
///
/// Walks the 3×3 window around the center clipped to the board, skipping the center itself.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last: Coord2,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;
        let on_board = row < rows && col < cols;

        let first = (row.saturating_sub(1), col.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows.saturating_sub(1)),
            col.saturating_add(1).min(cols.saturating_sub(1)),
        );

        Self {
            center,
            first_col: first.1,
            last,
            cursor: on_board.then_some(first),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.cursor?;
            self.cursor = if pos.1 < self.last.1 {
                Some((pos.0, pos.1 + 1))
            } else if pos.0 < self.last.0 {
                Some((pos.0 + 1, self.first_col))
            } else {
                None
            };

            if pos != self.center {
                return Some(pos);
            }
        }
    }
}
