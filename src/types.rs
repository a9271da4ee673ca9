use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u32;

/// Zero-based grid position, column first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub col: Coord,
    pub row: Coord,
}

impl Coords {
    pub const fn new(col: Coord, row: Coord) -> Self {
        Self { col, row }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coords {
    type Output = [usize; 2];

    // Grids are stored as (rows, cols) in standard layout, so the flat
    // order is row-major: `row * cols + col`.
    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coords) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coords) -> NeighborIter {
        let (rows, cols) = self.dim();
        NeighborIter::new(
            center,
            (cols.try_into().unwrap(), rows.try_into().unwrap()),
        )
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
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
fn apply_delta(coords: Coords, delta: (isize, isize), bounds: (Coord, Coord)) -> Option<Coords> {
    let (dc, dr) = delta;
    let (cols, rows) = bounds;

    let col = coords.col.checked_add_signed(dc.try_into().ok()?)?;
    if col >= cols {
        return None;
    }

    let row = coords.row.checked_add_signed(dr.try_into().ok()?)?;
    if row >= rows {
        return None;
    }

    Some(Coords { col, row })
}

/// Iterator over the in-bounds Moore neighborhood of a cell, in the fixed
/// order of `DISPLACEMENTS`.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coords,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    fn new(center: Coords, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coords;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
