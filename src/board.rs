use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::{
    BoardConfig, BombPlacer, Cell, CellCount, Coord, Coords, FlagOutcome, GameError,
    NeighborIterExt, Result, RevealOutcome, ScanPlacer, ToNdIndex, mult,
};

/// The full grid plus dimensions and the board-wide failure flag.
///
/// A board is built once and then mutated in place through `open`,
/// `force_open` and `toggle_flag`; starting a new game means building a
/// fresh board. Each call needs exclusive access and runs to completion,
/// cascades included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    bomb_count: CellCount,
    failed: bool,
}

impl Board {
    /// Builds a board with entropy-seeded bomb placement.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_placer(config, ScanPlacer::from_entropy())
    }

    /// Builds a board with an explicit placement strategy, for
    /// deterministic layouts and replays.
    pub fn with_placer(config: BoardConfig, placer: impl BombPlacer) -> Self {
        Self::from_bomb_mask(placer.place(config))
    }

    /// Builds a board with bombs at exactly the given positions.
    pub fn from_bomb_coords(cols: Coord, rows: Coord, bomb_coords: &[Coords]) -> Result<Self> {
        if bomb_coords.len() as u64 > u64::from(mult(cols, rows)) {
            return Err(GameError::TooManyBombs);
        }

        let mut mask: Array2<bool> = Array2::default((usize::from(rows), usize::from(cols)));
        for &coords in bomb_coords {
            if coords.col >= cols || coords.row >= rows {
                return Err(GameError::InvalidCoords);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_bomb_mask(mask))
    }

    fn from_bomb_mask(mask: Array2<bool>) -> Self {
        let (rows, cols) = mask.dim();
        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            let coords = Coords::new(col as Coord, row as Coord);
            let mut cell = Cell::hidden(coords);
            if mask[[row, col]] {
                cell.has_bomb = true;
                cell.bombs_near = None;
            }
            cell
        });
        let bomb_count = cells
            .iter()
            .filter(|cell| cell.has_bomb)
            .count()
            .try_into()
            .unwrap();

        let mut board = Self {
            cells,
            bomb_count,
            failed: false,
        };
        board.compute_numbers();
        board
    }

    // Runs once after placement; counts are never recomputed afterwards.
    fn compute_numbers(&mut self) {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let coords = Coords::new(col, row);
                if self.cells[coords.to_nd_index()].has_bomb {
                    continue;
                }
                let near = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].has_bomb)
                    .count()
                    .try_into()
                    .unwrap();
                self.cells[coords.to_nd_index()].bombs_near = Some(near);
            }
        }
    }

    pub fn cols(&self) -> Coord {
        self.cells.dim().1.try_into().unwrap()
    }

    pub fn rows(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    /// Whether a bomb has been opened on this board. Transitions false to
    /// true at most once; the engine keeps accepting calls afterwards and
    /// leaves it to the caller to stop play.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Flat row-major view of the grid; the cell at `(col, row)` sits at
    /// index `row * cols + col`.
    pub fn cells(&self) -> &[Cell] {
        self.cells.as_slice().expect("layout should be standard")
    }

    /// The cell at `coords`, or `None` when out of bounds.
    pub fn cell(&self, coords: Coords) -> Option<&Cell> {
        self.validate(coords)
            .map(|coords| &self.cells[coords.to_nd_index()])
    }

    /// In-bounds Moore neighbors of `coords`, in a fixed evaluation order.
    /// Empty when `coords` itself is out of bounds.
    pub fn neighbors(&self, coords: Coords) -> SmallVec<[Coords; 8]> {
        match self.validate(coords) {
            Some(coords) => self.cells.iter_neighbors(coords).collect(),
            None => SmallVec::new(),
        }
    }

    /// Opens the cell at `coords`. Opening a bomb marks the board failed
    /// without cascading; opening a zero-count cell floods through the
    /// connected zero region and its numbered border, skipping bombs.
    /// Out-of-bounds coordinates are ignored.
    pub fn open(&mut self, coords: Coords) -> RevealOutcome {
        match self.validate(coords) {
            Some(coords) => self.open_validated(coords, false),
            None => RevealOutcome::NoChange,
        }
    }

    /// Chord: opens the cell and every unflagged, unopened neighbor
    /// regardless of adjacency counts. A bomb neighbor detonates and fails
    /// the board. Out-of-bounds coordinates are ignored.
    pub fn force_open(&mut self, coords: Coords) -> RevealOutcome {
        match self.validate(coords) {
            Some(coords) => self.open_validated(coords, true),
            None => RevealOutcome::NoChange,
        }
    }

    /// Flips the flag on a hidden cell; opened or out-of-bounds cells are
    /// left untouched.
    pub fn toggle_flag(&mut self, coords: Coords) -> FlagOutcome {
        let Some(coords) = self.validate(coords) else {
            return FlagOutcome::NoChange;
        };

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.opened {
            return FlagOutcome::NoChange;
        }
        cell.has_flag = !cell.has_flag;
        FlagOutcome::Changed
    }

    fn open_validated(&mut self, start: Coords, forced: bool) -> RevealOutcome {
        let mut outcome = self.reveal_cell(start);
        if outcome == RevealOutcome::Exploded {
            return outcome;
        }

        // Work-queue traversal instead of call recursion so the stack
        // depth stays independent of board size. Queued cells always
        // cascade with the non-forced rules; only the seeding differs.
        let mut visited: HashSet<Coords> = HashSet::new();
        visited.insert(start);
        let mut queue: VecDeque<Coords> = VecDeque::new();

        if forced {
            queue.extend(self.cells.iter_neighbors(start).filter(|&pos| {
                let cell = &self.cells[pos.to_nd_index()];
                !cell.opened && !cell.has_flag
            }));
        } else if self.cells[start.to_nd_index()].bombs_near == Some(0) {
            queue.extend(self.cells.iter_neighbors(start).filter(|&pos| {
                let cell = &self.cells[pos.to_nd_index()];
                !cell.opened && !cell.has_bomb
            }));
        }

        while let Some(coords) = queue.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if self.cells[coords.to_nd_index()].opened {
                continue;
            }

            // A forced seed may be a bomb; it detonates here without
            // cascading, but the remaining seeds still open.
            outcome = outcome | self.reveal_cell(coords);

            let cell = self.cells[coords.to_nd_index()];
            if !cell.has_bomb && cell.bombs_near == Some(0) {
                queue.extend(self.cells.iter_neighbors(coords).filter(|&pos| {
                    let neighbor = &self.cells[pos.to_nd_index()];
                    !neighbor.opened && !neighbor.has_bomb && !visited.contains(&pos)
                }));
            }
        }

        outcome
    }

    // Marks a single cell open and reports a detonation; never cascades.
    // Opening clears the flag so an opened cell is never flagged.
    fn reveal_cell(&mut self, coords: Coords) -> RevealOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        let was_opened = cell.opened;
        cell.opened = true;
        cell.has_flag = false;

        if cell.has_bomb {
            if !self.failed {
                log::debug!("Bomb opened at ({}, {}), board failed", coords.col, coords.row);
            }
            self.failed = true;
            return RevealOutcome::Exploded;
        }

        if was_opened {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Revealed
        }
    }

    fn validate(&self, coords: Coords) -> Option<Coords> {
        if coords.col < self.cols() && coords.row < self.rows() {
            Some(coords)
        } else {
            None
        }
    }
}
