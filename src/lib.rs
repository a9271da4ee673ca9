use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Requested board shape and bomb count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub cols: Coord,
    pub rows: Coord,
    pub bombs: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(cols: Coord, rows: Coord, bombs: CellCount) -> Self {
        Self { cols, rows, bombs }
    }

    /// Clamps degenerate requests: at least a 1x1 grid, and no more bombs
    /// than the grid has cells.
    pub fn new(cols: Coord, rows: Coord, bombs: CellCount) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let max_bombs = mult(cols, rows);
        if bombs > max_bombs {
            log::warn!("Requested {} bombs but the grid only fits {}", bombs, max_bombs);
        }
        Self::new_unchecked(cols, rows, bombs.min(max_bombs))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.cols, self.rows)
    }
}

/// Result of an `open`/`force_open` call, usable by a rendering layer as
/// its change-notification hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) | (_, Exploded) => Exploded,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}
