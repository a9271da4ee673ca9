use serde::{Deserialize, Serialize};

use crate::Coords;

/// One grid position with bomb/open/flag/count state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Revealed to the player; transitions false to true and never back.
    pub opened: bool,
    /// Fixed at board construction.
    pub has_bomb: bool,
    pub has_flag: bool,
    /// Count of adjacent bombs; `None` exactly when `has_bomb` is set.
    pub bombs_near: Option<u8>,
    pub coords: Coords,
}

impl Cell {
    pub(crate) const fn hidden(coords: Coords) -> Self {
        Self {
            opened: false,
            has_bomb: false,
            has_flag: false,
            bombs_near: Some(0),
            coords,
        }
    }
}
