use ndarray::Array2;

pub use random::*;

mod random;

use crate::BoardConfig;

/// Strategy that decides which cells of a fresh board hold bombs. The
/// returned mask has shape `(rows, cols)`.
pub trait BombPlacer {
    fn place(self, config: BoardConfig) -> Array2<bool>;
}
