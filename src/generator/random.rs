use ndarray::Array2;
use rand::prelude::*;

use super::BombPlacer;
use crate::{BoardConfig, CellCount};

/// Reference placement policy: each bomb draws a flat index from the
/// shrinking `[0, remaining)` range, then scans forward past slots that
/// already hold a bomb, without wrapping to the front. As long as the
/// config keeps `bombs <= cols * rows`, every scan settles on a distinct
/// free slot; over-full configs stop once the grid is saturated.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanPlacer {
    seed: u64,
}

impl ScanPlacer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

impl BombPlacer for ScanPlacer {
    fn place(self, config: BoardConfig) -> Array2<bool> {
        let mut mask: Array2<bool> =
            Array2::default((usize::from(config.rows), usize::from(config.cols)));
        let total = config.total_cells();
        if total == 0 || config.bombs == 0 {
            return mask;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let slots = mask.as_slice_mut().expect("layout should be standard");
            let mut remaining = total;
            for _ in 0..config.bombs {
                if remaining == 0 {
                    break;
                }
                let mut idx = rng.random_range(0..remaining) as usize;
                while slots[idx] && idx < slots.len() - 1 {
                    idx += 1;
                }
                slots[idx] = true;
                remaining -= 1;
            }
        }

        // double check bomb count
        let placed = mask.iter().filter(|&&slot| slot).count() as CellCount;
        if placed != config.bombs {
            log::warn!(
                "Bomb placement settled on {} bombs, requested {}",
                placed,
                config.bombs
            );
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_bombs(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&slot| slot).count()
    }

    #[test]
    fn places_the_requested_number_of_bombs() {
        let mask = ScanPlacer::new(42).place(BoardConfig::new(9, 9, 10));

        assert_eq!(count_bombs(&mask), 10);
    }

    #[test]
    fn same_seed_gives_the_same_layout() {
        let config = BoardConfig::new(16, 16, 40);

        let first = ScanPlacer::new(7).place(config);
        let second = ScanPlacer::new(7).place(config);

        assert_eq!(first, second);
        assert_eq!(count_bombs(&first), 40);
    }

    #[test]
    fn full_grid_is_saturated_exactly() {
        let mask = ScanPlacer::new(3).place(BoardConfig::new(4, 4, 16));

        assert!(mask.iter().all(|&slot| slot));
    }

    #[test]
    fn over_full_unchecked_config_stops_at_saturation() {
        let mask = ScanPlacer::new(3).place(BoardConfig::new_unchecked(4, 4, 20));

        assert_eq!(count_bombs(&mask), 16);
    }

    #[test]
    fn zero_bombs_leaves_the_mask_empty() {
        let mask = ScanPlacer::new(0).place(BoardConfig::new(5, 3, 0));

        assert_eq!(mask.dim(), (3, 5));
        assert_eq!(count_bombs(&mask), 0);
    }

    #[test]
    fn mask_shape_follows_rows_then_cols() {
        let mask = ScanPlacer::new(1).place(BoardConfig::new(7, 2, 1));

        assert_eq!(mask.dim(), (2, 7));
    }
}
