//! Computer player column policy.
//!
//! Computer players pick uniformly among the columns that still have room.

use crate::grid::Grid;
use rand::prelude::*;

/// Random column picker for computer players
#[derive(Debug, Clone)]
pub struct Bot {
    rng: StdRng,
}

impl Bot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a column with room left, or `None` if the grid is full
    pub fn choose_column(&mut self, grid: &Grid) -> Option<usize> {
        grid.open_columns().choose(&mut self.rng).copied()
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}
