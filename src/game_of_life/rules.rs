//! Conway's B3/S23 transition rule on a toroidal grid

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

/// The grid computed for the following generation, plus whether it differs
/// from the grid it was computed from.
#[derive(Debug, Clone)]
pub struct NextGeneration {
    pub grid: Grid,
    pub changed: bool,
}

impl GameOfLifeRules {
    /// Compute the next generation from `current` without touching it.
    ///
    /// Every row is built from the prior grid only; the changed flag is
    /// collected in the same pass so no second comparison is needed.
    pub fn next_generation(current: &Grid) -> NextGeneration {
        let rows: Vec<(Vec<bool>, bool)> = (0..current.rows)
            .into_par_iter()
            .map(|x| {
                let mut changed = false;
                let row: Vec<bool> = (0..current.cols)
                    .map(|y| {
                        let alive = current.get(x, y);
                        let next = Self::should_be_alive(alive, current.count_neighbors(x, y));
                        changed |= next != alive;
                        next
                    })
                    .collect();
                (row, changed)
            })
            .collect();

        let mut grid = Grid::new(current.rows, current.cols);
        let mut changed = false;
        for (x, (row, row_changed)) in rows.into_iter().enumerate() {
            let start = grid.index(x, 0);
            grid.cells[start..start + row.len()].copy_from_slice(&row);
            changed |= row_changed;
        }

        NextGeneration { grid, changed }
    }

    /// Apply the rules once, discarding the change flag
    pub fn evolve(current: &Grid) -> Grid {
        Self::next_generation(current).grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
