//! Toroidal grid representation for Game of Life

use super::LifeError;
use anyhow::Result;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `rows x cols` field of cells whose edges wrap around on both axes.
///
/// Cells are addressed as `(x, y)` with `x` the row and `y` the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let rows = cells.len();
        let cols = cells[0].len();

        if cols == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), cols);
            }
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Check that `cells` holds exactly `rows * cols` entries
    pub fn check_shape(&self) -> Result<(), LifeError> {
        if self.cells.len() == self.rows * self.cols {
            Ok(())
        } else {
            Err(LifeError::InvalidConfiguration(format!(
                "grid holds {} cells, expected {}x{}",
                self.cells.len(),
                self.rows,
                self.cols
            )))
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.cols + y
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.rows && y < self.cols
    }

    /// Get cell value at coordinates; anything outside the grid reads as dead
    pub fn get(&self, x: usize, y: usize) -> bool {
        if self.contains(x, y) {
            self.cells[self.index(x, y)]
        } else {
            false
        }
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<(), LifeError> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Flip a single cell, returning its new state
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, LifeError> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> LifeError {
        LifeError::OutOfBounds {
            x,
            y,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// The eight toroidal neighbour coordinates of `(x, y)`.
    ///
    /// On grids smaller than 3 along an axis some of these coincide.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        let mut out = [(0, 0); 8];
        let offsets = iproduct!([-1isize, 0, 1], [-1isize, 0, 1])
            .filter(|&(dx, dy)| dx != 0 || dy != 0);
        for (slot, (dx, dy)) in out.iter_mut().zip(offsets) {
            *slot = (wrap(x, dx, self.rows), wrap(y, dy, self.cols));
        }
        out
    }

    /// Count living neighbours of a cell with wraparound on both axes
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y)
            .iter()
            .filter(|&&(nx, ny)| self.cells[self.index(nx, ny)])
            .count() as u8
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(x, y)| self.get(x, y))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Iterate over the grid row by row
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Copy the grid out as a sequence of rows
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.row_slices().map(|row| row.to_vec()).collect()
    }
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = LifeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let grid = Grid {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        };
        grid.check_shape()?;
        Ok(grid)
    }
}

/// Step one position along an axis of length `size`, wrapping at both ends.
#[inline]
fn wrap(index: usize, delta: isize, size: usize) -> usize {
    match delta {
        -1 if index == 0 => size - 1,
        1 if index + 1 >= size => 0,
        _ => (index as isize + delta) as usize,
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
