//! Errors reported by the life engine

use thiserror::Error;

/// Smallest supported grid extent on either axis
pub const MIN_DIMENSION: usize = 5;
/// Largest supported grid extent on either axis
pub const MAX_DIMENSION: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("invalid grid size {rows}x{cols} (allowed {MIN_DIMENSION} - {MAX_DIMENSION})")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("coordinates ({x}, {y}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Check that both axes fall inside the supported range
pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), LifeError> {
    let in_range = |n: usize| (MIN_DIMENSION..=MAX_DIMENSION).contains(&n);
    if in_range(rows) && in_range(cols) {
        Ok(())
    } else {
        Err(LifeError::InvalidDimension { rows, cols })
    }
}
