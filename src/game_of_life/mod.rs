//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{EngineSnapshot, LifeEngine, StepStatus, DEFAULT_MAX_DECAY_TRAIL};
pub use error::{check_dimensions, LifeError, MAX_DIMENSION, MIN_DIMENSION};
pub use grid::Grid;
pub use io::{
    create_example_grids, grid_to_string, load_grid_from_file, parse_grid_from_string,
    save_grid_to_file,
};
pub use rules::{GameOfLifeRules, NextGeneration};
