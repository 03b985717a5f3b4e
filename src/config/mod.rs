//! Configuration management for the toroidal Game of Life

pub mod settings;

pub use settings::{
    default_config_path, CliOverrides, DisplayConfig, DisplayStyle, GridConfig, RunConfig,
    SeedConfig, Settings,
};
