//! Configuration settings for the toroidal Game of Life

use crate::game_of_life::{check_dimensions, DEFAULT_MAX_DECAY_TRAIL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub display: DisplayConfig,
    pub run: RunConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub max_decay_trail: usize,
    pub style: DisplayStyle,
    pub show_generation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// One glyph per cell, shaded by the decay counter
    Compact,
    /// Compact cells with row and column numbers
    Coords,
    /// The `0`/`1` seed-file format
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub interval_ms: u64,
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Random seeding picks `ceil(rows * cols / density_divisor)` cells
    pub density_divisor: usize,
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig { rows: 100, cols: 100 },
            display: DisplayConfig {
                max_decay_trail: DEFAULT_MAX_DECAY_TRAIL,
                style: DisplayStyle::Compact,
                show_generation: true,
            },
            run: RunConfig {
                interval_ms: 100,
                max_generations: Some(1000),
            },
            seed: SeedConfig {
                density_divisor: 5,
                rng_seed: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            log::warn!(
                "config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.grid.rows, self.grid.cols)?;

        if self.run.interval_ms == 0 {
            anyhow::bail!("Run interval must be positive");
        }

        if self.run.max_generations == Some(0) {
            anyhow::bail!("Generation limit must be positive when set");
        }

        if self.seed.density_divisor == 0 {
            anyhow::bail!("Seed density divisor must be positive");
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.run.interval_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(trail) = cli_overrides.max_decay_trail {
            self.display.max_decay_trail = trail;
        }
        if let Some(style) = cli_overrides.style {
            self.display.style = style;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.run.interval_ms = interval_ms;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.run.max_generations = Some(max_generations);
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.seed.rng_seed = Some(rng_seed);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub max_decay_trail: Option<usize>,
    pub style: Option<DisplayStyle>,
    pub interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
    pub rng_seed: Option<u64>,
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config/default.yaml")
}
