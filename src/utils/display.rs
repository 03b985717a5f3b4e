//! Terminal rendering of the engine state

use crate::config::DisplayStyle;
use crate::game_of_life::{grid_to_string, Grid, LifeEngine};
use anyhow::Result;

/// Glyphs for live cells, indexed by the decay counter
const DECAY_GLYPHS: [char; 4] = ['█', '▓', '▒', '░'];
const DEAD_GLYPH: char = '·';

/// Format engine state for display
pub struct GridFormatter;

impl GridFormatter {
    /// Render the engine's grid in the requested style
    pub fn render(engine: &LifeEngine, style: DisplayStyle) -> String {
        let glyph = Self::decay_glyph(engine.decay());
        match style {
            DisplayStyle::Compact => Self::format_grid_compact(engine.grid(), glyph),
            DisplayStyle::Coords => Self::format_grid_with_coords(engine.grid(), glyph),
            DisplayStyle::Plain => grid_to_string(engine.grid()),
        }
    }

    /// Live-cell glyph for a given decay value
    pub fn decay_glyph(decay: usize) -> char {
        DECAY_GLYPHS[decay % DECAY_GLYPHS.len()]
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid, alive: char) -> String {
        let mut output = String::with_capacity(grid.rows * (grid.cols + 1) * 3);
        for row in grid.row_slices() {
            output.extend(row.iter().map(|&cell| if cell { alive } else { DEAD_GLYPH }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid, alive: char) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for y in 0..grid.cols {
            output.push_str(&format!("{:2}", y % 10));
        }
        output.push('\n');

        for (x, row) in grid.row_slices().enumerate() {
            output.push_str(&format!("{:2} ", x % 100));
            for &cell in row {
                let glyph = if cell { alive } else { DEAD_GLYPH };
                output.push(glyph);
                output.push(glyph);
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary of the engine state
    pub fn format_status(engine: &LifeEngine) -> String {
        format!(
            "{}x{} | generation {} | {} alive | decay {}/{}",
            engine.rows(),
            engine.cols(),
            engine.generation(),
            engine.living_count(),
            engine.decay(),
            engine.max_decay_trail()
        )
    }

    /// Serialise a snapshot of the engine as pretty JSON
    pub fn snapshot_json(engine: &LifeEngine) -> Result<String> {
        Ok(serde_json::to_string_pretty(&engine.snapshot())?)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
