//! Conway's Game of Life on a toroidal grid
//!
//! The [`LifeEngine`] owns a single grid and advances it one generation at a
//! time, reporting when the pattern has stopped changing. A [`Session`] wraps
//! an engine with the start/stop/next/reset controls of an interactive
//! front-end and drives auto-run on a [`session::Scheduler`].

pub mod config;
pub mod game_of_life;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Grid, LifeEngine, LifeError, StepStatus};
pub use session::{RunSummary, Session};

use anyhow::Result;

/// Build a session from `settings`, seed it at random and run it until it
/// settles or reaches the generation limit, without pausing between steps.
pub fn simulate_random(settings: &Settings) -> Result<(Session, RunSummary)> {
    let mut session = Session::new(settings)?;
    session.random()?;
    let summary = session.run(&mut session::Immediate, |_| Ok(true))?;
    Ok((session, summary))
}
