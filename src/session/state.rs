//! Interactive session: run-state, user commands and the auto-run loop

use super::Scheduler;
use crate::config::Settings;
use crate::game_of_life::{check_dimensions, Grid, LifeEngine, LifeError, StepStatus};
use anyhow::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Whether the session is auto-stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Why an auto-run loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The grid stopped changing
    Stable,
    /// The configured generation cap was reached
    GenerationLimit,
    /// The tick callback asked to stop
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generation: u64,
    pub reason: StopReason,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            StopReason::Stable => write!(f, "Generation: {}. Life is complete :)", self.generation),
            StopReason::GenerationLimit => {
                write!(f, "Generation: {}. Stopped at the generation limit", self.generation)
            }
            StopReason::Interrupted => write!(f, "Generation: {}. Stopped", self.generation),
        }
    }
}

/// Owns one engine plus the controls a user drives it with.
///
/// Cell edits are only honoured while idle; every size or trail change stops
/// the run and starts over from an empty grid.
pub struct Session {
    engine: LifeEngine,
    state: RunState,
    stable: bool,
    density_divisor: usize,
    max_generations: Option<u64>,
    rng: StdRng,
}

impl Session {
    /// Build a session from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let engine = LifeEngine::with_decay_trail(
            settings.grid.rows,
            settings.grid.cols,
            settings.display.max_decay_trail,
        )?;
        let rng = match settings.seed.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            engine,
            state: RunState::Idle,
            stable: false,
            density_divisor: settings.seed.density_divisor,
            max_generations: settings.run.max_generations,
            rng,
        })
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Status line for the current state
    pub fn message(&self) -> String {
        if self.stable {
            format!("Generation: {}. Life is complete :)", self.engine.generation())
        } else {
            format!("Generation: {}", self.engine.generation())
        }
    }

    /// Step once and, unless that already settled the grid, switch to running
    pub fn start(&mut self) -> StepStatus {
        self.stop();
        let status = self.advance();
        if !status.is_stable() {
            info!("auto-run started at generation {}", self.engine.generation());
            self.state = RunState::Running;
        }
        status
    }

    /// Advance one generation if running; returns `None` while idle
    pub fn tick(&mut self) -> Option<StepStatus> {
        if !self.is_running() {
            return None;
        }
        Some(self.advance())
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            debug!("auto-run stopped at generation {}", self.engine.generation());
            self.state = RunState::Idle;
        }
    }

    /// Stop any run and advance exactly one generation
    pub fn next(&mut self) -> StepStatus {
        self.stop();
        self.advance()
    }

    /// Stop and clear the grid, keeping its size
    pub fn reset(&mut self) -> Result<(), LifeError> {
        self.stop();
        self.reinitialize()
    }

    /// Stop and start over on an empty grid of a new size.
    ///
    /// Out-of-range sizes are rejected without touching the session.
    pub fn set_size(&mut self, rows: usize, cols: usize) -> Result<(), LifeError> {
        check_dimensions(rows, cols)?;
        self.stop();
        self.stable = false;
        self.engine.initialize(rows, cols)
    }

    /// Stop, change the decay trail and start over on an empty grid
    pub fn set_trail(&mut self, max_decay_trail: i64) -> Result<(), LifeError> {
        self.engine.set_max_decay_trail(max_decay_trail)?;
        self.stop();
        self.reinitialize()
    }

    /// Clear the grid and seed roughly one cell in `density_divisor` at random
    pub fn random(&mut self) -> Result<(), LifeError> {
        self.reset()?;
        let count = self.seed_count();
        self.engine.seed_random_with(count, &mut self.rng);
        debug!(
            "random seed: {} picks, {} cells alive",
            count,
            self.engine.living_count()
        );
        Ok(())
    }

    /// Random picks used for the current grid size
    pub fn seed_count(&self) -> usize {
        (self.engine.rows() * self.engine.cols()).div_ceil(self.density_divisor)
    }

    /// Flip a cell. Ignored while running, returning `Ok(None)`.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Option<bool>, LifeError> {
        if self.is_running() {
            warn!("ignoring edit of ({}, {}) while running", x, y);
            return Ok(None);
        }
        let alive = self.engine.toggle_cell(x, y)?;
        self.stable = false;
        Ok(Some(alive))
    }

    /// Set a cell. Ignored while running, returning `Ok(false)`.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<bool, LifeError> {
        if self.is_running() {
            warn!("ignoring edit of ({}, {}) while running", x, y);
            return Ok(false);
        }
        self.engine.set_cell(x, y, alive)?;
        self.stable = false;
        Ok(true)
    }

    /// Stop and replace the grid with `grid`, resizing to match it
    pub fn load(&mut self, grid: Grid) -> Result<(), LifeError> {
        self.stop();
        self.engine.load(grid)?;
        self.stable = false;
        Ok(())
    }

    /// Start and keep stepping on `scheduler`'s cadence until the grid
    /// settles, the generation cap is hit, or `on_tick` returns `false`.
    ///
    /// `on_tick` sees the session after every step, including the first.
    /// The session is left idle however the loop ends, errors included.
    pub fn run<S, F>(&mut self, scheduler: &mut S, on_tick: F) -> Result<RunSummary>
    where
        S: Scheduler + ?Sized,
        F: FnMut(&Session) -> Result<bool>,
    {
        let result = self.drive(scheduler, on_tick);
        if result.is_err() {
            self.stop();
        }
        result
    }

    fn drive<S, F>(&mut self, scheduler: &mut S, mut on_tick: F) -> Result<RunSummary>
    where
        S: Scheduler + ?Sized,
        F: FnMut(&Session) -> Result<bool>,
    {
        self.start();
        let mut keep_going = on_tick(&*self)?;

        while self.is_running() {
            if !keep_going {
                self.stop();
                return Ok(self.summary(StopReason::Interrupted));
            }
            if self.at_generation_limit() {
                self.stop();
                return Ok(self.summary(StopReason::GenerationLimit));
            }
            scheduler.wait_for_tick();
            self.tick();
            keep_going = on_tick(&*self)?;
        }

        Ok(self.summary(StopReason::Stable))
    }

    fn at_generation_limit(&self) -> bool {
        self.max_generations
            .is_some_and(|limit| self.engine.generation() >= limit)
    }

    fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            generation: self.engine.generation(),
            reason,
        }
    }

    fn advance(&mut self) -> StepStatus {
        let status = self.engine.step();
        self.stable = status.is_stable();
        if self.stable {
            info!("{}", self.message());
            self.stop();
        }
        status
    }

    fn reinitialize(&mut self) -> Result<(), LifeError> {
        self.stable = false;
        let (rows, cols) = (self.engine.rows(), self.engine.cols());
        self.engine.initialize(rows, cols)
    }
}
