//! The life engine: owns one toroidal grid and advances it generation by generation

use super::error::check_dimensions;
use super::{GameOfLifeRules, Grid, LifeError};
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Decay trail length used when none is configured
pub const DEFAULT_MAX_DECAY_TRAIL: usize = 3;

/// Outcome of a single [`LifeEngine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The grid changed; carries the new generation number
    Advanced(u64),
    /// The next generation equals the current one, nothing was committed
    Stable,
}

impl StepStatus {
    pub fn is_stable(self) -> bool {
        matches!(self, StepStatus::Stable)
    }
}

/// Read-only copy of the engine's observable state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub rows: Vec<Vec<bool>>,
    pub generation: u64,
    pub decay: usize,
}

/// Owns a single simulation.
///
/// The grid dimensions are fixed between calls to [`LifeEngine::initialize`].
/// The decay counter cycles through `0..=max_decay_trail` and only exists so a
/// renderer can highlight recently changed generations.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    grid: Grid,
    generation: u64,
    decay: usize,
    max_decay_trail: usize,
    pending_decay_trail: usize,
}

impl LifeEngine {
    /// Create an engine with an all-dead `rows x cols` grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, LifeError> {
        Self::with_decay_trail(rows, cols, DEFAULT_MAX_DECAY_TRAIL)
    }

    pub fn with_decay_trail(rows: usize, cols: usize, max_decay_trail: usize) -> Result<Self, LifeError> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            grid: Grid::new(rows, cols),
            generation: 0,
            decay: 0,
            max_decay_trail,
            pending_decay_trail: max_decay_trail,
        })
    }

    /// Replace the grid with an all-dead one and reset both counters.
    ///
    /// A decay trail set since the last initialisation becomes active here.
    /// On error the current state is kept as is.
    pub fn initialize(&mut self, rows: usize, cols: usize) -> Result<(), LifeError> {
        check_dimensions(rows, cols)?;
        self.grid = Grid::new(rows, cols);
        self.generation = 0;
        self.decay = 0;
        self.max_decay_trail = self.pending_decay_trail;
        debug!(
            "initialized {}x{} grid (decay trail {})",
            rows, cols, self.max_decay_trail
        );
        Ok(())
    }

    /// Seed the engine from an existing grid, resetting both counters.
    ///
    /// Grids whose cell count does not match their dimensions are rejected.
    pub fn load(&mut self, grid: Grid) -> Result<(), LifeError> {
        grid.check_shape()?;
        self.initialize(grid.rows, grid.cols)?;
        self.grid = grid;
        Ok(())
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<(), LifeError> {
        self.grid.set(x, y, alive)
    }

    /// Flip one cell, returning its new state
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool, LifeError> {
        self.grid.toggle(x, y)
    }

    /// Set `count` randomly chosen cells alive using the thread-local RNG
    pub fn seed_random(&mut self, count: usize) {
        self.seed_random_with(count, &mut rand::thread_rng());
    }

    /// Set `count` cells alive, each picked uniformly and independently.
    ///
    /// Picks are made with replacement, so fewer than `count` distinct cells
    /// may end up alive.
    pub fn seed_random_with<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            let x = rng.gen_range(0..self.grid.rows);
            let y = rng.gen_range(0..self.grid.cols);
            let idx = self.grid.index(x, y);
            self.grid.cells[idx] = true;
        }
        trace!(
            "seeded {} picks, {} cells alive",
            count,
            self.grid.living_count()
        );
    }

    /// Compute the next generation and commit it if anything changed
    pub fn step(&mut self) -> StepStatus {
        let next = GameOfLifeRules::next_generation(&self.grid);
        if !next.changed {
            debug!("generation {} is stable", self.generation);
            return StepStatus::Stable;
        }

        self.grid = next.grid;
        self.generation += 1;
        self.decay = (self.decay + 1) % (self.max_decay_trail + 1);
        debug!(
            "advanced to generation {} ({} alive, decay {})",
            self.generation,
            self.grid.living_count(),
            self.decay
        );
        StepStatus::Advanced(self.generation)
    }

    /// Change the decay trail bound; applied on the next [`LifeEngine::initialize`]
    pub fn set_max_decay_trail(&mut self, n: i64) -> Result<(), LifeError> {
        let n = usize::try_from(n).map_err(|_| {
            LifeError::InvalidConfiguration(format!("decay trail must be non-negative, got {}", n))
        })?;
        self.pending_decay_trail = n;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    pub fn cols(&self) -> usize {
        self.grid.cols
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn decay(&self) -> usize {
        self.decay
    }

    pub fn max_decay_trail(&self) -> usize {
        self.max_decay_trail
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            rows: self.grid.to_rows(),
            generation: self.generation,
            decay: self.decay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_with(cells: &[(usize, usize)]) -> LifeEngine {
        let mut engine = LifeEngine::new(10, 10).unwrap();
        for &(x, y) in cells {
            engine.set_cell(x, y, true).unwrap();
        }
        engine
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = LifeEngine::new(5, 12).unwrap();
        assert_eq!(engine.rows(), 5);
        assert_eq!(engine.cols(), 12);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.decay(), 0);
        assert_eq!(engine.living_count(), 0);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert_eq!(
            LifeEngine::new(4, 10).unwrap_err(),
            LifeError::InvalidDimension { rows: 4, cols: 10 }
        );
        assert!(LifeEngine::new(10, 201).is_err());

        let mut engine = engine_with(&[(1, 1)]);
        assert!(engine.initialize(300, 10).is_err());
        assert_eq!(engine.rows(), 10);
        assert!(engine.grid().get(1, 1));
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut engine = engine_with(&[(3, 3)]);
        let before = engine.snapshot();
        assert!(matches!(
            engine.set_cell(10, 0, true),
            Err(LifeError::OutOfBounds { x: 10, y: 0, .. })
        ));
        assert!(engine.toggle_cell(0, 10).is_err());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_block_is_stable() {
        let mut engine = engine_with(&[(4, 4), (4, 5), (5, 4), (5, 5)]);
        assert_eq!(engine.step(), StepStatus::Stable);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.decay(), 0);
    }

    #[test]
    fn test_stable_is_idempotent() {
        let mut engine = engine_with(&[(4, 4), (4, 5), (5, 4), (5, 5)]);
        let before = engine.snapshot();
        for _ in 0..3 {
            assert!(engine.step().is_stable());
            assert_eq!(engine.snapshot(), before);
        }
    }

    #[test]
    fn test_blinker_period_two() {
        let mut engine = engine_with(&[(5, 4), (5, 5), (5, 6)]);
        let start = engine.grid().clone();

        assert_eq!(engine.step(), StepStatus::Advanced(1));
        assert_ne!(engine.grid(), &start);
        assert_eq!(engine.step(), StepStatus::Advanced(2));
        assert_eq!(engine.grid(), &start);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_counters_after_advances() {
        let mut engine = engine_with(&[(5, 4), (5, 5), (5, 6)]);
        for n in 1..=7u64 {
            assert_eq!(engine.step(), StepStatus::Advanced(n));
            assert_eq!(engine.decay(), (n % 4) as usize);
            assert!(engine.decay() <= engine.max_decay_trail());
        }
    }

    #[test]
    fn test_zero_decay_trail() {
        let mut engine = LifeEngine::with_decay_trail(10, 10, 0).unwrap();
        for y in 4..7 {
            engine.set_cell(5, y, true).unwrap();
        }
        engine.step();
        engine.step();
        assert_eq!(engine.decay(), 0);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_decay_trail_applies_on_initialize() {
        let mut engine = engine_with(&[(5, 4), (5, 5), (5, 6)]);
        engine.set_max_decay_trail(1).unwrap();
        assert_eq!(engine.max_decay_trail(), DEFAULT_MAX_DECAY_TRAIL);

        engine.step();
        engine.step();
        assert_eq!(engine.decay(), 2);

        engine.initialize(10, 10).unwrap();
        assert_eq!(engine.max_decay_trail(), 1);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.decay(), 0);
        assert_eq!(engine.living_count(), 0);
    }

    #[test]
    fn test_negative_decay_trail_rejected() {
        let mut engine = LifeEngine::new(5, 5).unwrap();
        assert!(matches!(
            engine.set_max_decay_trail(-1),
            Err(LifeError::InvalidConfiguration(_))
        ));
        engine.initialize(5, 5).unwrap();
        assert_eq!(engine.max_decay_trail(), DEFAULT_MAX_DECAY_TRAIL);
    }

    #[test]
    fn test_seed_random_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = LifeEngine::new(20, 30).unwrap();
        let count = (20 * 30 + 4) / 5;
        engine.seed_random_with(count, &mut rng);

        let alive = engine.living_count();
        assert!(alive >= 1);
        assert!(alive <= count);
    }

    #[test]
    fn test_seed_random_single_pick() {
        let mut engine = LifeEngine::new(5, 5).unwrap();
        engine.seed_random(1);
        assert_eq!(engine.living_count(), 1);

        let mut engine = LifeEngine::new(5, 5).unwrap();
        engine.seed_random(0);
        assert_eq!(engine.living_count(), 0);
    }

    #[test]
    fn test_seed_random_is_reproducible() {
        let mut a = LifeEngine::new(12, 12).unwrap();
        let mut b = LifeEngine::new(12, 12).unwrap();
        a.seed_random_with(30, &mut StdRng::seed_from_u64(42));
        b.seed_random_with(30, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_load_resets_counters() {
        let mut engine = engine_with(&[(5, 4), (5, 5), (5, 6)]);
        engine.step();

        let mut seed = Grid::new(6, 8);
        seed.set(1, 1, true).unwrap();
        engine.load(seed.clone()).unwrap();
        assert_eq!(engine.grid(), &seed);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.decay(), 0);

        assert!(engine.load(Grid::new(3, 3)).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_grid() {
        let mut engine = engine_with(&[(5, 4), (5, 5), (5, 6)]);
        engine.step();
        let before = engine.snapshot();

        let malformed = Grid { rows: 5, cols: 5, cells: vec![true; 3] };
        assert!(matches!(
            engine.load(malformed),
            Err(LifeError::InvalidConfiguration(_))
        ));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.step(), StepStatus::Advanced(2));
    }

    #[test]
    fn test_snapshot_rows() {
        let engine = engine_with(&[(0, 9)]);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.rows.len(), 10);
        assert!(snapshot.rows.iter().all(|row| row.len() == 10));
        assert!(snapshot.rows[0][9]);
    }
}
