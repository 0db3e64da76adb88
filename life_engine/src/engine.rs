// engine.rs - The simulation engine: owns one generation and advances it

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::patterns::Pattern;

const HISTORY_LEN: usize = 10;

/// Conway's Game of Life on a bounded (non-wrapping) grid.
///
/// All mutation goes through these methods. Calls are expected to be
/// sequential; share it across threads behind a `Mutex` if you must.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    grid_history: [u64; HISTORY_LEN], // Hashes of recent generations
    history_count: usize,             // Counter for circular buffer
    repeating: bool,
}

impl Simulation {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            generation: 0,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
            repeating: false,
        })
    }

    /// Replace the grid with an all-dead `width x height` one.
    ///
    /// Calling it again with the same dimensions yields an equivalent grid.
    /// On error the current grid is left untouched.
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<()> {
        self.grid = Grid::new(width, height)?;
        self.reset_counters();
        debug!(width, height, "grid initialized");
        Ok(())
    }

    /// Kill every cell, keeping the current dimensions.
    pub fn clear(&mut self) {
        self.grid.kill_all();
        self.reset_counters();
        debug!("grid cleared");
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The current generation, for full redraws.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Steps taken since the last initialize, clear or pattern load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// True once the latest generation matches one of the ten before it.
    /// Editing a cell clears it until the next step.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<bool> {
        let index = self.checked_index(x, y)?;
        Ok(self.grid.is_alive_at(index))
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let index = self.checked_index(x, y)?;
        self.grid.set_at(index, alive);
        self.repeating = false;
        Ok(())
    }

    /// Flip one cell and return its new state.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool> {
        let index = self.checked_index(x, y)?;
        let alive = !self.grid.is_alive_at(index);
        self.grid.set_at(index, alive);
        self.repeating = false;
        Ok(alive)
    }

    /// Live cells among the up to eight Moore neighbours of (x, y).
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> Result<u8> {
        self.checked_index(x, y)?;
        Ok(self.grid.live_neighbors(x, y))
    }

    /// Advance one generation.
    ///
    /// Every next state is computed from the untouched current grid, then
    /// the whole grid is swapped in at once.
    pub fn step(&mut self) {
        if self.history_count == 0 {
            // Starting generation, including any cells edited since the reset
            self.record_history();
        }

        let current = &self.grid;
        let mut next = current.clone();

        for y in 0..current.height() {
            for x in 0..current.width() {
                let index = y * current.width() + x;
                let next_state = match (current.is_alive_at(index), current.live_neighbors(x, y)) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
                next.set_at(index, next_state);
            }
        }

        self.grid = next;
        self.generation += 1;
        self.record_history();
        trace!(generation = self.generation, population = self.population(), "stepped");
    }

    /// Clear, then place `pattern` in the middle of the grid.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        let (width, height) = (pattern.width(), pattern.height());
        if width > self.width() || height > self.height() {
            return Err(EngineError::PatternTooLarge {
                name: pattern.name,
                width,
                height,
            });
        }

        self.clear();
        let origin_x = (self.width() - width) / 2;
        let origin_y = (self.height() - height) / 2;
        self.place_pattern(pattern, origin_x, origin_y)?;
        debug!(pattern = pattern.name, origin_x, origin_y, "pattern loaded");
        Ok(())
    }

    /// Bring the pattern's cells to life with its top-left corner at (x, y).
    /// Nothing is written unless the whole pattern fits.
    pub fn place_pattern(&mut self, pattern: &Pattern, x: usize, y: usize) -> Result<()> {
        let fits = |origin: usize, extent: usize, limit: usize| {
            origin.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(x, pattern.width(), self.width()) || !fits(y, pattern.height(), self.height()) {
            return Err(EngineError::PatternTooLarge {
                name: pattern.name,
                width: pattern.width(),
                height: pattern.height(),
            });
        }

        // In range: x + dx < x + width <= self.width()
        for &(dx, dy) in pattern.cells {
            self.set_cell(x + dx, y + dy, true)?;
        }
        Ok(())
    }

    /// Refill the grid with roughly one live cell in three. The same seed
    /// always produces the same grid.
    pub fn randomize(&mut self, seed: u64) {
        self.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for index in 0..self.width() * self.height() {
            self.grid.set_at(index, rng.gen_ratio(1, 3));
        }
        debug!(seed, population = self.population(), "grid randomized");
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        self.grid.index(x, y).ok_or(EngineError::IndexOutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid.hash(&mut hasher);
        hasher.finish()
    }

    fn record_history(&mut self) {
        let current_hash = self.hash_grid();
        let filled = self.history_count.min(HISTORY_LEN);
        let repeating = self.grid_history[..filled].contains(&current_hash);
        if repeating && !self.repeating {
            debug!(generation = self.generation, "repeating configuration detected");
        }
        self.repeating = repeating;
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
    }

    fn reset_counters(&mut self) {
        self.generation = 0;
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.repeating = false;
    }
}
