// session.rs - One grid plus its generator, driven by a front end
//
// Groups the lifecycle operations a front end performs (randomize, clear,
// fill, edit, step, resize, save, load) and remembers the hashes of recent
// states so a run can stop once the pattern settles or starts repeating.

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::persist::{self, LoadDecisions};
use crate::random::{LifeRng, seeded_rng};

pub struct Session {
    grid: Grid,
    rng: LifeRng,
    history: VecDeque<u64>,
    history_len: usize,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let grid = Grid::new(config.rows, config.cols)?;
        log::debug!(
            "new session {}x{} seed={:?}",
            config.rows,
            config.cols,
            config.seed
        );
        Ok(Self {
            grid,
            rng: seeded_rng(config.seed),
            history: VecDeque::new(),
            history_len: config.cycle_history,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    // Anything that replaces the pattern outside of stepping starts a new count
    fn restart(&mut self) {
        self.grid.reset_generation();
        self.history.clear();
    }

    /// Applies an edit to the grid, then restarts the generation count.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Grid) -> T) -> T {
        let out = f(&mut self.grid);
        self.restart();
        out
    }

    pub fn randomize(&mut self) {
        self.grid.randomize(&mut self.rng);
        self.restart();
    }

    pub fn clear(&mut self) {
        self.grid.set_all(Cell::Dead);
        self.restart();
    }

    pub fn fill(&mut self) {
        self.grid.set_all(Cell::Alive);
        self.restart();
    }

    /// Resizing keeps the generation count but forgets recorded states.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.grid.resize(rows, cols)?;
        self.history.clear();
        Ok(())
    }

    pub fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid.dimensions().hash(&mut hasher);
        self.grid.cells().hash(&mut hasher);
        hasher.finish()
    }

    /// Records the current state; true if it was already among the recent ones.
    pub fn check_for_cycle(&mut self) -> bool {
        if self.history_len == 0 {
            return false;
        }
        let current_hash = self.hash_grid();
        if self.history.contains(&current_hash) {
            return true;
        }
        if self.history.len() == self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(current_hash);
        false
    }

    /// Advances one generation. Returns true once the new state repeats a
    /// recently seen one (still life or short oscillator).
    pub fn step(&mut self) -> bool {
        if self.history.is_empty() {
            self.check_for_cycle();
        }
        self.grid.step();
        self.check_for_cycle()
    }

    /// Steps up to `generations` times, stopping early on a repeat when
    /// `stop_on_repeat` is set. Returns the number of steps taken.
    pub fn run(&mut self, generations: u64, stop_on_repeat: bool) -> u64 {
        for taken in 1..=generations {
            if self.step() && stop_on_repeat {
                log::info!(
                    "pattern repeats at generation {}, stopping",
                    self.grid.generation()
                );
                return taken;
            }
        }
        generations
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persist::save_to_path(&self.grid, path)
    }

    pub fn load<P: AsRef<Path>, D: LoadDecisions>(&mut self, path: P, decisions: D) -> Result<()> {
        persist::load_from_path(path, &mut self.grid, decisions)?;
        self.history.clear();
        Ok(())
    }
}
