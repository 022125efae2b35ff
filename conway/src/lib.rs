// lib.rs - Conway's Game of Life engine: grid, rule, resize, randomize, persistence

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod persist;
pub mod random;
pub mod resize;
pub mod rule;
pub mod session;

pub use config::SessionConfig;
pub use error::{LifeError, Reconcile, Result};
pub use grid::{Cell, Grid};
pub use persist::{FixedDecisions, LoadDecisions};
pub use random::{LifeRng, seeded_rng};
pub use session::Session;
