// random.rs - Coin-flip fill from an explicit generator
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{Cell, Grid};

pub type LifeRng = StdRng;

/// A fixed seed gives a reproducible sequence; `None` draws from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> LifeRng {
    match seed {
        Some(seed) => LifeRng::seed_from_u64(seed),
        None => LifeRng::from_entropy(),
    }
}

impl Grid {
    /// Fills `next` with fair coin flips and swaps it in.
    /// The generation counter is left for the caller to reset.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.next.iter_mut() {
            *cell = Cell::from(rng.gen_bool(0.5));
        }
        self.swap_buffers();
    }
}
