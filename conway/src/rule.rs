// rule.rs - B3/S23 step over a bounded (non-wrapping) grid

use crate::grid::{Cell, Grid};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Conway's rule for one cell given its live neighbor count.
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell, neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3) => Cell::Alive,                     // Birth
        _ => Cell::Dead,                                    // Death or stays dead
    }
}

impl Grid {
    /// Live cells among the up-to-8 neighbors of (row, col) in `current`.
    /// Positions past an edge are skipped, not wrapped.
    pub fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if nr < self.rows && nc < self.cols && self.current[nr * self.cols + nc].is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Advances one generation. Every cell is computed from the untouched
    /// `current` into `next` before the buffers are swapped.
    pub fn step(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let i = row * self.cols + col;
                let neighbors = self.alive_neighbors(row, col);
                self.next[i] = next_state(self.current[i], neighbors);
            }
        }

        self.swap_buffers();
        self.generation += 1;
    }
}
