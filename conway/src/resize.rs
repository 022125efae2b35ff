// resize.rs - Content-preserving reallocation of both buffers

use crate::error::Result;
use crate::grid::{Grid, alloc_cells};

impl Grid {
    /// Changes the grid to `new_rows x new_cols`, keeping the overlapping
    /// top-left region of `current`. New cells are dead. On error the grid is
    /// untouched; the generation counter survives either way.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize) -> Result<()> {
        if (new_rows, new_cols) == (self.rows, self.cols) {
            return Ok(());
        }

        // Both allocations happen before anything is modified
        let mut current = alloc_cells(new_rows, new_cols)?;
        let next = alloc_cells(new_rows, new_cols)?;

        let stride = self.cols.min(new_cols);
        let rows_to_copy = self.rows.min(new_rows);
        for row in 0..rows_to_copy {
            let src = row * self.cols;
            let dst = row * new_cols;
            current[dst..dst + stride].copy_from_slice(&self.current[src..src + stride]);
        }

        log::debug!(
            "resized grid {}x{} -> {}x{} (kept {}x{})",
            self.rows,
            self.cols,
            new_rows,
            new_cols,
            rows_to_copy,
            stride
        );

        self.current = current;
        self.next = next;
        self.rows = new_rows;
        self.cols = new_cols;
        Ok(())
    }
}
