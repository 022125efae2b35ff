// grid.rs - Grid types for Conway's Game of Life
//
// Two equally sized row-major buffers: `current` is what renderers read and
// editors write, `next` is scratch space for the step rule and the randomizer.
// Swapping them exchanges the Vec handles, cell data is never copied.

use crate::constants::MAX_DIMENSION;
use crate::error::{LifeError, Result};

#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// Any non-zero byte reads as alive.
    pub fn from_byte(byte: u8) -> Cell {
        if byte == 0 { Cell::Dead } else { Cell::Alive }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) current: Vec<Cell>,
    pub(crate) next: Vec<Cell>,
    pub(crate) generation: u64,
}

/// Allocates `rows * cols` dead cells, reporting failure instead of aborting.
pub(crate) fn alloc_cells(rows: usize, cols: usize) -> Result<Vec<Cell>> {
    if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(LifeError::Allocation { rows, cols });
    }
    let len = rows
        .checked_mul(cols)
        .ok_or(LifeError::Allocation { rows, cols })?;
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| LifeError::Allocation { rows, cols })?;
    cells.resize(len, Cell::Dead);
    Ok(cells)
}

fn clamp_axis(value: i64, len: usize) -> usize {
    if len == 0 || value <= 0 {
        return 0;
    }
    let last = len - 1;
    usize::try_from(value).map_or(last, |v| v.min(last))
}

impl Grid {
    /// Creates an all-dead grid at generation 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let current = alloc_cells(rows, cols)?;
        let next = alloc_cells(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            current,
            next,
            generation: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Reads a cell. Coordinates must be in range; use [`Grid::clamp`] or
    /// [`Grid::get_checked`] for raw input.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.current[self.index(row, col)]
    }

    pub fn get_checked(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.get(row, col))
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        let i = self.index(row, col);
        self.current[i] = value;
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        let i = self.index(row, col);
        self.current[i] = self.current[i].toggled();
    }

    pub fn set_all(&mut self, value: Cell) {
        self.current.fill(value);
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.rows as u64 && (col as u64) < self.cols as u64
    }

    /// Maps an arbitrary signed coordinate to the nearest cell inside the grid.
    /// An empty axis maps to 0, which is still not a valid index.
    pub fn clamp(&self, row: i64, col: i64) -> (usize, usize) {
        (clamp_axis(row, self.rows), clamp_axis(col, self.cols))
    }

    /// Row-major view of the current buffer
    pub fn cells(&self) -> &[Cell] {
        &self.current
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.current[start..start + self.cols]
    }

    pub fn population(&self) -> usize {
        self.current.iter().filter(|c| c.is_alive()).count()
    }

    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}
