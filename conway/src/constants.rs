// constants.rs - Engine defaults

// Starting grid size when nothing else is configured
pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;

// How many past states a session remembers for repeat detection.
// Catches still lifes and every oscillator with period <= this.
pub const CYCLE_HISTORY_LEN: usize = 10;

// Largest rows or cols a grid may have; also the file header limit
pub const MAX_DIMENSION: usize = i32::MAX as usize;

// rows (i32) + cols (i32)
pub const FILE_HEADER_LEN: usize = 8;
