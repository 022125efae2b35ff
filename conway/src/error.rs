//! Errors returned by grid allocation, persistence and session operations.
//!
//! None of these are fatal: every failing operation leaves the grid exactly
//! as it was, so the caller can retry with another size or file.

use std::fmt;

/// Which reconciliation question was answered "no" during a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Rows,
    Cols,
}

impl fmt::Display for Reconcile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reconcile::Rows => write!(f, "rows"),
            Reconcile::Cols => write!(f, "columns"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// Buffers for a `rows x cols` grid could not be obtained
    #[error("cannot allocate a {rows}x{cols} grid")]
    Allocation { rows: usize, cols: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The decision provider refused to clip oversized file content
    #[error("load aborted: clipping {0} was declined")]
    Declined(Reconcile),

    #[error("malformed grid file: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
