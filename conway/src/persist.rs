//! Binary save/load for [`Grid`].
//!
//! Layout (no magic, no version):
//!
//! ```text
//! offset 0: i32 LE rows
//! offset 4: i32 LE cols
//! offset 8: rows*cols bytes, row-major, 0 = dead, 1 = alive
//! ```
//!
//! Loading into a grid of a different size is reconciled through a
//! [`LoadDecisions`] provider: oversized content is clipped only with
//! permission, undersized content can be centered. Everything a load needs
//! is read before the target grid is modified, so a failed load (declined,
//! truncated, bad header) leaves it exactly as it was.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::constants::FILE_HEADER_LEN;
use crate::error::{LifeError, Reconcile, Result};
use crate::grid::{Cell, Grid};

/// Answers the yes/no questions a load may need to ask.
pub trait LoadDecisions {
    /// The file has more rows than the grid. `true` drops the extra rows.
    fn clip_rows(&mut self, file_rows: usize, grid_rows: usize) -> bool;

    /// The file has more columns than the grid. `true` drops the tail of
    /// every row.
    fn clip_cols(&mut self, file_cols: usize, grid_cols: usize) -> bool;

    /// Content (rows, cols) is smaller than the grid in some dimension.
    /// `true` centers it, `false` places it at the origin.
    fn center(&mut self, content: (usize, usize), grid: (usize, usize)) -> bool;
}

impl<T: LoadDecisions + ?Sized> LoadDecisions for &mut T {
    fn clip_rows(&mut self, file_rows: usize, grid_rows: usize) -> bool {
        (**self).clip_rows(file_rows, grid_rows)
    }

    fn clip_cols(&mut self, file_cols: usize, grid_cols: usize) -> bool {
        (**self).clip_cols(file_cols, grid_cols)
    }

    fn center(&mut self, content: (usize, usize), grid: (usize, usize)) -> bool {
        (**self).center(content, grid)
    }
}

/// Same answer every time it is asked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedDecisions {
    pub clip_rows: bool,
    pub clip_cols: bool,
    pub center: bool,
}

impl FixedDecisions {
    pub fn accept_all() -> Self {
        Self {
            clip_rows: true,
            clip_cols: true,
            center: true,
        }
    }
}

impl LoadDecisions for FixedDecisions {
    fn clip_rows(&mut self, _file_rows: usize, _grid_rows: usize) -> bool {
        self.clip_rows
    }

    fn clip_cols(&mut self, _file_cols: usize, _grid_cols: usize) -> bool {
        self.clip_cols
    }

    fn center(&mut self, _content: (usize, usize), _grid: (usize, usize)) -> bool {
        self.center
    }
}

fn header_dim(value: usize, name: &str) -> Result<[u8; 4]> {
    i32::try_from(value)
        .map(i32::to_le_bytes)
        .map_err(|_| LifeError::Malformed(format!("{name} = {value} does not fit the header")))
}

/// Writes the header and the current buffer.
pub fn write_grid<W: Write>(grid: &Grid, mut writer: W) -> Result<()> {
    let rows = header_dim(grid.rows(), "rows")?;
    let cols = header_dim(grid.cols(), "cols")?;
    writer.write_all(&rows)?;
    writer.write_all(&cols)?;

    let mut bytes = Vec::with_capacity(grid.cols());
    for r in 0..grid.rows() {
        bytes.clear();
        bytes.extend(grid.row(r).iter().map(|c| c.as_byte()));
        writer.write_all(&bytes)?;
    }
    writer.flush()?;
    Ok(())
}

fn malformed(msg: String) -> LifeError {
    log::warn!("load rejected: {msg}");
    LifeError::Malformed(msg)
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => malformed(format!("file ends inside {what}")),
        _ => LifeError::Io(e),
    })
}

fn skip<R: Read>(reader: &mut R, count: usize) -> Result<()> {
    let count = count as u64;
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped < count {
        return Err(malformed("file ends inside a clipped row".to_string()));
    }
    Ok(())
}

/// Reads a saved grid into `grid`, which keeps its own dimensions.
///
/// On success the generation counter is reset to 0. On any error `grid` is
/// unchanged.
pub fn read_grid<R: Read, D: LoadDecisions>(
    mut reader: R,
    grid: &mut Grid,
    mut decisions: D,
) -> Result<()> {
    let mut header = [0u8; FILE_HEADER_LEN];
    fill(&mut reader, &mut header, "the header")?;
    let raw_rows = i32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let raw_cols = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if raw_rows < 0 || raw_cols < 0 {
        return Err(malformed(format!("negative dimensions {raw_rows}x{raw_cols}")));
    }
    let (declared_rows, declared_cols) = (raw_rows as usize, raw_cols as usize);
    let (rows, cols) = grid.dimensions();

    let mut file_rows = declared_rows;
    if file_rows > rows {
        if !decisions.clip_rows(file_rows, rows) {
            log::warn!("load declined: {file_rows} rows do not fit {rows}");
            return Err(LifeError::Declined(Reconcile::Rows));
        }
        file_rows = rows;
    }

    let mut file_cols = declared_cols;
    let mut cells_to_ignore = 0;
    if file_cols > cols {
        if !decisions.clip_cols(file_cols, cols) {
            log::warn!("load declined: {file_cols} columns do not fit {cols}");
            return Err(LifeError::Declined(Reconcile::Cols));
        }
        cells_to_ignore = file_cols - cols;
        file_cols = cols;
    }

    let smaller = file_rows < rows || file_cols < cols;
    let (pad_row, pad_col) = if smaller && decisions.center((file_rows, file_cols), (rows, cols)) {
        ((rows - file_rows) / 2, (cols - file_cols) / 2)
    } else {
        (0, 0)
    };

    // file_rows <= rows and file_cols <= cols, so this never exceeds the grid
    let mut staged = vec![0u8; file_rows * file_cols];
    if file_cols > 0 {
        for chunk in staged.chunks_exact_mut(file_cols) {
            fill(&mut reader, chunk, "the cell data")?;
            if cells_to_ignore > 0 {
                skip(&mut reader, cells_to_ignore)?;
            }
        }
    }

    if smaller {
        grid.set_all(Cell::Dead);
    }
    if file_cols > 0 {
        for (r, bytes) in staged.chunks_exact(file_cols).enumerate() {
            let start = (pad_row + r) * cols + pad_col;
            for (dst, &byte) in grid.current[start..start + file_cols].iter_mut().zip(bytes) {
                *dst = Cell::from_byte(byte);
            }
        }
    }
    grid.reset_generation();

    log::info!(
        "loaded {declared_rows}x{declared_cols} grid into {rows}x{cols} at ({pad_row}, {pad_col})"
    );
    Ok(())
}

pub fn save_to_path<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_grid(grid, BufWriter::new(file))?;
    log::info!("saved {}x{} grid to {}", grid.rows(), grid.cols(), path.display());
    Ok(())
}

pub fn load_from_path<P: AsRef<Path>, D: LoadDecisions>(
    path: P,
    grid: &mut Grid,
    decisions: D,
) -> Result<()> {
    let file = File::open(path.as_ref())?;
    read_grid(BufReader::new(file), grid, decisions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDecisions {
        answers: FixedDecisions,
        asked: Vec<&'static str>,
    }

    impl LoadDecisions for RecordingDecisions {
        fn clip_rows(&mut self, _file_rows: usize, _grid_rows: usize) -> bool {
            self.asked.push("rows");
            self.answers.clip_rows
        }

        fn clip_cols(&mut self, _file_cols: usize, _grid_cols: usize) -> bool {
            self.asked.push("cols");
            self.answers.clip_cols
        }

        fn center(&mut self, _content: (usize, usize), _grid: (usize, usize)) -> bool {
            self.asked.push("center");
            self.answers.center
        }
    }

    fn file_bytes(rows: i32, cols: i32, cells: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&rows.to_le_bytes());
        out.extend_from_slice(&cols.to_le_bytes());
        out.extend_from_slice(cells);
        out
    }

    fn bytes_of(grid: &Grid) -> Vec<u8> {
        grid.cells().iter().map(|c| c.as_byte()).collect()
    }

    #[test]
    fn header_is_little_endian_rows_then_cols() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(0, 1, Cell::Alive);
        grid.set(1, 2, Cell::Alive);
        let mut out = Vec::new();
        write_grid(&grid, &mut out).unwrap();
        assert_eq!(out, file_bytes(2, 3, &[0, 1, 0, 0, 0, 1]));
    }

    #[test]
    fn exact_fit_asks_nothing() {
        let bytes = file_bytes(2, 2, &[1, 0, 0, 1]);
        let mut grid = Grid::new(2, 2).unwrap();
        let mut decisions = RecordingDecisions::default();
        read_grid(&bytes[..], &mut grid, &mut decisions).unwrap();
        assert!(decisions.asked.is_empty());
        assert_eq!(bytes_of(&grid), vec![1, 0, 0, 1]);
    }

    #[test]
    fn questions_come_in_order() {
        // 3x5 file into 2x2 grid with both clips accepted: no center question
        let bytes = file_bytes(3, 5, &[1; 15]);
        let mut grid = Grid::new(2, 2).unwrap();
        let mut decisions = RecordingDecisions {
            answers: FixedDecisions::accept_all(),
            ..Default::default()
        };
        read_grid(&bytes[..], &mut grid, &mut decisions).unwrap();
        assert_eq!(decisions.asked, vec!["rows", "cols"]);
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn column_clip_skips_row_tails() {
        let bytes = file_bytes(2, 4, &[1, 0, 7, 7, 0, 1, 7, 7]);
        let mut grid = Grid::new(2, 2).unwrap();
        let decisions = FixedDecisions {
            clip_cols: true,
            ..Default::default()
        };
        read_grid(&bytes[..], &mut grid, decisions).unwrap();
        assert_eq!(bytes_of(&grid), vec![1, 0, 0, 1]);
    }

    #[test]
    fn declined_column_clip_leaves_grid() {
        let bytes = file_bytes(1, 9, &[1; 9]);
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(2, 2, Cell::Alive);
        grid.step();
        let before = grid.clone();
        let err = read_grid(&bytes[..], &mut grid, FixedDecisions::default()).unwrap_err();
        assert!(matches!(err, LifeError::Declined(Reconcile::Cols)));
        assert_eq!(grid.cells(), before.cells());
        assert_eq!(grid.generation(), before.generation());
    }

    #[test]
    fn small_content_at_origin_clears_the_rest() {
        let bytes = file_bytes(1, 2, &[1, 1]);
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_all(Cell::Alive);
        let mut decisions = RecordingDecisions::default();
        read_grid(&bytes[..], &mut grid, &mut decisions).unwrap();
        assert_eq!(decisions.asked, vec!["center"]);
        assert_eq!(bytes_of(&grid), vec![1, 1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn small_content_centered() {
        let bytes = file_bytes(1, 1, &[1]);
        let mut grid = Grid::new(5, 4).unwrap();
        let decisions = FixedDecisions {
            center: true,
            ..Default::default()
        };
        read_grid(&bytes[..], &mut grid, decisions).unwrap();
        // pad = ((5-1)/2, (4-1)/2) = (2, 1)
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.get(2, 1), Cell::Alive);
    }

    #[test]
    fn clipped_rows_then_centered_columns() {
        let bytes = file_bytes(4, 2, &[1; 8]);
        let mut grid = Grid::new(2, 6).unwrap();
        read_grid(&bytes[..], &mut grid, FixedDecisions::accept_all()).unwrap();
        // only columns are short, pad_col = (6-2)/2 = 2
        assert_eq!(bytes_of(&grid), vec![0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn negative_header_is_malformed() {
        let bytes = file_bytes(-1, 3, &[]);
        let mut grid = Grid::new(2, 2).unwrap();
        let err = read_grid(&bytes[..], &mut grid, FixedDecisions::accept_all()).unwrap_err();
        assert!(matches!(err, LifeError::Malformed(_)));
    }

    #[test]
    fn short_header_is_malformed() {
        let mut grid = Grid::new(2, 2).unwrap();
        let err = read_grid(&[1u8, 0, 0][..], &mut grid, FixedDecisions::default()).unwrap_err();
        assert!(matches!(err, LifeError::Malformed(_)));
    }

    #[test]
    fn truncated_payload_leaves_grid() {
        let bytes = file_bytes(3, 3, &[1, 1, 1, 1]);
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.step();
        let before = grid.clone();
        let err = read_grid(&bytes[..], &mut grid, FixedDecisions::default()).unwrap_err();
        assert!(matches!(err, LifeError::Malformed(_)));
        assert_eq!(grid.cells(), before.cells());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn truncated_clipped_tail_is_malformed() {
        // second row's ignored tail is missing
        let bytes = file_bytes(2, 4, &[1, 1, 0, 0, 1, 1, 0]);
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_all(Cell::Alive);
        grid.step();
        grid.set(0, 1, Cell::Dead);
        let before = grid.clone();
        let err = read_grid(&bytes[..], &mut grid, FixedDecisions::accept_all()).unwrap_err();
        assert!(matches!(err, LifeError::Malformed(_)));
        assert_eq!(grid.cells(), before.cells());
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn multi_row_write_is_row_major() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.set(2, 1, Cell::Alive);
        let mut out = Vec::new();
        write_grid(&grid, &mut out).unwrap();
        assert_eq!(out, file_bytes(3, 2, &[1, 0, 0, 0, 0, 1]));
    }

    #[test]
    fn huge_declared_rows_only_read_what_fits() {
        let bytes = file_bytes(i32::MAX, 2, &[1, 0, 0, 1]);
        let mut grid = Grid::new(2, 2).unwrap();
        read_grid(&bytes[..], &mut grid, FixedDecisions::accept_all()).unwrap();
        assert_eq!(bytes_of(&grid), vec![1, 0, 0, 1]);
    }

    #[test]
    fn empty_content_clears_grid() {
        let bytes = file_bytes(0, 0, &[]);
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_all(Cell::Alive);
        read_grid(&bytes[..], &mut grid, FixedDecisions::accept_all()).unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut grid = Grid::new(2, 2).unwrap();
        let err = load_from_path(
            "/nonexistent/dir/grid.life",
            &mut grid,
            FixedDecisions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LifeError::Io(_)));
    }
}
