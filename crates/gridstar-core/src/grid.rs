//! The [`Grid`] type — an N×N matrix of [`Cell`]s.
//!
//! Adjacency is never cached: [`Grid::neighbors`] reads the current barrier
//! tags every time, so edits made between searches are always honored.

use crate::cell::{Cell, CellStatus};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::Coord;

/// A square grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    dim: usize,
}

impl Grid {
    /// Create a `dim × dim` grid of unvisited cells.
    pub fn new(dim: usize) -> Self {
        let mut cells = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                cells.push(Cell::new(Coord::new(row as i32, col as i32)));
            }
        }
        Self { cells, dim }
    }

    /// Create a grid sized by a validated [`GridConfig`].
    pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self::new(config.dimension))
    }

    /// Parse a square text layout.
    ///
    /// `.` is unvisited, `#` a barrier, `S` the start and `E` the end.
    /// Surrounding whitespace on each line is ignored, blank lines skipped.
    pub fn from_layout(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let dim = lines.len();
        let mut grid = Self::new(dim);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != dim {
                return Err(GridError::InvalidLayout(format!(
                    "line {row} has {width} cells, expected {dim}"
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let status = match ch {
                    '.' => CellStatus::Unvisited,
                    '#' => CellStatus::Barrier,
                    'S' => CellStatus::Start,
                    'E' => CellStatus::End,
                    other => {
                        return Err(GridError::InvalidLayout(format!(
                            "unknown glyph {other:?} at ({row}, {col})"
                        )));
                    }
                };
                grid.cells[row * dim + col].status = status;
            }
        }
        Ok(grid)
    }

    /// Cells per side.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.index(c).is_some()
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        c.index_in(self.dim)
    }

    #[inline]
    fn checked_index(&self, c: Coord) -> Result<usize, GridError> {
        self.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            dim: self.dim,
        })
    }

    /// The cell at `c`.
    pub fn cell(&self, c: Coord) -> Result<&Cell, GridError> {
        let i = self.checked_index(c)?;
        Ok(&self.cells[i])
    }

    /// The status tag at `c`.
    pub fn status(&self, c: Coord) -> Result<CellStatus, GridError> {
        self.cell(c).map(|cell| cell.status)
    }

    /// Overwrite the status tag at `c`.
    pub fn set_status(&mut self, c: Coord, status: CellStatus) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        self.cells[i].status = status;
        Ok(())
    }

    pub fn set_start(&mut self, c: Coord) -> Result<(), GridError> {
        self.set_status(c, CellStatus::Start)
    }

    pub fn set_end(&mut self, c: Coord) -> Result<(), GridError> {
        self.set_status(c, CellStatus::End)
    }

    pub fn set_barrier(&mut self, c: Coord) -> Result<(), GridError> {
        self.set_status(c, CellStatus::Barrier)
    }

    /// Return the cell at `c` to `Unvisited`.
    pub fn clear(&mut self, c: Coord) -> Result<(), GridError> {
        self.set_status(c, CellStatus::Unvisited)
    }

    /// Record a search side effect (Open, Closed or Path) at `c`.
    ///
    /// Barrier, Start and End tags are left untouched; returns whether the
    /// tag was written.
    pub fn mark_visit(&mut self, c: Coord, status: CellStatus) -> Result<bool, GridError> {
        debug_assert!(status.is_visit(), "{status:?} is not a visitation tag");
        let i = self.checked_index(c)?;
        let cell = &mut self.cells[i];
        if cell.status.is_fixed() {
            return Ok(false);
        }
        cell.status = status;
        Ok(true)
    }

    /// Return every cell to `Unvisited`.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.status = CellStatus::Unvisited;
        }
    }

    /// Drop Open, Closed and Path tags, keeping barriers and endpoints.
    pub fn reset_visits(&mut self) {
        for cell in &mut self.cells {
            if cell.status.is_visit() {
                cell.status = CellStatus::Unvisited;
            }
        }
    }

    /// Append the traversable neighbours of `c` to `buf`, in the order down,
    /// up, right, left. The caller clears `buf` beforehand.
    pub fn neighbors_into(&self, c: Coord, buf: &mut Vec<Coord>) -> Result<(), GridError> {
        self.checked_index(c)?;
        for n in c.neighbors_4() {
            if let Some(i) = self.index(n) {
                if self.cells[i].status.is_traversable() {
                    buf.push(n);
                }
            }
        }
        Ok(())
    }

    /// Traversable neighbours of `c` (down, up, right, left).
    pub fn neighbors(&self, c: Coord) -> Result<Vec<Coord>, GridError> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(c, &mut buf)?;
        Ok(buf)
    }

    /// First cell (row-major) carrying `status`.
    pub fn find(&self, status: CellStatus) -> Option<Coord> {
        self.cells
            .iter()
            .find(|cell| cell.status == status)
            .map(|cell| cell.coord)
    }

    /// Number of cells carrying `status`.
    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|cell| cell.status == status).count()
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Iterator over rows, each a slice of `dim` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dim.max(1))
    }
}
