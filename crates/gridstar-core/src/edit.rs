//! Device-free grid editing.
//!
//! [`Editor`] applies the point-and-click rules of an interactive grid
//! editor: the first painted cell becomes the start, the second the end, and
//! every later one a barrier. Erasing a cell forgets it as an endpoint.
//! Input handling (mouse buttons, key bindings) stays with the host.

use crate::cell::CellStatus;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::Coord;
use crate::grid::Grid;

/// What a [`Editor::paint`] call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Paint {
    Start,
    End,
    Barrier,
    /// The cell is the start or the end and was left alone.
    Ignored,
}

/// A grid plus the start / end bookkeeping of an editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: GridConfig,
    grid: Grid,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Editor {
    /// Start an editing session on an empty grid.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let grid = Grid::from_config(&config)?;
        Ok(Self {
            config,
            grid,
            start: None,
            end: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for searches. Editing through it bypasses the
    /// start / end bookkeeping.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// `(start, end)` once both are placed.
    pub fn endpoints(&self) -> Option<(Coord, Coord)> {
        self.start.zip(self.end)
    }

    /// Paint `c` following the start → end → barrier progression.
    pub fn paint(&mut self, c: Coord) -> Result<Paint, GridError> {
        self.grid.cell(c)?;
        let placed = if self.start.is_none() && self.end != Some(c) {
            self.grid.set_start(c)?;
            self.start = Some(c);
            Paint::Start
        } else if self.end.is_none() && self.start != Some(c) {
            self.grid.set_end(c)?;
            self.end = Some(c);
            Paint::End
        } else if self.start != Some(c) && self.end != Some(c) {
            self.grid.set_barrier(c)?;
            Paint::Barrier
        } else {
            Paint::Ignored
        };
        log::trace!("paint {c}: {placed:?}");
        Ok(placed)
    }

    /// Paint the cell under a pixel position.
    pub fn paint_pixel(&mut self, x: u32, y: u32) -> Result<Paint, GridError> {
        let c = self.config.cell_at_pixel(x, y)?;
        self.paint(c)
    }

    /// Reset `c` to unvisited, forgetting it as an endpoint.
    pub fn erase(&mut self, c: Coord) -> Result<(), GridError> {
        self.grid.clear(c)?;
        if self.start == Some(c) {
            self.start = None;
        } else if self.end == Some(c) {
            self.end = None;
        }
        log::trace!("erase {c}");
        Ok(())
    }

    /// Erase the cell under a pixel position.
    pub fn erase_pixel(&mut self, x: u32, y: u32) -> Result<(), GridError> {
        let c = self.config.cell_at_pixel(x, y)?;
        self.erase(c)
    }

    /// Discard everything and start over on an empty grid.
    pub fn clear(&mut self) {
        self.grid = Grid::new(self.config.dimension);
        self.start = None;
        self.end = None;
        log::debug!("grid cleared");
    }

    /// Drop the tags of a previous search and return the endpoints, if both
    /// are placed.
    pub fn prepare_search(&mut self) -> Option<(Coord, Coord)> {
        let endpoints = self.endpoints()?;
        self.grid.reset_visits();
        Some(endpoints)
    }

    /// Number of barrier cells.
    pub fn barriers(&self) -> usize {
        self.grid.count(CellStatus::Barrier)
    }
}
