//! Grid construction parameters.

use crate::error::GridError;
use crate::geom::Coord;

/// Default number of rows (and columns).
pub const DEFAULT_DIMENSION: usize = 50;
/// Default drawable width in pixels.
pub const DEFAULT_WIDTH: u32 = 700;

/// Size of a grid and of the square area it is drawn into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Cells per side.
    pub dimension: usize,
    /// Side of the drawable area, in pixels.
    pub width: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            width: DEFAULT_WIDTH,
        }
    }
}

impl GridConfig {
    /// A config with `dimension` cells per side and the default width.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot be drawn.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.dimension == 0 {
            return Err(GridError::InvalidConfig("dimension must be positive".into()));
        }
        if i32::try_from(self.dimension).is_err() {
            return Err(GridError::InvalidConfig(format!(
                "dimension {} does not fit a coordinate",
                self.dimension
            )));
        }
        if (self.width as usize) < self.dimension {
            return Err(GridError::InvalidConfig(format!(
                "width {}px leaves no room for {} cells",
                self.width, self.dimension
            )));
        }
        Ok(())
    }

    /// Side of one cell in pixels (integer division, remainder unused).
    #[inline]
    pub fn cell_size(&self) -> u32 {
        match self.dimension {
            0 => 0,
            d => self.width / d as u32,
        }
    }

    /// Map a pixel position to the cell under it.
    ///
    /// The row follows the horizontal pixel axis and the column the vertical
    /// one, matching how cells are laid out when drawn (`x = row * size`).
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> Result<Coord, GridError> {
        let size = self.cell_size();
        let out = GridError::PixelOutOfBounds {
            x,
            y,
            width: self.width,
        };
        if size == 0 {
            return Err(out);
        }
        let (row, col) = ((x / size) as usize, (y / size) as usize);
        if row >= self.dimension || col >= self.dimension {
            return Err(out);
        }
        Ok(Coord::new(row as i32, col as i32))
    }
}
