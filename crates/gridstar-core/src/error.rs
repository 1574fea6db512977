use thiserror::Error;

use crate::geom::Coord;

/// Errors raised by grid lookups and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate fell outside the `dim × dim` grid.
    #[error("coordinate {coord} is outside the {dim}x{dim} grid")]
    OutOfBounds { coord: Coord, dim: usize },
    /// A pixel position fell outside the drawable area.
    #[error("pixel ({x}, {y}) is outside the {width}px grid")]
    PixelOutOfBounds { x: u32, y: u32, width: u32 },
    /// The configured dimension cannot hold a grid.
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),
    /// A text layout was not square or contained an unknown glyph.
    #[error("invalid grid layout: {0}")]
    InvalidLayout(String),
}
