//! The [`Cell`] type — a grid position with a status tag.

use crate::geom::Coord;

/// What a cell currently is, from the point of view of editing and search.
///
/// Tags are exclusive. Presentation layers map them to colors or glyphs;
/// the search never reads colors back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    #[default]
    Unvisited,
    Barrier,
    Start,
    End,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded; all neighbours relaxed.
    Closed,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellStatus {
    /// Whether the search may step onto a cell with this tag.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Barrier)
    }

    /// Whether this tag is a search side effect (Open, Closed, Path).
    #[inline]
    pub const fn is_visit(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }

    /// Whether this tag was placed by the editor (Barrier, Start, End).
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Barrier | Self::Start | Self::End)
    }
}

/// A single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub coord: Coord,
    pub status: CellStatus,
}

impl Cell {
    /// An unvisited cell at `coord`.
    #[inline]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            status: CellStatus::Unvisited,
        }
    }

    #[inline]
    pub const fn is_barrier(&self) -> bool {
        matches!(self.status, CellStatus::Barrier)
    }
}
