use gridstar_core::Coord;

use crate::Cost;

/// Distance estimate guiding the search order.
///
/// Implementations must be admissible (never overestimate the true number
/// of steps) and consistent (`h(a) <= 1 + h(b)` for adjacent `a`, `b`) for
/// the returned paths to be shortest. This is not checked at runtime.
pub trait Heuristic {
    /// Estimated cost from `from` to `to`. Must be non-negative.
    fn estimate(&self, from: Coord, to: Coord) -> Cost;
}

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> Cost {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// The default heuristic: [`manhattan`] distance, exact on an open 4-way grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> Cost {
        manhattan(from, to)
    }
}

impl<F> Heuristic for F
where
    F: Fn(Coord, Coord) -> Cost,
{
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> Cost {
        self(from, to)
    }
}
