//! Grid coordinates: [`Coord`].
//!
//! Cells are addressed by `(row, col)`. Rows grow downwards, columns grow to
//! the right.

use std::fmt;
use std::ops::{Add, Sub};

/// A `(row, col)` grid coordinate.
///
/// Coordinates are signed so that neighbor arithmetic can step past the
/// edges; bounds are checked by the owning [`Grid`](crate::Grid).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Cardinal offsets in adjacency order: down, up, right, left.
    pub const CARDINALS: [Coord; 4] = [
        Coord::new(1, 0),
        Coord::new(-1, 0),
        Coord::new(0, 1),
        Coord::new(0, -1),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours (down, up, right, left), unchecked.
    #[inline]
    pub fn neighbors_4(self) -> [Coord; 4] {
        Self::CARDINALS.map(|d| self + d)
    }

    /// Row-major index in a `dim × dim` square, or `None` outside it.
    #[inline]
    pub fn index_in(self, dim: usize) -> Option<usize> {
        let inside = self.row >= 0
            && self.col >= 0
            && (self.row as usize) < dim
            && (self.col as usize) < dim;
        inside.then(|| self.row as usize * dim + self.col as usize)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}
