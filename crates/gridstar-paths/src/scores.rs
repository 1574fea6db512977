use gridstar_core::Coord;

use crate::{Cost, UNREACHABLE};

/// Per-cell `g` (best known cost from the start) and `f` (`g` plus the
/// heuristic estimate to the goal), both [`UNREACHABLE`] until relaxed.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    g: Vec<Cost>,
    f: Vec<Cost>,
    dim: usize,
}

impl ScoreTable {
    /// A table for a `dim × dim` grid with every score at infinity.
    pub fn new(dim: usize) -> Self {
        Self {
            g: vec![UNREACHABLE; dim * dim],
            f: vec![UNREACHABLE; dim * dim],
            dim,
        }
    }

    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        c.index_in(self.dim)
    }

    /// Best known cost from the start to `c`.
    #[inline]
    pub fn g(&self, c: Coord) -> Cost {
        self.idx(c).map_or(UNREACHABLE, |i| self.g[i])
    }

    /// Estimated total cost through `c`.
    #[inline]
    pub fn f(&self, c: Coord) -> Cost {
        self.idx(c).map_or(UNREACHABLE, |i| self.f[i])
    }

    /// Seed the start cell: `g = 0`, `f = estimate`.
    pub fn seed(&mut self, start: Coord, estimate: Cost) {
        if let Some(i) = self.idx(start) {
            self.g[i] = 0;
            self.f[i] = estimate;
        }
    }

    /// Lower `g[c]` to `g` if that is a strict improvement, setting
    /// `f[c] = g + estimate()`. Returns whether the scores changed.
    pub fn relax(&mut self, c: Coord, g: Cost, estimate: impl FnOnce() -> Cost) -> bool {
        let Some(i) = self.idx(c) else {
            return false;
        };
        if g >= self.g[i] {
            return false;
        }
        self.g[i] = g;
        self.f[i] = g.saturating_add(estimate());
        true
    }
}
