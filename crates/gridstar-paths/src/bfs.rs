use std::collections::VecDeque;

use gridstar_core::{Coord, Grid, GridError};

use crate::{Cost, UNREACHABLE};

/// Breadth-first distance map from `source`, indexed like [`Grid::index`].
///
/// Every step costs 1; unreached cells hold [`UNREACHABLE`]. Barriers are
/// never entered, though a barrier `source` still gets distance 0.
pub fn bfs_map(grid: &Grid, source: Coord) -> Result<Vec<Cost>, GridError> {
    let Some(si) = grid.index(source) else {
        return Err(GridError::OutOfBounds {
            coord: source,
            dim: grid.dim(),
        });
    };
    let mut dist = vec![UNREACHABLE; grid.len()];
    dist[si] = 0;

    let mut queue = VecDeque::from([source]);
    let mut nbuf = Vec::with_capacity(4);

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = grid.index(cp) else {
            continue;
        };
        let current_dist = dist[ci];

        nbuf.clear();
        grid.neighbors_into(cp, &mut nbuf)?;

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = current_dist + 1;
            queue.push_back(np);
        }
    }

    Ok(dist)
}

/// Number of steps on a shortest path from `from` to `to`, or `None` if
/// `to` cannot be reached.
pub fn bfs_distance(grid: &Grid, from: Coord, to: Coord) -> Result<Option<Cost>, GridError> {
    grid.cell(to)?;
    let dist = bfs_map(grid, from)?;
    Ok(grid
        .index(to)
        .map(|i| dist[i])
        .filter(|&d| d != UNREACHABLE))
}
