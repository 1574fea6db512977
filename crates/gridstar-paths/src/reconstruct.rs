use std::collections::HashMap;

use gridstar_core::Coord;

/// Predecessor map: each discovered cell points at the cell it was best
/// reached from. The start has no entry.
pub type CameFrom = HashMap<Coord, Coord>;

/// Walk `came_from` back from `goal` until a cell with no predecessor.
///
/// The result runs goal-to-start and includes `goal` but not the start, so
/// its length is the number of moves. An unreached `goal` yields an empty
/// path.
pub fn reconstruct(came_from: &CameFrom, goal: Coord) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if path.len() >= came_from.len() {
            log::warn!("predecessor map loops back on itself at {current}");
            break;
        }
        path.push(current);
        current = prev;
    }
    path
}
