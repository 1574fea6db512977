//! Step-wise A* shortest-path search on square grids.
//!
//! The search reads a [`gridstar_core::Grid`], tags the cells it discovers,
//! expands and finally routes through, and reports each expansion to an
//! optional [`StepObserver`] that may cancel it:
//!
//! - **A\*** with a pluggable [`Heuristic`] ([`search`], [`AStar`])
//! - **Path reconstruction** from the predecessor map ([`reconstruct`])
//! - **BFS** distances, an independent optimality oracle ([`bfs_distance`])
//!
//! Moves are 4-directional and all cost 1.

mod astar;
mod bfs;
mod error;
mod frontier;
mod heuristic;
mod reconstruct;
mod scores;

pub use astar::{
    AStar, NoObserver, SearchOutcome, SearchState, Step, StepObserver, find_path, search, solve,
};
pub use bfs::{bfs_distance, bfs_map};
pub use error::SearchError;
pub use frontier::{Entry, Frontier};
pub use heuristic::{Heuristic, Manhattan, manhattan};
pub use reconstruct::{CameFrom, reconstruct};
pub use scores::ScoreTable;

/// Path cost in steps.
pub type Cost = i32;

/// Sentinel score of a cell no path has reached yet.
pub const UNREACHABLE: Cost = i32::MAX;
