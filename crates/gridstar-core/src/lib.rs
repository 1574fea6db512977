//! **gridstar-core** — grid model for step-wise shortest-path search.
//!
//! This crate provides the types the search engine reads and tags:
//! coordinates, status-tagged cells, the square [`Grid`] with on-demand
//! 4-way adjacency, its construction [`GridConfig`], and an [`Editor`] that
//! applies interactive editing rules without any input device.

pub mod cell;
pub mod config;
pub mod edit;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellStatus};
pub use config::GridConfig;
pub use edit::{Editor, Paint};
pub use error::GridError;
pub use geom::Coord;
pub use grid::Grid;
