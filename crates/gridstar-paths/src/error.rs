use gridstar_core::{Coord, GridError};
use thiserror::Error;

/// Reasons a search cannot start.
///
/// Running out of frontier or being cancelled are outcomes, not errors; see
/// [`SearchOutcome`](crate::SearchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The start or end cell is a barrier.
    #[error("endpoint {0} is a barrier")]
    BlockedEndpoint(Coord),
    /// The editor has no start or no end placed.
    #[error("both a start and an end must be placed before searching")]
    MissingEndpoint,
}
