//! Grid and pathfinding error types.

use thiserror::Error;

use gs_core::{AgentId, Pos};

/// Errors produced by [`GridWorld`](crate::GridWorld).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("position {0} lies outside the bounded grid")]
    OutOfBounds(Pos),

    #[error("{0} is already placed at {1}")]
    AlreadyPlaced(AgentId, Pos),

    #[error("{0} is not placed on the grid")]
    NotPlaced(AgentId),
}

pub type GridResult<T> = Result<T, GridError>;

/// Errors produced by a [`Pathfinder`](crate::Pathfinder).
///
/// `NotFound` is an expected outcome, not a failure: search agents treat it
/// as "idle this tick, retry next tick".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no reachable target from {start}")]
    NotFound { start: Pos },

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type SearchResult<T> = Result<T, SearchError>;
