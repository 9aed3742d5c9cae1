//! Error types for the core geometry and star model.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the geometry/graph layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Step-size inference was asked to work on a graph without edges.
    #[error("internal logic error: no edges found in circular graph of {points} points")]
    NoEdges { points: usize },

    /// A star literal could not be parsed.
    #[error("invalid star literal: {text:?}")]
    InvalidStar { text: String },

    /// An edge references a point that does not exist.
    #[error("edge ({a}, {b}) references a point outside 0..{points}")]
    EdgeOutOfRange { a: usize, b: usize, points: usize },
}
