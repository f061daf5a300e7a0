//! Error types.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! local and recoverable: none of them leave a session or a best solution
//! in a partially updated state.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

/// Errors raised by the tour optimization engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A point index outside the current point range.
    #[error("point index {index} out of range for {len} points")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of points in the instance.
        len: usize,
    },

    /// A coordinate that is NaN or infinite.
    #[error("point ({x}, {y}) has a non-finite coordinate")]
    InvalidPoint {
        /// X coordinate as supplied.
        x: f64,
        /// Y coordinate as supplied.
        y: f64,
    },

    /// An index sequence that is not a permutation of `0..n`.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// Out-of-range or nonsensical tuning parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Too few points to build a meaningful closed tour.
    #[error("at least {required} points are required, found {found}")]
    InsufficientPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points available.
        found: usize,
    },

    /// Every tour had an infinite perimeter: the coordinates are finite but
    /// their pairwise distances overflow `f64`.
    #[error("no tour with a finite perimeter exists; point distances overflow")]
    NoFiniteTour,

    /// `start()` was called while a run is still active.
    #[error("an optimization run is already active; cancel or reset it first")]
    AlreadyRunning,

    /// `step()` was called before any run was started.
    #[error("no optimization run has been started")]
    NotRunning,
}

impl TspError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub(crate) fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }
}
