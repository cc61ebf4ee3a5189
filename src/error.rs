//! Error types for lprust.

use thiserror::Error;

/// Error type for lprust operations.
///
/// Infeasible and unbounded problems are not errors; they are reported
/// through [`SolveStatus`](crate::solver::SolveStatus) on a successful solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LpError {
    /// The problem or settings are malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The iteration budget ran out before the solver reached a verdict.
    #[error("Failed to converge after {iterations} iterations")]
    FailedToConverge { iterations: usize },

    /// The solve was cancelled by an observer or by the async task handle.
    #[error("Solve was cancelled")]
    Cancelled,

    /// The background solve task panicked or was aborted.
    #[error("Solve task failed: {0}")]
    TaskFailed(String),
}

/// Result type for lprust operations.
pub type Result<T> = std::result::Result<T, LpError>;
