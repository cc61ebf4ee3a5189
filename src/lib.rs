//! # lprust
//!
//! A dense two-phase tableau simplex solver for linear programs of the form
//!
//! ```text
//! maximize / minimize   c'x
//! subject to            a_i'x  {<=, =, >=}  b_i
//!                       x >= 0
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use lprust::prelude::*;
//!
//! // maximize 3x + 2y  s.t.  x + y <= 4,  2x + y <= 5
//! let solution = Problem::maximize(vec![3.0, 2.0])
//!     .subject_to([
//!         Constraint::leq(vec![1.0, 1.0], 4.0),
//!         Constraint::leq(vec![2.0, 1.0], 5.0),
//!     ])
//!     .solve()
//!     .unwrap();
//!
//! assert_eq!(solution.status, SolveStatus::Optimal);
//! assert!((solution.objective_value - 9.0).abs() < 1e-9);
//! ```
//!
//! ## Statuses and errors
//!
//! - `Optimal`, `Unbounded` and `Infeasible` are [`SolveStatus`] values on a
//!   successful solve
//! - Malformed input returns [`LpError::InvalidInput`] before any pivoting
//! - An exhausted iteration budget returns [`LpError::FailedToConverge`]
//!
//! ## Architecture
//!
//! - **Standard form**: negative right-hand sides are flipped, then slack,
//!   surplus and artificial columns are appended to a dense `nalgebra` tableau
//! - **Phase I** minimizes the sum of artificial variables
//! - **Phase II** restores the true objective and pivots to optimality
//! - **Bland's rule** for entering and leaving variables prevents cycling
//! - **Progress** is reported per pivot through [`SolveObserver`]; with the
//!   `async` feature, [`SolveTask`] runs a solve on the Tokio blocking pool

pub mod constraints;
pub mod error;
pub mod problem;
pub mod solver;

/// Prelude module for convenient imports.
///
/// ```
/// use lprust::prelude::*;
/// ```
pub mod prelude {
    // Constraints
    pub use crate::constraints::{Constraint, ConstraintExt, Relation};

    // Problem
    pub use crate::problem::{Objective, Problem, ProblemBuilder};

    // Solver
    pub use crate::solver::{
        NoopObserver, Phase, Settings, Solution, SolveEvent, SolveObserver, SolveStatus,
    };
    #[cfg(feature = "async")]
    pub use crate::solver::{CancelHandle, SolveTask};

    // Errors
    pub use crate::error::{LpError, Result};
}

// Re-export main types at crate root
pub use error::{LpError, Result};
pub use problem::Problem;
pub use solver::{solve, Settings, Solution, SolveEvent, SolveObserver, SolveStatus};
#[cfg(feature = "async")]
pub use solver::SolveTask;
