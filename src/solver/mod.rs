//! Simplex solver for lprust.
//!
//! This module provides:
//! - Standard-form conversion into a dense tableau
//! - The shared pivot kernel (Bland's rule)
//! - Phase I / Phase II drivers and solution extraction
//! - Progress observers and, with the `async` feature, background solving

mod pivot;
pub mod progress;
pub mod settings;
pub mod simplex;
pub mod tableau;
#[cfg(feature = "async")]
pub mod task;

pub use progress::{NoopObserver, Phase, SolveEvent, SolveObserver};
pub use settings::Settings;
pub use simplex::{solve, solve_observed, Solution, SolveStatus};
pub use tableau::{SurplusVarInfo, Tableau, VariableLayout};
#[cfg(feature = "async")]
pub use task::{CancelHandle, SolveTask};
