//! Solver settings.

use crate::error::{LpError, Result};

/// Default numerical tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration budget shared by both simplex phases.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Solver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Tolerance used for every sign, ratio and feasibility test.
    pub tolerance: f64,
    /// Maximum number of pivots across Phase I and Phase II.
    pub max_iterations: usize,
    /// Log every pivot at `debug` level instead of `trace`.
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            verbose: false,
        }
    }
}

impl Settings {
    /// Create settings with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numerical tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable verbose pivot logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject settings the solver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LpError::InvalidInput(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(LpError::InvalidInput(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
