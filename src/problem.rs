//! Problem definition and solving API.
//!
//! The `Problem` struct represents a linear program with:
//! - An objective (minimize or maximize `c'x`)
//! - A set of linear constraints
//! - Implicit non-negativity `x >= 0`
//!
//! Use the builder pattern to construct problems:
//! ```ignore
//! let solution = Problem::maximize(vec![3.0, 2.0])
//!     .subject_to([constraint1, constraint2])
//!     .solve()?;
//! ```

use crate::constraints::Constraint;
use crate::error::Result;
use crate::solver::tableau::validate_dimensions;
use crate::solver::{solve_observed, NoopObserver, Settings, Solution, SolveObserver};

/// Objective type for linear programs.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// Minimize `c'x` (internally converted to maximizing `-c'x`).
    Minimize(Vec<f64>),
    /// Maximize `c'x`.
    Maximize(Vec<f64>),
}

impl Objective {
    /// Get the objective coefficients.
    pub fn coefficients(&self) -> &[f64] {
        match self {
            Objective::Minimize(c) | Objective::Maximize(c) => c,
        }
    }

    /// Check if this is a minimization.
    pub fn is_minimize(&self) -> bool {
        matches!(self, Objective::Minimize(_))
    }

    /// Check if this is a maximization.
    pub fn is_maximize(&self) -> bool {
        matches!(self, Objective::Maximize(_))
    }
}

/// A linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// The objective to optimize.
    pub objective: Objective,
    /// The constraints.
    pub constraints: Vec<Constraint>,
}

impl Problem {
    /// Create a minimization problem.
    pub fn minimize(objective: impl Into<Vec<f64>>) -> ProblemBuilder {
        ProblemBuilder {
            objective: Objective::Minimize(objective.into()),
            constraints: Vec::new(),
        }
    }

    /// Create a maximization problem.
    pub fn maximize(objective: impl Into<Vec<f64>>) -> ProblemBuilder {
        ProblemBuilder {
            objective: Objective::Maximize(objective.into()),
            constraints: Vec::new(),
        }
    }

    /// Number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.objective.coefficients().len()
    }

    /// Check that the problem is well-formed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the objective or the constraint list is
    /// empty, a constraint has the wrong number of coefficients, or any value
    /// is not finite.
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.objective.coefficients(), &self.constraints)
    }

    /// Objective value `c'x` at `x`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.objective
            .coefficients()
            .iter()
            .zip(x)
            .map(|(c, xi)| c * xi)
            .sum()
    }

    /// Check whether `x` satisfies every constraint and `x >= 0` within `tol`.
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.num_variables()
            && x.iter().all(|&xi| xi >= -tol)
            && self.constraints.iter().all(|c| c.is_satisfied_by(x, tol))
    }

    /// Solve the problem with default settings.
    pub fn solve(&self) -> Result<Solution> {
        self.solve_with(Settings::default())
    }

    /// Solve the problem with custom settings.
    ///
    /// Infeasible and unbounded problems are returned as `Ok` with the
    /// corresponding [`SolveStatus`](crate::SolveStatus).
    pub fn solve_with(&self, settings: Settings) -> Result<Solution> {
        self.solve_observed(&settings, &mut NoopObserver)
    }

    /// Solve the problem, reporting progress to `observer`.
    pub fn solve_observed(
        &self,
        settings: &Settings,
        observer: &mut dyn SolveObserver,
    ) -> Result<Solution> {
        solve_observed(
            self.objective.coefficients(),
            &self.constraints,
            self.objective.is_maximize(),
            settings,
            observer,
        )
    }

    /// Solve the problem on the Tokio blocking pool.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[cfg(feature = "async")]
    pub fn spawn(&self, settings: Settings) -> crate::solver::SolveTask {
        crate::solver::SolveTask::spawn(self.clone(), settings)
    }
}

/// Builder for constructing problems.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    objective: Objective,
    constraints: Vec<Constraint>,
}

impl ProblemBuilder {
    /// Add constraints to the problem.
    pub fn subject_to(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Add a single constraint.
    pub fn constraint(mut self, c: Constraint) -> Self {
        self.constraints.push(c);
        self
    }

    /// Build the problem.
    pub fn build(self) -> Problem {
        Problem {
            objective: self.objective,
            constraints: self.constraints,
        }
    }

    /// Build and solve the problem with default settings.
    pub fn solve(self) -> Result<Solution> {
        self.build().solve()
    }

    /// Build and solve the problem with custom settings.
    pub fn solve_with(self, settings: Settings) -> Result<Solution> {
        self.build().solve_with(settings)
    }
}
