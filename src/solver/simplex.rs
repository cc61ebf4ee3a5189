//! Two-phase tableau simplex.
//!
//! Flow: standard form -> Phase I (only when artificial variables exist)
//! -> Phase II -> solution extraction.

use std::fmt;

use tracing::debug;

use super::pivot::{self, PivotOutcome, SolveContext};
use super::progress::{NoopObserver, Phase, SolveEvent, SolveObserver};
use super::settings::Settings;
use super::tableau::Tableau;
use crate::constraints::Constraint;
use crate::error::Result;

/// Terminal status of a successful solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Objective can be improved without bound.
    Unbounded,
    /// No point satisfies every constraint.
    Infeasible,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => f.write_str("optimal"),
            SolveStatus::Unbounded => f.write_str("unbounded"),
            SolveStatus::Infeasible => f.write_str("infeasible"),
        }
    }
}

/// Solution from the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status.
    pub status: SolveStatus,
    /// Values of the original variables. All zeros unless `status` is optimal.
    pub values: Vec<f64>,
    /// Objective value in the caller's sense.
    ///
    /// `+inf`/`-inf` for unbounded maximize/minimize, `NaN` when infeasible.
    pub objective_value: f64,
    /// Number of pivots performed.
    pub iterations: usize,
}

impl Solution {
    /// Check if the solve found an optimum.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Value of variable `index`, if it exists.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

/// Solve `maximize/minimize objective'x` subject to `constraints` and `x >= 0`.
pub fn solve(
    objective: &[f64],
    constraints: &[Constraint],
    maximize: bool,
    settings: &Settings,
) -> Result<Solution> {
    solve_observed(objective, constraints, maximize, settings, &mut NoopObserver)
}

/// Like [`solve`], reporting every phase and pivot to `observer`.
pub fn solve_observed(
    objective: &[f64],
    constraints: &[Constraint],
    maximize: bool,
    settings: &Settings,
    observer: &mut dyn SolveObserver,
) -> Result<Solution> {
    settings.validate()?;

    // Minimize c'x == -maximize (-c)'x
    let sign = if maximize { 1.0 } else { -1.0 };
    let max_objective: Vec<f64> = objective.iter().map(|c| sign * c).collect();

    let mut tableau = Tableau::from_problem(&max_objective, constraints)?;
    let mut ctx = SolveContext::new(settings, observer, sign);

    debug!(
        component = "simplex",
        operation = "solve",
        status = "start",
        variables = objective.len(),
        constraints = constraints.len(),
        maximize,
        "Starting simplex solve"
    );

    if tableau.has_artificials() && !phase_one(&mut tableau, &mut ctx)? {
        return finish(
            &mut ctx,
            Solution {
                status: SolveStatus::Infeasible,
                values: vec![0.0; objective.len()],
                objective_value: f64::NAN,
                iterations: 0,
            },
        );
    }

    let outcome = phase_two(&mut tableau, &mut ctx)?;
    let solution = match outcome {
        PivotOutcome::Optimal => {
            let values = extract_solution(&tableau, settings.tolerance);
            let objective_value = objective.iter().zip(&values).map(|(c, x)| c * x).sum();
            Solution {
                status: SolveStatus::Optimal,
                values,
                objective_value,
                iterations: 0,
            }
        }
        PivotOutcome::Unbounded => Solution {
            status: SolveStatus::Unbounded,
            values: vec![0.0; objective.len()],
            objective_value: sign * f64::INFINITY,
            iterations: 0,
        },
    };
    finish(&mut ctx, solution)
}

fn finish(ctx: &mut SolveContext<'_>, mut solution: Solution) -> Result<Solution> {
    solution.iterations = ctx.iterations;
    debug!(
        component = "simplex",
        operation = "solve",
        status = %solution.status,
        iterations = solution.iterations,
        objective = solution.objective_value,
        "Completed simplex solve"
    );
    ctx.emit(SolveEvent::Finished {
        status: solution.status,
        iterations: solution.iterations,
    })?;
    Ok(solution)
}

/// Drive the artificial variables to zero. Returns `false` if infeasible.
fn phase_one(tableau: &mut Tableau, ctx: &mut SolveContext<'_>) -> Result<bool> {
    let obj = tableau.objective_row();
    let layout = *tableau.layout();

    // maximize -sum(artificials): +1 in every artificial column
    tableau.matrix.row_mut(obj).fill(0.0);
    for j in layout.artificial_start()..layout.total() {
        tableau.matrix[(obj, j)] = 1.0;
    }
    // Zero the reduced cost of every basic artificial
    for i in 0..tableau.num_rows() {
        if layout.is_artificial(tableau.basis[i]) {
            for j in 0..tableau.matrix.ncols() {
                let delta = tableau.matrix[(i, j)];
                tableau.matrix[(obj, j)] -= delta;
            }
        }
    }

    let phase = Phase::One;
    let outcome = pivot::run(tableau, phase, ctx)?;
    let infeasibility = tableau.objective_value().abs();
    debug!(
        component = "simplex",
        phase = %phase,
        outcome = ?outcome,
        infeasibility,
        iterations = ctx.iterations,
        "Phase I finished"
    );

    Ok(infeasibility <= ctx.settings.tolerance)
}

/// Restore the true objective and pivot to optimality.
fn phase_two(tableau: &mut Tableau, ctx: &mut SolveContext<'_>) -> Result<PivotOutcome> {
    let tol = ctx.settings.tolerance;
    let layout = *tableau.layout();
    let obj = tableau.objective_row();
    let rhs_col = layout.rhs_col();

    // Evict artificials still basic at zero
    for row in 0..tableau.num_rows() {
        if !layout.is_artificial(tableau.basis[row]) {
            continue;
        }
        let replacement = (0..layout.artificial_start())
            .find(|&j| !tableau.is_basic(j) && tableau.matrix[(row, j)].abs() > tol);
        match replacement {
            Some(col) => ctx.step(tableau, Phase::One, row, col)?,
            None => {
                debug!(
                    component = "simplex",
                    row,
                    "Artificial variable cannot be evicted, constraint row is redundant"
                );
            }
        }
    }

    // Purge artificial columns everywhere, objective row included
    for j in layout.artificial_start()..layout.total() {
        tableau.matrix.column_mut(j).fill(0.0);
    }

    // Restore the true objective
    for j in (0..layout.artificial_start()).chain(std::iter::once(rhs_col)) {
        tableau.matrix[(obj, j)] = tableau.original_objective[j];
    }

    // Zero the reduced cost of every basic variable
    for i in 0..tableau.num_rows() {
        let b = tableau.basis[i];
        let coef = tableau.matrix[(obj, b)];
        if coef == 0.0 {
            continue;
        }
        for j in 0..tableau.matrix.ncols() {
            let delta = coef * tableau.matrix[(i, j)];
            tableau.matrix[(obj, j)] -= delta;
        }
        tableau.matrix[(obj, b)] = 0.0;
    }

    pivot::run(tableau, Phase::Two, ctx)
}

/// Read the original variables from a final tableau.
///
/// Non-basic variables are zero, except that a single-variable `>=` row whose
/// surplus is basic forces its variable up to the row's bound.
pub(crate) fn extract_solution(tableau: &Tableau, tol: f64) -> Vec<f64> {
    let layout = tableau.layout();
    let mut values = vec![0.0; layout.original];

    for (row, &col) in tableau.basis().iter().enumerate() {
        if layout.is_original(col) {
            values[col] = tableau.rhs(row);
        }
    }

    for info in tableau.surplus_info() {
        let support: Vec<usize> = info
            .coefficients
            .iter()
            .enumerate()
            .filter(|(_, a)| a.abs() > tol)
            .map(|(j, _)| j)
            .collect();
        let [var] = support[..] else {
            continue;
        };

        let coef = info.coefficients[var];
        if tableau.is_basic(var)
            || values[var].abs() > tol
            || !tableau.is_basic(info.surplus_col)
            || coef <= tol
        {
            continue;
        }

        let bound = info.rhs / coef;
        debug!(
            component = "simplex",
            operation = "extract",
            variable = var,
            row = info.row,
            bound,
            "Restoring lower bound of non-basic variable"
        );
        values[var] = bound;
    }

    values
}
