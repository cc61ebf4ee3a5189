//! Pivot kernel shared by both simplex phases.
//!
//! Entering and leaving variables follow Bland's rule, which guarantees
//! termination on degenerate problems.

use std::ops::ControlFlow;

use tracing::{debug, trace, warn};

use super::progress::{Phase, SolveEvent, SolveObserver};
use super::settings::Settings;
use super::tableau::Tableau;
use crate::error::{LpError, Result};

/// Terminal state of a pivot loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotOutcome {
    /// No entering column: the current basis is optimal.
    Optimal,
    /// An entering column has no positive entry.
    Unbounded,
}

/// State shared by every pivot of one solve call.
pub(crate) struct SolveContext<'a> {
    pub settings: &'a Settings,
    pub observer: &'a mut dyn SolveObserver,
    /// Pivots performed so far across all phases.
    pub iterations: usize,
    /// Multiplier mapping the Phase II tableau value to the caller's sense.
    pub objective_sign: f64,
}

impl<'a> SolveContext<'a> {
    pub fn new(
        settings: &'a Settings,
        observer: &'a mut dyn SolveObserver,
        objective_sign: f64,
    ) -> Self {
        SolveContext {
            settings,
            observer,
            iterations: 0,
            objective_sign,
        }
    }

    /// Forward an event to the observer.
    pub fn emit(&mut self, event: SolveEvent) -> Result<()> {
        match self.observer.on_event(&event) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => {
                debug!(
                    component = "pivot",
                    operation = "emit",
                    iterations = self.iterations,
                    "Solve cancelled by observer"
                );
                Err(LpError::Cancelled)
            }
        }
    }

    /// Pivot `(row, col)` and report it.
    pub fn step(
        &mut self,
        tableau: &mut Tableau,
        phase: Phase,
        row: usize,
        col: usize,
    ) -> Result<()> {
        if self.iterations >= self.settings.max_iterations {
            warn!(
                component = "pivot",
                phase = %phase,
                iterations = self.iterations,
                "Iteration limit reached"
            );
            return Err(LpError::FailedToConverge {
                iterations: self.iterations,
            });
        }

        let leaving = tableau.basis[row];
        tableau.pivot(row, col);
        self.iterations += 1;

        let objective = match phase {
            Phase::One => tableau.objective_value(),
            Phase::Two => self.objective_sign * tableau.objective_value(),
        };
        if self.settings.verbose {
            debug!(
                phase = %phase,
                iteration = self.iterations,
                entering = col,
                leaving,
                objective,
                "pivot"
            );
        } else {
            trace!(
                phase = %phase,
                iteration = self.iterations,
                entering = col,
                leaving,
                objective,
                "pivot"
            );
        }

        self.emit(SolveEvent::Pivot {
            phase,
            iteration: self.iterations,
            entering: col,
            leaving_row: row,
            objective,
        })
    }
}

impl Tableau {
    /// First column with a reduced cost below `-tol` (Bland's rule).
    pub(crate) fn entering_column(&self, tol: f64) -> Option<usize> {
        let obj = self.objective_row();
        (0..self.layout.total()).find(|&j| self.matrix[(obj, j)] < -tol)
    }

    /// Minimum-ratio row for the entering column `col`.
    ///
    /// Ties are broken by the smaller basic variable index.
    pub(crate) fn leaving_row(&self, col: usize, tol: f64) -> Option<usize> {
        let rhs_col = self.layout.rhs_col();
        let mut best: Option<(usize, f64)> = None;

        for i in 0..self.num_rows() {
            let a = self.matrix[(i, col)];
            if a <= tol {
                continue;
            }
            let ratio = self.matrix[(i, rhs_col)] / a;
            best = match best {
                None => Some((i, ratio)),
                Some((r, best_ratio)) => {
                    if ratio < best_ratio - tol
                        || ((ratio - best_ratio).abs() <= tol && self.basis[i] < self.basis[r])
                    {
                        Some((i, ratio))
                    } else {
                        Some((r, best_ratio))
                    }
                }
            };
        }

        best.map(|(i, _)| i)
    }

    /// Make `col` basic in `row` by elementary row operations.
    pub(crate) fn pivot(&mut self, row: usize, col: usize) {
        let ncols = self.matrix.ncols();
        let pivot = self.matrix[(row, col)];

        for j in 0..ncols {
            self.matrix[(row, j)] /= pivot;
        }
        self.matrix[(row, col)] = 1.0;

        for i in 0..self.matrix.nrows() {
            if i == row {
                continue;
            }
            let factor = self.matrix[(i, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..ncols {
                let delta = factor * self.matrix[(row, j)];
                self.matrix[(i, j)] -= delta;
            }
            self.matrix[(i, col)] = 0.0;
        }

        self.basis[row] = col;
    }
}

/// Pivot until optimal or unbounded.
pub(crate) fn run(
    tableau: &mut Tableau,
    phase: Phase,
    ctx: &mut SolveContext<'_>,
) -> Result<PivotOutcome> {
    let tol = ctx.settings.tolerance;
    ctx.emit(SolveEvent::PhaseStarted(phase))?;

    loop {
        let Some(col) = tableau.entering_column(tol) else {
            return Ok(PivotOutcome::Optimal);
        };
        let Some(row) = tableau.leaving_row(col, tol) else {
            debug!(
                component = "pivot",
                phase = %phase,
                entering = col,
                "No leaving row, problem is unbounded"
            );
            return Ok(PivotOutcome::Unbounded);
        };
        ctx.step(tableau, phase, row, col)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Constraint;
    use crate::solver::progress::NoopObserver;

    fn product_mix() -> Tableau {
        // maximize 3x + 2y s.t. x + y <= 4, 2x + y <= 5
        let constraints = vec![
            Constraint::leq(vec![1.0, 1.0], 4.0),
            Constraint::leq(vec![2.0, 1.0], 5.0),
        ];
        Tableau::from_problem(&[3.0, 2.0], &constraints).unwrap()
    }

    #[test]
    fn test_entering_column_is_first_negative() {
        let t = product_mix();
        assert_eq!(t.entering_column(1e-10), Some(0));
    }

    #[test]
    fn test_leaving_row_minimum_ratio() {
        let t = product_mix();
        // ratios: 4/1 = 4, 5/2 = 2.5
        assert_eq!(t.leaving_row(0, 1e-10), Some(1));
    }

    #[test]
    fn test_leaving_row_tie_break_on_basic_index() {
        // Both rows give ratio 2; the row whose basic slack has the smaller column wins.
        let constraints = vec![
            Constraint::leq(vec![2.0, 0.0], 4.0),
            Constraint::leq(vec![1.0, 1.0], 2.0),
        ];
        let mut t = Tableau::from_problem(&[1.0, 1.0], &constraints).unwrap();
        assert_eq!(t.leaving_row(0, 1e-10), Some(0));

        // Swap the basic variables so row 1 now holds the smaller index.
        t.basis.swap(0, 1);
        assert_eq!(t.leaving_row(0, 1e-10), Some(1));
    }

    #[test]
    fn test_pivot_keeps_unit_column() {
        let mut t = product_mix();
        t.pivot(1, 0);

        assert_eq!(t.basis(), &[2, 0]);
        assert_eq!(t.matrix()[(1, 0)], 1.0);
        assert_eq!(t.matrix()[(0, 0)], 0.0);
        assert_eq!(t.matrix()[(2, 0)], 0.0);
        assert!((t.rhs(1) - 2.5).abs() < 1e-12);
        assert!((t.rhs(0) - 1.5).abs() < 1e-12);
        assert!((t.objective_value() - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_run_to_optimality() {
        let mut t = product_mix();
        let settings = Settings::default();
        let mut observer = NoopObserver;
        let mut ctx = SolveContext::new(&settings, &mut observer, 1.0);

        let outcome = run(&mut t, Phase::Two, &mut ctx).unwrap();
        assert_eq!(outcome, PivotOutcome::Optimal);
        assert_eq!(ctx.iterations, 2);
        assert!((t.objective_value() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_run_detects_unbounded() {
        // maximize x s.t. x - y <= 1
        let constraints = vec![Constraint::leq(vec![1.0, -1.0], 1.0)];
        let mut t = Tableau::from_problem(&[1.0, 0.0], &constraints).unwrap();
        let settings = Settings::default();
        let mut observer = NoopObserver;
        let mut ctx = SolveContext::new(&settings, &mut observer, 1.0);

        let outcome = run(&mut t, Phase::Two, &mut ctx).unwrap();
        assert_eq!(outcome, PivotOutcome::Unbounded);
    }

    #[test]
    fn test_run_respects_iteration_limit() {
        let mut t = product_mix();
        let settings = Settings::default().with_max_iterations(1);
        let mut observer = NoopObserver;
        let mut ctx = SolveContext::new(&settings, &mut observer, 1.0);

        let err = run(&mut t, Phase::Two, &mut ctx).unwrap_err();
        assert_eq!(err, LpError::FailedToConverge { iterations: 1 });
    }
}
