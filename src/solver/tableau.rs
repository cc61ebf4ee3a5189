//! Standard-form conversion.
//!
//! Converts an objective and a list of constraints into a dense simplex
//! tableau of shape `(m + 1) x (total + 1)`:
//!
//! ```text
//!            original | slack | surplus | artificial | rhs
//! row 0      a_0      |  ...  |   ...   |    ...     | b_0
//! ...
//! row m-1    a_{m-1}  |  ...  |   ...   |    ...     | b_{m-1}
//! objective  -c       |   0   |    0    |     0      | 0
//! ```
//!
//! The objective row stores `z + r'x = r_rhs`, so a maximization of `c'x`
//! starts with `r = -c` and the current objective value is always the
//! bottom-right entry.

use nalgebra::DMatrix;
use tracing::debug;

use crate::constraints::{Constraint, Relation};
use crate::error::{LpError, Result};

/// Column layout of the augmented variables.
///
/// Blocks are laid out in order: original, slack, surplus, artificial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableLayout {
    /// Number of decision variables supplied by the caller.
    pub original: usize,
    /// One per `<=` row.
    pub slack: usize,
    /// One per `>=` row.
    pub surplus: usize,
    /// One per `>=` or `=` row.
    pub artificial: usize,
}

impl VariableLayout {
    /// Total number of variable columns (excluding the rhs column).
    pub fn total(&self) -> usize {
        self.original + self.slack + self.surplus + self.artificial
    }

    /// First slack column.
    pub fn slack_start(&self) -> usize {
        self.original
    }

    /// First surplus column.
    pub fn surplus_start(&self) -> usize {
        self.original + self.slack
    }

    /// First artificial column.
    pub fn artificial_start(&self) -> usize {
        self.original + self.slack + self.surplus
    }

    /// Index of the right-hand-side column.
    pub fn rhs_col(&self) -> usize {
        self.total()
    }

    /// Check if a column holds a caller variable.
    pub fn is_original(&self, col: usize) -> bool {
        col < self.original
    }

    /// Check if a column holds an artificial variable.
    pub fn is_artificial(&self, col: usize) -> bool {
        col >= self.artificial_start() && col < self.total()
    }
}

/// Bookkeeping for a `>=` row, used to recover lower bounds after solving.
#[derive(Debug, Clone, PartialEq)]
pub struct SurplusVarInfo {
    /// Tableau row of the constraint.
    pub row: usize,
    /// Column of the surplus variable.
    pub surplus_col: usize,
    /// Coefficients over the original variables, as stored in the tableau.
    pub coefficients: Vec<f64>,
    /// Right-hand side, as stored in the tableau (non-negative).
    pub rhs: f64,
}

/// Dense simplex tableau.
///
/// Invariant: `basis.len() == num_rows()` and column `basis[i]` is the unit
/// vector `e_i` within the constraint rows.
#[derive(Debug, Clone)]
pub struct Tableau {
    pub(crate) matrix: DMatrix<f64>,
    pub(crate) basis: Vec<usize>,
    pub(crate) layout: VariableLayout,
    pub(crate) original_objective: Vec<f64>,
    pub(crate) surplus_info: Vec<SurplusVarInfo>,
}

/// Check that the objective and constraints describe a well-formed problem.
pub fn validate_dimensions(objective: &[f64], constraints: &[Constraint]) -> Result<()> {
    if objective.is_empty() {
        return Err(LpError::InvalidInput("objective has no coefficients".into()));
    }
    if constraints.is_empty() {
        return Err(LpError::InvalidInput("problem has no constraints".into()));
    }
    if let Some(j) = objective.iter().position(|c| !c.is_finite()) {
        return Err(LpError::InvalidInput(format!(
            "objective coefficient {} is not finite",
            j
        )));
    }

    let n = objective.len();
    for (i, c) in constraints.iter().enumerate() {
        if c.coefficients.len() != n {
            return Err(LpError::InvalidInput(format!(
                "constraint {} has {} coefficients, expected {}",
                i,
                c.coefficients.len(),
                n
            )));
        }
        if !c.rhs.is_finite() || c.coefficients.iter().any(|a| !a.is_finite()) {
            return Err(LpError::InvalidInput(format!(
                "constraint {} contains a non-finite value",
                i
            )));
        }
    }
    Ok(())
}

impl Tableau {
    /// Build the initial tableau for `maximize objective'x`.
    ///
    /// Minimization is handled by the caller negating `objective`.
    pub fn from_problem(objective: &[f64], constraints: &[Constraint]) -> Result<Self> {
        validate_dimensions(objective, constraints)?;

        let normalized: Vec<Constraint> = constraints.iter().map(|c| c.normalized()).collect();

        let mut layout = VariableLayout {
            original: objective.len(),
            ..VariableLayout::default()
        };
        for c in &normalized {
            match c.relation {
                Relation::LessEqual => layout.slack += 1,
                Relation::GreaterEqual => {
                    layout.surplus += 1;
                    layout.artificial += 1;
                }
                Relation::Equal => layout.artificial += 1,
            }
        }

        let m = normalized.len();
        let rhs_col = layout.rhs_col();
        let mut matrix = DMatrix::zeros(m + 1, layout.total() + 1);
        let mut basis = Vec::with_capacity(m);
        let mut surplus_info = Vec::with_capacity(layout.surplus);

        let mut next_slack = layout.slack_start();
        let mut next_surplus = layout.surplus_start();
        let mut next_artificial = layout.artificial_start();

        for (i, c) in normalized.iter().enumerate() {
            for (j, &a) in c.coefficients.iter().enumerate() {
                matrix[(i, j)] = a;
            }
            matrix[(i, rhs_col)] = c.rhs;

            match c.relation {
                Relation::LessEqual => {
                    matrix[(i, next_slack)] = 1.0;
                    basis.push(next_slack);
                    next_slack += 1;
                }
                Relation::GreaterEqual => {
                    matrix[(i, next_surplus)] = -1.0;
                    matrix[(i, next_artificial)] = 1.0;
                    surplus_info.push(SurplusVarInfo {
                        row: i,
                        surplus_col: next_surplus,
                        coefficients: c.coefficients.clone(),
                        rhs: c.rhs,
                    });
                    basis.push(next_artificial);
                    next_surplus += 1;
                    next_artificial += 1;
                }
                Relation::Equal => {
                    matrix[(i, next_artificial)] = 1.0;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
            }
        }

        for (j, &cj) in objective.iter().enumerate() {
            matrix[(m, j)] = -cj;
        }
        let original_objective: Vec<f64> = matrix.row(m).iter().copied().collect();

        debug!(
            component = "tableau",
            operation = "standard_form",
            rows = m,
            original = layout.original,
            slack = layout.slack,
            surplus = layout.surplus,
            artificial = layout.artificial,
            "Built initial tableau"
        );

        Ok(Tableau {
            matrix,
            basis,
            layout,
            original_objective,
            surplus_info,
        })
    }

    /// Number of constraint rows.
    pub fn num_rows(&self) -> usize {
        self.basis.len()
    }

    /// Index of the objective row.
    pub fn objective_row(&self) -> usize {
        self.basis.len()
    }

    /// Column layout.
    pub fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    /// Basic variable of every constraint row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Recorded `>=` rows.
    pub fn surplus_info(&self) -> &[SurplusVarInfo] {
        &self.surplus_info
    }

    /// Underlying dense matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Check if the problem needs a Phase I.
    pub fn has_artificials(&self) -> bool {
        self.layout.artificial > 0
    }

    /// Check if `col` is currently basic.
    pub fn is_basic(&self, col: usize) -> bool {
        self.basis.contains(&col)
    }

    /// Right-hand side of a constraint row.
    pub fn rhs(&self, row: usize) -> f64 {
        self.matrix[(row, self.layout.rhs_col())]
    }

    /// Objective value of the current basic solution (maximization sense).
    pub fn objective_value(&self) -> f64 {
        self.matrix[(self.objective_row(), self.layout.rhs_col())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_blocks() {
        let layout = VariableLayout {
            original: 2,
            slack: 1,
            surplus: 2,
            artificial: 3,
        };
        assert_eq!(layout.total(), 8);
        assert_eq!(layout.slack_start(), 2);
        assert_eq!(layout.surplus_start(), 3);
        assert_eq!(layout.artificial_start(), 5);
        assert_eq!(layout.rhs_col(), 8);
        assert!(layout.is_original(1));
        assert!(!layout.is_original(2));
        assert!(layout.is_artificial(5));
        assert!(layout.is_artificial(7));
        assert!(!layout.is_artificial(8));
    }

    #[test]
    fn test_standard_form_mixed_relations() {
        let constraints = vec![
            Constraint::leq(vec![1.0, 1.0], 4.0),
            Constraint::geq(vec![1.0, 0.0], 1.0),
            Constraint::eq(vec![0.0, 1.0], 2.0),
        ];
        let t = Tableau::from_problem(&[3.0, 2.0], &constraints).unwrap();

        assert_eq!(
            *t.layout(),
            VariableLayout {
                original: 2,
                slack: 1,
                surplus: 1,
                artificial: 2,
            }
        );
        assert_eq!(t.matrix().nrows(), 4);
        assert_eq!(t.matrix().ncols(), 7);

        // slack for row 0, artificials for rows 1 and 2
        assert_eq!(t.basis(), &[2, 4, 5]);
        assert_eq!(t.matrix()[(1, 3)], -1.0);
        assert_eq!(t.matrix()[(1, 4)], 1.0);
        assert_eq!(t.matrix()[(2, 5)], 1.0);

        // objective row holds -c
        assert_eq!(t.matrix()[(3, 0)], -3.0);
        assert_eq!(t.matrix()[(3, 1)], -2.0);
        assert_eq!(t.objective_value(), 0.0);
        assert_eq!(t.original_objective.len(), 7);

        assert_eq!(t.surplus_info().len(), 1);
        assert_eq!(t.surplus_info()[0].row, 1);
        assert_eq!(t.surplus_info()[0].surplus_col, 3);
    }

    #[test]
    fn test_negative_rhs_flips_relation() {
        // -x - y <= -3  becomes  x + y >= 3
        let constraints = vec![Constraint::leq(vec![-1.0, -1.0], -3.0)];
        let t = Tableau::from_problem(&[1.0, 1.0], &constraints).unwrap();

        assert_eq!(t.layout().slack, 0);
        assert_eq!(t.layout().surplus, 1);
        assert_eq!(t.layout().artificial, 1);
        assert_eq!(t.rhs(0), 3.0);
        assert_eq!(t.matrix()[(0, 0)], 1.0);
        assert_eq!(t.surplus_info()[0].coefficients, vec![1.0, 1.0]);
        assert_eq!(t.surplus_info()[0].rhs, 3.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let c = vec![Constraint::leq(vec![1.0], 1.0)];
        assert!(matches!(
            Tableau::from_problem(&[], &c),
            Err(LpError::InvalidInput(_))
        ));
        assert!(matches!(
            Tableau::from_problem(&[1.0], &[]),
            Err(LpError::InvalidInput(_))
        ));

        let c = vec![
            Constraint::leq(vec![1.0, 2.0], 1.0),
            Constraint::leq(vec![1.0], 1.0),
        ];
        match Tableau::from_problem(&[1.0, 1.0], &c) {
            Err(LpError::InvalidInput(msg)) => assert!(msg.contains("constraint 1"), "{}", msg),
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        let c = vec![Constraint::leq(vec![f64::NAN], 1.0)];
        assert!(Tableau::from_problem(&[1.0], &c).is_err());
    }
}
