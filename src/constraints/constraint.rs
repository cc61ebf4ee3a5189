//! Linear constraint types.
//!
//! A constraint is a row `a'x REL b` where `REL` is one of `<=`, `=`, `>=`.
//! In standard form:
//! - `<=` gains a slack variable
//! - `>=` gains a surplus and an artificial variable
//! - `=` gains an artificial variable

use std::fmt;

/// Relation between the left-hand side and the right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `a'x <= b`.
    LessEqual,
    /// `a'x == b`.
    Equal,
    /// `a'x >= b`.
    GreaterEqual,
}

impl Relation {
    /// The relation obtained by multiplying both sides by -1.
    pub fn flip(self) -> Self {
        match self {
            Relation::LessEqual => Relation::GreaterEqual,
            Relation::GreaterEqual => Relation::LessEqual,
            Relation::Equal => Relation::Equal,
        }
    }

    /// Check whether `lhs REL rhs` holds within `tol`.
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            Relation::LessEqual => lhs <= rhs + tol,
            Relation::Equal => (lhs - rhs).abs() <= tol,
            Relation::GreaterEqual => lhs >= rhs - tol,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::LessEqual => "<=",
            Relation::Equal => "=",
            Relation::GreaterEqual => ">=",
        };
        f.write_str(s)
    }
}

/// A linear constraint `coefficients' x REL rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// One coefficient per decision variable.
    pub coefficients: Vec<f64>,
    /// Relation between the two sides.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Create a constraint from its parts.
    pub fn new(coefficients: impl Into<Vec<f64>>, relation: Relation, rhs: f64) -> Self {
        Constraint {
            coefficients: coefficients.into(),
            relation,
            rhs,
        }
    }

    /// Create an inequality constraint: `a'x <= rhs`.
    pub fn leq(coefficients: impl Into<Vec<f64>>, rhs: f64) -> Self {
        Constraint::new(coefficients, Relation::LessEqual, rhs)
    }

    /// Create an inequality constraint: `a'x >= rhs`.
    pub fn geq(coefficients: impl Into<Vec<f64>>, rhs: f64) -> Self {
        Constraint::new(coefficients, Relation::GreaterEqual, rhs)
    }

    /// Create an equality constraint: `a'x == rhs`.
    pub fn eq(coefficients: impl Into<Vec<f64>>, rhs: f64) -> Self {
        Constraint::new(coefficients, Relation::Equal, rhs)
    }

    /// Number of coefficients (should match the problem's variable count).
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Check if the constraint has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluate the left-hand side `a'x`.
    ///
    /// Extra entries on either side are ignored.
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coefficients.iter().zip(x).map(|(a, xi)| a * xi).sum()
    }

    /// Check whether `x` satisfies this constraint within `tol`.
    pub fn is_satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        self.relation.holds(self.lhs(x), self.rhs, tol)
    }

    /// Return an equivalent constraint with a non-negative right-hand side.
    ///
    /// A negative `rhs` negates the whole row and flips the relation.
    pub fn normalized(&self) -> Constraint {
        if self.rhs < 0.0 {
            Constraint {
                coefficients: self.coefficients.iter().map(|a| -a).collect(),
                relation: self.relation.flip(),
                rhs: -self.rhs,
            }
        } else {
            self.clone()
        }
    }

    /// Indices of the coefficients whose magnitude exceeds `tol`.
    pub fn support(&self, tol: f64) -> Vec<usize> {
        self.coefficients
            .iter()
            .enumerate()
            .filter(|(_, a)| a.abs() > tol)
            .map(|(j, _)| j)
            .collect()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (j, &a) in self.coefficients.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            if first {
                write!(f, "{}*x{}", a, j)?;
                first = false;
            } else if a < 0.0 {
                write!(f, " - {}*x{}", -a, j)?;
            } else {
                write!(f, " + {}*x{}", a, j)?;
            }
        }
        if first {
            f.write_str("0")?;
        }
        write!(f, " {} {}", self.relation, self.rhs)
    }
}

/// Extension trait for creating constraints from coefficient rows.
pub trait ConstraintExt {
    /// Create equality constraint: `self'x == rhs`.
    fn equals(&self, rhs: f64) -> Constraint;

    /// Create inequality constraint: `self'x <= rhs`.
    fn leq(&self, rhs: f64) -> Constraint;

    /// Create inequality constraint: `self'x >= rhs`.
    fn geq(&self, rhs: f64) -> Constraint;
}

impl ConstraintExt for [f64] {
    fn equals(&self, rhs: f64) -> Constraint {
        Constraint::eq(self.to_vec(), rhs)
    }

    fn leq(&self, rhs: f64) -> Constraint {
        Constraint::leq(self.to_vec(), rhs)
    }

    fn geq(&self, rhs: f64) -> Constraint {
        Constraint::geq(self.to_vec(), rhs)
    }
}
