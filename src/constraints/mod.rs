//! Constraint types for linear programs.

mod constraint;

pub use constraint::{Constraint, ConstraintExt, Relation};
