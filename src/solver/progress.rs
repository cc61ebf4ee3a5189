//! Solve progress reporting.
//!
//! The pivot loop reports every pivot to a [`SolveObserver`]. Observers can
//! also stop the solve early by returning [`ControlFlow::Break`], which
//! surfaces as [`LpError::Cancelled`](crate::LpError::Cancelled).

use std::fmt;
use std::ops::ControlFlow;

use super::simplex::SolveStatus;

/// Simplex phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Feasibility search (minimize the sum of artificial variables).
    One,
    /// Optimality search on the true objective.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => f.write_str("phase I"),
            Phase::Two => f.write_str("phase II"),
        }
    }
}

/// Event emitted while solving.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveEvent {
    /// A phase is about to start pivoting.
    PhaseStarted(Phase),
    /// A pivot was performed.
    Pivot {
        /// Phase the pivot belongs to.
        phase: Phase,
        /// Total pivots so far, this one included.
        iteration: usize,
        /// Column that entered the basis.
        entering: usize,
        /// Row whose basic variable left.
        leaving_row: usize,
        /// Objective after the pivot.
        ///
        /// During Phase I this is the auxiliary value `-sum(artificials)`;
        /// during Phase II it is the caller's objective in the caller's sense.
        objective: f64,
    },
    /// The solve reached a terminal status.
    Finished {
        /// Terminal status.
        status: SolveStatus,
        /// Total pivots performed.
        iterations: usize,
    },
}

/// Receives solve events.
pub trait SolveObserver {
    /// Handle an event. Returning `Break` cancels the solve.
    fn on_event(&mut self, event: &SolveEvent) -> ControlFlow<()>;
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {
    fn on_event(&mut self, _event: &SolveEvent) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<F> SolveObserver for F
where
    F: FnMut(&SolveEvent) -> ControlFlow<()>,
{
    fn on_event(&mut self, event: &SolveEvent) -> ControlFlow<()> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = 0;
        let mut observer = |_: &SolveEvent| {
            seen += 1;
            ControlFlow::Continue(())
        };
        let event = SolveEvent::PhaseStarted(Phase::One);
        assert!(observer.on_event(&event).is_continue());
        assert!(observer.on_event(&event).is_continue());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_noop_observer() {
        let mut observer = NoopObserver;
        assert!(observer
            .on_event(&SolveEvent::PhaseStarted(Phase::Two))
            .is_continue());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::One.to_string(), "phase I");
        assert_eq!(Phase::Two.to_string(), "phase II");
    }
}
