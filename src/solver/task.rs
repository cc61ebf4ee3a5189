//! Background solving on a Tokio runtime.
//!
//! The synchronous solver runs on the blocking pool. Every [`SolveEvent`] is
//! forwarded over an unbounded channel, and a cancellation flag is checked
//! each time the solver reports an event, i.e. between pivots. A cancelled
//! solve simply abandons its private tableau.
//!
//! ```ignore
//! let mut task = problem.spawn(Settings::default());
//! while let Some(event) = task.next_event().await {
//!     println!("{:?}", event);
//! }
//! let solution = task.join().await?;
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use super::progress::{SolveEvent, SolveObserver};
use super::settings::Settings;
use super::simplex::Solution;
use crate::error::{LpError, Result};
use crate::problem::Problem;

/// Shared cancellation flag for background solves.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    /// Create a handle that is not cancelled.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        CancelHandle { flag: Arc::new(tx) }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }
}

/// Observer forwarding events to a channel and honouring cancellation.
struct ChannelObserver {
    events: mpsc::UnboundedSender<SolveEvent>,
    cancel: watch::Receiver<bool>,
}

impl SolveObserver for ChannelObserver {
    fn on_event(&mut self, event: &SolveEvent) -> ControlFlow<()> {
        if *self.cancel.borrow() {
            return ControlFlow::Break(());
        }
        // Nobody listening is fine; the caller may only want the result.
        let _ = self.events.send(event.clone());
        ControlFlow::Continue(())
    }
}

/// Handle to a solve running on the blocking pool.
#[derive(Debug)]
pub struct SolveTask {
    events: mpsc::UnboundedReceiver<SolveEvent>,
    cancel: CancelHandle,
    handle: JoinHandle<Result<Solution>>,
}

impl SolveTask {
    /// Start solving `problem` in the background.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(problem: Problem, settings: Settings) -> Self {
        Self::spawn_with_cancel(problem, settings, CancelHandle::new())
    }

    /// Start solving `problem` in the background, observing `cancel`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn_with_cancel(problem: Problem, settings: Settings, cancel: CancelHandle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel_rx = cancel.subscribe();

        debug!(
            component = "task",
            operation = "spawn",
            variables = problem.num_variables(),
            constraints = problem.constraints.len(),
            "Spawning background solve"
        );

        let handle = tokio::task::spawn_blocking(move || {
            let mut observer = ChannelObserver {
                events: tx,
                cancel: cancel_rx,
            };
            problem.solve_observed(&settings, &mut observer)
        });

        SolveTask {
            events: rx,
            cancel,
            handle,
        }
    }

    /// Wait for the next event. Returns `None` once the solve has finished
    /// and every event has been received.
    pub async fn next_event(&mut self) -> Option<SolveEvent> {
        self.events.recv().await
    }

    /// Take an event if one is ready.
    pub fn try_next_event(&mut self) -> Option<SolveEvent> {
        self.events.try_recv().ok()
    }

    /// Request cancellation of this solve.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The cancellation handle observed by this solve.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Wait for the solver and return its result unchanged.
    pub async fn join(self) -> Result<Solution> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(LpError::Cancelled),
            Err(err) => Err(LpError::TaskFailed(err.to_string())),
        }
    }
}
