//! Run and session status values.

use crate::tour::{BestSolution, BestTracker, Tour};

/// State of a single optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// More units of work remain.
    Running,
    /// The genetic search reached `max_generations`.
    Converged,
    /// The genetic search hit its stagnation limit.
    Stagnated,
    /// The colony finished all iterations.
    Completed,
    /// Stopped from outside before a natural end.
    Cancelled,
}

impl RunStatus {
    /// Returns true for every status except [`Running`](Self::Running).
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// State of a [`Session`](super::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No run has been started since creation, reset or a point change.
    #[default]
    Idle,
    /// A run is active.
    Running,
    /// The last run ended with the given status.
    Finished(RunStatus),
}

/// Outcome of one unit of work (a generation or a colony iteration).
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Status after the step.
    pub status: RunStatus,
    /// Every accepted improvement, oldest first.
    pub improvements: Vec<BestSolution>,
}

impl StepReport {
    pub(crate) fn new(status: RunStatus) -> Self {
        Self {
            status,
            improvements: Vec::new(),
        }
    }

    /// Offers a candidate to `best`, recording it if accepted.
    pub(crate) fn offer(&mut self, best: &mut BestTracker, tour: &Tour, length: f64) -> bool {
        if !best.consider(tour, length) {
            return false;
        }
        if let Some(accepted) = best.get() {
            self.improvements.push(accepted.clone());
        }
        true
    }
}
