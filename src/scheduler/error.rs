//! Structured error types for the scheduling engine.
//!
//! One enum models the single failure layer the core actually needs:
//! [`SchedulerError`] covers start-up configuration mistakes and the one
//! condition that should never happen if callers respect `can_accept`
//! first. Everything else recoverable — an infeasible task, a malformed
//! input row, a missed deadline — is a [`Warning`], not an `Err`: the core
//! returns partial results with warnings attached rather than aborting a
//! run over one bad task (see spec §7's propagation policy).

use thiserror::Error;

/// Top-level failure returned from the scheduling entry points.
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    /// `schedule()` was called with an empty task list.
    #[error("no tasks provided — task list is empty")]
    NoTasks,

    /// Start-up configuration is invalid: `alpha` outside `[0, 1]`,
    /// `max_iterations <= 0`, or an empty worker fleet.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// A caller attempted `Worker::add_task` on a worker that cannot accept
    /// the task. Every scheduling component in this crate checks
    /// `can_accept` first, so reaching this indicates a logic bug rather
    /// than an expected runtime condition — it is fatal.
    #[error("invariant violation: task '{task}' assigned to worker '{worker}' that cannot accept it")]
    InvariantViolation { task: String, worker: String },
}

/// A recoverable diagnostic surfaced to the caller instead of aborting the
/// run. Collected into a `Vec<Warning>` alongside every solution/report.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// No worker in the fleet could accept this task; it was omitted from
    /// the solution.
    Infeasible { task: String },

    /// A CSV row was malformed, used an unknown enum value, or had a
    /// negative duration; it was skipped or a default was substituted.
    InputParse { row: usize, detail: String },

    /// A task's projected completion time exceeded its deadline.
    DeadlineViolation { task: String, lateness: f64 },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Infeasible { task } => {
                write!(f, "no feasible worker found for task '{}'", task)
            }
            Warning::InputParse { row, detail } => {
                write!(f, "row {}: {}", row, detail)
            }
            Warning::DeadlineViolation { task, lateness } => {
                write!(f, "task '{}' will be {:.1} units late", task, lateness)
            }
        }
    }
}
