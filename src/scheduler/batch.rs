//! Multi-restart batch scheduling drivers (§4.2 step 1, and the dedicated
//! pure-greedy scheduler used as a determinism baseline for §8 invariant 5).

use rand::Rng;
use tracing::info;

use super::construct::{construct, solution_snapshot, Solution};
use super::error::{SchedulerError, Warning};
use super::evaluate::evaluate;
use super::local_search::local_search;
use crate::task::Task;
use crate::worker::Worker;

/// GRASP multi-restart batch scheduler.
pub struct GraspScheduler {
    alpha: f64,
    max_iterations: u32,
}

impl GraspScheduler {
    pub fn new(alpha: f64, max_iterations: u32) -> Result<Self, SchedulerError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SchedulerError::ConfigError(format!(
                "alpha must be in [0, 1], got {alpha}"
            )));
        }
        if max_iterations == 0 {
            return Err(SchedulerError::ConfigError(
                "max_iterations must be positive".into(),
            ));
        }
        Ok(Self { alpha, max_iterations })
    }

    /// Runs `max_iterations` restarts of construct + local search, keeping
    /// the highest-scoring solution, then replays it onto `workers` so the
    /// caller's fleet ends up in the winning state (not whatever the final
    /// iteration happened to leave behind).
    pub fn schedule(
        &self,
        workers: &mut [Worker],
        tasks: &[Task],
        rng: &mut impl Rng,
    ) -> Result<(Solution, Vec<Warning>), SchedulerError> {
        if workers.is_empty() {
            return Err(SchedulerError::ConfigError("worker fleet is empty".into()));
        }
        if tasks.is_empty() {
            return Err(SchedulerError::NoTasks);
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best_solution: Option<Solution> = None;
        let mut best_warnings = Vec::new();

        for iteration in 0..self.max_iterations {
            let warnings = construct(workers, tasks.to_vec(), self.alpha, None, rng);
            local_search(workers);
            let score = evaluate(workers, 0.0);

            if score > best_score {
                best_score = score;
                best_solution = Some(solution_snapshot(workers));
                best_warnings = warnings;
            }
            info!(iteration, score, best_score, "GRASP restart scored");
        }

        let solution = best_solution.expect("at least one iteration always runs");
        apply_solution(workers, &solution)?;

        Ok((solution, best_warnings))
    }
}

/// Deterministic greedy scheduler: construction only, no local search, no
/// randomness in the absence of score ties. Used both as a fast default and
/// as the baseline [`GraspScheduler`] with `alpha = 0.0` is compared
/// against (spec §8 invariant 5).
pub struct GreedyScheduler;

impl GreedyScheduler {
    pub fn schedule(
        &self,
        workers: &mut [Worker],
        tasks: &[Task],
        rng: &mut impl Rng,
    ) -> Result<(Solution, Vec<Warning>), SchedulerError> {
        if workers.is_empty() {
            return Err(SchedulerError::ConfigError("worker fleet is empty".into()));
        }
        if tasks.is_empty() {
            return Err(SchedulerError::NoTasks);
        }
        let warnings = construct(workers, tasks.to_vec(), 0.0, None, rng);
        Ok((solution_snapshot(workers), warnings))
    }
}

fn apply_solution(workers: &mut [Worker], solution: &Solution) -> Result<(), SchedulerError> {
    for w in workers.iter_mut() {
        w.reset();
    }
    for w in workers.iter_mut() {
        if let Some(tasks) = solution.get(&w.name) {
            for task in tasks {
                w.add_task(task.clone())?;
            }
        }
    }
    Ok(())
}
