//! Pure scoring functions used by GRASP construction (§4.2).
//!
//! `Worker::can_accept` (the hard feasibility predicate) lives on
//! [`Worker`](crate::worker::Worker) itself since it is purely a property of
//! one worker/task pair. This module holds the *soft* scoring used to rank
//! feasible workers when building the Restricted Candidate List: current
//! load, optionally adjusted by deadline slack when a clock reference is
//! available (online mode).

use crate::task::Task;
use crate::worker::Worker;

/// Time remaining between `task`'s deadline and its projected completion if
/// assigned to `worker` right now. Positive means on-time.
pub fn slack(worker: &Worker, task: &Task, now: f64) -> f64 {
    task.due_date - (now + worker.current_load)
}

/// Construction-time ranking score for assigning `task` to `worker`: lower
/// is better. Without a clock reference (batch mode) this is simply the
/// worker's current load; with one (online mode) it is nudged by deadline
/// slack so workers that would blow a deadline rank worse.
pub fn construction_score(worker: &Worker, task: &Task, now: Option<f64>) -> f64 {
    match now {
        Some(now) => worker.current_load - 0.5 * slack(worker, task, now),
        None => worker.current_load,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Tier};

    fn worker(load: f64) -> Worker {
        let mut w = Worker::new("W", Tier::Tier3, vec!["eu".into()], 10);
        w.current_load = load;
        w
    }

    fn task(due_date: f64) -> Task {
        Task::new("T", Priority::Medium, Tier::Tier1, "eu", 1.0, 1, due_date)
    }

    #[test]
    fn slack_is_positive_when_on_time() {
        let w = worker(2.0);
        let t = task(10.0);
        assert_eq!(slack(&w, &t, 0.0), 8.0);
    }

    #[test]
    fn slack_is_negative_when_already_late() {
        let w = worker(12.0);
        let t = task(10.0);
        assert_eq!(slack(&w, &t, 0.0), -2.0);
    }

    #[test]
    fn construction_score_without_clock_is_plain_load() {
        let w = worker(5.0);
        let t = task(10.0);
        assert_eq!(construction_score(&w, &t, None), 5.0);
    }

    #[test]
    fn construction_score_with_clock_rewards_slack() {
        let w = worker(5.0);
        let t = task(100.0);
        // slack = 100 - (0 + 5) = 95; score = 5 - 0.5*95 = -42.5
        assert_eq!(construction_score(&w, &t, Some(0.0)), -42.5);
    }
}
