//! The two re-scheduling hooks an online [`Simulator`](super::Simulator)
//! can be configured with (§4.6).

use rand::Rng;

use crate::scheduler::construct::construct;
use crate::scheduler::error::Warning;
use crate::scheduler::evaluate::evaluate;
use crate::scheduler::local_search::local_search;
use crate::task::{queue_order, Task};
use crate::worker::Worker;

/// Invoked whenever at least one worker is idle. Assigns feasible pending
/// tasks to workers, mutating their queues directly, and returns whatever
/// remains unassigned.
pub trait ReschedulingHook {
    fn reschedule(&mut self, workers: &mut [Worker], pending: Vec<Task>, now: f64) -> (Vec<Task>, Vec<Warning>);
}

/// Sorts pending tasks by `(−priority, due_date)` and greedily assigns each
/// to the least-loaded worker that can both accept it and finish it on
/// time.
pub struct GreedyHook;

impl ReschedulingHook for GreedyHook {
    fn reschedule(&mut self, workers: &mut [Worker], pending: Vec<Task>, now: f64) -> (Vec<Task>, Vec<Warning>) {
        let mut pending = pending;
        pending.sort_by(queue_order);

        let mut remaining = Vec::new();
        for task in pending {
            let mut best: Option<(usize, f64)> = None;
            for (i, w) in workers.iter().enumerate() {
                let projected = now + w.current_load + task.estimated_duration;
                if w.can_accept(&task) && projected <= task.due_date {
                    if best.map_or(true, |(_, load)| w.current_load < load) {
                        best = Some((i, w.current_load));
                    }
                }
            }
            match best {
                Some((i, _)) => {
                    workers[i].add_task(task).expect("feasibility checked above");
                }
                None => remaining.push(task),
            }
        }
        (remaining, Vec::new())
    }
}

/// Runs a handful of GRASP iterations restricted to currently idle workers,
/// using a deep snapshot so a worker mid-task is never touched, then
/// transfers only the newly-assigned tasks back onto the real fleet.
pub struct GraspHook<R: Rng> {
    alpha: f64,
    iterations: u32,
    rng: R,
}

impl<R: Rng> GraspHook<R> {
    pub fn new(alpha: f64, iterations: u32, rng: R) -> Self {
        Self { alpha, iterations, rng }
    }
}

impl<R: Rng> ReschedulingHook for GraspHook<R> {
    fn reschedule(&mut self, workers: &mut [Worker], pending: Vec<Task>, now: f64) -> (Vec<Task>, Vec<Warning>) {
        if pending.is_empty() {
            return (pending, Vec::new());
        }

        let idle_indices: Vec<usize> = workers
            .iter()
            .enumerate()
            .filter(|(_, w)| w.current_task.is_none())
            .map(|(i, _)| i)
            .collect();
        if idle_indices.is_empty() {
            return (pending, Vec::new());
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best_snapshot: Option<Vec<Worker>> = None;
        let mut warnings = Vec::new();

        for _ in 0..self.iterations {
            let mut snapshot: Vec<Worker> = idle_indices.iter().map(|&i| workers[i].clone()).collect();
            let iter_warnings = construct(&mut snapshot, pending.clone(), self.alpha, Some(now), &mut self.rng);
            local_search(&mut snapshot);
            let score = evaluate(&snapshot, now);
            if score > best_score {
                best_score = score;
                best_snapshot = Some(snapshot);
                warnings = iter_warnings;
            }
        }

        let snapshot = best_snapshot.expect("at least one iteration always runs");
        let mut assigned = std::collections::HashSet::new();
        for snap_worker in &snapshot {
            if let Some(real) = workers.iter_mut().find(|w| w.name == snap_worker.name) {
                for task in &snap_worker.task_queue {
                    if !real.task_queue.iter().any(|t| t.name == task.name) {
                        real.add_task(task.clone()).expect("snapshot feasibility carries over");
                        assigned.insert(task.name.clone());
                    }
                }
            }
        }

        let remaining = pending.into_iter().filter(|t| !assigned.contains(&t.name)).collect();
        (remaining, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Tier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn idle_worker(name: &str, tier: Tier, cap: u32) -> Worker {
        Worker::new(name, tier, vec!["eu".into()], cap)
    }

    #[test]
    fn greedy_hook_assigns_to_least_loaded_feasible_worker() {
        let mut workers = vec![idle_worker("W1", Tier::Tier2, 5), idle_worker("W2", Tier::Tier2, 5)];
        workers[0].current_load = 3.0;
        let mut hook = GreedyHook;
        let task = Task::new("A", Priority::High, Tier::Tier1, "eu", 2.0, 1, 100.0);
        let (remaining, _) = hook.reschedule(&mut workers, vec![task], 0.0);
        assert!(remaining.is_empty());
        assert_eq!(workers[1].task_queue.len(), 1, "W2 had lower load and should win");
    }

    #[test]
    fn greedy_hook_leaves_task_pending_when_no_worker_meets_deadline() {
        let mut workers = vec![idle_worker("W1", Tier::Tier2, 5)];
        let mut hook = GreedyHook;
        let task = Task::new("A", Priority::High, Tier::Tier1, "eu", 50.0, 1, 10.0);
        let (remaining, _) = hook.reschedule(&mut workers, vec![task], 0.0);
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn grasp_hook_never_touches_a_busy_worker() {
        let mut busy = idle_worker("W1", Tier::Tier2, 5);
        busy.add_task(Task::new("running", Priority::Medium, Tier::Tier1, "eu", 10.0, 1, 100.0))
            .unwrap();
        busy.process_next_task();
        let idle = idle_worker("W2", Tier::Tier2, 5);
        let mut workers = vec![busy.clone(), idle];

        let mut hook = GraspHook::new(0.2, 3, ChaCha8Rng::seed_from_u64(5));
        let task = Task::new("new", Priority::High, Tier::Tier1, "eu", 1.0, 1, 100.0);
        hook.reschedule(&mut workers, vec![task], 0.0);

        assert_eq!(workers[0].current_task, busy.current_task, "busy worker must be untouched");
        assert!(workers[1].task_queue.iter().any(|t| t.name == "new"));
    }
}
