//! Pairwise inter-worker task swap local search (§4.3).
//!
//! A strict-improvement procedure: a swap is only applied if it is both
//! feasible (re-checked after notionally removing each task) and strictly
//! reduces the load imbalance between the two workers. No non-improving
//! move is ever accepted, which guarantees termination independent of the
//! pass budget.

const MAX_PASSES: u32 = 10;

use crate::worker::Worker;

/// Runs up to [`MAX_PASSES`] passes over every ordered worker pair,
/// applying the first improving swap found in each pass and restarting the
/// scan from the top. A pass that finds no swap ends the search early.
pub fn local_search(workers: &mut [Worker]) {
    let mut passes = 0;
    loop {
        if passes >= MAX_PASSES {
            break;
        }
        passes += 1;
        if !run_one_pass(workers) {
            break;
        }
    }
}

fn run_one_pass(workers: &mut [Worker]) -> bool {
    let n = workers.len();
    for w1 in 0..n {
        for w2 in 0..n {
            if w1 == w2 {
                continue;
            }
            let len1 = workers[w1].task_queue.len();
            let len2 = workers[w2].task_queue.len();
            for i in 0..len1 {
                for j in 0..len2 {
                    if try_swap(workers, w1, i, w2, j) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Attempts the swap at `(w1, i)` ↔ `(w2, j)`. Removes both tasks first so
/// feasibility is re-evaluated with the freed capacity (per spec §4.3),
/// rolls back if infeasible or non-improving, and returns whether the swap
/// was applied.
fn try_swap(workers: &mut [Worker], w1: usize, i: usize, w2: usize, j: usize) -> bool {
    let load1_before = workers[w1].current_load;
    let load2_before = workers[w2].current_load;

    let task1 = workers[w1].remove_at(i);
    let task2 = workers[w2].remove_at(j);

    let feasible = workers[w1].can_accept(&task2) && workers[w2].can_accept(&task1);
    let improves = feasible && {
        let new_load1 = load1_before - task1.estimated_duration + task2.estimated_duration;
        let new_load2 = load2_before - task2.estimated_duration + task1.estimated_duration;
        (new_load1 - new_load2).abs() < (load1_before - load2_before).abs()
    };

    if improves {
        workers[w1].add_task(task2).expect("feasibility checked above");
        workers[w2].add_task(task1).expect("feasibility checked above");
        true
    } else {
        // Roll back: both workers must end up exactly as they started.
        workers[w1].add_task(task1).expect("re-adding the task it came from is always feasible");
        workers[w2].add_task(task2).expect("re-adding the task it came from is always feasible");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::evaluate::evaluate;
    use crate::task::{Priority, Task, Tier};

    fn balanced_swap_fleet() -> Vec<Worker> {
        // W1 overloaded with a long HIGH task, W2 idle but feasible for
        // both tasks; swapping balances the load.
        let mut w1 = Worker::new("W1", Tier::Tier3, vec!["eu".into()], 10);
        let mut w2 = Worker::new("W2", Tier::Tier3, vec!["eu".into()], 10);
        w1.add_task(Task::new("big", Priority::Medium, Tier::Tier1, "eu", 8.0, 1, 100.0))
            .unwrap();
        w2.add_task(Task::new("small", Priority::Medium, Tier::Tier1, "eu", 2.0, 1, 100.0))
            .unwrap();
        vec![w1, w2]
    }

    #[test]
    fn swap_balances_load_when_it_improves() {
        let mut workers = balanced_swap_fleet();
        local_search(&mut workers);
        assert_eq!(workers[0].current_load, 2.0);
        assert_eq!(workers[1].current_load, 8.0);
    }

    #[test]
    fn no_swap_when_already_balanced() {
        let mut w1 = Worker::new("W1", Tier::Tier3, vec!["eu".into()], 10);
        let mut w2 = Worker::new("W2", Tier::Tier3, vec!["eu".into()], 10);
        w1.add_task(Task::new("a", Priority::Medium, Tier::Tier1, "eu", 5.0, 1, 100.0)).unwrap();
        w2.add_task(Task::new("b", Priority::Medium, Tier::Tier1, "eu", 5.0, 1, 100.0)).unwrap();
        let mut workers = vec![w1, w2];
        let before: Vec<f64> = workers.iter().map(|w| w.current_load).collect();
        local_search(&mut workers);
        let after: Vec<f64> = workers.iter().map(|w| w.current_load).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn infeasible_swap_is_rolled_back_exactly() {
        // task2 requires a region W1 doesn't serve, so the swap cannot
        // apply; workers must end up unchanged.
        let mut w1 = Worker::new("W1", Tier::Tier3, vec!["eu".into()], 10);
        let mut w2 = Worker::new("W2", Tier::Tier3, vec!["na".into()], 10);
        w1.add_task(Task::new("a", Priority::Medium, Tier::Tier1, "eu", 8.0, 1, 100.0)).unwrap();
        w2.add_task(Task::new("b", Priority::Medium, Tier::Tier1, "na", 1.0, 1, 100.0)).unwrap();
        let mut workers = vec![w1.clone(), w2.clone()];
        local_search(&mut workers);
        assert_eq!(workers[0].task_queue, w1.task_queue);
        assert_eq!(workers[1].task_queue, w2.task_queue);
    }

    #[test]
    fn evaluator_score_is_non_decreasing_across_a_pass() {
        let mut workers = balanced_swap_fleet();
        let before = evaluate(&workers, 0.0);
        local_search(&mut workers);
        let after = evaluate(&workers, 0.0);
        assert!(after >= before);
    }
}
