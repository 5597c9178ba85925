//! Post-schedule deadline replay (§4.5): given a finalised solution, find
//! out which tasks would finish late and by how much.

use std::collections::{BTreeMap, VecDeque};

use crate::scheduler::construct::Solution;

/// Replays every worker's queue independently, always advancing whichever
/// worker's head task would complete earliest, and records a lateness entry
/// for every task whose completion exceeds its deadline.
pub fn replay(solution: &Solution) -> BTreeMap<String, f64> {
    let mut queues: BTreeMap<String, VecDeque<_>> = solution
        .iter()
        .map(|(name, tasks)| (name.clone(), tasks.iter().cloned().collect()))
        .collect();
    let mut timelines: BTreeMap<String, f64> = solution.keys().map(|name| (name.clone(), 0.0)).collect();
    let mut violations = BTreeMap::new();

    loop {
        let mut next: Option<(String, f64)> = None;
        for (name, queue) in &queues {
            if let Some(head) = queue.front() {
                let completion = timelines[name] + head.estimated_duration;
                if next.as_ref().map_or(true, |(_, best)| completion < *best) {
                    next = Some((name.clone(), completion));
                }
            }
        }

        let Some((name, completion)) = next else {
            break;
        };

        let task = queues.get_mut(&name).unwrap().pop_front().unwrap();
        timelines.insert(name, completion);
        if completion > task.due_date {
            violations.insert(task.name.clone(), completion - task.due_date);
        }
    }

    violations
}
