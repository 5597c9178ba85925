//! Worker domain model and the feasibility/capacity bookkeeping every
//! scheduling component relies on.
//!
//! Mirrors `src/model/worker.py`'s `Worker` class: `can_accept`,
//! `add_task`, `process_next_task`, and `complete_current_task` are kept as
//! the same four primitives, with `add_task` made fallible instead of
//! raising, since a scheduler that attempts an infeasible assignment is a
//! logic error the caller should handle explicitly (see
//! [`SchedulerError::InvariantViolation`](crate::scheduler::error::SchedulerError::InvariantViolation)).

use crate::scheduler::error::SchedulerError;
use crate::task::{queue_order, Task, Tier};

/// A heterogeneous agent that tasks are assigned to.
///
/// Invariants upheld by every method on this type (see spec §3/§8):
/// 1. `available_capacity + Σ resource_requirements(queue ∪ {current_task}) == capacity`.
/// 2. Every task in `queue ∪ {current_task}` satisfies [`Worker::can_accept`]
///    against this worker *at the time it was added*.
/// 3. `task_queue` is always sorted by [`queue_order`].
#[derive(Debug, Clone)]
pub struct Worker {
    pub name: String,
    pub tier: Tier,
    pub regions: Vec<String>,
    pub capacity: u32,
    pub task_queue: Vec<Task>,
    pub current_task: Option<Task>,
    pub available_capacity: u32,
    pub current_load: f64,
}

impl Worker {
    pub fn new(name: impl Into<String>, tier: Tier, regions: Vec<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            tier,
            regions,
            capacity,
            task_queue: Vec::new(),
            current_task: None,
            available_capacity: capacity,
            current_load: 0.0,
        }
    }

    /// Clears queue, running task, and load/capacity counters back to a
    /// fresh state. Used between GRASP restarts (§4.2 step 1a).
    pub fn reset(&mut self) {
        self.task_queue.clear();
        self.current_task = None;
        self.available_capacity = self.capacity;
        self.current_load = 0.0;
    }

    /// True iff this worker can take on `task` right now: region served,
    /// tier sufficient, and enough spare capacity.
    pub fn can_accept(&self, task: &Task) -> bool {
        self.regions.iter().any(|r| r == &task.region)
            && task.tier <= self.tier
            && task.resource_requirements <= self.available_capacity
    }

    /// Appends `task` to the queue, re-sorting by [`queue_order`].
    ///
    /// # Errors
    /// Returns [`SchedulerError::InvariantViolation`] if [`can_accept`](Self::can_accept)
    /// is false — every caller in this crate checks feasibility first, so
    /// reaching this is a bug in the caller, not an expected runtime
    /// condition.
    pub fn add_task(&mut self, task: Task) -> Result<(), SchedulerError> {
        if !self.can_accept(&task) {
            return Err(SchedulerError::InvariantViolation {
                task: task.name,
                worker: self.name.clone(),
            });
        }
        self.available_capacity -= task.resource_requirements;
        self.current_load += task.estimated_duration;
        self.task_queue.push(task);
        self.task_queue.sort_by(queue_order);
        Ok(())
    }

    /// Removes and returns the task at `index`, restoring the capacity and
    /// load it held. Used by local search to tentatively pull a task out
    /// before re-evaluating feasibility for a swap (§4.3).
    pub(crate) fn remove_at(&mut self, index: usize) -> Task {
        let task = self.task_queue.remove(index);
        self.available_capacity += task.resource_requirements;
        self.current_load -= task.estimated_duration;
        task
    }

    /// Pops the queue head into `current_task` and returns it. Does not
    /// release capacity — the task still occupies resources while running.
    pub fn process_next_task(&mut self) -> Option<Task> {
        if self.task_queue.is_empty() {
            return None;
        }
        let task = self.task_queue.remove(0);
        self.current_task = Some(task.clone());
        Some(task)
    }

    /// Marks the running task completed and releases its resource units.
    /// Callers in the simulator are responsible for also subtracting the
    /// task's duration from `current_load` at completion time.
    pub fn complete_current_task(&mut self) {
        if let Some(task) = &mut self.current_task {
            task.mark_completed();
            self.available_capacity += task.resource_requirements;
            self.current_task = None;
        }
    }

    /// Total assigned load, queued + running remainder. Mirrors
    /// `Worker.get_estimated_completion_time` in the original.
    pub fn estimated_completion_time(&self) -> f64 {
        self.current_load
    }

    /// Sum of `estimated_duration` over queued (not yet running) tasks.
    /// Mirrors `Worker.get_expected_work_time`.
    pub fn expected_work_time(&self) -> f64 {
        self.task_queue.iter().map(|t| t.estimated_duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn worker() -> Worker {
        Worker::new("W1", Tier::Tier3, vec!["eu".to_string()], 5)
    }

    fn task(name: &str, tier: Tier, region: &str, duration: f64, resources: u32) -> Task {
        Task::new(name, Priority::Medium, tier, region, duration, resources, 10.0)
    }

    #[test]
    fn can_accept_requires_region_tier_and_capacity() {
        let w = worker();
        assert!(w.can_accept(&task("A", Tier::Tier2, "eu", 1.0, 2)));
        assert!(!w.can_accept(&task("A", Tier::Tier2, "na", 1.0, 2)), "wrong region");
        assert!(!w.can_accept(&task("A", Tier::Tier4, "eu", 1.0, 2)), "insufficient tier");
        assert!(!w.can_accept(&task("A", Tier::Tier2, "eu", 1.0, 6)), "insufficient capacity");
    }

    #[test]
    fn add_task_updates_capacity_and_load() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 3.0, 2)).unwrap();
        assert_eq!(w.available_capacity, 3);
        assert_eq!(w.current_load, 3.0);
        assert_eq!(w.task_queue.len(), 1);
    }

    #[test]
    fn add_task_rejects_infeasible_task() {
        let mut w = worker();
        let err = w.add_task(task("A", Tier::Tier5, "eu", 1.0, 1)).unwrap_err();
        assert!(matches!(err, SchedulerError::InvariantViolation { .. }));
    }

    #[test]
    fn queue_stays_sorted_after_each_add() {
        let mut w = worker();
        let mut low = task("low", Tier::Tier1, "eu", 1.0, 1);
        low.priority = Priority::Low;
        let mut high = task("high", Tier::Tier1, "eu", 1.0, 1);
        high.priority = Priority::High;

        w.add_task(low).unwrap();
        w.add_task(high).unwrap();

        assert_eq!(w.task_queue[0].name, "high");
        assert_eq!(w.task_queue[1].name, "low");
    }

    #[test]
    fn process_next_task_moves_head_into_current() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 1.0, 1)).unwrap();
        let started = w.process_next_task().unwrap();
        assert_eq!(started.name, "A");
        assert!(w.task_queue.is_empty());
        assert_eq!(w.current_task.as_ref().unwrap().name, "A");
        // capacity is NOT released while running
        assert_eq!(w.available_capacity, 4);
    }

    #[test]
    fn complete_current_task_releases_capacity() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 1.0, 2)).unwrap();
        w.process_next_task();
        w.complete_current_task();
        assert_eq!(w.available_capacity, 5);
        assert!(w.current_task.is_none());
    }

    #[test]
    fn remove_at_restores_capacity_and_load() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 4.0, 2)).unwrap();
        let removed = w.remove_at(0);
        assert_eq!(removed.name, "A");
        assert_eq!(w.available_capacity, 5);
        assert_eq!(w.current_load, 0.0);
    }

    #[test]
    fn reset_clears_all_state() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 4.0, 2)).unwrap();
        w.reset();
        assert!(w.task_queue.is_empty());
        assert_eq!(w.available_capacity, w.capacity);
        assert_eq!(w.current_load, 0.0);
    }

    #[test]
    fn expected_work_time_excludes_current_task() {
        let mut w = worker();
        w.add_task(task("A", Tier::Tier1, "eu", 2.0, 1)).unwrap();
        w.add_task(task("B", Tier::Tier1, "eu", 3.0, 1)).unwrap();
        w.process_next_task();
        assert_eq!(w.expected_work_time(), 3.0);
    }
}
