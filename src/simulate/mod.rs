//! Discrete-event simulator for online/simulated scheduling (§4.6).
//!
//! A min-heap of timed events drives a simulated clock forward; arrivals
//! feed a pending pool, completions free up workers and immediately start
//! their next queued task, and any re-scheduling hook (see [`hooks`]) is
//! invoked whenever at least one worker sits idle. [`deadline`] implements
//! the separate post-schedule replay used by batch mode; [`report`] holds
//! the `HH:MM` formatting and final statistics the CLI prints.

pub mod deadline;
pub mod hooks;
pub mod report;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::info;

use self::hooks::ReschedulingHook;
use self::report::{format_minutes, snapshot_stats, WorkerStat};
use crate::scheduler::error::Warning;
use crate::task::Task;
use crate::worker::Worker;

#[derive(Debug, Clone)]
enum EventPayload {
    Arrival(Task),
    /// Worker index whose running task is completing.
    Completion(usize),
}

#[derive(Debug, Clone)]
struct Event {
    time: f64,
    /// Insertion order — the tie-break that keeps the heap stable (§4.7).
    seq: u64,
    payload: EventPayload,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the earliest time, and
        // the earliest-inserted event on a tie, first.
        other.time.total_cmp(&self.time).then(other.seq.cmp(&self.seq))
    }
}

/// Final report handed back to the CLI after a `run` completes.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub event_log: Vec<String>,
    pub final_time: f64,
    pub worker_stats: Vec<WorkerStat>,
    pub pending: Vec<Task>,
    pub warnings: Vec<Warning>,
}

/// Drives arrivals, completions, and re-scheduling over simulated time.
pub struct Simulator<H: ReschedulingHook> {
    workers: Vec<Worker>,
    heap: BinaryHeap<Event>,
    pending: Vec<Task>,
    now: f64,
    time_offset: f64,
    seq: u64,
    hook: H,
    event_log: Vec<String>,
    warnings: Vec<Warning>,
}

impl<H: ReschedulingHook> Simulator<H> {
    /// Builds a simulator from a worker fleet and the full set of tasks
    /// that will arrive during the run. Every task's `arrival_time` and
    /// `due_date` is normalised against the earliest arrival so the clock
    /// starts at zero (§4.6's time-offset rule); unlike the scheduler this
    /// was distilled from — which normalises lazily, one `add_task` call at
    /// a time — this computes the offset once up front since the full
    /// arrival set is known before the run starts.
    pub fn new(workers: Vec<Worker>, tasks: Vec<Task>, hook: H) -> Self {
        let time_offset = tasks
            .iter()
            .map(|t| t.arrival_time)
            .fold(f64::INFINITY, f64::min);
        let time_offset = if time_offset.is_finite() { -time_offset } else { 0.0 };

        let mut heap = BinaryHeap::new();
        let mut seq = 0;
        for mut task in tasks {
            task.arrival_time += time_offset;
            task.due_date += time_offset;
            heap.push(Event {
                time: task.arrival_time,
                seq,
                payload: EventPayload::Arrival(task),
            });
            seq += 1;
        }

        Self {
            workers,
            heap,
            pending: Vec::new(),
            now: 0.0,
            time_offset,
            seq,
            hook,
            event_log: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    /// Runs the event loop until the heap empties or an event's time
    /// exceeds `end_time`, then drains every still-assigned task in
    /// shortest-remaining-first order so reported statistics reflect the
    /// full workload even past `end_time`.
    pub fn run(mut self, end_time: f64) -> SimulationReport {
        while let Some(event) = self.heap.peek() {
            if event.time > end_time {
                break;
            }
            let event = self.heap.pop().unwrap();
            self.now = event.time;
            self.dispatch(event.payload);
            self.maybe_reschedule();
        }

        let worker_stats = snapshot_stats(&self.workers, self.now);
        self.drain();

        SimulationReport {
            event_log: self.event_log,
            final_time: self.now,
            worker_stats,
            pending: self.pending,
            warnings: self.warnings,
        }
    }

    fn dispatch(&mut self, payload: EventPayload) {
        match payload {
            EventPayload::Arrival(task) => {
                let line = format!(
                    "[{}] Task '{}' arrived | Priority: {} | Duration: {} | Tier: {}",
                    format_minutes(self.now),
                    task.name,
                    task.priority,
                    task.estimated_duration,
                    task.tier
                );
                info!(task = %task.name, time = self.now, "task arrived");
                self.event_log.push(line);
                self.pending.push(task);
            }
            EventPayload::Completion(i) => {
                let name = self.workers[i].current_task.as_ref().map(|t| t.name.clone());
                let duration = self.workers[i].current_task.as_ref().map(|t| t.estimated_duration);
                self.workers[i].complete_current_task();
                if let Some(d) = duration {
                    self.workers[i].current_load -= d;
                }
                if let Some(name) = name {
                    let line = format!(
                        "[{}] {} completed '{}'",
                        format_minutes(self.now),
                        self.workers[i].name,
                        name
                    );
                    info!(worker = %self.workers[i].name, task = %name, time = self.now, "task completed");
                    self.event_log.push(line);
                }
                self.start_next(i);
            }
        }
    }

    fn maybe_reschedule(&mut self) {
        if !self.workers.iter().any(|w| w.current_task.is_none()) {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let (remaining, warnings) = self.hook.reschedule(&mut self.workers, pending, self.now);
        self.pending = remaining;
        self.warnings.extend(warnings);

        for i in 0..self.workers.len() {
            if self.workers[i].current_task.is_none() {
                self.start_next(i);
            }
        }
    }

    fn start_next(&mut self, i: usize) {
        if let Some(task) = self.workers[i].process_next_task() {
            let completion_time = self.now + task.estimated_duration;
            let line = format!(
                "[{}] {} started '{}' (ETA: {})",
                format_minutes(self.now),
                self.workers[i].name,
                task.name,
                format_minutes(completion_time)
            );
            info!(worker = %self.workers[i].name, task = %task.name, eta = completion_time, "task started");
            self.event_log.push(line);
            self.heap.push(Event {
                time: completion_time,
                seq: self.seq,
                payload: EventPayload::Completion(i),
            });
            self.seq += 1;
        }
    }

    /// Processes every remaining `Completion` event in the heap, discarding
    /// any leftover `Arrival`s (they never occur within the simulated
    /// horizon). Heap ordering already guarantees shortest-remaining-first.
    fn drain(&mut self) {
        loop {
            match self.heap.peek() {
                Some(event) if matches!(event.payload, EventPayload::Arrival(_)) => {
                    self.heap.pop();
                }
                Some(_) => {
                    let event = self.heap.pop().unwrap();
                    self.now = event.time;
                    self.dispatch(event.payload);
                }
                None => break,
            }
        }
    }
}
