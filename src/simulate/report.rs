//! Console-facing formatting helpers for the simulator: `HH:MM` time display
//! and the final per-worker utilisation/pending-task report (§6, §10.5).

use crate::worker::Worker;

/// Formats simulated minutes as `HH:MM`, matching the original scheduler's
/// `_format_time` helper.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0) as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Utilisation/queue snapshot for one worker, taken at the moment the event
/// loop drains (before the final drain phase artificially zeroes out
/// `current_load` by completing every remaining task).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerStat {
    pub name: String,
    pub tier: String,
    pub utilization_pct: f64,
    pub queued: usize,
    pub current_task: Option<String>,
}

pub fn snapshot_stats(workers: &[Worker], now: f64) -> Vec<WorkerStat> {
    workers
        .iter()
        .map(|w| WorkerStat {
            name: w.name.clone(),
            tier: w.tier.to_string(),
            utilization_pct: if now > 0.0 { (w.current_load / now) * 100.0 } else { 0.0 },
            queued: w.task_queue.len(),
            current_task: w.current_task.as_ref().map(|t| t.name.clone()),
        })
        .collect()
}
