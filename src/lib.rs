//! foreman — a GRASP-based heterogeneous task/worker scheduler.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task.rs         – Task, Priority, Tier, Resource
//! ├── worker.rs        – Worker capacity/queue bookkeeping
//! ├── fleet.rs          – WorkerFleet YAML configuration
//! ├── input/            – CSV task ingestion (short/long form)
//! ├── scheduler/         – feasibility scoring, GRASP construction,
//! │                        local search, evaluation, batch scheduling
//! └── simulate/          – discrete-event online scheduling
//! ```
//!
//! Batch scheduling (`scheduler::GraspScheduler`/`GreedyScheduler`) assigns
//! a known, finite task list once and returns a complete [`scheduler::Solution`].
//! Simulated scheduling (`simulate::Simulator`) replays arrivals and
//! completions as a discrete-event timeline, re-invoking a pluggable
//! [`simulate::hooks::ReschedulingHook`] whenever a worker goes idle.

pub mod fleet;
pub mod input;
pub mod scheduler;
pub mod simulate;
pub mod task;
pub mod worker;
