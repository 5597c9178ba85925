//! The scheduling engine: feasibility scoring, GRASP construction, local
//! search, solution evaluation, and the two batch scheduler variants.
//!
//! Discrete-event online scheduling lives in [`crate::simulate`], which
//! reuses [`construct`], [`local_search`], and [`evaluate`] from here for
//! its GRASP re-scheduling hook.

pub mod batch;
pub mod construct;
pub mod error;
pub mod evaluate;
pub mod feasibility;
pub mod local_search;

pub use batch::{GraspScheduler, GreedyScheduler};
pub use construct::{construct, solution_snapshot, Solution};
pub use error::{SchedulerError, Warning};
pub use evaluate::evaluate;
pub use local_search::local_search;
