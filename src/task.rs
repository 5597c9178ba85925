//! Task domain model: [`Priority`], [`Tier`], [`Resource`], and [`Task`] itself.
//!
//! Mirrors the `Task` class and its three enumerations in the original
//! Python scheduler's `model` package, with the enumeration semantics made
//! explicit via `Ord`/`PartialOrd` instead of relying on `.value` comparisons
//! scattered through the scheduler.

use std::fmt;
use std::str::FromStr;

/// Urgency of a task. Ordering is by urgency: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

/// Worker capability level / task capability requirement.
///
/// A task's tier is the *minimum* capability a worker must have to run it;
/// a worker's tier is its capability ceiling. Feasibility requires
/// `worker.tier >= task.tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
    Tier4 = 4,
    Tier5 = 5,
}

impl Tier {
    /// Maps a 1-based integer (as carried by the long-form CSV column) onto a
    /// `Tier`. Out-of-range values return `None` so the caller can fall back
    /// to [`Tier::Tier2`] with a warning, per the input adapter's rules.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Tier::Tier1),
            2 => Some(Tier::Tier2),
            3 => Some(Tier::Tier3),
            4 => Some(Tier::Tier4),
            5 => Some(Tier::Tier5),
            _ => None,
        }
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TIER1" => Ok(Tier::Tier1),
            "TIER2" => Ok(Tier::Tier2),
            "TIER3" => Ok(Tier::Tier3),
            "TIER4" => Ok(Tier::Tier4),
            "TIER5" => Ok(Tier::Tier5),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Tier1 => "TIER1",
            Tier::Tier2 => "TIER2",
            Tier::Tier3 => "TIER3",
            Tier::Tier4 => "TIER4",
            Tier::Tier5 => "TIER5",
        };
        write!(f, "{}", s)
    }
}

/// Named resource level, as it appears in the CSV adapter. A task's actual
/// `resource_requirements` on [`Task`] is a plain integer unit count — this
/// enum only exists to translate the CSV's `LOW|MEDIUM|HIGH` strings (or a
/// semicolon-separated list of them in the short form) into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Resource {
    /// Integer resource units this level consumes.
    pub fn units(self) -> u32 {
        self as u32
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Resource::Low),
            "MEDIUM" => Ok(Resource::Medium),
            "HIGH" => Ok(Resource::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::Low => "LOW",
            Resource::Medium => "MEDIUM",
            Resource::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}

/// A unit of work to be assigned to a [`Worker`](crate::worker::Worker).
///
/// `due_date` and `arrival_time` are both expressed in whatever time unit
/// the caller has chosen for the run (days for batch scheduling, minutes for
/// simulated/online scheduling) — the core never looks at a calendar, only
/// the input adapter does that translation (see [`crate::input`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub priority: Priority,
    pub tier: Tier,
    pub region: String,
    /// Non-negative; interpreted in the run's chosen time unit.
    pub estimated_duration: f64,
    /// Positive integer resource units consumed while the task runs.
    pub resource_requirements: u32,
    /// Absolute deadline in the run's chosen time unit.
    pub due_date: f64,
    /// Absolute arrival timestamp in the run's chosen time unit. Unused in
    /// batch mode; drives event ordering in simulated mode.
    pub arrival_time: f64,
    pub completed: bool,
}

impl Task {
    /// Builds a task with `arrival_time = 0.0` and `completed = false`,
    /// matching the defaults the Python `Task.__init__` applies.
    pub fn new(
        name: impl Into<String>,
        priority: Priority,
        tier: Tier,
        region: impl Into<String>,
        estimated_duration: f64,
        resource_requirements: u32,
        due_date: f64,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            tier,
            region: region.into(),
            estimated_duration: estimated_duration.max(0.0),
            resource_requirements,
            due_date,
            arrival_time: 0.0,
            completed: false,
        }
    }

    pub fn with_arrival_time(mut self, arrival_time: f64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

/// Stable ordering key used throughout the scheduler: highest priority
/// first, ties broken by earliest deadline. A queue is required to stay
/// sorted under this key at all times (see [`Worker::add_task`](crate::worker::Worker::add_task)).
pub fn queue_order(a: &Task, b: &Task) -> std::cmp::Ordering {
    b.priority.cmp(&a.priority).then(a.due_date.total_cmp(&b.due_date))
}
