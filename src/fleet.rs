//! Worker fleet configuration (§10.3): loading a roster of [`Worker`]s from
//! YAML, with the same "empty → default fallback" behaviour
//! [`crate::config`]'s `NodeConfigManager` uses for node configs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::task::Tier;
use crate::worker::Worker;

#[derive(Debug, Deserialize)]
struct FleetFile {
    workers: Vec<WorkerEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkerEntry {
    name: String,
    tier: u8,
    regions: Vec<String>,
    capacity: u32,
}

/// A named roster of [`Worker`]s, loaded once at start-up and handed to
/// whichever scheduler mode the CLI selected.
#[derive(Debug, Clone)]
pub struct WorkerFleet {
    pub workers: Vec<Worker>,
}

impl WorkerFleet {
    /// Parses `path` into a [`WorkerFleet`]. An empty `workers:` list falls
    /// back to [`WorkerFleet::default_fleet`], matching
    /// `NodeConfigManager::load_from_file`'s default-on-empty rule.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, the YAML is
    /// malformed, or any entry names a tier outside `1..=5`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("loading worker fleet from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot open fleet configuration: {}", path.display()))?;
        let file: FleetFile = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse fleet YAML: {}", path.display()))?;

        if file.workers.is_empty() {
            warn!("no workers found in fleet configuration, using default fleet");
            return Ok(Self::default_fleet());
        }

        let mut workers = Vec::with_capacity(file.workers.len());
        for entry in file.workers {
            let tier = Tier::from_level(entry.tier as i64)
                .with_context(|| format!("worker '{}' has invalid tier {}", entry.name, entry.tier))?;
            workers.push(Worker::new(entry.name, tier, entry.regions, entry.capacity));
        }

        info!("loaded {} worker(s)", workers.len());
        Ok(Self { workers })
    }

    /// The built-in 20-worker fleet used when no configuration file is
    /// supplied, mirroring the worker roster hard-coded in the original
    /// scheduler's entry point.
    pub fn default_fleet() -> Self {
        fn w(name: &str, tier: Tier, regions: &[&str], capacity: u32) -> Worker {
            Worker::new(name, tier, regions.iter().map(|s| s.to_string()).collect(), capacity)
        }

        let workers = vec![
            w("Worker1", Tier::Tier1, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2"], 1),
            w("Worker2", Tier::Tier2, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-3", "sa-southeast-4"], 2),
            w(
                "Worker3",
                Tier::Tier3,
                &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3", "sa-southeast-4"],
                3,
            ),
            w("Worker4", Tier::Tier1, &["sa-unknown-1", "sa-southeast-1"], 1),
            w("Worker5", Tier::Tier2, &["sa-unknown-1", "sa-southeast-2", "sa-southeast-4"], 3),
            w("Worker6", Tier::Tier4, &["sa-unknown-1", "sa-southeast-3"], 2),
            w("Worker7", Tier::Tier2, &["sa-unknown-1", "sa-southeast-2", "sa-southeast-3"], 2),
            w(
                "Worker8",
                Tier::Tier3,
                &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3", "sa-southeast-4"],
                3,
            ),
            w("Worker9", Tier::Tier2, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-4"], 2),
            w("Worker10", Tier::Tier1, &["sa-unknown-1", "sa-southeast-1"], 1),
            w("Worker11", Tier::Tier1, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3"], 2),
            w("Worker12", Tier::Tier2, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-3", "sa-southeast-4"], 3),
            w(
                "Worker13",
                Tier::Tier3,
                &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3", "sa-southeast-4"],
                3,
            ),
            w("Worker14", Tier::Tier1, &["sa-unknown-1", "sa-southeast-4"], 1),
            w("Worker15", Tier::Tier2, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2"], 2),
            w("Worker16", Tier::Tier1, &["sa-unknown-1", "sa-southeast-3"], 1),
            w("Worker17", Tier::Tier2, &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3"], 2),
            w(
                "Worker18",
                Tier::Tier3,
                &["sa-unknown-1", "sa-southeast-1", "sa-southeast-2", "sa-southeast-3", "sa-southeast-4"],
                3,
            ),
            w("Worker19", Tier::Tier2, &["sa-unknown-1", "sa-southeast-3"], 2),
            w("Worker20", Tier::Tier1, &["sa-unknown-1", "sa-southeast-1"], 1),
        ];

        Self { workers }
    }
}
