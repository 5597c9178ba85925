//! CSV task ingestion (§6, §10.5): a header-less table of task records
//! becomes a `Vec<Task>`, in either of two column layouts distinguished by
//! column count. Mirrors `src/input_handler/input_handler.py`'s row-by-row,
//! warn-and-skip parsing, but reports malformed rows as
//! [`Warning::InputParse`](crate::scheduler::error::Warning) instead of
//! printing straight to stdout.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use crate::scheduler::error::Warning;
use crate::task::{Priority, Resource, Task, Tier};

/// Unit that bare numeric durations/due-dates in the short form are taken
/// to already be in, and that `created_date`/`due_to` timestamps in the
/// long form are converted to. Batch mode uses [`TimeUnit::Days`];
/// simulated mode uses [`TimeUnit::Minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Minutes,
}

impl TimeUnit {
    fn days_to_unit(self, days: f64) -> f64 {
        match self {
            TimeUnit::Days => days,
            TimeUnit::Minutes => days * 24.0 * 60.0,
        }
    }
}

/// Reads `path` and parses every row into a [`Task`], returning whatever
/// rows could not be parsed as [`Warning`]s rather than failing the whole
/// load — matching the original's "skip the bad row, keep going" behaviour.
///
/// # Errors
/// Returns an error only if the file itself cannot be opened or read.
pub fn load_tasks_from_csv(path: &Path, unit: TimeUnit) -> Result<(Vec<Task>, Vec<Warning>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open task CSV: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut tasks = Vec::new();
    let mut warnings = Vec::new();

    for (row_num, record) in reader.records().enumerate() {
        let row_num = row_num + 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warnings.push(Warning::InputParse { row: row_num, detail: e.to_string() });
                continue;
            }
        };
        let cols: Vec<&str> = record.iter().collect();

        let parsed = if cols.len() >= 8 {
            parse_long_form(row_num, &cols, unit)
        } else if cols.len() >= 6 {
            parse_short_form(row_num, &cols, unit)
        } else {
            Err(format!("row has {} columns, need at least 6", cols.len()))
        };

        match parsed {
            Ok(task) => tasks.push(task),
            Err(detail) => {
                warn!(row = row_num, %detail, "skipping malformed CSV row");
                warnings.push(Warning::InputParse { row: row_num, detail });
            }
        }
    }

    Ok((tasks, warnings))
}

/// `priority, due_date (YYYY-MM-DD), region, duration, resources
/// (semicolon-separated), tier (TIERn)`.
fn parse_short_form(row_num: usize, cols: &[&str], unit: TimeUnit) -> Result<Task, String> {
    let priority = cols[0].trim().parse::<Priority>().unwrap_or_else(|_| {
        warn!(row = row_num, value = cols[0], "invalid priority, defaulting to MEDIUM");
        Priority::Medium
    });

    let due_date = parse_date(cols[1])
        .map(|d| unit.days_to_unit(d))
        .ok_or_else(|| format!("invalid due_date '{}'", cols[1]))?;

    let region = cols[2].trim().to_string();

    let duration: f64 = cols[3].trim().parse().map_err(|_| format!("invalid duration '{}'", cols[3]))?;
    let duration = if duration < 0.0 { 5.0 } else { duration };

    let resource = cols[4]
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .parse::<Resource>()
        .unwrap_or_else(|_| {
            warn!(row = row_num, value = cols[4], "invalid resource, defaulting to MEDIUM");
            Resource::Medium
        });

    let tier = cols[5].trim().parse::<Tier>().unwrap_or_else(|_| {
        warn!(row = row_num, value = cols[5], "invalid tier, defaulting to TIER2");
        Tier::Tier2
    });

    Ok(Task::new(row_num.to_string(), priority, tier, region, duration, resource.units(), due_date))
}

/// `due_to, created_date, region, tier (int), priority, estimated_duration,
/// maximum_waiting_time, resource_requirement`. `maximum_waiting_time` is
/// parsed (to surface a malformed value) and otherwise discarded, matching
/// the original handler, which never reads it back.
fn parse_long_form(row_num: usize, cols: &[&str], unit: TimeUnit) -> Result<Task, String> {
    let due_date = parse_datetime(cols[0])
        .map(|d| unit.days_to_unit(d))
        .ok_or_else(|| format!("invalid due_to '{}'", cols[0]))?;
    let created_date = parse_datetime(cols[1])
        .map(|d| unit.days_to_unit(d))
        .ok_or_else(|| format!("invalid created_date '{}'", cols[1]))?;

    let region = cols[2].trim().to_string();

    let tier_num: i64 = cols[3].trim().parse().map_err(|_| format!("invalid tier '{}'", cols[3]))?;
    let tier = Tier::from_level(tier_num).unwrap_or_else(|| {
        warn!(row = row_num, value = tier_num, "invalid tier, defaulting to TIER2");
        Tier::Tier2
    });

    let priority = cols[4].trim().parse::<Priority>().unwrap_or_else(|_| {
        warn!(row = row_num, value = cols[4], "invalid priority, defaulting to MEDIUM");
        Priority::Medium
    });

    let duration: f64 = cols[5].trim().parse().map_err(|_| format!("invalid estimated_duration '{}'", cols[5]))?;
    let duration = if duration < 0.0 { 5.0 } else { duration };

    let _maximum_waiting_time: f64 =
        cols[6].trim().parse().map_err(|_| format!("invalid maximum_waiting_time '{}'", cols[6]))?;

    let resource = cols[7].trim().parse::<Resource>().unwrap_or_else(|_| {
        warn!(row = row_num, value = cols[7], "invalid resource_requirement, defaulting to MEDIUM");
        Resource::Medium
    });

    Ok(Task::new(row_num.to_string(), priority, tier, region, duration, resource.units(), due_date)
        .with_arrival_time(created_date))
}

/// Parses `YYYY-MM-DD`, returning the number of days since the Unix epoch
/// so results are comparable across rows.
fn parse_date(s: &str) -> Option<f64> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| (d - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as f64)
}

/// Parses `YYYY-MM-DD HH:MM:SS`, returning fractional days since epoch.
fn parse_datetime(s: &str) -> Option<f64> {
    chrono::NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
            (dt - epoch).num_seconds() as f64 / 86_400.0
        })
}
