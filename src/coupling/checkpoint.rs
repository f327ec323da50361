//! Checkpoint policy and save scheduling
//!
//! Snapshots fire on a fixed time grid anchored at the run's initial time:
//! the first target is `initial + interval`, and each save advances the
//! target by exactly one interval, never re-anchored to the time actually
//! reached. Phase granularity may delay a save past its grid point, but the
//! grid itself is preserved, so no threshold is ever skipped. The final
//! state at end time is always saved.
//!
//! File names are deterministic: the simulated time at two-decimal fixed
//! precision is embedded in the name, so reaching `t = 1.50` produces one
//! artifact distinct from `t = 1.00`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::coupling::error::CouplingError;
use crate::engine::SolverEngine;

// =================================================================================================
// Checkpoint Policy
// =================================================================================================

/// Where snapshots go and what they are called.
///
/// The save *interval* is part of the coupling configuration; the policy
/// only covers artifact placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointPolicy {
    /// Directory snapshots are written into
    pub directory: PathBuf,

    /// File name prefix, e.g. `"Electronics_CHT_partitioned"`
    pub prefix: String,
}

impl CheckpointPolicy {
    /// Create a policy writing `<prefix>_t<time>.sim` files into `directory`.
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    /// Validate the policy contents.
    pub fn validate(&self) -> Result<(), CouplingError> {
        if self.prefix.is_empty() {
            return Err(CouplingError::Configuration(
                "Checkpoint prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CheckpointPolicy {
    fn default() -> Self {
        Self::new(".", "cht_run")
    }
}

// =================================================================================================
// Checkpoints
// =================================================================================================

/// Save scheduler: tracks the next grid target and triggers snapshots.
#[derive(Debug)]
pub struct Checkpoints {
    policy: CheckpointPolicy,
    interval: f64,
    next_save_time: f64,
    written: Vec<(f64, PathBuf)>,
}

impl Checkpoints {
    /// Create a schedule with the first target one interval past
    /// `initial_time`.
    pub fn new(policy: CheckpointPolicy, interval: f64, initial_time: f64) -> Self {
        Self {
            policy,
            interval,
            next_save_time: initial_time + interval,
            written: Vec::new(),
        }
    }

    /// Deterministic snapshot path for a given simulated time.
    pub fn snapshot_path(&self, time: f64) -> PathBuf {
        self.policy
            .directory
            .join(format!("{}_t{:.2}.sim", self.policy.prefix, time))
    }

    /// Trigger a snapshot if `current_time` has reached the next grid
    /// target or the end time. On a trigger, the grid target advances by
    /// one fixed interval. A failed save is fatal.
    pub fn maybe_save(
        &mut self,
        engine: &mut dyn SolverEngine,
        current_time: f64,
        end_time: f64,
    ) -> Result<Option<&Path>, CouplingError> {
        if current_time < self.next_save_time && current_time < end_time {
            return Ok(None);
        }

        let path = self.snapshot_path(current_time);
        info!("saving simulation at t = {:.4} s -> {}", current_time, path.display());

        engine
            .save_snapshot(&path)
            .map_err(|err| CouplingError::Checkpoint {
                time: current_time,
                source: err,
            })?;

        self.next_save_time += self.interval;
        self.written.push((current_time, path));

        Ok(self.written.last().map(|(_, p)| p.as_path()))
    }

    /// Next grid target.
    pub fn next_save_time(&self) -> f64 {
        self.next_save_time
    }

    /// Snapshots written so far, as (trigger time, path) pairs.
    pub fn written(&self) -> &[(f64, PathBuf)] {
        &self.written
    }

    /// Consume the schedule, returning the written list for the summary.
    pub fn into_written(self) -> Vec<(f64, PathBuf)> {
        self.written
    }
}

// =================================================================================================
// Tests
// =================================================================================================
