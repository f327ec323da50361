//! Time state, progress counters and run summary
//!
//! Explicit state structs, one writer: the scheduler owns and mutates
//! these for the run's lifetime, everything else reads.

use std::fmt;
use std::path::PathBuf;

use crate::coupling::config::FULLY_COUPLED_REFERENCE_STEP;

// =================================================================================================
// Time State
// =================================================================================================

/// The scheduler's time cursor.
///
/// `current_time` is informational between phases and reconciled from the
/// engine read-back after every solid phase; it is monotonically
/// non-decreasing. `major_step` counts completed passes of the subcycle
/// loop, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeState {
    /// Physical time at which the run started (read from the engine)
    pub initial_time: f64,

    /// Current physical time, reconciled after each solid phase
    pub current_time: f64,

    /// Major step counter, incremented at the top of each pass
    pub major_step: u64,
}

impl TimeState {
    /// Anchor the cursor at the engine's current physical time.
    pub fn new(initial_time: f64) -> Self {
        Self {
            initial_time,
            current_time: initial_time,
            major_step: 0,
        }
    }

    /// Simulated time elapsed so far.
    pub fn elapsed(&self) -> f64 {
        self.current_time - self.initial_time
    }
}

// =================================================================================================
// Progress Counters
// =================================================================================================

/// Accumulated work counters. Monotonic, never reset during a run,
/// mutated only by the scheduler immediately after a successful phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounters {
    /// Sum of the granted iteration count over every fluid phase
    pub total_fluid_iterations: u64,

    /// Number of completed solid phases
    pub total_solid_steps: u64,
}

impl ProgressCounters {
    /// Record a completed fluid phase that was granted `iterations` steps.
    pub fn record_fluid_phase(&mut self, iterations: u32) {
        self.total_fluid_iterations += iterations as u64;
    }

    /// Record a completed solid phase.
    pub fn record_solid_step(&mut self) {
        self.total_solid_steps += 1;
    }
}

// =================================================================================================
// Run Summary
// =================================================================================================

/// Final statistics of a completed run, returned by
/// [`CouplingScheme::run`](crate::coupling::CouplingScheme::run).
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Physical time at run start
    pub initial_time: f64,

    /// Physical time at run end
    pub final_time: f64,

    /// Solid timestep the run was configured with \[s\]
    pub solid_time_step: f64,

    /// Number of major steps executed
    pub major_steps: u64,

    /// Sum of granted fluid iterations
    pub total_fluid_iterations: u64,

    /// Number of completed solid phases
    pub total_solid_steps: u64,

    /// Total step budget granted to the host over the run
    pub steps_granted: u64,

    /// Snapshots written, as (trigger time, path) pairs in trigger order
    pub checkpoints: Vec<(f64, PathBuf)>,
}

impl RunSummary {
    /// Total simulated time: final minus initial.
    pub fn simulated_time(&self) -> f64 {
        self.final_time - self.initial_time
    }

    /// Iterations a fully coupled solution resolving the fluid timescale
    /// would have needed for the same span of physical time.
    pub fn equivalent_coupled_iterations(&self) -> u64 {
        (self.simulated_time() / FULLY_COUPLED_REFERENCE_STEP) as u64
    }

    /// Estimated speedup against that fully coupled solution.
    pub fn speedup_estimate(&self) -> f64 {
        self.solid_time_step / FULLY_COUPLED_REFERENCE_STEP
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  - Total simulated time: {} s", self.simulated_time())?;
        writeln!(f, "  - Major steps: {}", self.major_steps)?;
        writeln!(f, "  - Total fluid iterations: {}", self.total_fluid_iterations)?;
        writeln!(f, "  - Total solid timesteps: {}", self.total_solid_steps)?;
        writeln!(f, "  - Effective timestep used: {} s", self.solid_time_step)?;
        writeln!(
            f,
            "  - Computational savings vs fully coupled: ~{}x faster",
            self.speedup_estimate() as u64
        )?;
        writeln!(
            f,
            "  - Equivalent fully-coupled iterations avoided: {}",
            self.equivalent_coupled_iterations()
        )?;
        write!(f, "  - Checkpoints written: {}", self.checkpoints.len())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
