//! Diagnostics reporters
//!
//! Best-effort hooks for inspecting a run while it executes: convergence
//! indicators after each fluid phase, progress metrics after each major
//! step. Hooks are optional and must never be load-bearing: the scheduler
//! catches every hook failure, logs it at warn level, and carries on. A
//! diagnostics failure cannot abort a numerically successful run.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::coupling::error::DiagnosticsError;

// =================================================================================================
// Reports
// =================================================================================================

/// Snapshot handed to [`DiagnosticsReporter::after_fluid_phase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidPhaseReport {
    /// Major step the phase belongs to (1-based)
    pub major_step: u64,

    /// Subcycle within the major step (1-based)
    pub subcycle: u32,

    /// Physical time the phase ran at (frozen during steady iteration)
    pub time: f64,

    /// Iterations granted to the phase
    pub iterations_granted: u32,
}

/// Snapshot handed to [`DiagnosticsReporter::after_major_step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorStepReport {
    /// Completed major step (1-based)
    pub major_step: u64,

    /// Physical time after the step
    pub time: f64,

    /// Running total of granted fluid iterations
    pub total_fluid_iterations: u64,

    /// Running total of completed solid phases
    pub total_solid_steps: u64,
}

// =================================================================================================
// Reporter Trait
// =================================================================================================

/// Observer of a running coupled solution.
///
/// Both hooks default to no-ops; implement whichever is useful. Returning
/// an error is allowed and harmless; the scheduler logs and ignores it.
///
/// # Example
///
/// ```rust
/// use cht_rs::coupling::{DiagnosticsReporter, FluidPhaseReport};
/// use cht_rs::coupling::DiagnosticsError;
///
/// struct ResidualWatch;
///
/// impl DiagnosticsReporter for ResidualWatch {
///     fn name(&self) -> &str {
///         "Residual Watch"
///     }
///
///     fn after_fluid_phase(&mut self, report: &FluidPhaseReport) -> Result<(), DiagnosticsError> {
///         // Could query a residual monitor here; failures stay local.
///         if report.iterations_granted < 10 {
///             return Err("fluid may need more iterations".into());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait DiagnosticsReporter {
    /// Reporter name for logging
    fn name(&self) -> &str;

    /// Called after every completed fluid phase.
    fn after_fluid_phase(&mut self, _report: &FluidPhaseReport) -> Result<(), DiagnosticsError> {
        Ok(())
    }

    /// Called after every completed major step.
    fn after_major_step(&mut self, _report: &MajorStepReport) -> Result<(), DiagnosticsError> {
        Ok(())
    }
}

// =================================================================================================
// Step History
// =================================================================================================

/// One accumulated row per major step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow {
    pub major_step: u64,
    pub time: f64,
    pub total_fluid_iterations: u64,
    pub total_solid_steps: u64,
}

/// Reporter that accumulates one [`HistoryRow`] per major step.
///
/// Cloning shares the underlying storage, so a handle kept by the caller
/// sees the rows recorded by the clone registered with the scheduler:
///
/// ```rust
/// use cht_rs::coupling::StepHistory;
///
/// let history = StepHistory::new();
/// let for_scheduler = history.clone();
/// // register `for_scheduler`, run, then read `history.rows()`
/// # assert!(history.rows().is_empty());
/// ```
///
/// The scheduler is single-threaded, so plain shared ownership suffices.
#[derive(Debug, Clone, Default)]
pub struct StepHistory {
    rows: Rc<RefCell<Vec<HistoryRow>>>,
}

impl StepHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows recorded so far, in major-step order.
    pub fn rows(&self) -> Vec<HistoryRow> {
        self.rows.borrow().clone()
    }

    /// Number of rows recorded.
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl DiagnosticsReporter for StepHistory {
    fn name(&self) -> &str {
        "Step History"
    }

    fn after_major_step(&mut self, report: &MajorStepReport) -> Result<(), DiagnosticsError> {
        self.rows.borrow_mut().push(HistoryRow {
            major_step: report.major_step,
            time: report.time,
            total_fluid_iterations: report.total_fluid_iterations,
            total_solid_steps: report.total_solid_steps,
        });
        Ok(())
    }
}

// =================================================================================================
// Log Reporter
// =================================================================================================

/// Reporter that emits one info-level line per major step.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsReporter for LogReporter {
    fn name(&self) -> &str {
        "Log Reporter"
    }

    fn after_major_step(&mut self, report: &MajorStepReport) -> Result<(), DiagnosticsError> {
        info!(
            "progress: step {} at t = {:.4} s ({} fluid iterations, {} solid steps)",
            report.major_step, report.time, report.total_fluid_iterations, report.total_solid_steps
        );
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
