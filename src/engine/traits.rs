//! Solver engine traits and types
//!
//! # Design Philosophy
//!
//! The coupling scheduler never talks to a concrete simulation engine
//! directly. Everything it needs from the host (domain lookup, activation,
//! stopping criteria, the blocking run call, time read-back, snapshotting)
//! is expressed through the [`SolverEngine`] trait. Any engine that can
//! answer these seven questions can be driven by the scheduler, and the
//! scheduler can be unit-tested against a scripted fake.
//!
//! # Stability Guarantee
//!
//! - `SolverEngine` trait: STABLE since v0.1.0
//! - `DomainHandle`: opaque to callers, engine-defined identity
//! - `EngineError`: EXTENSIBLE (new variants can be added)

use std::fmt;
use std::path::Path;

// =================================================================================================
// Domain Handle
// =================================================================================================

/// Opaque reference to a computational domain resolved by an engine.
///
/// Handles are produced by [`SolverEngine::resolve_domain`] once at startup
/// and held for the lifetime of the run. The `id` is engine-defined; the
/// scheduler only ever passes handles back to the engine that created them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainHandle {
    /// Engine-defined identity
    pub id: u32,

    /// Domain name as configured (e.g. `"Fluid_Volume"`)
    pub name: String,
}

impl DomainHandle {
    /// Create a handle. Engines call this; schedulers never do.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl fmt::Display for DomainHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =================================================================================================
// Engine Errors
// =================================================================================================

/// Failures surfaced by a solver engine.
///
/// The scheduler maps these into its own error kinds: a `NotFound` during
/// startup becomes a configuration error, a `Solver` failure during a phase
/// aborts the run, a `Snapshot` failure aborts a checkpoint.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Requested domain does not exist in the engine
    #[error("domain not found: {0}")]
    NotFound(String),

    /// The blocking solver run failed (divergence, host abort, ...)
    #[error("solver run failed: {0}")]
    Solver(String),

    /// State snapshot could not be written
    #[error("snapshot write failed: {0}")]
    Snapshot(String),
}

// =================================================================================================
// Solver Engine Trait
// =================================================================================================

/// Abstract boundary to the host simulation engine.
///
/// # Stopping Criteria Contract
///
/// The engine tracks two independent stopping thresholds:
///
/// - a **step ceiling** (raised incrementally via [`raise_step_limit`]),
///   compared against a step counter the engine maintains globally across
///   the whole run, never per invocation;
/// - a **physical-time ceiling** (set absolutely via [`set_time_limit`]).
///
/// The step ceiling bounds *steady* iteration (a steady sweep leaves
/// physical time frozen, so an already-reached time target cannot cut a
/// steady run short). The time ceiling bounds *transient* advancement
/// (a transient step is governed by the time target alone, so an exactly
/// consumed step ceiling cannot cut a transient run short). This split is
/// what makes the alternating scheme work: each phase is bounded by exactly
/// one limit, and the other limit, left over from the previous phase,
/// stays inert.
///
/// [`raise_step_limit`]: SolverEngine::raise_step_limit
/// [`set_time_limit`]: SolverEngine::set_time_limit
///
/// # Implementing an Engine
///
/// ```rust,ignore
/// impl SolverEngine for MyEngine {
///     fn resolve_domain(&mut self, name: &str) -> Result<DomainHandle, EngineError> {
///         self.lookup(name)
///             .map(|id| DomainHandle::new(id, name))
///             .ok_or_else(|| EngineError::NotFound(name.to_string()))
///     }
///     // ...
/// }
/// ```
pub trait SolverEngine {
    /// Resolve a named domain. Fails with [`EngineError::NotFound`] if the
    /// engine does not know the name.
    fn resolve_domain(&mut self, name: &str) -> Result<DomainHandle, EngineError>;

    /// Enable or disable a domain. Idempotent: enabling an already enabled
    /// domain (or disabling a disabled one) is a no-op.
    fn set_domain_active(&mut self, handle: &DomainHandle, active: bool) -> Result<(), EngineError>;

    /// Raise the step ceiling by `delta` relative to its current value.
    /// The ceiling is never lowered and never reset.
    fn raise_step_limit(&mut self, delta: u64) -> Result<(), EngineError>;

    /// Set the physical-time ceiling to an absolute value.
    fn set_time_limit(&mut self, value: f64) -> Result<(), EngineError>;

    /// Advance the active physics until the governing stopping criterion
    /// triggers. Blocking; returns only when the run has stopped.
    fn run_to_stopping_criterion(&mut self) -> Result<(), EngineError>;

    /// Authoritative elapsed physical time. The scheduler's own cursor is
    /// informational and is reconciled from this read-back after every
    /// transient phase.
    fn current_physical_time(&self) -> f64;

    /// Persist the full simulation state to `path`. The format is
    /// engine-defined; the scheduler only dictates the file name.
    fn save_snapshot(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Engine name for logging and diagnostics
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_handle_display() {
        let handle = DomainHandle::new(3, "S_Cold_Plate");
        assert_eq!(format!("{}", handle), "S_Cold_Plate");
        assert_eq!(handle.id, 3);
    }

    #[test]
    fn test_engine_error_messages() {
        let err = EngineError::NotFound("S_PCB".to_string());
        assert_eq!(err.to_string(), "domain not found: S_PCB");

        let err = EngineError::Solver("temperature diverged".to_string());
        assert!(err.to_string().contains("solver run failed"));

        let err = EngineError::Snapshot("disk full".to_string());
        assert!(err.to_string().contains("snapshot write failed"));
    }
}
