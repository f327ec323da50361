//! Stopping-criterion controller
//!
//! Wraps the engine's two host-level stopping thresholds and enforces the
//! protocol the alternating scheme depends on:
//!
//! - the **step budget** is raised incrementally before each fluid phase,
//!   by exactly the configured iteration count relative to its current
//!   value, and is never lowered or reset. The host counts steps globally
//!   across the whole run, not per invocation;
//! - the **time target** is set absolutely before each solid phase and is
//!   monotonically non-decreasing over a run.
//!
//! Only one limit is tightened per phase. The limit left over from the
//! previous phase stays inert by engine contract (see
//! [`SolverEngine`](crate::engine::SolverEngine)): the step ceiling bounds
//! steady iteration only, the time target bounds transient advancement
//! only. The controller's assertions catch schedulers that break the
//! protocol; the engine contract covers the rest.
//!
//! Operational note: the step budget grows without bound over a run;
//! after `m` fluid phases the ceiling sits at its initial value plus
//! `m * fluid_iterations`. Whether the host's counter has a practical
//! ceiling is a property of the host, not of this controller; very long
//! runs should budget for it.

use crate::engine::{EngineError, SolverEngine};

// =================================================================================================
// Stopping Limits
// =================================================================================================

/// Controller for the two host-level stopping thresholds.
///
/// # Example
///
/// ```rust,ignore
/// let mut limits = StoppingLimits::new(engine.current_physical_time());
///
/// limits.prime_fluid_phase(&mut engine, 30)?;   // raise ceiling by 30
/// engine.run_to_stopping_criterion()?;
///
/// limits.prime_solid_phase(&mut engine, 0.002)?; // absolute time target
/// engine.run_to_stopping_criterion()?;
/// ```
#[derive(Debug, Clone)]
pub struct StoppingLimits {
    /// Total steps granted this run (sum of all raises)
    steps_granted: u64,

    /// Last absolute time target set, for monotonicity checking
    last_time_target: f64,
}

impl StoppingLimits {
    /// Create a controller anchored at the run's initial physical time.
    pub fn new(initial_time: f64) -> Self {
        Self {
            steps_granted: 0,
            last_time_target: initial_time,
        }
    }

    /// Prime the engine for a fluid phase: raise the step ceiling by
    /// `iterations` relative to its current value.
    pub fn prime_fluid_phase(
        &mut self,
        engine: &mut dyn SolverEngine,
        iterations: u32,
    ) -> Result<(), EngineError> {
        engine.raise_step_limit(iterations as u64)?;
        self.steps_granted += iterations as u64;
        Ok(())
    }

    /// Prime the engine for a solid phase: set the absolute physical-time
    /// target. Targets never move backwards over a run.
    pub fn prime_solid_phase(
        &mut self,
        engine: &mut dyn SolverEngine,
        target: f64,
    ) -> Result<(), EngineError> {
        debug_assert!(
            target >= self.last_time_target,
            "time target moved backwards: {} -> {}",
            self.last_time_target,
            target
        );

        engine.set_time_limit(target)?;
        self.last_time_target = target;
        Ok(())
    }

    /// Total steps granted across all fluid phases this run.
    pub fn steps_granted(&self) -> u64 {
        self.steps_granted
    }

    /// Last absolute time target set.
    pub fn last_time_target(&self) -> f64 {
        self.last_time_target
    }
}

// =================================================================================================
// Tests
// =================================================================================================
