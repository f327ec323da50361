//! Coupling configuration
//!
//! # Design Philosophy
//!
//! The configuration is the "HOW far and how often" of a coupled run: the
//! global end time, the solid timestep, the fluid iteration budget per
//! solve, the subcycle count, and the save interval. It says nothing about
//! WHAT is being coupled; that is the scenario's job.
//!
//! All parameters are validated before a run starts; an invalid
//! configuration never reaches the main loop.

use crate::coupling::error::CouplingError;

/// Reference timestep a fully coupled solution of the same problem would
/// need to resolve the fluid timescale. Used only for the speedup estimate
/// reported at startup and in the summary.
pub const FULLY_COUPLED_REFERENCE_STEP: f64 = 1e-6;

// =================================================================================================
// Coupling Configuration
// =================================================================================================

/// Parameters of a partitioned alternating run.
///
/// # Invariants
///
/// Enforced by [`validate`](CouplingConfig::validate):
/// - `solid_time_step > 0`
/// - `fluid_iterations > 0`
/// - `subcycles >= 1`
/// - `save_interval > 0`
/// - `end_time` finite
///
/// # Example
///
/// ```rust
/// use cht_rs::coupling::CouplingConfig;
///
/// // 10 s of physical time, 2 ms solid steps, 30 fluid iterations per
/// // solve, 2 fluid/solid pairs per major step, save every 0.5 s.
/// let config = CouplingConfig::new(10.0, 0.002, 30, 2, 0.5);
/// config.validate().unwrap();
///
/// assert_eq!(config.nominal_major_step(), 0.004);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CouplingConfig {
    /// Total physical time to simulate \[s\]
    pub end_time: f64,

    /// Transient timestep for the solid domains \[s\]
    pub solid_time_step: f64,

    /// Steady iterations per fluid solve
    pub fluid_iterations: u32,

    /// Number of fluid/solid pairs per major step
    pub subcycles: u32,

    /// Save a snapshot every this much simulated time \[s\]
    pub save_interval: f64,
}

impl CouplingConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `end_time` - Total physical time \[s\]
    /// * `solid_time_step` - Solid timestep \[s\]
    /// * `fluid_iterations` - Steady iterations per fluid solve
    /// * `subcycles` - Fluid/solid pairs per major step
    /// * `save_interval` - Snapshot interval \[s\]
    pub fn new(
        end_time: f64,
        solid_time_step: f64,
        fluid_iterations: u32,
        subcycles: u32,
        save_interval: f64,
    ) -> Self {
        Self {
            end_time,
            solid_time_step,
            fluid_iterations,
            subcycles,
            save_interval,
        }
    }

    /// Nominal time advanced by one major step: `subcycles * solid_time_step`.
    ///
    /// Informational. The scheduler advances per subcycle and reconciles the
    /// actual time from the engine read-back; this value only anchors the
    /// status line and the fixed nominal grid.
    pub fn nominal_major_step(&self) -> f64 {
        self.subcycles as f64 * self.solid_time_step
    }

    /// Estimated speedup against a fully coupled solution resolving the
    /// fluid timescale everywhere.
    pub fn speedup_estimate(&self) -> f64 {
        self.solid_time_step / FULLY_COUPLED_REFERENCE_STEP
    }

    /// Validate that parameters are physically meaningful.
    pub fn validate(&self) -> Result<(), CouplingError> {
        if !self.end_time.is_finite() {
            return Err(CouplingError::Configuration(
                "End time must be finite".to_string(),
            ));
        }
        if self.solid_time_step <= 0.0 || !self.solid_time_step.is_finite() {
            return Err(CouplingError::Configuration(
                "Solid time step must be positive".to_string(),
            ));
        }
        if self.fluid_iterations == 0 {
            return Err(CouplingError::Configuration(
                "Fluid iterations must be greater than 0".to_string(),
            ));
        }
        if self.subcycles == 0 {
            return Err(CouplingError::Configuration(
                "Subcycles must be at least 1".to_string(),
            ));
        }
        if self.save_interval <= 0.0 || !self.save_interval.is_finite() {
            return Err(CouplingError::Configuration(
                "Save interval must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CouplingConfig {
    /// The electronics-cooling reference case: 10 s end time, 2 ms solid
    /// timestep, 30 fluid iterations per solve, 2 subcycles, 0.5 s saves.
    fn default() -> Self {
        Self::new(10.0, 0.002, 30, 2, 0.5)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
