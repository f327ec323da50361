//! Alternating coupling scheduler
//!
//! # Background
//!
//! A conjugate heat transfer problem couples a fluid that equilibrates in
//! microseconds to solids that respond over seconds. Advancing everything
//! at the fluid timescale wastes almost all of the work on a field that is
//! already converged. The alternating scheme exploits the disparity:
//!
//! ```text
//! per major step, K times:
//!     fluid solve   - steady iterations, solids frozen
//!     solid solve   - one transient timestep, fluid frozen
//! ```
//!
//! The fluid is re-converged from scratch every subcycle rather than
//! warm-started across the run: its boundary conditions only change on the
//! solid timescale, so a short steady solve against the current solid
//! temperatures recovers the field. The solid always advances against a
//! freshly converged fluid, never a stale one. The alternation order
//! inside a subcycle is fixed.
//!
//! # Characteristics
//!
//! - **Order**: first-order in the coupling (staggered, no sub-iteration)
//! - **Cost**: `K * fluid_iterations` steady sweeps + `K` transient steps
//!   per major step, against millions of coupled steps for the same span
//! - **Termination**: purely time-driven; no maximum-step cap
//!
//! # Failure Semantics
//!
//! Any failure inside a solver invocation is fatal and propagates
//! immediately. A failed physics solve leaves domain state undefined, so
//! there is no retry and no rollback of activation or limit state.
//! Diagnostics hooks are the one exception: their failures are logged and
//! swallowed.

use tracing::{debug, info, warn};

use crate::coupling::checkpoint::Checkpoints;
use crate::coupling::config::CouplingConfig;
use crate::coupling::diagnostics::{
    DiagnosticsReporter, FluidPhaseReport, MajorStepReport,
};
use crate::coupling::domains::{DomainSet, Phase};
use crate::coupling::error::CouplingError;
use crate::coupling::limits::StoppingLimits;
use crate::coupling::progress::{ProgressCounters, RunSummary, TimeState};
use crate::coupling::scenario::CouplingScenario;
use crate::engine::SolverEngine;

// =================================================================================================
// Coupling Scheme Trait
// =================================================================================================

/// A strategy for advancing a coupled scenario to its end time.
pub trait CouplingScheme {
    /// Drive the scenario from the engine's current physical time to the
    /// configured end time.
    fn run(
        &mut self,
        scenario: &mut CouplingScenario,
        config: &CouplingConfig,
    ) -> Result<RunSummary, CouplingError>;

    /// Scheme name
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Alternating Scheduler
// =================================================================================================

/// Partitioned alternating fluid/solid scheduler.
///
/// # Algorithm
///
/// Per major step, while `current_time < end_time`:
///
/// 1. Compute the nominal target `min(t + K * dt_solid, end_time)`
///    (informational; advancement is driven per subcycle).
/// 2. For each subcycle `1..=K`:
///    - fluid phase: activate the fluid domain only, raise the step budget
///      by the iteration count, run, count the grant;
///    - solid phase: activate the solid domains only, set the time target
///      to `min(t + dt_solid, end_time)`, run, read the reached time back
///      from the engine (never assumed, since the engine may clamp), count one
///      solid step;
///    - stop subcycling early once the end time is reached.
/// 3. Save a snapshot if the fixed save grid (or the end time) was crossed.
/// 4. Fire diagnostics hooks; their failures are logged and ignored.
///
/// # Example
///
/// ```rust
/// use cht_rs::coupling::{
///     AlternatingScheduler, CheckpointPolicy, CouplingConfig, CouplingScheme,
///     CouplingScenario, DomainLayout,
/// };
/// use cht_rs::models::ThermalNetworkEngine;
///
/// let mut scenario = CouplingScenario::new(
///     Box::new(ThermalNetworkEngine::electronics_cooling()),
///     DomainLayout::electronics_cooling(),
/// )
/// .with_checkpoint_policy(CheckpointPolicy::new(std::env::temp_dir(), "quick"));
///
/// // Short run: 10 ms of physical time
/// let config = CouplingConfig::new(0.01, 0.002, 30, 2, 1.0);
///
/// let mut scheduler = AlternatingScheduler::new();
/// let summary = scheduler.run(&mut scenario, &config).unwrap();
///
/// assert!(summary.final_time >= 0.01);
/// assert_eq!(summary.total_solid_steps, 5);
/// ```
#[derive(Default)]
pub struct AlternatingScheduler {
    reporters: Vec<Box<dyn DiagnosticsReporter>>,
}

impl AlternatingScheduler {
    /// Create a scheduler with no diagnostics reporters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a diagnostics reporter (builder form).
    pub fn with_reporter(mut self, reporter: Box<dyn DiagnosticsReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    /// Attach a diagnostics reporter.
    pub fn add_reporter(&mut self, reporter: Box<dyn DiagnosticsReporter>) {
        self.reporters.push(reporter);
    }

    // ====== Fluid phase ======

    /// Converge the flow field with frozen solid temperatures.
    fn run_fluid_phase(
        &mut self,
        engine: &mut dyn SolverEngine,
        domains: &mut DomainSet,
        limits: &mut StoppingLimits,
        counters: &mut ProgressCounters,
        time: &TimeState,
        config: &CouplingConfig,
        subcycle: u32,
    ) -> Result<(), CouplingError> {
        debug!(
            "  [fluid {}] converging flow field ({} iterations)",
            subcycle, config.fluid_iterations
        );

        let wrap = |source| CouplingError::SolverInvocation {
            phase: Phase::Fluid,
            subcycle,
            source,
        };

        domains.activate(engine, Phase::Fluid).map_err(wrap)?;
        limits
            .prime_fluid_phase(engine, config.fluid_iterations)
            .map_err(wrap)?;
        engine.run_to_stopping_criterion().map_err(wrap)?;

        counters.record_fluid_phase(config.fluid_iterations);

        self.dispatch_fluid_report(&FluidPhaseReport {
            major_step: time.major_step,
            subcycle,
            time: time.current_time,
            iterations_granted: config.fluid_iterations,
        });

        Ok(())
    }

    // ====== Solid phase ======

    /// Advance the thermal solution one solid timestep against the
    /// converged fluid field. Returns with `time.current_time` reconciled
    /// from the engine read-back.
    fn run_solid_phase(
        &mut self,
        engine: &mut dyn SolverEngine,
        domains: &mut DomainSet,
        limits: &mut StoppingLimits,
        counters: &mut ProgressCounters,
        time: &mut TimeState,
        config: &CouplingConfig,
        subcycle: u32,
    ) -> Result<(), CouplingError> {
        let target = (time.current_time + config.solid_time_step).min(config.end_time);

        debug!(
            "  [solid {}] advancing thermal solution: {:.4} -> {:.4} s",
            subcycle, time.current_time, target
        );

        let wrap = |source| CouplingError::SolverInvocation {
            phase: Phase::Solid,
            subcycle,
            source,
        };

        domains.activate(engine, Phase::Solid).map_err(wrap)?;
        limits.prime_solid_phase(engine, target).map_err(wrap)?;
        engine.run_to_stopping_criterion().map_err(wrap)?;

        // The time actually reached may be clamped or quantized by the
        // engine, so it is always read back rather than assumed.
        let reached = engine.current_physical_time();
        debug_assert!(
            reached >= time.current_time,
            "engine time moved backwards: {} -> {}",
            time.current_time,
            reached
        );
        time.current_time = reached;

        counters.record_solid_step();

        Ok(())
    }

    // ====== Diagnostics dispatch ======

    fn dispatch_fluid_report(&mut self, report: &FluidPhaseReport) {
        for reporter in &mut self.reporters {
            if let Err(err) = reporter.after_fluid_phase(report) {
                warn!("diagnostics reporter '{}' failed: {}", reporter.name(), err);
            }
        }
    }

    fn dispatch_major_step_report(&mut self, time: &TimeState, counters: &ProgressCounters) {
        let report = MajorStepReport {
            major_step: time.major_step,
            time: time.current_time,
            total_fluid_iterations: counters.total_fluid_iterations,
            total_solid_steps: counters.total_solid_steps,
        };

        for reporter in &mut self.reporters {
            if let Err(err) = reporter.after_major_step(&report) {
                warn!("diagnostics reporter '{}' failed: {}", reporter.name(), err);
            }
        }
    }
}

impl CouplingScheme for AlternatingScheduler {
    fn run(
        &mut self,
        scenario: &mut CouplingScenario,
        config: &CouplingConfig,
    ) -> Result<RunSummary, CouplingError> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let CouplingScenario {
            engine,
            layout,
            checkpoint,
        } = scenario;
        let engine: &mut dyn SolverEngine = engine.as_mut();

        // ====== Step 2: Initialization ======

        // Resolve every domain up front; a missing one aborts here,
        // before any phase executes.
        let mut domains = DomainSet::resolve(engine, layout)?;

        let initial_time = engine.current_physical_time();
        let mut limits = StoppingLimits::new(initial_time);
        let mut checkpoints = Checkpoints::new(checkpoint.clone(), config.save_interval, initial_time);
        let mut time = TimeState::new(initial_time);
        let mut counters = ProgressCounters::default();

        info!("partitioned CHT solution on engine '{}'", engine.name());
        info!("  - end time: {} s", config.end_time);
        info!("  - solid timestep: {} s", config.solid_time_step);
        info!("  - fluid iterations per solve: {}", config.fluid_iterations);
        info!("  - subcycles per timestep: {}", config.subcycles);
        info!("  - effective speedup: ~{}x", config.speedup_estimate() as u64);
        info!("  - starting from t = {} s", initial_time);

        // ====== Step 3: Main loop ======

        while time.current_time < config.end_time {
            time.major_step += 1;

            let step_start = time.current_time;
            let target_time = (step_start + config.nominal_major_step()).min(config.end_time);

            info!(
                "--- major step {}: t = {:.4} -> {:.4} s ---",
                time.major_step, step_start, target_time
            );

            // Alternate fluid and solid, K pairs per major step
            for subcycle in 1..=config.subcycles {
                self.run_fluid_phase(
                    engine, &mut domains, &mut limits, &mut counters, &time, config, subcycle,
                )?;
                self.run_solid_phase(
                    engine, &mut domains, &mut limits, &mut counters, &mut time, config, subcycle,
                )?;

                // End time reached mid-step: skip the remaining subcycles
                if time.current_time >= config.end_time {
                    break;
                }
            }

            checkpoints.maybe_save(engine, time.current_time, config.end_time)?;

            self.dispatch_major_step_report(&time, &counters);
        }

        // ====== Step 4: Summary ======

        let summary = RunSummary {
            initial_time,
            final_time: time.current_time,
            solid_time_step: config.solid_time_step,
            major_steps: time.major_step,
            total_fluid_iterations: counters.total_fluid_iterations,
            total_solid_steps: counters.total_solid_steps,
            steps_granted: limits.steps_granted(),
            checkpoints: checkpoints.into_written(),
        };

        info!("simulation complete");
        info!("{}", summary);

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Alternating Fluid-Solid"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
