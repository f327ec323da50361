//! Partitioned coupling control
//!
//! This module provides the control logic that advances a multi-rate
//! coupled problem: which side is active, how far it runs, when state is
//! saved, and how progress is tracked toward the global end time.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! The coupling architecture separates concerns into three layers:
//!
//! 1. **Scenario** ([`CouplingScenario`]) - WHAT to couple
//!    - Solver engine (the physics host)
//!    - Domain layout (fluid role, solid roles)
//!    - Checkpoint placement
//!
//! 2. **Configuration** ([`CouplingConfig`]) - HOW far and how often
//!    - End time, solid timestep
//!    - Fluid iteration budget, subcycle count
//!    - Save interval
//!
//! 3. **Scheme** ([`CouplingScheme`] trait) - The schedule
//!    - Orders the phases, owns the state machine
//!    - Independent of the physics
//!
//! This separation allows:
//! - The same scheme against different engines (or a scripted test fake)
//! - Different schemes for the same scenario
//! - Flexible configuration without code changes
//!
//! # Module Organization
//!
//! - **`config`**: [`CouplingConfig`] and its validation
//! - **`domains`**: [`DomainLayout`], [`DomainSet`], activation control
//! - **`limits`**: [`StoppingLimits`], the stopping-criterion controller
//! - **`scheduler`**: [`CouplingScheme`] trait and the
//!   [`AlternatingScheduler`] implementation
//! - **`checkpoint`**: [`CheckpointPolicy`], [`Checkpoints`], the fixed
//!   save grid
//! - **`progress`**: [`TimeState`], [`ProgressCounters`], [`RunSummary`]
//! - **`diagnostics`**: [`DiagnosticsReporter`] hooks and built-ins
//! - **`error`**: [`CouplingError`], [`DiagnosticsError`]
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Solver Engine  │  (physics host)
//! └────────┬────────┘
//!          │
//!          ├──────────────────┐
//!          │                  │
//! ┌────────▼────────┐ ┌───────▼─────────┐
//! │ Domain          │ │ Scenario        │ ← WHAT to couple
//! │ Layout          │ │ (engine+layout) │
//! └─────────────────┘ └────────┬────────┘
//!                              │
//!                     ┌────────▼─────────────┐
//!                     │ Coupling Config      │ ← HOW far, how often
//!                     │ (times + budgets)    │
//!                     └────────┬─────────────┘
//!                              │
//!                     ┌────────▼────────┐
//!                     │ Coupling Scheme │ ← The schedule
//!                     │ (alternating)   │
//!                     └────────┬────────┘
//!                              │
//!                     ┌────────▼────────────┐
//!                     │ Run Summary         │ ← The outcome
//!                     │ (times + counters)  │
//!                     └─────────────────────┘
//! ```
//!
//! # The Alternating Scheme
//!
//! One major step advances simulated time by up to `K * dt_solid`:
//!
//! ```text
//! for subcycle in 1..=K:
//!     fluid phase   - fluid domain active, solids frozen,
//!                     step budget raised by the iteration count
//!     solid phase   - solid domains active, fluid frozen,
//!                     time target set to min(t + dt_solid, end)
//!     break early once the end time is reached
//! save if the fixed grid (or the end time) was crossed
//! fire diagnostics hooks (never fatal)
//! ```
//!
//! The two stopping limits never bound the same phase: the step ceiling
//! governs steady fluid iteration, the time target governs transient solid
//! advancement. See [`StoppingLimits`] for the protocol and
//! [`SolverEngine`](crate::engine::SolverEngine) for the contract that
//! keeps the leftover limit inert.
//!
//! # Error Handling
//!
//! All fatal failures surface as [`CouplingError`]:
//!
//! ```rust,ignore
//! match scheduler.run(&mut scenario, &config) {
//!     Ok(summary) => println!("done: {}", summary),
//!     Err(err) => eprintln!("run aborted: {}", err),
//! }
//! ```
//!
//! Common errors:
//! - Invalid configuration (zero timestep, no solid domains)
//! - Unresolvable domain name (aborts before any phase)
//! - Failed solver invocation (fatal, no retry)
//! - Failed snapshot write (fatal by design)

// =================================================================================================
// Module Declarations
// =================================================================================================

mod checkpoint;
mod config;
mod diagnostics;
mod domains;
mod error;
mod limits;
mod progress;
mod scenario;
mod scheduler;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use checkpoint::{CheckpointPolicy, Checkpoints};
pub use config::{CouplingConfig, FULLY_COUPLED_REFERENCE_STEP};
pub use diagnostics::{
    DiagnosticsReporter, FluidPhaseReport, HistoryRow, LogReporter, MajorStepReport, StepHistory,
};
pub use domains::{ActivationState, DomainLayout, DomainSet, Phase};
pub use error::{CouplingError, DiagnosticsError};
pub use limits::StoppingLimits;
pub use progress::{ProgressCounters, RunSummary, TimeState};
pub use scenario::CouplingScenario;
pub use scheduler::{AlternatingScheduler, CouplingScheme};
