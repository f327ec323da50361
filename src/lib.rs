//! cht-rs: Partitioned Conjugate Heat Transfer Coupling Framework
//!
//! A control layer for multi-rate coupled simulations: a fast-equilibrating
//! fluid and slow-responding solids advance together without paying the
//! fluid timescale everywhere. Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! cht-rs is built on two core principles:
//!
//! 1. **Separation of Schedule and Physics**
//!    - The coupling scheme decides who runs, how far, and when to save
//!    - A solver engine (behind one trait) does the actual solving
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design at both seams (engine and scheme)
//!    - Explicit state structs with a single writer
//!    - Typed errors preserving the fatal / recoverable distinction
//!
//! # Quick Start
//!
//! ```rust
//! use cht_rs::coupling::{
//!     AlternatingScheduler, CheckpointPolicy, CouplingConfig, CouplingScheme,
//!     CouplingScenario, DomainLayout,
//! };
//! use cht_rs::models::ThermalNetworkEngine;
//!
//! // 1. Pick an engine and describe the domain roles
//! let mut scenario = CouplingScenario::new(
//!     Box::new(ThermalNetworkEngine::electronics_cooling()),
//!     DomainLayout::electronics_cooling(),
//! )
//! .with_checkpoint_policy(CheckpointPolicy::new(std::env::temp_dir(), "quick_start"));
//!
//! // 2. Configure the schedule: 20 ms of physical time, 2 ms solid steps,
//! //    30 fluid iterations per solve, 2 subcycles, save every 10 ms
//! let config = CouplingConfig::new(0.02, 0.002, 30, 2, 0.01);
//!
//! // 3. Run
//! let mut scheduler = AlternatingScheduler::new();
//! let summary = scheduler.run(&mut scenario, &config).unwrap();
//!
//! // 4. Access results
//! assert_eq!(summary.total_solid_steps, 10);
//! assert_eq!(summary.total_fluid_iterations, 300);
//! assert!(summary.final_time >= 0.02);
//! ```
//!
//! # Modules
//!
//! - [`engine`]: the abstract solver-engine boundary
//! - [`coupling`]: configuration, domains, limits, scheduler, checkpoints,
//!   progress, diagnostics
//! - [`models`]: reference engine implementations
//! - [`output`]: run-history export

// Core modules
pub mod engine;

pub mod coupling;
pub mod models;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use cht_rs::prelude::*;
    //! ```
    pub use crate::coupling::{
        AlternatingScheduler, CheckpointPolicy, CouplingConfig, CouplingError, CouplingScenario,
        CouplingScheme, DiagnosticsReporter, DomainLayout, Phase, RunSummary, StepHistory,
    };
    pub use crate::engine::{DomainHandle, EngineError, SolverEngine};
    pub use crate::models::ThermalNetworkEngine;
}
