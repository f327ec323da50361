//! Coupling scenario definition
//!
//! A scenario pairs a solver engine with a domain layout.

use crate::coupling::checkpoint::CheckpointPolicy;
use crate::coupling::domains::DomainLayout;
use crate::coupling::error::CouplingError;
use crate::engine::SolverEngine;

/// Coupled simulation scenario
///
/// Defines a specific case to run:
/// - Solver engine (the physics host)
/// - Domain layout (which domains play which role)
/// - Checkpoint policy (where snapshots go)
///
/// # Design
///
/// The same scenario can be driven by different coupling schemes.
/// This is the "WHAT to couple" (not "HOW to schedule it").
///
/// # Examples
///
/// ```rust
/// use cht_rs::coupling::{CouplingScenario, DomainLayout};
/// use cht_rs::models::ThermalNetworkEngine;
///
/// let engine = ThermalNetworkEngine::electronics_cooling();
/// let scenario = CouplingScenario::new(
///     Box::new(engine),
///     DomainLayout::electronics_cooling(),
/// );
///
/// scenario.validate().unwrap();
/// ```
pub struct CouplingScenario {
    /// Solver engine (the physics host)
    pub engine: Box<dyn SolverEngine>,

    /// Domain roles
    pub layout: DomainLayout,

    /// Snapshot placement
    pub checkpoint: CheckpointPolicy,
}

impl CouplingScenario {
    /// Create a scenario with the default checkpoint policy.
    pub fn new(engine: Box<dyn SolverEngine>, layout: DomainLayout) -> Self {
        Self {
            engine,
            layout,
            checkpoint: CheckpointPolicy::default(),
        }
    }

    /// Override the checkpoint policy.
    pub fn with_checkpoint_policy(mut self, policy: CheckpointPolicy) -> Self {
        self.checkpoint = policy;
        self
    }

    /// Verify scenario contents (layout and checkpoint policy).
    pub fn validate(&self) -> Result<(), CouplingError> {
        self.layout.validate()?;
        self.checkpoint.validate()
    }

    /// Engine name
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Number of configured domains, fluid included
    pub fn domain_count(&self) -> usize {
        1 + self.layout.solids().len()
    }
}

impl std::fmt::Debug for CouplingScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouplingScenario")
            .field("engine", &self.engine_name())
            .field("layout", &self.layout)
            .field("checkpoint", &self.checkpoint)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
