//! Domain layout and activation control
//!
//! # Design
//!
//! Two structures with a strict before/after relationship:
//!
//! - [`DomainLayout`]: the configured names, one fluid domain plus an
//!   ordered, non-empty list of solid domains. Pure data, validated.
//! - [`DomainSet`]: the same domains resolved against a live engine.
//!   Resolution happens once, at startup, and is fail-fast: a missing
//!   domain is a fatal configuration error, never a retryable condition.
//!
//! The domain set is also the sole owner of the activation invariant:
//! before every solver invocation exactly one side is enabled: the fluid
//! domain alone, or all solid domains together. Never both, never neither.

use std::fmt;

use tracing::info;

use crate::coupling::error::CouplingError;
use crate::engine::{DomainHandle, EngineError, SolverEngine};

// =================================================================================================
// Phase
// =================================================================================================

/// Which side of the coupling a solver invocation advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Steady fluid iterations against frozen solid temperatures
    Fluid,

    /// Transient solid conduction against the converged fluid field
    Solid,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Fluid => write!(f, "fluid"),
            Phase::Solid => write!(f, "solid"),
        }
    }
}

// =================================================================================================
// Activation State
// =================================================================================================

/// Which side is currently enabled in the engine.
///
/// Mutual exclusion is a hard invariant: during any invocation exactly one
/// variant holds. The scheduler is the only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Fluid domain enabled, all solid domains disabled
    FluidActive,

    /// All solid domains enabled, fluid domain disabled
    SolidsActive,
}

// =================================================================================================
// Domain Layout
// =================================================================================================

/// Configured domain names for a coupled run.
///
/// # Examples
///
/// ```rust
/// use cht_rs::coupling::DomainLayout;
///
/// let layout = DomainLayout::new("Fluid_Volume", ["S_Silicon_Die", "S_Cold_Plate"]);
/// layout.validate().unwrap();
///
/// assert_eq!(layout.fluid(), "Fluid_Volume");
/// assert_eq!(layout.solids().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLayout {
    /// Fluid domain name
    fluid: String,

    /// Solid domain names, in configured order
    solids: Vec<String>,
}

impl DomainLayout {
    /// Create a layout from a fluid name and an ordered list of solid names.
    pub fn new<S, I>(fluid: impl Into<String>, solids: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            fluid: fluid.into(),
            solids: solids.into_iter().map(Into::into).collect(),
        }
    }

    /// The electronics-cooling reference layout: one coolant volume and the
    /// package stack from die to air gap.
    pub fn electronics_cooling() -> Self {
        Self::new(
            "Fluid_Volume",
            [
                "S_Silicon_Die",
                "S_Silicon_Substrate",
                "S_Vapor_Chamber",
                "S_Cold_Plate",
                "S_PCB",
                "S_Air_Gap",
            ],
        )
    }

    /// Fluid domain name
    pub fn fluid(&self) -> &str {
        &self.fluid
    }

    /// Solid domain names, in configured order
    pub fn solids(&self) -> &[String] {
        &self.solids
    }

    /// Validate the layout contents.
    pub fn validate(&self) -> Result<(), CouplingError> {
        if self.fluid.is_empty() {
            return Err(CouplingError::Configuration(
                "Fluid domain name cannot be empty".to_string(),
            ));
        }

        if self.solids.is_empty() {
            return Err(CouplingError::Configuration(
                "At least one solid domain is required".to_string(),
            ));
        }

        if self.solids.iter().any(|name| name.is_empty()) {
            return Err(CouplingError::Configuration(
                "Solid domain names cannot be empty".to_string(),
            ));
        }

        // Check unicity across all names, fluid included

        let mut names: Vec<&str> = self.solids.iter().map(String::as_str).collect();
        names.push(self.fluid.as_str());

        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();

        if unique.len() != names.len() {
            return Err(CouplingError::Configuration(
                "Domain names must be unique".to_string(),
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Domain Set
// =================================================================================================

/// Resolved domain handles plus activation control.
///
/// Built once at startup by [`DomainSet::resolve`]; held for the run's
/// lifetime. All activation goes through [`activate`](DomainSet::activate),
/// which flips the whole set in one call so that no invocation can ever
/// start with a mixed state.
#[derive(Debug)]
pub struct DomainSet {
    fluid: DomainHandle,
    solids: Vec<DomainHandle>,
    activation: Option<ActivationState>,
}

impl DomainSet {
    /// Resolve every configured domain against the engine, fluid first,
    /// solids in configured order.
    ///
    /// Fail-fast: the first missing name aborts with a configuration error
    /// and the run never reaches the main loop. Each successful resolution
    /// is logged (diagnostic only, not load-bearing).
    pub fn resolve(
        engine: &mut dyn SolverEngine,
        layout: &DomainLayout,
    ) -> Result<Self, CouplingError> {
        layout.validate()?;

        let fluid = engine.resolve_domain(layout.fluid()).map_err(|err| {
            CouplingError::Configuration(format!(
                "failed to resolve fluid domain '{}': {}",
                layout.fluid(),
                err
            ))
        })?;
        info!("found fluid domain: {}", fluid);

        let mut solids = Vec::with_capacity(layout.solids().len());
        for name in layout.solids() {
            let handle = engine.resolve_domain(name).map_err(|err| {
                CouplingError::Configuration(format!(
                    "failed to resolve solid domain '{}': {}",
                    name, err
                ))
            })?;
            info!("found solid domain: {}", handle);
            solids.push(handle);
        }

        Ok(Self {
            fluid,
            solids,
            activation: None,
        })
    }

    /// Enable exactly one side for the given phase: the fluid domain for
    /// [`Phase::Fluid`], all solid domains for [`Phase::Solid`]. The other
    /// side is disabled in the same call.
    ///
    /// Idempotent at the engine level; must complete before the paired
    /// solver invocation starts.
    pub fn activate(
        &mut self,
        engine: &mut dyn SolverEngine,
        phase: Phase,
    ) -> Result<(), EngineError> {
        let fluid_active = phase == Phase::Fluid;

        engine.set_domain_active(&self.fluid, fluid_active)?;
        for solid in &self.solids {
            engine.set_domain_active(solid, !fluid_active)?;
        }

        self.activation = Some(match phase {
            Phase::Fluid => ActivationState::FluidActive,
            Phase::Solid => ActivationState::SolidsActive,
        });

        Ok(())
    }

    /// Current activation state, `None` before the first phase.
    pub fn activation(&self) -> Option<ActivationState> {
        self.activation
    }

    /// Resolved fluid handle
    pub fn fluid(&self) -> &DomainHandle {
        &self.fluid
    }

    /// Resolved solid handles, in configured order
    pub fn solids(&self) -> &[DomainHandle] {
        &self.solids
    }
}

// =================================================================================================
// Tests
// =================================================================================================
