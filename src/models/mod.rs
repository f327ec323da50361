//! Reference solver engines
//!
//! Concrete implementations of the
//! [`SolverEngine`](crate::engine::SolverEngine) trait. The coupling
//! scheduler drives these exactly as it would drive a full CFD host; the
//! trait is the only contact surface.
//!
//! # Available Engines
//!
//! ## [`ThermalNetworkEngine`]: lumped-capacitance network
//!
//! One coolant node exchanging heat with a stack of solid nodes through
//! film conductances, plus solid-to-solid conduction links. Small enough
//! to reason about analytically, complete enough to exercise every part of
//! the coupling protocol: steady sweeps against the step ceiling,
//! transient steps against the time target, snapshots, divergence
//! detection.
//!
//! The [`electronics_cooling`](ThermalNetworkEngine::electronics_cooling)
//! preset reproduces the liquid-cooled package stack (die, substrate,
//! vapor chamber, cold plate, PCB, air gap) that motivated the scheme.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod thermal_network;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use thermal_network::{FluidSpec, SolidSpec, ThermalNetworkEngine};
