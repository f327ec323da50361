//! Solver engine abstraction
//!
//! This module defines the boundary between the coupling scheduler and the
//! host simulation engine that owns the actual field-equation solvers.
//!
//! # Core Concepts
//!
//! - **Solver Engine**: answers domain lookups, toggles domain activation,
//!   tracks the two stopping criteria, runs the physics, reports time, and
//!   writes snapshots
//! - **Domain Handle**: opaque per-domain reference, resolved once at startup
//! - **Engine Error**: the failure surface the scheduler maps into its own
//!   error kinds
//!
//! # Architecture
//!
//! Engines are **separate from the coupling scheme**:
//! - The engine provides the **physics** (what a phase computes)
//! - The scheme provides the **schedule** (when and how far each phase runs)
//!
//! This separation allows:
//! - The same scheme against any host engine (or a scripted test fake)
//! - Engine-internal parallelism without the scheduler knowing
//!
//! # Example
//!
//! ```rust
//! use cht_rs::engine::SolverEngine;
//! use cht_rs::models::ThermalNetworkEngine;
//!
//! let mut engine = ThermalNetworkEngine::electronics_cooling();
//! let handle = engine.resolve_domain("S_Silicon_Die").unwrap();
//! engine.set_domain_active(&handle, false).unwrap();
//! ```

// module declaration
pub mod traits;

// re-export commonly used types for convenience
pub use traits::{DomainHandle, EngineError, SolverEngine};
