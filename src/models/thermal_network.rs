//! Lumped-capacitance thermal network engine
//!
//! A small but complete [`SolverEngine`] implementation: one coolant node
//! exchanging heat with a set of solid nodes, each with its own thermal
//! mass, dissipated power, and film conductance, plus optional
//! solid-to-solid conduction links.
//!
//! # Purpose
//!
//! - A realistic stand-in for a host engine in demos and integration tests
//! - A reference implementation of the stopping-criteria contract: steady
//!   sweeps are bounded by the step ceiling with physical time frozen,
//!   transient steps are bounded by the time target
//!
//! # Physics
//!
//! Fluid (steady sweep, solids frozen): the coolant temperature relaxes
//! toward the instantaneous heat balance
//!
//! ```text
//! T_balance = (W * T_inlet + sum(hA_i * T_i)) / (W + sum(hA_i))
//! T_f      += relaxation * (T_balance - T_f)
//! ```
//!
//! where `W` is the coolant capacity rate (mass flow times specific heat).
//!
//! Solid (transient step, fluid frozen): explicit update of each enabled
//! node
//!
//! ```text
//! C_i dT_i/dt = Q_i + hA_i (T_f - T_i) + sum_j G_ij (T_j - T_i)
//! ```
//!
//! The conduction links `G_ij` form a symmetric conductance matrix.
//!
//! # Example
//!
//! ```rust
//! use cht_rs::engine::SolverEngine;
//! use cht_rs::models::{FluidSpec, SolidSpec, ThermalNetworkEngine};
//!
//! let mut engine = ThermalNetworkEngine::new(
//!     FluidSpec::new("Coolant", 300.0, 50.0, 0.5),
//!     vec![
//!         SolidSpec::new("Die", 20.0, 150.0, 5.0, 300.0),
//!         SolidSpec::new("Plate", 400.0, 0.0, 60.0, 300.0),
//!     ],
//! );
//! engine.link("Die", "Plate", 30.0);
//!
//! let die = engine.resolve_domain("Die").unwrap();
//! assert_eq!(die.name, "Die");
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::engine::{DomainHandle, EngineError, SolverEngine};

// =================================================================================================
// Node Specifications
// =================================================================================================

/// Coolant node parameters.
#[derive(Debug, Clone)]
pub struct FluidSpec {
    /// Domain name
    pub name: String,

    /// Coolant inlet temperature \[K\]
    pub inlet_temperature: f64,

    /// Capacity rate W = m_dot * cp \[W/K\]
    pub capacity_rate: f64,

    /// Per-sweep relaxation factor, in (0, 1]
    pub relaxation: f64,
}

impl FluidSpec {
    /// Create a coolant node.
    ///
    /// # Panics
    ///
    /// Panics when `capacity_rate` is negative or `relaxation` is outside
    /// `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        inlet_temperature: f64,
        capacity_rate: f64,
        relaxation: f64,
    ) -> Self {
        assert!(
            capacity_rate >= 0.0,
            "Capacity rate must be non-negative, got {}",
            capacity_rate
        );
        assert!(
            relaxation > 0.0 && relaxation <= 1.0,
            "Relaxation must be in ]0,1], got {}",
            relaxation
        );

        Self {
            name: name.into(),
            inlet_temperature,
            capacity_rate,
            relaxation,
        }
    }
}

/// Solid node parameters.
#[derive(Debug, Clone)]
pub struct SolidSpec {
    /// Domain name
    pub name: String,

    /// Thermal mass C \[J/K\]
    pub heat_capacity: f64,

    /// Dissipated power Q \[W\]
    pub power: f64,

    /// Film conductance hA to the coolant \[W/K\]
    pub film_conductance: f64,

    /// Initial temperature \[K\]
    pub initial_temperature: f64,
}

impl SolidSpec {
    /// Create a solid node.
    ///
    /// # Panics
    ///
    /// Panics when `heat_capacity` is not positive or `film_conductance`
    /// is negative.
    pub fn new(
        name: impl Into<String>,
        heat_capacity: f64,
        power: f64,
        film_conductance: f64,
        initial_temperature: f64,
    ) -> Self {
        assert!(
            heat_capacity > 0.0,
            "Heat capacity must be positive, got {}",
            heat_capacity
        );
        assert!(
            film_conductance >= 0.0,
            "Film conductance must be non-negative, got {}",
            film_conductance
        );

        Self {
            name: name.into(),
            heat_capacity,
            power,
            film_conductance,
            initial_temperature,
        }
    }
}

// =================================================================================================
// Thermal Network Engine
// =================================================================================================

/// Lumped thermal network behind the [`SolverEngine`] seam.
///
/// Domain handles: id 0 is the coolant, ids `1..=n` are the solids in
/// construction order.
#[derive(Debug, Clone)]
pub struct ThermalNetworkEngine {
    fluid: FluidSpec,
    fluid_temperature: f64,
    fluid_active: bool,

    solids: Vec<SolidSpec>,
    temperatures: DVector<f64>,
    capacities: DVector<f64>,
    powers: DVector<f64>,
    film: DVector<f64>,
    conductance: DMatrix<f64>,
    solids_active: Vec<bool>,

    /// Internal transient step; `None` advances to the target in one step
    conduction_step: Option<f64>,

    steps_taken: u64,
    max_steps: u64,
    time: f64,
    max_time: f64,
}

impl ThermalNetworkEngine {
    /// Create a network from a coolant node and a list of solid nodes.
    pub fn new(fluid: FluidSpec, solids: Vec<SolidSpec>) -> Self {
        let n = solids.len();

        let temperatures = DVector::from_iterator(n, solids.iter().map(|s| s.initial_temperature));
        let capacities = DVector::from_iterator(n, solids.iter().map(|s| s.heat_capacity));
        let powers = DVector::from_iterator(n, solids.iter().map(|s| s.power));
        let film = DVector::from_iterator(n, solids.iter().map(|s| s.film_conductance));

        let fluid_temperature = fluid.inlet_temperature;

        Self {
            fluid,
            fluid_temperature,
            fluid_active: false,
            solids,
            temperatures,
            capacities,
            powers,
            film,
            conductance: DMatrix::zeros(n, n),
            solids_active: vec![false; n],
            conduction_step: None,
            steps_taken: 0,
            max_steps: 0,
            time: 0.0,
            max_time: 0.0,
        }
    }

    /// The electronics-cooling reference network: a liquid-cooled package
    /// stack with the die dissipating most of the power.
    ///
    /// | Node               | C \[J/K\] | Q \[W\] | hA \[W/K\] |
    /// |--------------------|-----------|---------|------------|
    /// | S_Silicon_Die      | 20        | 150     | 5          |
    /// | S_Silicon_Substrate| 50        | 10      | 8          |
    /// | S_Vapor_Chamber    | 150       | 0       | 40         |
    /// | S_Cold_Plate       | 400       | 0       | 60         |
    /// | S_PCB              | 300       | 5       | 6          |
    /// | S_Air_Gap          | 2         | 0       | 1.5        |
    pub fn electronics_cooling() -> Self {
        let mut engine = Self::new(
            FluidSpec::new("Fluid_Volume", 300.0, 50.0, 0.5),
            vec![
                SolidSpec::new("S_Silicon_Die", 20.0, 150.0, 5.0, 300.0),
                SolidSpec::new("S_Silicon_Substrate", 50.0, 10.0, 8.0, 300.0),
                SolidSpec::new("S_Vapor_Chamber", 150.0, 0.0, 40.0, 300.0),
                SolidSpec::new("S_Cold_Plate", 400.0, 0.0, 60.0, 300.0),
                SolidSpec::new("S_PCB", 300.0, 5.0, 6.0, 300.0),
                SolidSpec::new("S_Air_Gap", 2.0, 0.0, 1.5, 300.0),
            ],
        );

        engine.link("S_Silicon_Die", "S_Silicon_Substrate", 20.0);
        engine.link("S_Silicon_Die", "S_Vapor_Chamber", 30.0);
        engine.link("S_Vapor_Chamber", "S_Cold_Plate", 50.0);
        engine.link("S_Silicon_Substrate", "S_PCB", 10.0);
        engine.link("S_Silicon_Substrate", "S_Air_Gap", 0.5);

        engine
    }

    /// Add a symmetric conduction link between two solid nodes.
    ///
    /// # Panics
    ///
    /// Panics when a name is unknown or the conductance is negative.
    pub fn link(&mut self, a: &str, b: &str, conductance: f64) {
        assert!(
            conductance >= 0.0,
            "Conductance must be non-negative, got {}",
            conductance
        );

        let i = self.solid_index(a).unwrap_or_else(|| panic!("unknown solid node '{}'", a));
        let j = self.solid_index(b).unwrap_or_else(|| panic!("unknown solid node '{}'", b));
        assert!(i != j, "cannot link node '{}' to itself", a);

        self.conductance[(i, j)] = conductance;
        self.conductance[(j, i)] = conductance;
    }

    /// Use a fixed internal conduction step instead of advancing to the
    /// time target in one step.
    ///
    /// # Panics
    ///
    /// Panics when `step` is not positive.
    pub fn with_conduction_step(mut self, step: f64) -> Self {
        assert!(step > 0.0, "Conduction step must be positive, got {}", step);
        self.conduction_step = Some(step);
        self
    }

    /// Coolant temperature \[K\]
    pub fn fluid_temperature(&self) -> f64 {
        self.fluid_temperature
    }

    /// Temperature of a solid node by name \[K\]
    pub fn solid_temperature(&self, name: &str) -> Option<f64> {
        self.solid_index(name).map(|i| self.temperatures[i])
    }

    /// Global step counter (steady sweeps taken so far)
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Current step ceiling
    pub fn step_ceiling(&self) -> u64 {
        self.max_steps
    }

    #[inline]
    fn solid_index(&self, name: &str) -> Option<usize> {
        self.solids.iter().position(|s| s.name == name)
    }

    /// One steady coolant sweep against frozen solid temperatures.
    fn fluid_sweep(&mut self) {
        let mut conductance_sum = self.fluid.capacity_rate;
        let mut weighted = self.fluid.capacity_rate * self.fluid.inlet_temperature;

        for i in 0..self.solids.len() {
            conductance_sum += self.film[i];
            weighted += self.film[i] * self.temperatures[i];
        }

        if conductance_sum == 0.0 {
            return;
        }

        let balance = weighted / conductance_sum;
        self.fluid_temperature += self.fluid.relaxation * (balance - self.fluid_temperature);
    }

    /// One explicit transient step of length `dt` for the enabled solids,
    /// coolant temperature frozen.
    fn advance_solids(&mut self, dt: f64) {
        let temps = self.temperatures.clone();

        // Net heat rate into each node: dissipation, film exchange with the
        // coolant, conduction exchange with the neighbours.
        let film_exchange = self
            .film
            .component_mul(&temps.map(|t| self.fluid_temperature - t));
        let row_sums = DVector::from_iterator(
            self.solids.len(),
            self.conductance.row_iter().map(|row| row.sum()),
        );
        let conduction = &self.conductance * &temps - row_sums.component_mul(&temps);
        let rate = (&self.powers + film_exchange + conduction).component_div(&self.capacities);

        for i in 0..self.solids.len() {
            if self.solids_active[i] {
                self.temperatures[i] = temps[i] + dt * rate[i];
            }
        }
    }

    /// Check for numerical blow-up after a run.
    fn validate_temperatures(&self) -> Result<(), EngineError> {
        let diverged = !self.fluid_temperature.is_finite()
            || self.temperatures.iter().any(|t| !t.is_finite());

        if diverged {
            return Err(EngineError::Solver(
                "temperature diverged (NaN or Inf). Try a smaller conduction step.".to_string(),
            ));
        }

        Ok(())
    }
}

impl SolverEngine for ThermalNetworkEngine {
    fn resolve_domain(&mut self, name: &str) -> Result<DomainHandle, EngineError> {
        if name == self.fluid.name {
            return Ok(DomainHandle::new(0, name));
        }

        match self.solid_index(name) {
            Some(index) => Ok(DomainHandle::new(index as u32 + 1, name)),
            None => Err(EngineError::NotFound(name.to_string())),
        }
    }

    fn set_domain_active(&mut self, handle: &DomainHandle, active: bool) -> Result<(), EngineError> {
        if handle.id == 0 {
            self.fluid_active = active;
            return Ok(());
        }

        let index = handle.id as usize - 1;
        match self.solids_active.get_mut(index) {
            Some(flag) => {
                *flag = active;
                Ok(())
            }
            None => Err(EngineError::NotFound(handle.name.clone())),
        }
    }

    fn raise_step_limit(&mut self, delta: u64) -> Result<(), EngineError> {
        self.max_steps += delta;
        Ok(())
    }

    fn set_time_limit(&mut self, value: f64) -> Result<(), EngineError> {
        self.max_time = value;
        Ok(())
    }

    fn run_to_stopping_criterion(&mut self) -> Result<(), EngineError> {
        let any_solid = self.solids_active.iter().any(|&a| a);

        if self.fluid_active && any_solid {
            return Err(EngineError::Solver(
                "fluid and solid domains enabled together".to_string(),
            ));
        }

        if self.fluid_active {
            // Steady: iterate to the step ceiling, physical time frozen.
            while self.steps_taken < self.max_steps {
                self.fluid_sweep();
                self.steps_taken += 1;
            }
        } else if any_solid {
            // Transient: advance to the time target, clamping the last
            // step so the read-back lands exactly on the target.
            while self.time < self.max_time {
                let remaining = self.max_time - self.time;
                match self.conduction_step {
                    Some(step) if step < remaining => {
                        self.advance_solids(step);
                        self.time += step;
                    }
                    _ => {
                        self.advance_solids(remaining);
                        self.time = self.max_time;
                    }
                }
            }
        } else {
            return Err(EngineError::Solver("no domain enabled".to_string()));
        }

        self.validate_temperatures()
    }

    fn current_physical_time(&self) -> f64 {
        self.time
    }

    fn save_snapshot(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut file = File::create(path).map_err(|err| EngineError::Snapshot(err.to_string()))?;

        let mut write = || -> std::io::Result<()> {
            writeln!(file, "# thermal network snapshot")?;
            writeln!(file, "time,{:.6}", self.time)?;
            writeln!(file, "fluid,{},{:.4}", self.fluid.name, self.fluid_temperature)?;
            for (i, spec) in self.solids.iter().enumerate() {
                writeln!(file, "solid,{},{:.4}", spec.name, self.temperatures[i])?;
            }
            Ok(())
        };

        write().map_err(|err| EngineError::Snapshot(err.to_string()))
    }

    fn name(&self) -> &str {
        "Thermal Network"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
