//! Scripted mock engine for integration testing
//!
//! Implements the [`SolverEngine`] stopping-criteria contract with pure
//! bookkeeping: steady runs consume the step budget with time frozen,
//! transient runs jump to the time target (optionally quantized to model
//! engine-dependent rounding). Every call is recorded as an [`Event`] so
//! tests can assert on the exact protocol the scheduler drove.
//!
//! The engine hands out shared [`MockProbe`] handles: the scenario takes
//! ownership of the boxed engine, the test keeps a probe.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cht_rs::engine::{DomainHandle, EngineError, SolverEngine};

// =================================================================================================
// Events
// =================================================================================================

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resolve(String),
    Activate { name: String, active: bool },
    RaiseStepLimit(u64),
    SetTimeLimit(f64),
    Run {
        fluid_active: bool,
        solids_active: Vec<bool>,
        time_before: f64,
        time_after: f64,
    },
    Snapshot(PathBuf),
}

// =================================================================================================
// Mock Engine
// =================================================================================================

struct Inner {
    // Domain 0 is the steady (fluid) domain, the rest are transient.
    domains: Vec<String>,
    active: Vec<bool>,
    missing: HashSet<String>,

    steps_taken: u64,
    max_steps: u64,
    time: f64,
    max_time: f64,

    // Quantize transient advancement to multiples of this resolution,
    // stopping at the first boundary at or past the target (models an
    // engine whose internal step does not divide the coupling step).
    time_resolution: Option<f64>,

    runs: u32,
    fail_run_at: Option<u32>,
    fail_snapshot: bool,

    events: Vec<Event>,
}

/// Scripted engine honoring the stopping-criteria contract.
pub struct MockEngine {
    inner: Rc<RefCell<Inner>>,
}

/// Shared read handle into a [`MockEngine`]'s state and event log.
#[derive(Clone)]
pub struct MockProbe {
    inner: Rc<RefCell<Inner>>,
}

impl MockEngine {
    /// Create a mock knowing `fluid` plus `solids`, all initially inactive.
    pub fn new(fluid: &str, solids: &[&str]) -> Self {
        let mut domains = vec![fluid.to_string()];
        domains.extend(solids.iter().map(|s| s.to_string()));
        let count = domains.len();

        Self {
            inner: Rc::new(RefCell::new(Inner {
                domains,
                active: vec![false; count],
                missing: HashSet::new(),
                steps_taken: 0,
                max_steps: 0,
                time: 0.0,
                max_time: 0.0,
                time_resolution: None,
                runs: 0,
                fail_run_at: None,
                fail_snapshot: false,
                events: Vec::new(),
            })),
        }
    }

    /// Read handle that survives the scenario taking ownership.
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Refuse to resolve `name` even though it was registered.
    pub fn refuse(self, name: &str) -> Self {
        self.inner.borrow_mut().missing.insert(name.to_string());
        self
    }

    /// Fail the `n`-th call to `run_to_stopping_criterion` (1-based).
    pub fn fail_run_at(self, n: u32) -> Self {
        self.inner.borrow_mut().fail_run_at = Some(n);
        self
    }

    /// Fail every snapshot request.
    pub fn fail_snapshots(self) -> Self {
        self.inner.borrow_mut().fail_snapshot = true;
        self
    }

    /// Quantize transient advancement to multiples of `resolution`.
    pub fn quantize_time(self, resolution: f64) -> Self {
        assert!(resolution > 0.0);
        self.inner.borrow_mut().time_resolution = Some(resolution);
        self
    }

    /// Start the clock at `time` instead of zero.
    pub fn start_time(self, time: f64) -> Self {
        self.inner.borrow_mut().time = time;
        self
    }
}

impl SolverEngine for MockEngine {
    fn resolve_domain(&mut self, name: &str) -> Result<DomainHandle, EngineError> {
        let mut inner = self.inner.borrow_mut();
        inner.events.push(Event::Resolve(name.to_string()));

        if inner.missing.contains(name) {
            return Err(EngineError::NotFound(name.to_string()));
        }

        match inner.domains.iter().position(|n| n == name) {
            Some(index) => Ok(DomainHandle::new(index as u32, name)),
            None => Err(EngineError::NotFound(name.to_string())),
        }
    }

    fn set_domain_active(&mut self, handle: &DomainHandle, active: bool) -> Result<(), EngineError> {
        let mut inner = self.inner.borrow_mut();
        inner.events.push(Event::Activate {
            name: handle.name.clone(),
            active,
        });

        let index = handle.id as usize;
        inner.active[index] = active;
        Ok(())
    }

    fn raise_step_limit(&mut self, delta: u64) -> Result<(), EngineError> {
        let mut inner = self.inner.borrow_mut();
        inner.events.push(Event::RaiseStepLimit(delta));
        inner.max_steps += delta;
        Ok(())
    }

    fn set_time_limit(&mut self, value: f64) -> Result<(), EngineError> {
        let mut inner = self.inner.borrow_mut();
        inner.events.push(Event::SetTimeLimit(value));
        inner.max_time = value;
        Ok(())
    }

    fn run_to_stopping_criterion(&mut self) -> Result<(), EngineError> {
        let mut inner = self.inner.borrow_mut();
        inner.runs += 1;

        if inner.fail_run_at == Some(inner.runs) {
            return Err(EngineError::Solver("scripted failure".to_string()));
        }

        let fluid_active = inner.active[0];
        let all_solids = inner.active[1..].iter().all(|&a| a);
        let any_solid = inner.active[1..].iter().any(|&a| a);

        let time_before = inner.time;

        if fluid_active && any_solid {
            return Err(EngineError::Solver("both sides enabled".to_string()));
        }

        if fluid_active {
            // Steady: consume the budget, time frozen
            inner.steps_taken = inner.max_steps;
        } else if all_solids {
            // Transient: advance to the target, possibly overshooting to
            // the next resolution boundary
            if inner.time < inner.max_time {
                inner.time = match inner.time_resolution {
                    Some(resolution) => {
                        let quanta = ((inner.max_time - inner.time) / resolution).ceil();
                        inner.time + quanta * resolution
                    }
                    None => inner.max_time,
                };
            }
        } else {
            return Err(EngineError::Solver("no side enabled".to_string()));
        }

        let snapshot = Event::Run {
            fluid_active,
            solids_active: inner.active[1..].to_vec(),
            time_before,
            time_after: inner.time,
        };
        inner.events.push(snapshot);

        Ok(())
    }

    fn current_physical_time(&self) -> f64 {
        self.inner.borrow().time
    }

    fn save_snapshot(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut inner = self.inner.borrow_mut();

        if inner.fail_snapshot {
            return Err(EngineError::Snapshot("scripted failure".to_string()));
        }

        inner.events.push(Event::Snapshot(path.to_path_buf()));
        Ok(())
    }

    fn name(&self) -> &str {
        "Mock Engine"
    }
}

impl MockProbe {
    /// All recorded events, in call order.
    pub fn events(&self) -> Vec<Event> {
        self.inner.borrow().events.clone()
    }

    /// Current step ceiling.
    pub fn step_ceiling(&self) -> u64 {
        self.inner.borrow().max_steps
    }

    /// Current physical time.
    pub fn time(&self) -> f64 {
        self.inner.borrow().time
    }

    /// Number of `run_to_stopping_criterion` calls, failed ones included.
    pub fn run_count(&self) -> u32 {
        self.inner.borrow().runs
    }

    /// Paths of successfully written snapshots, in trigger order.
    pub fn snapshot_paths(&self) -> Vec<PathBuf> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Snapshot(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}
