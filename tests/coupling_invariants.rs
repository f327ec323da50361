//! Scheduler invariants
//!
//! Properties the alternating scheme must hold on every run: mutual
//! exclusion of the two sides, cumulative step budgets, the fixed save
//! grid, monotonic time, and monotonic counters.

use cht_rs::coupling::{
    AlternatingScheduler, CheckpointPolicy, CouplingConfig, CouplingScheme, CouplingScenario,
    DomainLayout, StepHistory,
};

mod common;
use common::mock_engine::{Event, MockEngine};
use common::test_helpers::{assert_monotonic_time, assert_mutual_exclusion, assert_times_close};

fn scenario_with(engine: MockEngine, solids: &[&str]) -> CouplingScenario {
    CouplingScenario::new(
        Box::new(engine),
        DomainLayout::new("Fluid_Volume", solids.to_vec()),
    )
    .with_checkpoint_policy(CheckpointPolicy::new("/tmp/cht_inv", "case"))
}

// =================================================================================================
// Mutual Exclusion
// =================================================================================================

#[test]
fn test_every_run_has_exactly_one_side_active() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A", "S_B", "S_C"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A", "S_B", "S_C"]);
    let config = CouplingConfig::new(1.0, 0.2, 30, 2, 0.5);

    AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    assert_mutual_exclusion(&probe.events());
}

#[test]
fn test_phases_alternate_fluid_then_solid() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A"]);
    let config = CouplingConfig::new(0.8, 0.2, 10, 2, 10.0);

    AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    let modes: Vec<bool> = probe
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::Run { fluid_active, .. } => Some(*fluid_active),
            _ => None,
        })
        .collect();

    // Strict fluid/solid pairing, starting with fluid
    assert_eq!(modes.len() % 2, 0);
    for pair in modes.chunks(2) {
        assert_eq!(pair, &[true, false]);
    }
}

// =================================================================================================
// Step Budget
// =================================================================================================

#[test]
fn test_step_budget_accumulates_by_fixed_increments() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A"]);
    let config = CouplingConfig::new(1.0, 0.2, 25, 2, 10.0);

    let summary = AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    // Ceiling equals initial value (0) plus m * 25 for m fluid phases
    let fluid_phases = summary.total_solid_steps; // one fluid per solid phase
    assert_eq!(probe.step_ceiling(), fluid_phases * 25);
    assert_eq!(summary.steps_granted, probe.step_ceiling());

    // Every raise was exactly the configured increment; never a reset
    let raises: Vec<u64> = probe
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::RaiseStepLimit(delta) => Some(*delta),
            _ => None,
        })
        .collect();
    assert_eq!(raises.len() as u64, fluid_phases);
    assert!(raises.iter().all(|&delta| delta == 25));
}

// =================================================================================================
// Time Targets
// =================================================================================================

#[test]
fn test_time_targets_follow_solid_step_grid() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A"]);
    let config = CouplingConfig::new(1.0, 0.2, 30, 2, 10.0);

    AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    let targets: Vec<f64> = probe
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::SetTimeLimit(value) => Some(*value),
            _ => None,
        })
        .collect();

    assert_times_close(&targets, &[0.2, 0.4, 0.6, 0.8, 1.0], 1e-9);
}

#[test]
fn test_time_never_moves_backwards() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A", "S_B"]).quantize_time(0.07);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A", "S_B"]);
    let config = CouplingConfig::new(0.5, 0.1, 15, 3, 10.0);

    AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    assert_monotonic_time(&probe.events());
}

// =================================================================================================
// Save Grid
// =================================================================================================

#[test]
fn test_save_grid_is_arithmetic_and_never_skipped() {
    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A"]);
    // Major steps advance 0.1; saves every 0.25
    let config = CouplingConfig::new(1.0, 0.1, 10, 1, 0.25);

    let summary = AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    // Triggers at the first boundary at or past 0.25, 0.5, 0.75, 1.0
    let save_times: Vec<f64> = summary.checkpoints.iter().map(|(t, _)| *t).collect();
    assert_times_close(&save_times, &[0.3, 0.5, 0.8, 1.0], 1e-9);

    // Grid targets advanced by the fixed interval each trigger: every
    // trigger time sits within one major step of its grid point.
    for (i, &time) in save_times.iter().enumerate() {
        let grid_point = 0.25 * (i as f64 + 1.0);
        assert!(time >= grid_point - 1e-9);
        assert!(time < grid_point + 0.1 + 1e-9);
    }

    assert_eq!(probe.snapshot_paths().len(), 4);
}

// =================================================================================================
// Counters
// =================================================================================================

#[test]
fn test_counters_grow_by_exact_increments() {
    let history = StepHistory::new();
    let mut scheduler = AlternatingScheduler::new().with_reporter(Box::new(history.clone()));

    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let mut scenario = scenario_with(engine, &["S_A"]);
    let config = CouplingConfig::new(1.0, 0.2, 30, 2, 10.0);

    scheduler.run(&mut scenario, &config).unwrap();

    let rows = history.rows();
    assert!(!rows.is_empty());

    let mut previous_fluid = 0;
    let mut previous_solid = 0;
    for row in &rows {
        let fluid_delta = row.total_fluid_iterations - previous_fluid;
        let solid_delta = row.total_solid_steps - previous_solid;

        // Per subcycle: one solid step and one 30-iteration fluid grant
        assert_eq!(fluid_delta, solid_delta * 30);
        assert!(solid_delta >= 1 && solid_delta <= 2);

        previous_fluid = row.total_fluid_iterations;
        previous_solid = row.total_solid_steps;
    }

    assert_eq!(previous_fluid, 150);
    assert_eq!(previous_solid, 5);
}

// =================================================================================================
// Early Termination
// =================================================================================================

#[test]
fn test_no_subcycles_after_end_time_reached() {
    // End time reached in the first subcycle of a 3-subcycle major step:
    // the remaining two subcycles must not run.
    let engine = MockEngine::new("Fluid_Volume", &["S_A"]);
    let probe = engine.probe();
    let mut scenario = scenario_with(engine, &["S_A"]);
    let config = CouplingConfig::new(0.2, 0.2, 30, 3, 10.0);

    let summary = AlternatingScheduler::new()
        .run(&mut scenario, &config)
        .unwrap();

    assert_eq!(summary.major_steps, 1);
    assert_eq!(summary.total_solid_steps, 1);
    assert_eq!(probe.run_count(), 2); // one fluid + one solid

    // Every subcycle pairs one fluid run with one solid run
    assert_eq!(probe.run_count() as u64, 2 * summary.total_solid_steps);
}
