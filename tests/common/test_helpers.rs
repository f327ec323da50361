//! Helper functions for integration tests

use super::mock_engine::Event;

/// Assert that every recorded solver run started with exactly one side
/// enabled: the fluid domain alone, or all solid domains together.
pub fn assert_mutual_exclusion(events: &[Event]) {
    let mut runs = 0;

    for event in events {
        if let Event::Run {
            fluid_active,
            solids_active,
            ..
        } = event
        {
            runs += 1;

            let all_solids = solids_active.iter().all(|&a| a);
            let any_solid = solids_active.iter().any(|&a| a);

            assert!(
                (*fluid_active && !any_solid) || (!*fluid_active && all_solids),
                "run {} started with a mixed activation state: fluid={}, solids={:?}",
                runs,
                fluid_active,
                solids_active
            );
        }
    }

    assert!(runs > 0, "no solver runs were recorded");
}

/// Assert that recorded run times never move backwards.
pub fn assert_monotonic_time(events: &[Event]) {
    let mut last = f64::NEG_INFINITY;

    for event in events {
        if let Event::Run {
            time_before,
            time_after,
            ..
        } = event
        {
            assert!(
                *time_before >= last,
                "time moved backwards between runs: {} -> {}",
                last,
                time_before
            );
            assert!(
                *time_after >= *time_before,
                "time moved backwards inside a run: {} -> {}",
                time_before,
                time_after
            );
            last = *time_after;
        }
    }
}

/// Assert two float slices match within `tolerance`, element by element.
pub fn assert_times_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {:?} vs {:?}",
        actual,
        expected
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() < tolerance,
            "element {} differs: {} vs {} (tolerance {})",
            i,
            a,
            e,
            tolerance
        );
    }
}
