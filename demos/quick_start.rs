//! Minimal two-domain coupled run
//!
//! A single powered solid cooled by one coolant volume: the smallest
//! scenario the alternating scheme accepts. Good starting point for
//! wiring up your own engine.

use std::error::Error;

use cht_rs::coupling::{
    AlternatingScheduler, CheckpointPolicy, CouplingConfig, CouplingScheme, CouplingScenario,
    DomainLayout,
};
use cht_rs::models::{FluidSpec, SolidSpec, ThermalNetworkEngine};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().compact().init();

    // A 100 W heater block under 25 C coolant
    let engine = ThermalNetworkEngine::new(
        FluidSpec::new("Coolant", 298.15, 20.0, 0.5),
        vec![SolidSpec::new("Heater", 50.0, 100.0, 10.0, 298.15)],
    );

    let output_dir = std::env::temp_dir().join("cht_quick_start");
    std::fs::create_dir_all(&output_dir)?;

    let mut scenario = CouplingScenario::new(
        Box::new(engine),
        DomainLayout::new("Coolant", ["Heater"]),
    )
    .with_checkpoint_policy(CheckpointPolicy::new(&output_dir, "quick_start"));

    // One second of physical time, 10 ms solid steps, save at the end only
    let config = CouplingConfig::new(1.0, 0.01, 20, 2, 10.0);

    let summary = AlternatingScheduler::new().run(&mut scenario, &config)?;

    println!("{}", summary);
    println!("final time: {:.2} s", summary.final_time);

    Ok(())
}
