//! Accretion - Celestial Merge Simulator
//!
//! Headless runner: loads a preset scenario and advances it a fixed number of
//! steps on Bevy's fixed schedule, logging merges as they happen.
//!
//! Usage: `accretion [SCENARIO] [STEPS]`, see `--help`.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

use accretion::plugin::{BodyMerged, SimulationStepSet};
use accretion::scenarios::{SCENARIOS, Scenario};
use accretion::{Simulation, SimulationConfig, SimulationPlugin};

const DEFAULT_SCENARIO: &str = "small_galaxy";
const DEFAULT_STEPS: u32 = 500;

/// Run a preset scenario headless and log what merges.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Preset scenario id.
    #[arg(default_value = DEFAULT_SCENARIO, value_parser = parse_scenario)]
    scenario: &'static Scenario,

    /// Number of fixed steps to run.
    #[arg(default_value_t = DEFAULT_STEPS)]
    steps: u32,
}

fn parse_scenario(id: &str) -> Result<&'static Scenario, String> {
    Scenario::find(id).ok_or_else(|| {
        let known: Vec<&str> = SCENARIOS.iter().map(|s| s.id).collect();
        format!("unknown scenario '{id}' (available: {})", known.join(", "))
    })
}

fn main() {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(SimulationPlugin::new(SimulationConfig::default()).with_scenario(args.scenario))
        .add_systems(FixedUpdate, log_merges.after(SimulationStepSet));
    app.finish();
    app.cleanup();

    for _ in 0..args.steps {
        app.world_mut().run_schedule(FixedUpdate);
    }

    let sim = app.world().resource::<Simulation>();
    info!(
        "{} steps ({:.2}s simulated), {} bodies remain",
        sim.steps(),
        sim.elapsed(),
        sim.body_count()
    );
    for body in sim.registry().iter() {
        info!(
            "  {} {} mass {:.2} at {:?}",
            body.id, body.name, body.mass, body.position
        );
    }
}

fn log_merges(mut merges: MessageReader<BodyMerged>) {
    for merged in merges.read() {
        let (a, b) = merged.record.parents;
        info!(
            "step {}: {} and {} merged into {}",
            merged.step, a, b, merged.record.child
        );
    }
}
