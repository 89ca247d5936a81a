//! Bevy integration.
//!
//! The [`Simulation`] lives in the world as a resource and advances one step
//! per `FixedUpdate` tick. Lifecycle events drained after each step are
//! re-published as [`LifecycleEvent`] messages; the follow target consumes
//! them in the same tick, before the next step can run.

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::follow::FollowTarget;
use crate::merge::MergeRecord;
use crate::registry::{LifecycleEvent, LifecycleObserver};
use crate::scenarios::Scenario;
use crate::simulation::Simulation;
use crate::time::{TimePlugin, TimeScale};

/// System set containing the simulation step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationStepSet;

/// Sent once per completed merge.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyMerged {
    /// Step during which the merge happened.
    pub step: u64,
    pub record: MergeRecord,
}

/// Plugin running the simulation in `FixedUpdate`.
pub struct SimulationPlugin {
    config: SimulationConfig,
    scenario: Option<&'static Scenario>,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            scenario: None,
        }
    }

    pub fn with_scenario(mut self, scenario: &'static Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let built = match self.scenario {
            Some(scenario) => scenario.build(self.config.clone()),
            None => Simulation::new(self.config.clone()),
        };
        let mut sim = built.unwrap_or_else(|err| panic!("cannot start simulation: {err}"));

        // initial bodies are handed to the follow target directly
        let follow = FollowTarget::from_registry(sim.registry());
        sim.drain_events();

        let time_scale = self
            .scenario
            .map(|scenario| TimeScale::new(scenario.time_scale))
            .unwrap_or_default();

        app.add_plugins(TimePlugin)
            .insert_resource(Time::<Fixed>::from_seconds(f64::from(self.config.fixed_dt)))
            .insert_resource(time_scale)
            .insert_resource(follow)
            .insert_resource(sim)
            .add_message::<LifecycleEvent>()
            .add_message::<BodyMerged>()
            .add_systems(
                FixedUpdate,
                (
                    simulation_step.in_set(SimulationStepSet),
                    sync_follow_target.after(SimulationStepSet),
                ),
            );
    }
}

/// Advance the simulation one fixed step and publish what happened.
///
/// A missing merge template is fatal and is returned to Bevy's error handler.
fn simulation_step(
    mut sim: ResMut<Simulation>,
    mut lifecycle: MessageWriter<LifecycleEvent>,
    mut merges: MessageWriter<BodyMerged>,
) -> Result {
    let report = sim.step()?;

    for record in report.merges {
        merges.write(BodyMerged {
            step: report.step,
            record,
        });
    }
    for event in sim.drain_events() {
        lifecycle.write(event);
    }

    Ok(())
}

/// Keep the follow target consistent with the live bodies.
fn sync_follow_target(
    sim: Res<Simulation>,
    mut lifecycle: MessageReader<LifecycleEvent>,
    mut follow: ResMut<FollowTarget>,
) {
    for event in lifecycle.read() {
        match *event {
            LifecycleEvent::Created(id) => {
                // a body created and merged away within one step is skipped;
                // its destruction follows in the same batch
                if let Some(body) = sim.body(id) {
                    follow.on_body_created(body);
                }
            }
            LifecycleEvent::Destroyed(id) => follow.on_body_destroyed(id),
        }
    }
}
