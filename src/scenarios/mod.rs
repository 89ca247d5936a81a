//! Preset worlds for seeding a simulation.
//!
//! Provides a small set of starting configurations:
//! - Head-on merge of two planets
//! - Planet meeting a star (no merge)
//! - Two planets falling together from rest
//! - A star with a handful of orbiting planets

pub mod presets;

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::simulation::{Simulation, SimulationError};
use crate::types::{BodySpec, CelestialType};

pub use presets::SCENARIOS;

/// One body in a preset.
#[derive(Clone, Copy, Debug)]
pub struct BodySeed {
    pub name: &'static str,
    pub category: CelestialType,
    pub mass: f32,
    /// Physical radius before the config's size scale.
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Overrides the config's influence radius when set.
    pub influence_radius: Option<f32>,
}

impl BodySeed {
    pub fn to_spec(&self, config: &SimulationConfig) -> BodySpec {
        let mut spec = BodySpec::new(
            self.category,
            self.mass,
            self.radius * config.size_scale,
            self.position,
            self.velocity,
        )
        .named(self.name)
        .with_influence_radius(self.influence_radius.unwrap_or(config.influence_radius));
        if let Some(template) = config.template(self.category) {
            spec = spec.with_color(template.color);
        }
        spec
    }
}

/// A predefined starting world.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub description: &'static str,
    pub bodies: &'static [BodySeed],
    /// Initial time scale.
    pub time_scale: f32,
}

impl Scenario {
    /// Build a fresh simulation populated with this scenario's bodies.
    pub fn build(&self, config: SimulationConfig) -> Result<Simulation, SimulationError> {
        let mut sim = Simulation::new(config)?;
        self.populate(&mut sim)?;
        Ok(sim)
    }

    /// Spawn this scenario's bodies into an existing simulation.
    pub fn populate(&self, sim: &mut Simulation) -> Result<(), SimulationError> {
        info!("Loading scenario: {} ({})", self.name, self.id);
        for seed in self.bodies {
            let spec = seed.to_spec(sim.config());
            sim.spawn(spec)?;
        }
        Ok(())
    }

    pub fn find(id: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_find_by_id() {
        assert!(Scenario::find("head_on_merge").is_some());
        assert!(Scenario::find("no_such_world").is_none());
    }

    #[test]
    fn test_build_spawns_every_seed() {
        for scenario in SCENARIOS {
            let sim = scenario.build(SimulationConfig::default()).unwrap();
            assert_eq!(sim.body_count(), scenario.bodies.len(), "{}", scenario.id);
        }
    }

    #[test]
    fn test_seed_applies_size_scale_and_influence() {
        let config = SimulationConfig {
            size_scale: 3.0,
            influence_radius: 12.0,
            ..Default::default()
        };
        let seed = BodySeed {
            name: "Test",
            category: CelestialType::Planet,
            mass: 1.0,
            radius: 0.5,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            influence_radius: None,
        };
        let spec = seed.to_spec(&config);
        assert_relative_eq!(spec.radius, 1.5);
        assert_relative_eq!(spec.influence_radius, 12.0);
        assert_eq!(spec.name, "Test");
    }
}
