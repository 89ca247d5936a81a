//! Common test utilities for integration tests.

#![allow(dead_code)]

use accretion::registry::BodyRegistry;
use accretion::types::{BodyId, BodySpec, CelestialType};
use accretion::{Simulation, SimulationConfig};
use bevy::math::Vec3;

/// Empty simulation with the default configuration.
pub fn simulation() -> Simulation {
    Simulation::new(SimulationConfig::default()).expect("default config is valid")
}

/// Spawn a body with radius 0.5 and the default influence radius.
pub fn spawn(
    sim: &mut Simulation,
    category: CelestialType,
    mass: f32,
    position: Vec3,
    velocity: Vec3,
) -> BodyId {
    sim.spawn(BodySpec::new(category, mass, 0.5, position, velocity))
        .expect("valid body")
}

/// Distance between two live bodies.
pub fn distance(sim: &Simulation, a: BodyId, b: BodyId) -> f32 {
    let a = sim.body(a).expect("a is live");
    let b = sim.body(b).expect("b is live");
    a.position.distance(b.position)
}

/// Sum of mass times velocity over every live body.
pub fn total_momentum(registry: &BodyRegistry) -> Vec3 {
    registry.iter().map(|body| body.momentum()).sum()
}

/// Assert no neighbor set names a body that is no longer registered.
pub fn assert_neighbors_live(registry: &BodyRegistry) {
    for body in registry.iter() {
        for &neighbor in body.in_range() {
            assert!(
                registry.contains(neighbor),
                "body {} holds dead neighbor {}",
                body.id,
                neighbor
            );
        }
    }
}
