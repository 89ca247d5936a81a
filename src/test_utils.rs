//! Test utilities for simulation tests.
//!
//! Provides fixtures for building small worlds and assertions for the
//! invariants every step must preserve: conserved momentum and mass, and
//! neighbor sets that only ever name live bodies.

use bevy::math::Vec3;

use crate::config::SimulationConfig;
use crate::registry::BodyRegistry;
use crate::simulation::Simulation;
use crate::types::{BodySpec, CelestialType};

/// Fixtures for creating test bodies and worlds.
pub mod fixtures {
    use super::*;

    /// A planet with radius 0.5 and the default influence radius.
    pub fn planet(mass: f32, position: Vec3, velocity: Vec3) -> BodySpec {
        BodySpec::new(CelestialType::Planet, mass, 0.5, position, velocity)
    }

    /// Empty simulation with the default configuration.
    pub fn simulation() -> Simulation {
        Simulation::new(SimulationConfig::default()).unwrap()
    }
}

/// Assertions for verifying simulation invariants.
pub mod assertions {
    use super::*;

    /// Sum of mass times velocity over every live body.
    pub fn total_momentum(registry: &BodyRegistry) -> Vec3 {
        registry.iter().map(|body| body.momentum()).sum()
    }

    pub fn total_mass(registry: &BodyRegistry) -> f32 {
        registry.iter().map(|body| body.mass).sum()
    }

    /// Assert that two momentum vectors agree within `tolerance` per axis.
    ///
    /// # Panics
    /// Panics if any component differs by more than the tolerance.
    pub fn assert_momentum_conserved(initial: Vec3, current: Vec3, tolerance: f32) {
        let drift = (current - initial).abs().max_element();
        assert!(
            drift <= tolerance,
            "Momentum not conserved: initial={initial:?}, current={current:?}, drift={drift:.6e}"
        );
    }

    /// Assert that no in-range set names a dead body or its owner, and that
    /// no set holds duplicates.
    ///
    /// # Panics
    /// Panics on the first inconsistent set.
    pub fn assert_neighbors_live(registry: &BodyRegistry) {
        for body in registry.iter() {
            let neighbors = body.in_range();
            for (i, &neighbor) in neighbors.iter().enumerate() {
                assert!(
                    registry.contains(neighbor),
                    "body {} holds dead neighbor {}",
                    body.id,
                    neighbor
                );
                assert_ne!(neighbor, body.id, "body {} is its own neighbor", body.id);
                assert!(
                    !neighbors[i + 1..].contains(&neighbor),
                    "body {} lists neighbor {} twice",
                    body.id,
                    neighbor
                );
            }
        }
    }
}
