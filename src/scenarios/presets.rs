//! Preset scenario definitions.
//!
//! Orbital speeds in the galaxy preset are circular speeds `sqrt(G * M / r)`
//! around the central star, precomputed for G = 6.674.

use bevy::math::Vec3;

use super::{BodySeed, Scenario};
use crate::types::CelestialType;

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[HEAD_ON_MERGE, MISMATCHED_CONTACT, BINARY_INFALL, SMALL_GALAXY];

/// Two equal planets meeting head-on. They touch on the first step and
/// merge into a single resting planet halfway between them.
pub static HEAD_ON_MERGE: Scenario = Scenario {
    id: "head_on_merge",
    name: "Head-on Merge",
    description: "Two equal planets collide and merge at rest.",
    bodies: &[
        BodySeed {
            name: "West",
            category: CelestialType::Planet,
            mass: 10.0,
            radius: 0.6,
            position: Vec3::new(0.0, 0.0, 0.0),
            velocity: Vec3::new(1.0, 0.0, 0.0),
            influence_radius: None,
        },
        BodySeed {
            name: "East",
            category: CelestialType::Planet,
            mass: 10.0,
            radius: 0.6,
            position: Vec3::new(0.0, 0.0, 1.0),
            velocity: Vec3::new(-1.0, 0.0, 0.0),
            influence_radius: None,
        },
    ],
    time_scale: 1.0,
};

/// A planet touching a star. Categories differ, so both stay locked.
pub static MISMATCHED_CONTACT: Scenario = Scenario {
    id: "mismatched_contact",
    name: "Mismatched Contact",
    description: "A planet meets a star. Nothing merges.",
    bodies: &[
        BodySeed {
            name: "Wanderer",
            category: CelestialType::Planet,
            mass: 10.0,
            radius: 0.6,
            position: Vec3::new(0.0, 0.0, 0.0),
            velocity: Vec3::new(1.0, 0.0, 0.0),
            influence_radius: None,
        },
        BodySeed {
            name: "Ember",
            category: CelestialType::Star,
            mass: 10.0,
            radius: 0.6,
            position: Vec3::new(0.0, 0.0, 1.0),
            velocity: Vec3::new(-1.0, 0.0, 0.0),
            influence_radius: None,
        },
    ],
    time_scale: 1.0,
};

/// Two planets at rest within each other's range, falling together.
pub static BINARY_INFALL: Scenario = Scenario {
    id: "binary_infall",
    name: "Binary Infall",
    description: "Two planets start at rest and fall into each other.",
    bodies: &[
        BodySeed {
            name: "Castor",
            category: CelestialType::Planet,
            mass: 50.0,
            radius: 0.5,
            position: Vec3::new(-5.0, 0.0, 0.0),
            velocity: Vec3::ZERO,
            influence_radius: None,
        },
        BodySeed {
            name: "Pollux",
            category: CelestialType::Planet,
            mass: 50.0,
            radius: 0.5,
            position: Vec3::new(5.0, 0.0, 0.0),
            velocity: Vec3::ZERO,
            influence_radius: None,
        },
    ],
    time_scale: 1.0,
};

/// A star with four planets on roughly circular orbits and a pair of
/// counter-rotating twins sharing one orbit.
pub static SMALL_GALAXY: Scenario = Scenario {
    id: "small_galaxy",
    name: "Small Galaxy",
    description: "A star, its planets, and two twins on a collision course.",
    bodies: &[
        BodySeed {
            name: "Sol",
            category: CelestialType::Star,
            mass: 1000.0,
            radius: 2.0,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            influence_radius: Some(200.0),
        },
        BodySeed {
            name: "Cinder",
            category: CelestialType::Planet,
            mass: 1.0,
            radius: 0.4,
            position: Vec3::new(15.0, 0.0, 0.0),
            velocity: Vec3::new(0.0, 0.0, 21.09),
            influence_radius: None,
        },
        BodySeed {
            name: "Verdant",
            category: CelestialType::Planet,
            mass: 2.0,
            radius: 0.6,
            position: Vec3::new(0.0, 0.0, 25.0),
            velocity: Vec3::new(-16.34, 0.0, 0.0),
            influence_radius: None,
        },
        BodySeed {
            name: "Glacier",
            category: CelestialType::Planet,
            mass: 1.5,
            radius: 0.5,
            position: Vec3::new(-40.0, 0.0, 0.0),
            velocity: Vec3::new(0.0, 0.0, -12.92),
            influence_radius: None,
        },
        BodySeed {
            name: "Twin Prograde",
            category: CelestialType::Planet,
            mass: 1.0,
            radius: 0.5,
            position: Vec3::new(0.0, 0.0, -32.0),
            velocity: Vec3::new(14.44, 0.0, 0.0),
            influence_radius: None,
        },
        BodySeed {
            name: "Twin Retrograde",
            category: CelestialType::Planet,
            mass: 1.0,
            radius: 0.5,
            position: Vec3::new(32.0, 0.0, 0.0),
            velocity: Vec3::new(0.0, 0.0, -14.44),
            influence_radius: None,
        },
    ],
    time_scale: 1.0,
};
