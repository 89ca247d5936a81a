//! Property-based tests for physics and collision handling using proptest.
//!
//! These tests verify conservation laws and bookkeeping invariants across
//! randomly generated worlds.

use std::collections::HashMap;

use bevy::math::Vec3;
use proptest::prelude::*;

use super::gravity::gravitational_pull;
use crate::collision::compute_outcome;
use crate::simulation::ContactReport;
use crate::test_utils::{assertions, fixtures};
use crate::types::{Body, BodyId, BodySpec, CelestialType, G};

fn vec3(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn category() -> impl Strategy<Value = CelestialType> {
    prop_oneof![Just(CelestialType::Planet), Just(CelestialType::Star)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A merge is perfectly inelastic: the child carries the summed mass and
    /// exactly the combined momentum of its parents.
    #[test]
    fn prop_merge_conserves_momentum(
        mass_a in 0.1f32..1000.0,
        mass_b in 0.1f32..1000.0,
        vel_a in vec3(-50.0..50.0),
        vel_b in vec3(-50.0..50.0),
    ) {
        let a = Body::new(BodyId(0), fixtures::planet(mass_a, Vec3::ZERO, vel_a));
        let b = Body::new(BodyId(1), fixtures::planet(mass_b, Vec3::X, vel_b));

        let outcome = compute_outcome(&a, &b, None).unwrap();
        let before = a.momentum() + b.momentum();
        let after = outcome.velocity * outcome.mass;

        prop_assert!((outcome.mass - (mass_a + mass_b)).abs() <= 1e-3 * outcome.mass);
        let tolerance = 1e-4 * (a.momentum().length() + b.momentum().length()) + 1e-4;
        prop_assert!(
            (after - before).length() <= tolerance,
            "momentum before {:?}, after {:?}", before, after
        );
    }

    /// The pull two bodies exert on each other produces equal and opposite
    /// momentum changes.
    #[test]
    fn prop_pull_is_symmetric(
        mass_a in 0.1f32..100.0,
        mass_b in 0.1f32..100.0,
        pos_a in vec3(-20.0..20.0),
        offset in vec3(-20.0..20.0),
    ) {
        prop_assume!(offset.length() > 0.1);
        let pos_b = pos_a + offset;

        let on_a = gravitational_pull(pos_a, pos_b, mass_b, G) * mass_a;
        let on_b = gravitational_pull(pos_b, pos_a, mass_a, G) * mass_b;

        let tolerance = 1e-4 * on_a.length() + 1e-6;
        prop_assert!((on_a + on_b).length() <= tolerance, "{:?} vs {:?}", on_a, on_b);
    }

    /// Pull always points at the source and never produces NaN.
    #[test]
    fn prop_pull_points_at_source(
        pos_a in vec3(-20.0..20.0),
        pos_b in vec3(-20.0..20.0),
        mass in 0.1f32..100.0,
    ) {
        let pull = gravitational_pull(pos_a, pos_b, mass, G);
        prop_assert!(pull.is_finite());
        if pull != Vec3::ZERO {
            prop_assert!(pull.dot(pos_b - pos_a) > 0.0);
        }
    }

    /// However contacts are ordered, a body takes part in at most one
    /// resolved collision.
    #[test]
    fn prop_body_resolves_at_most_once(
        categories in prop::collection::vec(category(), 3..8),
        pairs in prop::collection::vec((0usize..8, 0usize..8), 1..30),
    ) {
        let mut sim = fixtures::simulation();
        let ids: Vec<BodyId> = categories
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                let spec = BodySpec::new(category, 1.0, 0.5, Vec3::X * i as f32, Vec3::ZERO);
                sim.spawn(spec).unwrap()
            })
            .collect();

        let mut resolved: HashMap<BodyId, usize> = HashMap::new();
        for (i, j) in pairs {
            let (a, b) = (ids[i % ids.len()], ids[j % ids.len()]);
            if !sim.registry().contains(a) || !sim.registry().contains(b) {
                continue;
            }
            match sim.on_contact(a, b).unwrap() {
                ContactReport::Merged(record) => {
                    *resolved.entry(record.parents.0).or_default() += 1;
                    *resolved.entry(record.parents.1).or_default() += 1;
                }
                ContactReport::Rejected { a, b } => {
                    *resolved.entry(a).or_default() += 1;
                    *resolved.entry(b).or_default() += 1;
                }
                ContactReport::Ignored => {}
            }
            assertions::assert_neighbors_live(sim.registry());
        }

        for (id, count) in resolved {
            prop_assert!(count <= 1, "body {} resolved {} times", id, count);
        }
    }

    /// Stepping a crowded world of mixed bodies never leaves a neighbor set
    /// pointing at a destroyed body, and never loses mass.
    #[test]
    fn prop_steps_keep_neighbors_live(
        bodies in prop::collection::vec((category(), vec3(-3.0..3.0), vec3(-2.0..2.0)), 2..10),
    ) {
        let mut sim = fixtures::simulation();
        for (category, position, velocity) in bodies {
            sim.spawn(BodySpec::new(category, 1.0, 0.5, position, velocity)).unwrap();
        }
        let initial_mass = assertions::total_mass(sim.registry());

        for _ in 0..20 {
            sim.step().unwrap();
            assertions::assert_neighbors_live(sim.registry());
        }

        let final_mass = assertions::total_mass(sim.registry());
        prop_assert!((final_mass - initial_mass).abs() <= 1e-4 * initial_mass);
    }

    /// With identical planets every range relation is mutual, so gravity and
    /// merging together conserve total momentum.
    #[test]
    fn prop_planet_world_conserves_momentum(
        bodies in prop::collection::vec((0.5f32..5.0, vec3(-10.0..10.0), vec3(-2.0..2.0)), 2..8),
    ) {
        let mut sim = fixtures::simulation();
        for (mass, position, velocity) in bodies {
            sim.spawn(fixtures::planet(mass, position, velocity)).unwrap();
        }
        let initial = assertions::total_momentum(sim.registry());

        let mut scale = 1.0f32;
        for _ in 0..20 {
            sim.step().unwrap();
            let magnitude: f32 = sim.registry().iter().map(|b| b.momentum().length()).sum();
            scale = scale.max(magnitude);
        }

        let current = assertions::total_momentum(sim.registry());
        assertions::assert_momentum_conserved(initial, current, 1e-3 * scale);
    }
}
