//! Gravitational pull between bodies.
//!
//! The pull on a body is summed only over its in-range neighbors. The value
//! returned here is added to velocity scaled by the fixed step, so it is the
//! acceleration of the pulled body; multiply by that body's mass for the
//! force in the Newtonian sense.

use bevy::math::Vec3;

use crate::registry::BodyRegistry;
use crate::types::Body;

/// Pull exerted by a neighbor of mass `source_mass` at `source_pos` on a
/// body at `target_pos`.
///
/// Returns zero when the two positions coincide, and when the separation is
/// so small that the inverse square overflows `f32`.
#[inline]
pub fn gravitational_pull(target_pos: Vec3, source_pos: Vec3, source_mass: f32, g: f32) -> Vec3 {
    let delta = source_pos - target_pos;
    let r_squared = delta.length_squared();

    if r_squared == 0.0 {
        return Vec3::ZERO;
    }

    // g * m * (delta / r) / r²
    let r = r_squared.sqrt();
    let pull = delta * (g * source_mass / (r_squared * r));
    if pull.is_finite() { pull } else { Vec3::ZERO }
}

/// Sum the pull of every in-range neighbor of `body`.
///
/// Neighbors are read from the registry by id. A missing neighbor means
/// destruction fan-out was skipped somewhere, which is a bug; it is asserted
/// in debug builds and ignored otherwise.
pub fn total_pull(body: &Body, registry: &BodyRegistry, g: f32) -> Vec3 {
    let mut pull = Vec3::ZERO;

    for neighbor_id in body.in_range.iter() {
        let neighbor = registry.get(neighbor_id);
        debug_assert!(
            neighbor.is_some(),
            "body {} holds dangling neighbor {}",
            body.id,
            neighbor_id
        );
        if let Some(neighbor) = neighbor {
            pull += gravitational_pull(body.position, neighbor.position, neighbor.mass, g);
        }
    }

    pull
}

/// Explicit Euler velocity update.
#[inline]
pub fn integrate_velocity(velocity: Vec3, pull: Vec3, dt: f32) -> Vec3 {
    velocity + pull * dt
}

/// Run the force pass over every live body.
///
/// All pulls are computed against positions at the start of the pass, then
/// applied, so the result does not depend on body iteration order.
pub fn apply_gravity(registry: &mut BodyRegistry, g: f32, dt: f32) {
    let snapshot: &BodyRegistry = registry;
    let pulls: Vec<Vec3> = snapshot
        .iter()
        .map(|body| total_pull(body, snapshot, g))
        .collect();

    for (body, pull) in registry.iter_mut().zip(pulls) {
        body.velocity = integrate_velocity(body.velocity, pull, dt);
    }
}
