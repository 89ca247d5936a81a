//! Collision resolution for bodies whose surfaces touch.
//!
//! First contact latches both bodies as colliding, whatever happens next.
//! Same-category pairs produce a [`CollisionOutcome`] describing a perfectly
//! inelastic merge; differing categories are left latched with no merge.

use bevy::prelude::*;

use crate::registry::BodyRegistry;
use crate::simulation::SimulationError;
use crate::types::{Body, BodyId, CelestialType};

/// Description of a pending merge. Consumed once by the merge executor.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionOutcome {
    pub parent_a: BodyId,
    pub parent_b: BodyId,
    /// Momentum-conserving velocity of the merged body.
    pub velocity: Vec3,
    pub mass: f32,
    pub category: CelestialType,
    /// Where the merged body appears.
    pub point: Vec3,
}

/// Result of feeding one contact to the resolver.
#[derive(Clone, Debug, PartialEq)]
pub enum ContactResolution {
    /// One of the bodies was already claimed by an earlier contact.
    Ignored,
    /// Categories differ. Both bodies stay latched and no merge happens.
    Rejected { a: BodyId, b: BodyId },
    Merge(CollisionOutcome),
}

/// Velocity of a perfectly inelastic merge of `a` and `b`.
pub fn merged_velocity(a: &Body, b: &Body) -> Vec3 {
    (a.velocity * a.mass + b.velocity * b.mass) / (a.mass + b.mass)
}

/// Point halfway between the two bodies.
pub fn midpoint(a: &Body, b: &Body) -> Vec3 {
    (a.position - b.position) / 2.0 + b.position
}

/// The heavier of two bodies. Ties go to `a`.
pub fn heaviest<'a>(a: &'a Body, b: &'a Body) -> &'a Body {
    if a.mass >= b.mass { a } else { b }
}

/// Merge outcome for two bodies, ignoring latches.
///
/// Returns `None` when the categories differ.
pub fn compute_outcome(a: &Body, b: &Body, point: Option<Vec3>) -> Option<CollisionOutcome> {
    if a.category != b.category {
        return None;
    }
    Some(CollisionOutcome {
        parent_a: a.id,
        parent_b: b.id,
        velocity: merged_velocity(a, b),
        mass: a.mass + b.mass,
        category: a.category,
        point: point.unwrap_or_else(|| midpoint(a, b)),
    })
}

/// Handle first contact between `a` and `b`.
///
/// Latching and the latch check happen under the same exclusive borrow of
/// the registry, so no other contact can see either body unlatched once this
/// starts. `point` overrides the default midpoint spawn position.
pub fn resolve_contact(
    registry: &mut BodyRegistry,
    a: BodyId,
    b: BodyId,
    point: Option<Vec3>,
) -> Result<ContactResolution, SimulationError> {
    if a == b {
        return Ok(ContactResolution::Ignored);
    }
    for id in [a, b] {
        if !registry.contains(id) {
            return Err(SimulationError::UnknownBody(id));
        }
    }
    let (body_a, body_b) = registry.pair_mut(a, b).ok_or(SimulationError::UnknownBody(a))?;

    if body_a.is_colliding() || body_b.is_colliding() {
        return Ok(ContactResolution::Ignored);
    }
    body_a.latch_colliding();
    body_b.latch_colliding();

    match compute_outcome(body_a, body_b, point) {
        Some(outcome) => Ok(ContactResolution::Merge(outcome)),
        None => {
            debug!(
                "contact between {} ({:?}) and {} ({:?}) does not merge",
                a, body_a.category, b, body_b.category
            );
            Ok(ContactResolution::Rejected { a, b })
        }
    }
}
