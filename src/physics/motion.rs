//! Motion and overlap substrate.
//!
//! Stands in for a rigid-body engine: moves bodies along their velocity and
//! reports influence-sphere enter/exit and first surface contact by comparing
//! the current geometry with what it saw on the previous pass.

use std::collections::BTreeSet;

use bevy::math::Vec3;

use crate::registry::BodyRegistry;
use crate::types::{Body, BodyId};

/// Change in one body's influence sphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProximityChange {
    /// `other` entered `owner`'s influence sphere.
    Entered { owner: BodyId, other: BodyId },
    /// `other` left `owner`'s influence sphere.
    Exited { owner: BodyId, other: BodyId },
}

/// Two bodies whose surfaces just started touching. `a < b` always.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    pub fn new(x: BodyId, y: BodyId) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    pub fn involves(&self, id: BodyId) -> bool {
        self.a == id || self.b == id
    }
}

/// Output of one detection pass, in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Detection {
    pub proximity: Vec<ProximityChange>,
    pub contacts: Vec<Contact>,
}

/// `other`'s solid sphere touches `owner`'s influence sphere.
#[inline]
pub fn within_influence(owner: &Body, other: &Body) -> bool {
    let reach = owner.influence_radius + other.radius;
    owner.position.distance_squared(other.position) < reach * reach
}

/// The two solid spheres overlap or touch.
#[inline]
pub fn surfaces_touch(a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    a.position.distance_squared(b.position) <= reach * reach
}

/// Explicit Euler position update.
#[inline]
pub fn integrate_position(position: Vec3, velocity: Vec3, dt: f32) -> Vec3 {
    position + velocity * dt
}

/// Edge-triggered sphere overlap tracking.
#[derive(Clone, Debug, Default)]
pub struct SphereSubstrate {
    /// `(owner, other)` pairs currently in range.
    in_range: BTreeSet<(BodyId, BodyId)>,
    /// `(low, high)` pairs currently touching.
    touching: BTreeSet<(BodyId, BodyId)>,
}

impl SphereSubstrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every body along its velocity.
    pub fn integrate_positions(&self, registry: &mut BodyRegistry, dt: f32) {
        for body in registry.iter_mut() {
            body.position = integrate_position(body.position, body.velocity, dt);
        }
    }

    /// Compare current geometry against the previous pass.
    ///
    /// Pairs are checked exhaustively; the populations this models are small
    /// and the pair sets double as the per-body trigger state.
    pub fn detect(&mut self, registry: &BodyRegistry) -> Detection {
        let bodies: Vec<&Body> = registry.iter().collect();
        let mut in_range = BTreeSet::new();
        let mut touching = BTreeSet::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if within_influence(a, b) {
                    in_range.insert((a.id, b.id));
                }
                if within_influence(b, a) {
                    in_range.insert((b.id, a.id));
                }
                if surfaces_touch(a, b) {
                    touching.insert((a.id, b.id));
                }
            }
        }

        let mut detection = Detection::default();
        for &(owner, other) in self.in_range.difference(&in_range) {
            detection.proximity.push(ProximityChange::Exited { owner, other });
        }
        for &(owner, other) in in_range.difference(&self.in_range) {
            detection.proximity.push(ProximityChange::Entered { owner, other });
        }
        for &(a, b) in touching.difference(&self.touching) {
            detection.contacts.push(Contact { a, b });
        }

        self.in_range = in_range;
        self.touching = touching;
        detection
    }

    /// Drop all state about a destroyed body.
    pub fn forget(&mut self, id: BodyId) {
        self.in_range.retain(|&(owner, other)| owner != id && other != id);
        self.touching.retain(|&(a, b)| a != id && b != id);
    }

    /// Whether the pair was touching as of the last pass.
    pub fn is_touching(&self, x: BodyId, y: BodyId) -> bool {
        let contact = Contact::new(x, y);
        self.touching.contains(&(contact.a, contact.b))
    }
}
