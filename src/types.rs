//! Core body types and constants for the merging simulation.

use std::fmt;

use bevy::math::Vec3;
use bevy::prelude::*;

/// Gravitational constant in simulation units.
pub const G: f32 = 6.674;

/// Default fixed step in seconds (50 Hz).
pub const DEFAULT_FIXED_DT: f32 = 0.02;

/// Default radius of the influence sphere around each body.
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 50.0;

/// Stable identifier of a body.
///
/// Identifiers are handed out by the registry in increasing order and are
/// never reused within a run, so a stale id can always be checked for
/// liveness without risk of aliasing a newer body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classification of a body. Only bodies of the same category merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CelestialType {
    Planet,
    Star,
}

impl CelestialType {
    pub const ALL: &'static [CelestialType] = &[CelestialType::Planet, CelestialType::Star];

    pub fn label(&self) -> &'static str {
        match self {
            CelestialType::Planet => "Planet",
            CelestialType::Star => "Star",
        }
    }
}

/// A simulated massive body.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: BodyId,
    /// Display name. Never empty once the body is registered.
    pub name: String,
    pub category: CelestialType,
    /// Always positive.
    pub mass: f32,
    /// Physical radius (collider radius times size factor). Always positive.
    pub radius: f32,
    /// Radius of the sphere within which other bodies pull on this one.
    pub influence_radius: f32,
    /// Presentation only.
    pub color: Color,
    pub position: Vec3,
    pub velocity: Vec3,
    /// One-way latch: set on first contact, cleared only by destruction.
    colliding: bool,
    pub(crate) in_range: crate::proximity::InRangeSet,
}

impl Body {
    pub(crate) fn new(id: BodyId, spec: BodySpec) -> Self {
        let name = if spec.name.is_empty() {
            format!("{} {}", spec.category.label(), id)
        } else {
            spec.name
        };
        Self {
            id,
            name,
            category: spec.category,
            mass: spec.mass,
            radius: spec.radius,
            influence_radius: spec.influence_radius,
            color: spec.color,
            position: spec.position,
            velocity: spec.velocity,
            colliding: false,
            in_range: crate::proximity::InRangeSet::default(),
        }
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub(crate) fn latch_colliding(&mut self) {
        self.colliding = true;
    }

    /// Bodies currently pulling on this one, in the order they entered range.
    pub fn in_range(&self) -> &[BodyId] {
        self.in_range.as_slice()
    }

    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }
}

/// Everything needed to create a body, minus its identity.
#[derive(Clone, Debug)]
pub struct BodySpec {
    pub name: String,
    pub category: CelestialType,
    pub mass: f32,
    pub radius: f32,
    pub influence_radius: f32,
    pub color: Color,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl BodySpec {
    /// Create a spec with default influence radius and a neutral color.
    pub fn new(category: CelestialType, mass: f32, radius: f32, position: Vec3, velocity: Vec3) -> Self {
        Self {
            name: String::new(),
            category,
            mass,
            radius,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            color: Color::WHITE,
            position,
            velocity,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_influence_radius(mut self, radius: f32) -> Self {
        self.influence_radius = radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Mass and radius must be positive and every vector finite.
    pub fn is_valid(&self) -> bool {
        self.mass.is_finite()
            && self.mass > 0.0
            && self.radius.is_finite()
            && self.radius > 0.0
            && self.influence_radius.is_finite()
            && self.influence_radius >= 0.0
            && self.position.is_finite()
            && self.velocity.is_finite()
    }
}
