//! Force integration and the motion substrate.
//!
//! Each fixed step runs gravity first (velocity), then motion (position),
//! then overlap detection, mirroring a rigid-body engine's fixed update.

mod gravity;
mod motion;

#[cfg(test)]
mod proptest_physics;

pub use gravity::{apply_gravity, gravitational_pull, integrate_velocity, total_pull};
pub use motion::{
    Contact, Detection, ProximityChange, SphereSubstrate, integrate_position, surfaces_touch,
    within_influence,
};
