//! Merge executor.
//!
//! Turns a [`CollisionOutcome`] into a new body. The order is fixed:
//! create the child, destroy parent A, destroy parent B, then publish the
//! child's creation. Destruction fan-out therefore completes before anyone
//! hears about the child, and the two notifications stay independent.

use bevy::prelude::*;

use crate::collision::CollisionOutcome;
use crate::config::SimulationConfig;
use crate::registry::BodyRegistry;
use crate::simulation::SimulationError;
use crate::types::BodyId;

/// A completed merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeRecord {
    pub parents: (BodyId, BodyId),
    pub child: BodyId,
}

/// Consume `outcome`: spawn the merged body and destroy both parents.
///
/// The child starts with an empty in-range set. A category without a
/// template aborts the merge before anything is touched.
pub fn execute_merge(
    registry: &mut BodyRegistry,
    config: &SimulationConfig,
    outcome: CollisionOutcome,
) -> Result<MergeRecord, SimulationError> {
    let spec = config
        .instantiate(outcome.category, outcome.point, outcome.mass, outcome.velocity)
        .ok_or(SimulationError::MissingTemplate(outcome.category))?;

    let child = registry.insert(spec)?;
    let parent_a = registry.unregister(outcome.parent_a)?;
    let parent_b = registry.unregister(outcome.parent_b)?;
    registry.publish_created(child)?;

    info!(
        "{} and {} merged into {} ({:?}, mass {:.2})",
        parent_a.name, parent_b.name, child, outcome.category, outcome.mass
    );

    Ok(MergeRecord {
        parents: (outcome.parent_a, outcome.parent_b),
        child,
    })
}
