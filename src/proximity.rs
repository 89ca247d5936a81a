//! Per-body set of neighbors inside the influence sphere.
//!
//! Entries are plain [`BodyId`]s into the registry, never owning references,
//! so a destroyed neighbor is dropped by id without touching its data.

use crate::types::BodyId;

/// Ordered set of in-range neighbors.
///
/// Keeps insertion order so that force summation iterates neighbors in a
/// fixed, reproducible order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InRangeSet {
    ids: Vec<BodyId>,
}

impl InRangeSet {
    /// Add a neighbor. Returns `false` if it was already present.
    pub fn enter(&mut self, id: BodyId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a neighbor that left range. Returns `false` if it was absent.
    pub fn exit(&mut self, id: BodyId) -> bool {
        match self.ids.iter().position(|&n| n == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop a destroyed neighbor regardless of geometry.
    pub fn prune(&mut self, id: BodyId) -> bool {
        self.exit(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[BodyId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.ids.iter().copied()
    }
}
