//! Body registry and lifecycle notifications.
//!
//! The registry is an arena of live bodies keyed by [`BodyId`]. Creation and
//! destruction are published synchronously, in a fixed order:
//!
//! 1. every remaining body's in-range set (destruction only),
//! 2. external observers, in subscription order,
//! 3. the event journal drained by the Bevy layer.
//!
//! Nothing is deferred: when `unregister` returns, no live body refers to the
//! destroyed id any more.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::simulation::SimulationError;
use crate::types::{Body, BodyId, BodySpec};

/// A lifecycle notification. Destruction carries only the identifier.
///
/// Also written as a Bevy message by the simulation plugin.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created(BodyId),
    Destroyed(BodyId),
}

/// Collaborator that must stay consistent with the set of live bodies.
///
/// Implementors must never look a body up again after receiving
/// `on_body_destroyed` for its id.
pub trait LifecycleObserver: Send + Sync {
    fn on_body_created(&mut self, body: &Body);
    fn on_body_destroyed(&mut self, id: BodyId);
}

/// Arena of live bodies.
#[derive(Default)]
pub struct BodyRegistry {
    bodies: BTreeMap<BodyId, Body>,
    next_id: u64,
    observers: Vec<Box<dyn LifecycleObserver>>,
    journal: Vec<LifecycleEvent>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. Observers are notified in the order they subscribed.
    pub fn subscribe(&mut self, observer: Box<dyn LifecycleObserver>) {
        self.observers.push(observer);
    }

    /// Register a body and publish its creation.
    pub fn register(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        let id = self.insert(spec)?;
        self.publish_created(id)?;
        Ok(id)
    }

    /// Add a body to the arena without announcing it yet.
    ///
    /// Used by the merge executor, which must destroy both parents between
    /// creating the child and publishing it.
    pub(crate) fn insert(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        if !spec.is_valid() {
            return Err(SimulationError::InvalidBody {
                mass: spec.mass,
                radius: spec.radius,
            });
        }
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, Body::new(id, spec));
        Ok(id)
    }

    /// Announce a body previously added with [`insert`](Self::insert).
    pub(crate) fn publish_created(&mut self, id: BodyId) -> Result<(), SimulationError> {
        let body = self.bodies.get(&id).ok_or(SimulationError::UnknownBody(id))?;
        for observer in &mut self.observers {
            observer.on_body_created(body);
        }
        self.journal.push(LifecycleEvent::Created(id));
        trace!("body {} created", id);
        Ok(())
    }

    /// Remove a body and fan its destruction out to every subscriber.
    ///
    /// Returns the removed body so the caller may inspect its final state.
    pub fn unregister(&mut self, id: BodyId) -> Result<Body, SimulationError> {
        let removed = self.bodies.remove(&id);
        debug_assert!(removed.is_some(), "unregister of unknown body {id}");
        let removed = removed.ok_or(SimulationError::UnknownBody(id))?;

        for body in self.bodies.values_mut() {
            body.in_range.prune(id);
        }
        for observer in &mut self.observers {
            observer.on_body_destroyed(id);
        }
        self.journal.push(LifecycleEvent::Destroyed(id));
        trace!("body {} destroyed", id);
        Ok(removed)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// Two distinct bodies borrowed mutably at once.
    pub(crate) fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        if a == b {
            return None;
        }
        let mut first = None;
        let mut second = None;
        for (id, body) in self.bodies.iter_mut() {
            if *id == a {
                first = Some(body);
            } else if *id == b {
                second = Some(body);
            }
        }
        Some((first?, second?))
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.keys().copied()
    }

    /// Live bodies in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.values_mut()
    }

    /// Take the lifecycle events published since the last drain.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.journal)
    }
}
