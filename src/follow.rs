//! Follow target for a viewer such as a camera.
//!
//! Keeps its own ordered list of live bodies from lifecycle notifications so
//! it can cycle through them, and drops to free mode when the body it follows
//! is destroyed. It never looks a body up after hearing of its destruction.

use bevy::prelude::*;

use crate::registry::{BodyRegistry, LifecycleObserver};
use crate::types::{Body, BodyId};

/// Default distance from the followed body.
pub const DEFAULT_ZOOM: f32 = 10.0;

/// Largest allowed zoom distance.
pub const MAX_ZOOM: f32 = 100_000.0;

/// Zoom change per unit of scroll.
pub const ZOOM_SCROLL_SPEED: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FollowState {
    /// Nothing followed yet; the first created body is picked up.
    #[default]
    Unset,
    Following(BodyId),
    /// Free camera. Entered explicitly or when the followed body is destroyed.
    Free,
}

#[derive(Resource, Clone, Debug)]
pub struct FollowTarget {
    state: FollowState,
    bodies: Vec<BodyId>,
    index: usize,
    zoom: f32,
    min_zoom: f32,
}

impl Default for FollowTarget {
    fn default() -> Self {
        Self {
            state: FollowState::Unset,
            bodies: Vec::new(),
            index: 0,
            zoom: DEFAULT_ZOOM,
            min_zoom: 0.0,
        }
    }
}

impl FollowTarget {
    /// Start with every body already in `registry`, following the first.
    pub fn from_registry(registry: &BodyRegistry) -> Self {
        let mut target = Self::default();
        for body in registry.iter() {
            target.on_body_created(body);
        }
        target
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn followed(&self) -> Option<BodyId> {
        match self.state {
            FollowState::Following(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == FollowState::Free
    }

    /// Bodies known to be alive, in creation order.
    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn follow(&mut self, body: &Body) {
        self.state = FollowState::Following(body.id);
        if let Some(index) = self.bodies.iter().position(|&id| id == body.id) {
            self.index = index;
        }
        self.min_zoom = body.radius * 2.0;
        self.zoom = self.zoom.clamp(self.min_zoom, MAX_ZOOM);
    }

    pub fn free_camera(&mut self) {
        if self.state != FollowState::Free {
            info!("follow target released, switching to free camera");
        }
        self.state = FollowState::Free;
    }

    /// Follow the next known body, wrapping around.
    pub fn next(&mut self, registry: &BodyRegistry) -> Option<BodyId> {
        if self.bodies.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.bodies.len();
        self.follow_index(registry)
    }

    /// Follow the previous known body, wrapping around.
    pub fn previous(&mut self, registry: &BodyRegistry) -> Option<BodyId> {
        if self.bodies.is_empty() {
            return None;
        }
        self.index = if self.index == 0 {
            self.bodies.len() - 1
        } else {
            self.index - 1
        };
        self.follow_index(registry)
    }

    /// Apply scroll input to the zoom while following.
    ///
    /// Free mode has no zoom to adjust and ignores scrolling. Free camera
    /// movement belongs to the input layer, which this crate does not ship.
    pub fn scroll(&mut self, delta: f32) {
        if self.followed().is_some() {
            self.zoom = (self.zoom - delta * ZOOM_SCROLL_SPEED).clamp(self.min_zoom, MAX_ZOOM);
        }
    }

    fn follow_index(&mut self, registry: &BodyRegistry) -> Option<BodyId> {
        let id = *self.bodies.get(self.index)?;
        let body = registry.get(id)?;
        self.follow(body);
        Some(id)
    }
}

impl LifecycleObserver for FollowTarget {
    fn on_body_created(&mut self, body: &Body) {
        self.bodies.push(body.id);
        if self.state == FollowState::Unset {
            self.follow(body);
        }
    }

    fn on_body_destroyed(&mut self, id: BodyId) {
        if let Some(position) = self.bodies.iter().position(|&known| known == id) {
            self.bodies.remove(position);
            if position < self.index {
                self.index -= 1;
            }
        }
        if self.index >= self.bodies.len() {
            self.index = 0;
        }
        if self.followed() == Some(id) {
            self.free_camera();
        }
    }
}
