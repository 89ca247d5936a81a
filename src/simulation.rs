//! The simulation context.
//!
//! [`Simulation`] owns the configuration, the body registry and the motion
//! substrate, and is the only way components reach any of them. One call to
//! [`Simulation::step`] is one fixed step:
//!
//! 1. gravity from each body's in-range set updates velocities,
//! 2. the substrate moves bodies,
//! 3. range enter/exit is applied, then new contacts are resolved and merged.
//!
//! Every destruction fans out before `step` returns, so the next step never
//! reads a neighbor that no longer exists.

use bevy::prelude::*;

use crate::collision::{ContactResolution, resolve_contact};
use crate::config::{ConfigError, SimulationConfig};
use crate::merge::{MergeRecord, execute_merge};
use crate::physics::{ProximityChange, SphereSubstrate, apply_gravity};
use crate::registry::{BodyRegistry, LifecycleEvent, LifecycleObserver};
use crate::types::{Body, BodyId, BodySpec, CelestialType};

/// Errors raised by the simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("no merge template configured for {0:?}")]
    MissingTemplate(CelestialType),

    #[error("body {0} is not registered")]
    UnknownBody(BodyId),

    #[error("invalid body: mass {mass} and radius {radius} must both be positive")]
    InvalidBody { mass: f32, radius: f32 },
}

/// What became of one contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactReport {
    /// A body in the pair was already latched.
    Ignored,
    /// Categories differ; both bodies are now latched.
    Rejected { a: BodyId, b: BodyId },
    Merged(MergeRecord),
}

/// Summary of one fixed step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Index of the step, starting at zero.
    pub step: u64,
    pub merges: Vec<MergeRecord>,
    pub rejected: Vec<(BodyId, BodyId)>,
}

/// Simulation context. Construct once per run.
#[derive(Resource)]
pub struct Simulation {
    config: SimulationConfig,
    registry: BodyRegistry,
    substrate: SphereSubstrate,
    steps: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: BodyRegistry::new(),
            substrate: SphereSubstrate::new(),
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.get(id)
    }

    pub fn body_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Elapsed simulated time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.steps as f32 * self.config.fixed_dt
    }

    pub fn subscribe(&mut self, observer: Box<dyn LifecycleObserver>) {
        self.registry.subscribe(observer);
    }

    /// Lifecycle events since the last drain, in publication order.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        self.registry.drain_events()
    }

    /// Add a body at world initialization or from outside the simulation.
    pub fn spawn(&mut self, spec: BodySpec) -> Result<BodyId, SimulationError> {
        let id = self.registry.register(spec)?;
        debug!("spawned body {}", id);
        Ok(id)
    }

    /// Add a body shaped by its category's template.
    pub fn spawn_from_template(
        &mut self,
        name: impl Into<String>,
        category: CelestialType,
        position: Vec3,
        mass: f32,
        velocity: Vec3,
    ) -> Result<BodyId, SimulationError> {
        let spec = self
            .config
            .instantiate(category, position, mass, velocity)
            .ok_or(SimulationError::MissingTemplate(category))?
            .named(name);
        self.spawn(spec)
    }

    /// Remove a body, notifying every subscriber before returning.
    pub fn destroy(&mut self, id: BodyId) -> Result<Body, SimulationError> {
        let body = self.registry.unregister(id)?;
        self.substrate.forget(id);
        Ok(body)
    }

    /// `other` entered `owner`'s influence sphere. Idempotent.
    pub fn on_range_enter(&mut self, owner: BodyId, other: BodyId) -> Result<bool, SimulationError> {
        if owner == other {
            return Ok(false);
        }
        if !self.registry.contains(other) {
            return Err(SimulationError::UnknownBody(other));
        }
        let body = self
            .registry
            .get_mut(owner)
            .ok_or(SimulationError::UnknownBody(owner))?;
        Ok(body.in_range.enter(other))
    }

    /// `other` left `owner`'s influence sphere. No-op if it was not in range.
    pub fn on_range_exit(&mut self, owner: BodyId, other: BodyId) -> Result<bool, SimulationError> {
        let body = self
            .registry
            .get_mut(owner)
            .ok_or(SimulationError::UnknownBody(owner))?;
        Ok(body.in_range.exit(other))
    }

    /// First surface contact between `a` and `b`, merging at their midpoint.
    pub fn on_contact(&mut self, a: BodyId, b: BodyId) -> Result<ContactReport, SimulationError> {
        self.on_contact_at(a, b, None)
    }

    /// First surface contact, with an optional spawn point for the merge.
    pub fn on_contact_at(
        &mut self,
        a: BodyId,
        b: BodyId,
        point: Option<Vec3>,
    ) -> Result<ContactReport, SimulationError> {
        match resolve_contact(&mut self.registry, a, b, point)? {
            ContactResolution::Ignored => Ok(ContactReport::Ignored),
            ContactResolution::Rejected { a, b } => Ok(ContactReport::Rejected { a, b }),
            ContactResolution::Merge(outcome) => {
                let record = execute_merge(&mut self.registry, &self.config, outcome)?;
                self.substrate.forget(record.parents.0);
                self.substrate.forget(record.parents.1);
                Ok(ContactReport::Merged(record))
            }
        }
    }

    /// Advance one fixed step.
    pub fn step(&mut self) -> Result<StepReport, SimulationError> {
        let dt = self.config.fixed_dt;

        apply_gravity(&mut self.registry, self.config.gravitational_constant, dt);
        self.substrate.integrate_positions(&mut self.registry, dt);

        let detection = self.substrate.detect(&self.registry);
        for change in detection.proximity {
            match change {
                ProximityChange::Entered { owner, other } => {
                    self.on_range_enter(owner, other)?;
                }
                ProximityChange::Exited { owner, other } => {
                    self.on_range_exit(owner, other)?;
                }
            }
        }

        let mut report = StepReport {
            step: self.steps,
            ..Default::default()
        };
        for contact in detection.contacts {
            // an earlier merge in this pass may have consumed either body
            if !self.registry.contains(contact.a) || !self.registry.contains(contact.b) {
                continue;
            }
            match self.on_contact(contact.a, contact.b)? {
                ContactReport::Merged(record) => report.merges.push(record),
                ContactReport::Rejected { a, b } => report.rejected.push((a, b)),
                ContactReport::Ignored => {}
            }
        }

        self.steps += 1;
        Ok(report)
    }

    /// Run `count` steps, collecting their reports.
    pub fn run(&mut self, count: usize) -> Result<Vec<StepReport>, SimulationError> {
        (0..count).map(|_| self.step()).collect()
    }
}
