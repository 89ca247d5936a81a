//! Simulation configuration and merge templates.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::types::{BodySpec, CelestialType, DEFAULT_FIXED_DT, DEFAULT_INFLUENCE_RADIUS, G};

/// Errors found while validating a [`SimulationConfig`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gravitational constant must be positive and finite, got {0}")]
    InvalidGravitationalConstant(f32),

    #[error("fixed step must be positive and finite, got {0}")]
    InvalidFixedStep(f32),

    #[error("influence radius must be non-negative and finite, got {0}")]
    InvalidInfluenceRadius(f32),

    #[error("size scale must be positive and finite, got {0}")]
    InvalidSizeScale(f32),

    #[error("template for {category:?} has invalid {field} ({value})")]
    InvalidTemplate {
        category: CelestialType,
        field: &'static str,
        value: f32,
    },
}

/// What a body of one category looks like when it is produced by a merge.
#[derive(Clone, Debug)]
pub struct BodyTemplate {
    /// Collider radius before scaling.
    pub collider_radius: f32,
    /// Per-template scale applied to the collider radius.
    pub scale: f32,
    /// Overrides the global influence radius when set.
    pub influence_radius: Option<f32>,
    pub color: Color,
}

impl BodyTemplate {
    pub fn planet() -> Self {
        Self {
            collider_radius: 0.5,
            scale: 1.0,
            influence_radius: None,
            color: Color::srgb(0.3, 0.5, 0.9),
        }
    }

    pub fn star() -> Self {
        Self {
            collider_radius: 0.5,
            scale: 4.0,
            influence_radius: Some(200.0),
            color: Color::srgb(1.0, 0.85, 0.4),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Resource, Clone, Debug)]
pub struct SimulationConfig {
    /// Gravitational constant. Default: 6.674.
    pub gravitational_constant: f32,
    /// Fixed step in seconds. Default: 0.02.
    pub fixed_dt: f32,
    /// Influence radius used when a template does not set one. Default: 50.
    pub influence_radius: f32,
    /// Global collider scale factor. Default: 1.
    pub size_scale: f32,
    /// Merge templates by category. A merge into a category with no
    /// template is a fatal error.
    pub templates: HashMap<CelestialType, BodyTemplate>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(CelestialType::Planet, BodyTemplate::planet());
        templates.insert(CelestialType::Star, BodyTemplate::star());
        Self {
            gravitational_constant: G,
            fixed_dt: DEFAULT_FIXED_DT,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            size_scale: 1.0,
            templates,
        }
    }
}

impl SimulationConfig {
    /// Config with the default constants and no merge templates.
    pub fn without_templates() -> Self {
        Self {
            templates: HashMap::new(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, category: CelestialType, template: BodyTemplate) -> Self {
        self.templates.insert(category, template);
        self
    }

    pub fn template(&self, category: CelestialType) -> Option<&BodyTemplate> {
        self.templates.get(&category)
    }

    /// Physical radius of a body built from `template`.
    pub fn radius_for(&self, template: &BodyTemplate) -> f32 {
        template.collider_radius * template.scale * self.size_scale
    }

    /// Build a merge product from the category's template.
    ///
    /// Returns `None` when the category has no template.
    pub fn instantiate(
        &self,
        category: CelestialType,
        position: Vec3,
        mass: f32,
        velocity: Vec3,
    ) -> Option<BodySpec> {
        let template = self.template(category)?;
        Some(
            BodySpec::new(category, mass, self.radius_for(template), position, velocity)
                .with_influence_radius(template.influence_radius.unwrap_or(self.influence_radius))
                .with_color(template.color),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = self.gravitational_constant;
        if !g.is_finite() || g <= 0.0 {
            return Err(ConfigError::InvalidGravitationalConstant(g));
        }
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(ConfigError::InvalidFixedStep(self.fixed_dt));
        }
        if !self.influence_radius.is_finite() || self.influence_radius < 0.0 {
            return Err(ConfigError::InvalidInfluenceRadius(self.influence_radius));
        }
        if !self.size_scale.is_finite() || self.size_scale <= 0.0 {
            return Err(ConfigError::InvalidSizeScale(self.size_scale));
        }

        for (&category, template) in &self.templates {
            let checks = [
                ("collider_radius", template.collider_radius, template.collider_radius > 0.0),
                ("scale", template.scale, template.scale > 0.0),
            ];
            for (field, value, positive) in checks {
                if !value.is_finite() || !positive {
                    return Err(ConfigError::InvalidTemplate { category, field, value });
                }
            }
            if let Some(radius) = template.influence_radius
                && (!radius.is_finite() || radius < 0.0)
            {
                return Err(ConfigError::InvalidTemplate {
                    category,
                    field: "influence_radius",
                    value: radius,
                });
            }
        }

        Ok(())
    }
}
