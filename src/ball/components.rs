//! Ball-related components

use bevy::prelude::*;

use crate::constants::*;

/// Marker for ball entities
#[derive(Component)]
pub struct Ball;

/// Object descriptor cloned when the action button is held
#[derive(Debug, Clone)]
pub struct SpawnTemplate {
    pub name: String,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<StandardMaterial>>,
    pub scale: Vec3,
}

impl SpawnTemplate {
    /// Template without visuals (headless runs, tests)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            material: None,
            scale: Vec3::ONE,
        }
    }

    pub fn with_visuals(mut self, mesh: Handle<Mesh>, material: Handle<StandardMaterial>) -> Self {
        self.mesh = Some(mesh);
        self.material = Some(material);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Torque-driven ball settings
#[derive(Component, Debug, Clone)]
pub struct BallController {
    /// Torque scale applied to input
    pub speed: f32,
    /// None = holding the action only logs a warning
    pub template: Option<SpawnTemplate>,
    /// Seconds before a spawned clone is removed
    pub spawn_lifetime: f32,
}

impl Default for BallController {
    fn default() -> Self {
        Self {
            speed: BALL_SPEED,
            template: None,
            spawn_lifetime: SPAWN_LIFETIME_SECS,
        }
    }
}

impl BallController {
    pub fn with_template(mut self, template: SpawnTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

/// Marker for clones spawned from a ball's template
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnedClone {
    pub ball: Entity,
}
