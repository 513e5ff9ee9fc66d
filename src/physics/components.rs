//! Rigid body components

use bevy::prelude::*;

use crate::constants::*;

/// How a torque passed to `RigidBody::add_torque` is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous torque, scaled by inertia and the physics step
    #[default]
    Force,
    /// Continuous angular acceleration, ignores inertia
    Acceleration,
    /// Instant change scaled by inertia
    Impulse,
    /// Instant angular velocity change, ignores inertia
    VelocityChange,
}

/// Solid sphere rigid body. Only rotation is simulated.
#[derive(Component, Debug, Clone)]
pub struct RigidBody {
    pub mass: f32,
    pub radius: f32,
    pub angular_velocity: Vec3,
    pub angular_damping: f32,
    pub max_angular_velocity: f32,
    /// Torque accumulated since the last physics step
    torque: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::sphere(BALL_MASS, BALL_RADIUS)
    }
}

impl RigidBody {
    pub fn sphere(mass: f32, radius: f32) -> Self {
        Self {
            mass,
            radius,
            angular_velocity: Vec3::ZERO,
            angular_damping: ANGULAR_DAMPING,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            torque: Vec3::ZERO,
        }
    }

    /// Moment of inertia of a solid sphere
    pub fn inertia(&self) -> f32 {
        0.4 * self.mass * self.radius * self.radius
    }

    pub fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        let inertia = self.inertia();
        match mode {
            ForceMode::Force => self.torque += torque,
            ForceMode::Acceleration => self.torque += torque * inertia,
            ForceMode::Impulse => {
                if inertia > 0.0 {
                    self.angular_velocity += torque / inertia;
                }
            }
            ForceMode::VelocityChange => self.angular_velocity += torque,
        }
    }

    /// Torque waiting for the next physics step
    pub fn pending_torque(&self) -> Vec3 {
        self.torque
    }

    /// Advance angular velocity by one step and clear the accumulator
    pub fn step(&mut self, dt: f32) {
        let inertia = self.inertia();
        if inertia > 0.0 {
            self.angular_velocity += self.torque / inertia * dt;
        }
        self.torque = Vec3::ZERO;

        self.angular_velocity *= 1.0 / (1.0 + self.angular_damping * dt);
        self.angular_velocity = self.angular_velocity.clamp_length_max(self.max_angular_velocity);
    }
}

/// Body rolls without slipping on the ground plane (translation follows spin)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct GroundRoll;
