//! Tunable constants for rollball
//!
//! Default gameplay values live here; `tuning.rs` can override most of them at startup.

use bevy::prelude::*;

// =============================================================================
// SCENE COLORS
// =============================================================================

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::srgb(0.35, 0.32, 0.28);
pub const GROUND_COLOR: Color = Color::srgb(0.2, 0.18, 0.16);
pub const BALL_COLOR: Color = Color::srgb(0.9, 0.75, 0.4); // Gold/amber
pub const SPAWN_COLOR: Color = Color::srgb(0.95, 0.9, 0.8); // Bone white

// =============================================================================
// CAMERA FOLLOW
// =============================================================================

pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 5.0, -10.0);
pub const CAMERA_SMOOTH_SPEED: f32 = 0.125; // Fraction of remaining distance per tick

// =============================================================================
// BALL
// =============================================================================

pub const BALL_SPEED: f32 = 10.0; // Torque scale applied to input axes
pub const BALL_MASS: f32 = 1.0;
pub const BALL_RADIUS: f32 = 0.5;
pub const TILT_TORQUE_LIMIT: f32 = 1.0; // Per-component clamp for accelerometer torque
pub const STICK_DEADZONE: f32 = 0.25; // Analog stick deadzone

// =============================================================================
// PHYSICS
// =============================================================================

pub const PHYSICS_HZ: f64 = 50.0; // Fixed physics tick rate
pub const ANGULAR_DAMPING: f32 = 0.05;
pub const MAX_ANGULAR_VELOCITY: f32 = 7.0; // rad/s

// =============================================================================
// SPAWNING
// =============================================================================

pub const SPAWN_LIFETIME_SECS: f32 = 1.0; // Clones are removed this long after spawning
pub const SPAWN_SCALE: f32 = 0.3;
pub const SPAWN_TEMPLATE_NAME: &str = "Spark";
