//! Rollball - a torque-driven ball and a smoothed follow camera, built with Bevy
//!
//! This crate provides the gameplay components, resources, and systems; `RollballPlugin`
//! wires them into an app.

// Core modules
pub mod constants;
pub mod events;
pub mod lifetime;
pub mod plugin;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod camera;
pub mod input;
pub mod physics;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{
    Ball, BallController, SpawnTemplate, SpawnedClone, apply_ball_torque, clone_local_transform,
    spawn_on_action,
};
pub use camera::{CameraFollower, camera_follow, smoothed_position};
pub use events::{BusEvent, EventBus, EventLogConfig, EventLogger, GameEvent};
pub use input::{Accelerometer, BallInput, InputSource, capture_input};
pub use lifetime::{DespawnSchedule, run_despawn_schedule};
pub use physics::{ForceMode, GroundRoll, RigidBody, integrate_rigid_bodies, rolling_velocity};
pub use plugin::{RollballPlugin, RollballSystems};
pub use simulation::HeadlessAppBuilder;
pub use tuning::{SCENE_TUNING_FILE, SceneTuning};
pub use world::{Ground, spawn_ball, spawn_follow_camera};
