//! Scene tuning loaded from config (camera, ball, spawning, input source)

use bevy::log::{info, warn};
use bevy::prelude::{Resource, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::input::InputSource;

// Serde default functions so older config files keep loading
fn default_camera_offset() -> [f32; 3] {
    CAMERA_OFFSET.to_array()
}
fn default_smooth_speed() -> f32 {
    CAMERA_SMOOTH_SPEED
}
fn default_ball_speed() -> f32 {
    BALL_SPEED
}
fn default_ball_mass() -> f32 {
    BALL_MASS
}
fn default_ball_radius() -> f32 {
    BALL_RADIUS
}
fn default_spawn_lifetime() -> f32 {
    SPAWN_LIFETIME_SECS
}
fn default_true() -> bool {
    true
}

/// Path to scene tuning config
pub const SCENE_TUNING_FILE: &str = "config/scene_tuning.json";

/// Serializable scene configuration
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTuning {
    #[serde(default = "default_camera_offset")]
    pub camera_offset: [f32; 3],
    #[serde(default = "default_smooth_speed")]
    pub smooth_speed: f32,
    #[serde(default)]
    pub follow_rotation: bool,
    #[serde(default = "default_ball_speed")]
    pub ball_speed: f32,
    #[serde(default = "default_ball_mass")]
    pub ball_mass: f32,
    #[serde(default = "default_ball_radius")]
    pub ball_radius: f32,
    #[serde(default = "default_spawn_lifetime")]
    pub spawn_lifetime: f32,
    /// When false the ball has no template and the action only warns
    #[serde(default = "default_true")]
    pub spawn_template: bool,
    /// None = pick from the build target
    #[serde(default)]
    pub input_source: Option<InputSource>,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            camera_offset: default_camera_offset(),
            smooth_speed: default_smooth_speed(),
            follow_rotation: false,
            ball_speed: default_ball_speed(),
            ball_mass: default_ball_mass(),
            ball_radius: default_ball_radius(),
            spawn_lifetime: default_spawn_lifetime(),
            spawn_template: true,
            input_source: None,
        }
    }
}

impl SceneTuning {
    /// Load tuning from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                info!("Loaded scene tuning from {}", path.display());
                tuning.validated()
            }
            Err(e) => {
                if path.exists() {
                    warn!("{}, using defaults", e);
                } else {
                    info!("No {} found, using defaults", path.display());
                }
                Self::default()
            }
        }
    }

    /// Load tuning from a file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Clamp values into ranges the systems can work with
    pub fn validated(mut self) -> Self {
        if !self.smooth_speed.is_finite() {
            warn!("smooth_speed must be finite, using {}", CAMERA_SMOOTH_SPEED);
            self.smooth_speed = CAMERA_SMOOTH_SPEED;
        } else if !(0.0..=1.0).contains(&self.smooth_speed) {
            warn!(
                "smooth_speed {} outside [0, 1], clamping",
                self.smooth_speed
            );
            self.smooth_speed = self.smooth_speed.clamp(0.0, 1.0);
        }
        if !(self.ball_speed > 0.0 && self.ball_speed.is_finite()) {
            warn!("ball_speed must be positive, using {}", BALL_SPEED);
            self.ball_speed = BALL_SPEED;
        }
        if !(self.ball_mass > 0.0 && self.ball_mass.is_finite()) {
            warn!("ball_mass must be positive, using {}", BALL_MASS);
            self.ball_mass = BALL_MASS;
        }
        if !(self.ball_radius > 0.0 && self.ball_radius.is_finite()) {
            warn!("ball_radius must be positive, using {}", BALL_RADIUS);
            self.ball_radius = BALL_RADIUS;
        }
        if !(self.spawn_lifetime >= 0.0 && self.spawn_lifetime.is_finite()) {
            warn!("spawn_lifetime must be a non-negative number of seconds, using 0");
            self.spawn_lifetime = 0.0;
        }
        self
    }

    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }

    /// Input source from config, or the build target's default
    pub fn input_source(&self) -> InputSource {
        self.input_source.unwrap_or_else(InputSource::for_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let tuning = SceneTuning::from_json("{}").unwrap();
        assert_eq!(tuning, SceneTuning::default());
        assert_eq!(tuning.camera_offset(), Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(tuning.smooth_speed, 0.125);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = SceneTuning::from_json(
            r#"{ "follow_rotation": true, "ball_speed": 4.0, "input_source": "accelerometer" }"#,
        )
        .unwrap();
        assert!(tuning.follow_rotation);
        assert_eq!(tuning.ball_speed, 4.0);
        assert_eq!(tuning.input_source(), InputSource::Accelerometer);
        assert!(tuning.spawn_template);
    }

    #[test]
    fn test_validated_clamps_smooth_speed() {
        let tuning = SceneTuning {
            smooth_speed: 1.5,
            ball_mass: -1.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.smooth_speed, 1.0);
        assert_eq!(tuning.ball_mass, BALL_MASS);

        let tuning = SceneTuning {
            smooth_speed: f32::NAN,
            ball_speed: -3.0,
            ball_radius: f32::INFINITY,
            spawn_lifetime: f32::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.smooth_speed, CAMERA_SMOOTH_SPEED);
        assert_eq!(tuning.ball_speed, BALL_SPEED);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
        assert_eq!(tuning.spawn_lifetime, 0.0);
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let tuning = SceneTuning {
            smooth_speed: 0.0,
            ball_speed: 4.0,
            spawn_lifetime: 2.5,
            ..Default::default()
        };
        assert_eq!(tuning.clone().validated(), tuning);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = SceneTuning::load_or_default("config/does_not_exist.json");
        assert_eq!(tuning, SceneTuning::default());
    }
}
