//! Input module - BallInput resource, input sources, and capture_input system

use bevy::input::touch::Touches;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Where the ball's torque comes from. Chosen once at startup.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Keyboard/gamepad axes
    #[default]
    Desktop,
    /// Device tilt, clamped per component
    Accelerometer,
}

impl InputSource {
    /// Default source for the platform this binary was built for
    pub fn for_target() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            InputSource::Accelerometer
        } else {
            InputSource::Desktop
        }
    }

    /// Parse from a command-line style name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" | "keyboard" => Some(InputSource::Desktop),
            "accelerometer" | "tilt" => Some(InputSource::Accelerometer),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputSource::Desktop => "desktop",
            InputSource::Accelerometer => "accelerometer",
        }
    }

    /// Torque for the current input sample. The Y component is always zero.
    pub fn torque(&self, input: &BallInput, speed: f32) -> Vec3 {
        match self {
            InputSource::Desktop => {
                Vec3::new(input.vertical * speed, 0.0, -input.horizontal * speed)
            }
            InputSource::Accelerometer => Vec3::new(
                (input.tilt.y * speed).clamp(-TILT_TORQUE_LIMIT, TILT_TORQUE_LIMIT),
                0.0,
                (-input.tilt.x * speed).clamp(-TILT_TORQUE_LIMIT, TILT_TORQUE_LIMIT),
            ),
        }
    }
}

/// Latest device acceleration, written by the platform layer on handheld targets
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Accelerometer(pub Vec3);

/// Input state sampled for the ball this frame
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct BallInput {
    pub horizontal: f32, // -1 = left, 1 = right
    pub vertical: f32,   // -1 = back, 1 = forward
    pub tilt: Vec2,      // Raw accelerometer x/y
    pub action_held: bool,
}

/// Sum two opposing key groups into an axis value
fn key_axis(keyboard: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Runs in PreUpdate, after Bevy's input systems, to capture device state into BallInput.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    gamepads: Query<&Gamepad>,
    accelerometer: Res<Accelerometer>,
    mut input: ResMut<BallInput>,
) {
    let mut horizontal = key_axis(
        &keyboard,
        [KeyCode::KeyA, KeyCode::ArrowLeft],
        [KeyCode::KeyD, KeyCode::ArrowRight],
    );
    let mut vertical = key_axis(
        &keyboard,
        [KeyCode::KeyS, KeyCode::ArrowDown],
        [KeyCode::KeyW, KeyCode::ArrowUp],
    );

    for gamepad in &gamepads {
        if let Some(stick_x) = gamepad.get(GamepadAxis::LeftStickX)
            && stick_x.abs() > STICK_DEADZONE
        {
            horizontal += stick_x;
        }
        if let Some(stick_y) = gamepad.get(GamepadAxis::LeftStickY)
            && stick_y.abs() > STICK_DEADZONE
        {
            vertical += stick_y;
        }
    }

    input.horizontal = horizontal.clamp(-1.0, 1.0);
    input.vertical = vertical.clamp(-1.0, 1.0);
    input.tilt = accelerometer.0.truncate();

    // Held, not just pressed: spawning repeats every frame the button stays down
    input.action_held = keyboard.pressed(KeyCode::ControlLeft)
        || mouse.pressed(MouseButton::Left)
        || touches.iter().next().is_some()
        || gamepads.iter().any(|gp| gp.pressed(GamepadButton::South));
}
