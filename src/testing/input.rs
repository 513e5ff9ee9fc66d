//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::FrameInput;
use crate::input::BallInput;

/// Resource holding scripted inputs for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> input changes
    pub frames: HashMap<u64, FrameInput>,
    /// Input state carried between frames
    pub current: BallInput,
    /// Frame the next injection applies to
    pub current_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        Self {
            frames: inputs.iter().map(|fi| (fi.frame, fi.clone())).collect(),
            current: BallInput::default(),
            current_frame: 0,
        }
    }

    /// Apply this frame's changes and return the resulting input
    pub fn advance_frame(&mut self) -> BallInput {
        if let Some(change) = self.frames.get(&self.current_frame) {
            if let Some(h) = change.horizontal {
                self.current.horizontal = h;
            }
            if let Some(v) = change.vertical {
                self.current.vertical = v;
            }
            if let Some([x, y]) = change.tilt {
                self.current.tilt = Vec2::new(x, y);
            }
            if let Some(action) = change.action {
                self.current.action_held = action;
            }
        }

        self.current_frame += 1;
        self.current
    }
}

/// Runs in PreUpdate (RollballSystems::Input) in place of device capture
pub fn scripted_input_injection(mut scripted: ResMut<ScriptedInputs>, mut input: ResMut<BallInput>) {
    *input = scripted.advance_frame();
}
