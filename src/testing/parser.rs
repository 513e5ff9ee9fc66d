//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::input::InputSource;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Scene setup for a test (unset fields use scene tuning defaults)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestSetup {
    /// Give the ball a spawn template (default: true)
    pub template: Option<bool>,
    pub input_source: Option<InputSource>,
    #[serde(default)]
    pub follow_rotation: bool,
    pub smooth_speed: Option<f32>,
    pub ball_speed: Option<f32>,
    /// Camera start position (default: already at its goal)
    pub camera_start: Option<[f32; 3]>,
    /// Spawn the camera without a follow target
    #[serde(default)]
    pub detached_camera: bool,
}

/// Input changes at a specific frame. Unset fields keep their previous value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub horizontal: Option<f32>,
    pub vertical: Option<f32>,
    pub tilt: Option<[f32; 2]>,
    pub action: Option<bool>,
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// State assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a frame has run
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl TestDefinition {
    /// Last frame the runner needs to simulate
    pub fn last_frame(&self) -> u64 {
        let inputs = self.input.iter().map(|i| i.frame);
        let states = self.expect.state.iter().map(|s| s.after_frame);
        let events = self.expect.sequence.iter().filter_map(|e| e.frame_max);
        inputs.chain(states).chain(events).max().unwrap_or(0)
    }
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_test_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

pub fn parse_test_str(content: &str) -> Result<TestDefinition, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_definition() {
        let toml = r#"
            name = "spawn_while_held"
            description = "Holding the action spawns every frame"

            [setup]
            template = true
            input_source = "accelerometer"
            camera_start = [1.0, 2.0, 3.0]

            [[input]]
            frame = 0
            action = true
            tilt = [0.1, -0.2]

            [[input]]
            frame = 10
            action = false

            [[expect.sequence]]
            event = "Spawn"
            frame_max = 0

            [[expect.state]]
            after_frame = 20
            checks = ["spawned = 10", "ball.z > 0"]
        "#;

        let def = parse_test_str(toml).unwrap();
        assert_eq!(def.name, "spawn_while_held");
        assert_eq!(def.setup.template, Some(true));
        assert_eq!(def.setup.input_source, Some(InputSource::Accelerometer));
        assert_eq!(def.setup.camera_start, Some([1.0, 2.0, 3.0]));
        assert_eq!(def.input.len(), 2);
        assert_eq!(def.input[0].tilt, Some([0.1, -0.2]));
        assert_eq!(def.input[1].action, Some(false));
        assert_eq!(def.input[1].vertical, None);
        assert_eq!(def.expect.sequence[0].event, "Spawn");
        assert_eq!(def.expect.state[0].checks.len(), 2);
        assert_eq!(def.last_frame(), 20);
    }

    #[test]
    fn test_minimal_definition() {
        let def = parse_test_str(r#"name = "empty""#).unwrap();
        assert!(def.input.is_empty());
        assert!(def.setup.template.is_none());
        assert!(!def.setup.detached_camera);
        assert_eq!(def.last_frame(), 0);
    }
}
