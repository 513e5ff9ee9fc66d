//! Assertion checking for test expectations

use bevy::prelude::Vec3;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GameEvent;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with the frame it was emitted on
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
}

impl CapturedEvent {
    pub fn from_game_event(frame: u64, event: &GameEvent) -> Option<Self> {
        let event_type = match event {
            GameEvent::TemplateSpawned { .. } => "Spawn",
            GameEvent::SpawnSkipped { .. } => "Skip",
            GameEvent::TemplateDespawned { .. } => "Despawn",
            _ => return None,
        };
        Some(CapturedEvent {
            frame,
            event_type: event_type.to_string(),
        })
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.event_type == exp.event);

        let Some((offset, cap)) = found else {
            return Err(AssertionError {
                message: format!("Event #{} '{}' not found", i + 1, exp.event),
                expected: format!("'{}' event in sequence", exp.event),
                actual: format!(
                    "events after position {}: {:?}",
                    captured_idx,
                    captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                ),
            });
        };

        if let Some(min) = exp.frame_min
            && cap.frame < min
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                expected: format!("frame >= {}", min),
                actual: format!("frame {}", cap.frame),
            });
        }
        if let Some(max) = exp.frame_max
            && cap.frame > max
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                expected: format!("frame <= {}", max),
                actual: format!("frame {}", cap.frame),
            });
        }
        captured_idx += offset + 1;
    }

    Ok(())
}

/// World state for assertions
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub spawned: u32,
    pub skipped: u32,
    pub despawned: u32,
    pub live_clones: u32,
    pub pending_despawns: u32,
    pub ball: Vec3,
    pub ball_spin: f32,
    pub camera: Vec3,
    /// Distance from the camera to target + offset (None when detached)
    pub camera_distance: Option<f32>,
}

impl WorldState {
    fn value(&self, path: &str) -> Option<f32> {
        Some(match path {
            "spawned" => self.spawned as f32,
            "skipped" => self.skipped as f32,
            "despawned" => self.despawned as f32,
            "clones" => self.live_clones as f32,
            "pending_despawns" => self.pending_despawns as f32,
            "ball.x" => self.ball.x,
            "ball.y" => self.ball.y,
            "ball.z" => self.ball.z,
            "ball.spin" => self.ball_spin,
            "camera.x" => self.camera.x,
            "camera.y" => self.camera.y,
            "camera.z" => self.camera.z,
            "camera.distance" => self.camera_distance?,
            _ => return None,
        })
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Longer operators first (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.value(path).ok_or_else(|| AssertionError {
            message: format!("Unknown or unavailable value '{}' (frame {})", path, assertion.after_frame),
            expected: "spawned, skipped, despawned, clones, pending_despawns, ball.x/y/z/spin, camera.x/y/z/distance".to_string(),
            actual: path.to_string(),
        })?;

        check_float_comparison(path, actual, operator, expected_value)?;
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.01,
        "!=" => (actual - value).abs() >= 0.01,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.3})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.3}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_frame: 5,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_check_prefers_long_operators() {
        assert_eq!(parse_check("spawned >= 3"), Some(("spawned", ">=", "3")));
        assert_eq!(parse_check("ball.z<1.5"), Some(("ball.z", "<", "1.5")));
        assert_eq!(parse_check("clones != 0"), Some(("clones", "!=", "0")));
        assert_eq!(parse_check("nothing here"), None);
    }

    #[test]
    fn test_check_state_passes_and_fails() {
        let state = WorldState {
            spawned: 10,
            live_clones: 4,
            ball: Vec3::new(0.0, 0.5, 2.0),
            camera_distance: Some(0.3),
            ..Default::default()
        };

        assert!(check_state(&assertion(&["spawned = 10", "clones < 5", "ball.z > 1", "camera.distance < 0.5"]), &state).is_ok());
        assert!(check_state(&assertion(&["skipped = 1"]), &state).is_err());
        assert!(check_state(&assertion(&["wobble = 1"]), &state).is_err());
    }

    #[test]
    fn test_detached_camera_has_no_distance() {
        let state = WorldState::default();
        assert!(check_state(&assertion(&["camera.distance < 1"]), &state).is_err());
        assert!(check_state(&assertion(&["camera.x = 0"]), &state).is_ok());
    }

    #[test]
    fn test_sequence_frame_bounds() {
        let captured = vec![
            CapturedEvent { frame: 0, event_type: "Spawn".to_string() },
            CapturedEvent { frame: 50, event_type: "Despawn".to_string() },
        ];
        let ok = [
            ExpectedEvent { event: "Spawn".to_string(), frame_min: None, frame_max: Some(0) },
            ExpectedEvent { event: "Despawn".to_string(), frame_min: Some(49), frame_max: Some(51) },
        ];
        assert!(check_sequence(&ok, &captured).is_ok());

        let too_early = [ExpectedEvent { event: "Despawn".to_string(), frame_min: Some(60), frame_max: None }];
        assert!(check_sequence(&too_early, &captured).is_err());

        let missing = [ExpectedEvent { event: "Skip".to_string(), frame_min: None, frame_max: None }];
        assert!(check_sequence(&missing, &captured).is_err());
    }
}
