//! Compact text format for event serialization
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 2-char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|SE|0b6f1c9e-...|2026-01-01T12:00:00
//! T:00420|SP|4294967296|4294967303|1420
//! T:00440|SK|4294967296
//! T:01420|DS|4294967303
//! ```

use super::types::GameEvent;
use crate::tuning::SceneTuning;

/// Serialize a GameEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GameEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GameEvent::SessionStart {
            session_id,
            timestamp,
        } => format!("{}|{}", session_id, timestamp),
        GameEvent::Config(tuning) => {
            serde_json::to_string(tuning).unwrap_or_else(|_| "{}".to_string())
        }
        GameEvent::TemplateSpawned {
            ball,
            clone,
            despawn_at_ms,
        } => format!("{}|{}|{}", ball, clone, despawn_at_ms),
        GameEvent::SpawnSkipped { ball } => ball.to_string(),
        GameEvent::TemplateDespawned { clone } => clone.to_string(),
    };

    format!("{}|{}|{}", ts, code, data)
}

/// Parse a single log line back into (time_ms, GameEvent)
pub fn parse_event(line: &str) -> Option<(u32, GameEvent)> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return None;
    }

    let ts_str = parts[0].strip_prefix("T:")?;
    let time_ms: u32 = ts_str.parse().ok()?;

    let code = parts[1];
    let data = &parts[2..];

    let event = match code {
        "SE" if data.len() >= 2 => GameEvent::SessionStart {
            session_id: data[0].to_string(),
            timestamp: data[1].to_string(),
        },
        "CF" => {
            // Rejoin in case the JSON contains |
            let tuning: SceneTuning = serde_json::from_str(&data.join("|")).ok()?;
            GameEvent::Config(tuning)
        }
        "SP" if data.len() >= 3 => GameEvent::TemplateSpawned {
            ball: data[0].parse().ok()?,
            clone: data[1].parse().ok()?,
            despawn_at_ms: data[2].parse().ok()?,
        },
        "SK" => GameEvent::SpawnSkipped {
            ball: data[0].parse().ok()?,
        },
        "DS" => GameEvent::TemplateDespawned {
            clone: data[0].parse().ok()?,
        },
        _ => return None,
    };

    Some((time_ms, event))
}
