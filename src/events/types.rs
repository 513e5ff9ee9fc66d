//! Event type definitions for the logging system

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tuning::SceneTuning;

/// Stable numeric id for an entity in logs
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits()
}

/// All scene events that can be logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
    },
    /// Scene configuration snapshot (logged after session start)
    Config(SceneTuning),

    // === Spawn Events ===
    /// Template cloned at the ball, removal scheduled
    TemplateSpawned {
        ball: u64,
        clone: u64,
        despawn_at_ms: u32,
    },
    /// Action held but the ball has no template
    SpawnSkipped { ball: u64 },
    /// Scheduled removal ran
    TemplateDespawned { clone: u64 },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::TemplateSpawned { .. } => "SP",
            GameEvent::SpawnSkipped { .. } => "SK",
            GameEvent::TemplateDespawned { .. } => "DS",
        }
    }
}
