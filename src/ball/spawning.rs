//! Spawn-on-action: clone the ball's template while the action is held

use bevy::prelude::*;
use std::time::Duration;

use super::components::{Ball, BallController, SpawnTemplate, SpawnedClone};
use crate::events::{EventBus, GameEvent, entity_id};
use crate::input::BallInput;
use crate::lifetime::DespawnSchedule;

/// Local transform that keeps a clone at the ball's world position with identity
/// world rotation once parented to the ball. Balls are expected to be root entities.
pub fn clone_local_transform(ball: &Transform, template: &SpawnTemplate) -> Transform {
    let world = Transform::from_translation(ball.translation).with_scale(template.scale);
    GlobalTransform::from(world).reparented_to(&GlobalTransform::from(*ball))
}

/// Whole milliseconds for the event log, saturating at `u32::MAX`
pub fn saturating_millis(at: Duration) -> u32 {
    u32::try_from(at.as_millis()).unwrap_or(u32::MAX)
}

/// Runs in Update. Fires on every frame the action is held, not once per press.
pub fn spawn_on_action(
    mut commands: Commands,
    input: Res<BallInput>,
    balls: Query<(Entity, &Transform, &BallController), With<Ball>>,
    mut schedule: ResMut<DespawnSchedule>,
    mut bus: ResMut<EventBus>,
    time: Res<Time>,
) {
    if !input.action_held {
        return;
    }

    for (ball, transform, controller) in &balls {
        let Some(template) = &controller.template else {
            warn!("No spawn template assigned to ball {}", ball);
            bus.emit(GameEvent::SpawnSkipped {
                ball: entity_id(ball),
            });
            continue;
        };

        let mut clone = commands.spawn((
            Name::new(template.name.clone()),
            clone_local_transform(transform, template),
            SpawnedClone { ball },
            ChildOf(ball),
        ));
        if let Some(mesh) = &template.mesh {
            clone.insert(Mesh3d(mesh.clone()));
        }
        if let Some(material) = &template.material {
            clone.insert(MeshMaterial3d(material.clone()));
        }
        let clone = clone.id();

        // Negative or non-finite lifetimes despawn on the next schedule run
        let lifetime =
            Duration::try_from_secs_f32(controller.spawn_lifetime).unwrap_or(Duration::ZERO);
        let despawn_at = time.elapsed() + lifetime;
        schedule.schedule(clone, despawn_at);
        debug!("Spawned {} from ball {}, despawn at {:?}", clone, ball, despawn_at);

        bus.emit(GameEvent::TemplateSpawned {
            ball: entity_id(ball),
            clone: entity_id(clone),
            despawn_at_ms: saturating_millis(despawn_at),
        });
    }
}
