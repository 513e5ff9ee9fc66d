//! RollballPlugin - registers resources and schedules every gameplay system

use bevy::input::InputSystems;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::ball::{apply_ball_torque, spawn_on_action};
use crate::camera::camera_follow;
use crate::constants::PHYSICS_HZ;
use crate::events::{EventBus, EventLogger, flush_event_bus, update_event_bus_time};
use crate::input::{Accelerometer, BallInput, InputSource, capture_input};
use crate::lifetime::{DespawnSchedule, run_despawn_schedule};
use crate::physics::integrate_rigid_bodies;

/// Ordering anchors for systems outside this plugin (scripted input, tools)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RollballSystems {
    /// PreUpdate: BallInput is written here
    Input,
    /// Update: spawn-on-action and deferred despawns
    Spawning,
}

pub struct RollballPlugin {
    /// Read keyboard/mouse/gamepad/touch into BallInput. Off for scripted runs.
    pub capture_devices: bool,
}

impl Default for RollballPlugin {
    fn default() -> Self {
        Self {
            capture_devices: true,
        }
    }
}

impl Plugin for RollballPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InputSource>() {
            app.insert_resource(InputSource::for_target());
        }
        if !app.world().contains_resource::<EventBus>() {
            app.insert_resource(EventBus::new());
        }

        app.init_resource::<BallInput>()
            .init_resource::<Accelerometer>()
            .init_resource::<DespawnSchedule>()
            .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
            .configure_sets(PreUpdate, RollballSystems::Input.after(InputSystems))
            .add_systems(
                Update,
                (update_event_bus_time, spawn_on_action, run_despawn_schedule)
                    .chain()
                    .in_set(RollballSystems::Spawning),
            )
            .add_systems(
                FixedUpdate,
                (apply_ball_torque, integrate_rigid_bodies).chain(),
            )
            .add_systems(
                PostUpdate,
                camera_follow.before(TransformSystems::Propagate),
            )
            .add_systems(Last, flush_event_bus.run_if(resource_exists::<EventLogger>));

        if self.capture_devices {
            app.add_systems(PreUpdate, capture_input.in_set(RollballSystems::Input));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;

    #[test]
    fn test_plugin_keeps_preinserted_bus() {
        let mut app = App::new();
        app.insert_resource(EventBus::disabled());
        app.add_plugins(RollballPlugin {
            capture_devices: false,
        });

        let mut bus = app.world_mut().resource_mut::<EventBus>();
        bus.emit(GameEvent::SpawnSkipped { ball: 1 });
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_plugin_inserts_enabled_bus_by_default() {
        let mut app = App::new();
        app.add_plugins(RollballPlugin {
            capture_devices: false,
        });

        let mut bus = app.world_mut().resource_mut::<EventBus>();
        bus.emit(GameEvent::SpawnSkipped { ball: 1 });
        assert_eq!(bus.pending_count(), 1);
    }
}
