//! Deferred despawning - one-shot removals registered with the frame loop

use bevy::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::events::{EventBus, GameEvent, entity_id};

/// Entities waiting to be despawned, ordered by due time
#[derive(Resource, Default)]
pub struct DespawnSchedule {
    queue: BinaryHeap<Reverse<(Duration, Entity)>>,
}

impl DespawnSchedule {
    /// Despawn `entity` once elapsed time reaches `due`
    pub fn schedule(&mut self, entity: Entity, due: Duration) {
        self.queue.push(Reverse((due, entity)));
    }

    /// Remove and return every entity due at or before `now`
    pub fn drain_due(&mut self, now: Duration) -> Vec<Entity> {
        let mut due = Vec::new();
        while let Some(Reverse((at, entity))) = self.queue.peek().copied() {
            if at > now {
                break;
            }
            self.queue.pop();
            due.push(entity);
        }
        due
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse((at, _))| *at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Despawn everything whose time has come. Entities already gone are skipped.
pub fn run_despawn_schedule(
    mut commands: Commands,
    mut schedule: ResMut<DespawnSchedule>,
    mut bus: ResMut<EventBus>,
    existing: Query<(), With<Transform>>,
    time: Res<Time>,
) {
    for entity in schedule.drain_due(time.elapsed()) {
        if existing.get(entity).is_err() {
            continue;
        }
        debug!("Despawning {}", entity);
        commands.entity(entity).despawn();
        bus.emit(GameEvent::TemplateDespawned {
            clone: entity_id(entity),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_drain_due_in_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();

        let mut schedule = DespawnSchedule::default();
        schedule.schedule(b, Duration::from_millis(1500));
        schedule.schedule(a, Duration::from_millis(1000));
        schedule.schedule(c, Duration::from_millis(3000));

        assert_eq!(schedule.next_due(), Some(Duration::from_millis(1000)));
        assert!(schedule.drain_due(Duration::from_millis(999)).is_empty());
        assert_eq!(schedule.drain_due(Duration::from_millis(1500)), vec![a, b]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.drain_due(Duration::from_secs(10)), vec![c]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_run_skips_missing_entities() {
        let mut world = World::new();
        world.init_resource::<Time>();
        world.insert_resource(EventBus::new());

        let alive = world.spawn(Transform::default()).id();
        let gone = world.spawn(Transform::default()).id();
        world.despawn(gone);

        let mut schedule = DespawnSchedule::default();
        schedule.schedule(alive, Duration::ZERO);
        schedule.schedule(gone, Duration::ZERO);
        world.insert_resource(schedule);

        world.run_system_once(run_despawn_schedule).unwrap();

        assert!(world.get_entity(alive).is_err());
        assert!(world.resource::<DespawnSchedule>().is_empty());
        let bus = world.resource::<EventBus>();
        assert_eq!(bus.pending_count(), 1);
        assert_eq!(
            bus.peek()[0].event,
            GameEvent::TemplateDespawned {
                clone: entity_id(alive)
            }
        );
    }
}
