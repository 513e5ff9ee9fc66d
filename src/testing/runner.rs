//! Test execution engine

use bevy::prelude::*;

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
use super::input::{ScriptedInputs, scripted_input_injection};
use super::parser::{TestDefinition, TestSetup};
use crate::ball::{Ball, SpawnTemplate, SpawnedClone};
use crate::camera::CameraFollower;
use crate::constants::SPAWN_TEMPLATE_NAME;
use crate::events::{BusEvent, EventBus, GameEvent};
use crate::lifetime::DespawnSchedule;
use crate::physics::RigidBody;
use crate::plugin::RollballSystems;
use crate::simulation::HeadlessAppBuilder;
use crate::tuning::SceneTuning;
use crate::world::{spawn_ball, spawn_follow_camera};

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

/// Running totals of bus events across the test
#[derive(Default)]
struct EventTotals {
    spawned: u32,
    skipped: u32,
    despawned: u32,
}

impl EventTotals {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TemplateSpawned { .. } => self.spawned += 1,
            GameEvent::SpawnSkipped { .. } => self.skipped += 1,
            GameEvent::TemplateDespawned { .. } => self.despawned += 1,
            _ => {}
        }
    }
}

fn tuning_for(setup: &TestSetup) -> SceneTuning {
    let defaults = SceneTuning::default();
    SceneTuning {
        follow_rotation: setup.follow_rotation,
        smooth_speed: setup.smooth_speed.unwrap_or(defaults.smooth_speed),
        ball_speed: setup.ball_speed.unwrap_or(defaults.ball_speed),
        spawn_template: setup.template.unwrap_or(true),
        input_source: setup.input_source,
        ..defaults
    }
    .validated()
}

/// Startup system: ball plus follow camera, per the test setup
fn test_setup(mut commands: Commands, tuning: Res<SceneTuning>, setup: &TestSetup) {
    let ball = spawn_ball(
        &mut commands,
        &tuning,
        Some(SpawnTemplate::named(SPAWN_TEMPLATE_NAME)),
    );
    let ball_pos = Vec3::new(0.0, tuning.ball_radius, 0.0);
    let camera = spawn_follow_camera(&mut commands, &tuning, ball, ball_pos);

    if let Some(start) = setup.camera_start {
        commands
            .entity(camera)
            .insert(Transform::from_translation(Vec3::from_array(start)));
    }
    if setup.detached_camera {
        commands.entity(camera).insert(CameraFollower {
            target: None,
            ..CameraFollower::default()
        });
    }
}

/// Take this frame's bus events without keeping a processed history
fn drain_frame_events(world: &mut World) -> Vec<BusEvent> {
    let mut bus = world.resource_mut::<EventBus>();
    let events = bus.drain();
    bus.clear_processed();
    events
}

fn extract_world_state(world: &mut World, totals: &EventTotals) -> WorldState {
    let mut state = WorldState {
        spawned: totals.spawned,
        skipped: totals.skipped,
        despawned: totals.despawned,
        pending_despawns: world.resource::<DespawnSchedule>().len() as u32,
        ..Default::default()
    };

    state.live_clones = world.query::<&SpawnedClone>().iter(world).count() as u32;

    let mut balls = world.query_filtered::<(&Transform, &RigidBody), With<Ball>>();
    if let Some((transform, body)) = balls.iter(world).next() {
        state.ball = transform.translation;
        state.ball_spin = body.angular_velocity.length();
    }

    let mut cameras = world.query::<(&Transform, &CameraFollower)>();
    if let Some((transform, follower)) = cameras.iter(world).next() {
        state.camera = transform.translation;
        if follower.target.is_some() {
            state.camera_distance = Some(transform.translation.distance(state.ball + follower.offset));
        }
    }

    state
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let tuning = tuning_for(&test.setup);
    let mut app = HeadlessAppBuilder::new()
        .with_tuning(tuning)
        .with_minimal_threads()
        .build();

    app.insert_resource(ScriptedInputs::from_inputs(&test.input));
    app.add_systems(
        PreUpdate,
        scripted_input_injection.in_set(RollballSystems::Input),
    );

    let setup = test.setup.clone();
    app.add_systems(Startup, move |commands: Commands, tuning: Res<SceneTuning>| {
        test_setup(commands, tuning, &setup);
    });

    let last_frame = test.last_frame().max(1);
    let mut totals = EventTotals::default();
    let mut captured = Vec::new();

    for frame in 0..=last_frame {
        app.update();

        let events = drain_frame_events(app.world_mut());
        for bus_event in &events {
            totals.record(&bus_event.event);
            captured.extend(CapturedEvent::from_game_event(frame, &bus_event.event));
        }

        let due: Vec<_> = test
            .expect
            .state
            .iter()
            .filter(|a| a.after_frame == frame)
            .collect();
        if due.is_empty() {
            continue;
        }

        let state = extract_world_state(app.world_mut(), &totals);
        for assertion in due {
            if let Err(error) = check_state(assertion, &state) {
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        frames: last_frame + 1,
    }
}
