//! World setup - ball, follow camera, ground, and lighting

use bevy::prelude::*;

use crate::ball::{Ball, BallController, SpawnTemplate};
use crate::camera::CameraFollower;
use crate::constants::*;
use crate::physics::{GroundRoll, RigidBody};
use crate::tuning::SceneTuning;

/// Marker for the ground plane
#[derive(Component)]
pub struct Ground;

/// Spawn the controllable ball resting on the ground at the origin
pub fn spawn_ball(
    commands: &mut Commands,
    tuning: &SceneTuning,
    template: Option<SpawnTemplate>,
) -> Entity {
    let controller = BallController {
        speed: tuning.ball_speed,
        template: if tuning.spawn_template { template } else { None },
        spawn_lifetime: tuning.spawn_lifetime,
    };

    commands
        .spawn((
            Name::new("Ball"),
            Ball,
            controller,
            RigidBody::sphere(tuning.ball_mass, tuning.ball_radius),
            GroundRoll,
            Transform::from_xyz(0.0, tuning.ball_radius, 0.0),
        ))
        .id()
}

/// Spawn a follower already sitting at its goal position
pub fn spawn_follow_camera(
    commands: &mut Commands,
    tuning: &SceneTuning,
    target: Entity,
    target_pos: Vec3,
) -> Entity {
    let follower = CameraFollower {
        target: Some(target),
        offset: tuning.camera_offset(),
        smooth_speed: tuning.smooth_speed,
        follow_rotation: tuning.follow_rotation,
    };

    commands
        .spawn((
            Name::new("Follow Camera"),
            follower,
            Transform::from_translation(target_pos + tuning.camera_offset())
                .looking_at(target_pos, Vec3::Y),
        ))
        .id()
}

/// Startup system for the windowed game
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<SceneTuning>,
) {
    commands.spawn((
        Name::new("Ground"),
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(GROUND_COLOR)),
        Transform::default(),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let template = SpawnTemplate::named(SPAWN_TEMPLATE_NAME)
        .with_visuals(
            meshes.add(Cuboid::from_length(1.0)),
            materials.add(SPAWN_COLOR),
        )
        .with_scale(Vec3::splat(SPAWN_SCALE));

    let ball = spawn_ball(&mut commands, &tuning, Some(template));
    commands.entity(ball).insert((
        Mesh3d(meshes.add(Sphere::new(tuning.ball_radius))),
        MeshMaterial3d(materials.add(BALL_COLOR)),
    ));

    let camera = spawn_follow_camera(
        &mut commands,
        &tuning,
        ball,
        Vec3::new(0.0, tuning.ball_radius, 0.0),
    );
    commands.entity(camera).insert(Camera3d::default());

    info!(
        "Scene ready (speed {}, smoothing {}, template {})",
        tuning.ball_speed,
        tuning.smooth_speed,
        if tuning.spawn_template { "on" } else { "off" }
    );
}
