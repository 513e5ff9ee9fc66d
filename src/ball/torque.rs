//! Ball torque from input

use bevy::prelude::*;

use super::components::{Ball, BallController};
use crate::input::{BallInput, InputSource};
use crate::physics::{ForceMode, RigidBody};

/// Runs in FixedUpdate: turn the current input sample into torque on each ball
pub fn apply_ball_torque(
    input: Res<BallInput>,
    source: Res<InputSource>,
    mut balls: Query<(&BallController, &mut RigidBody), With<Ball>>,
) {
    for (controller, mut body) in &mut balls {
        let torque = source.torque(&input, controller.speed);
        if torque != Vec3::ZERO {
            body.add_torque(torque, ForceMode::Force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn world_with(source: InputSource, input: BallInput) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(source);
        world.insert_resource(input);
        let ball = world
            .spawn((Ball, BallController::default(), RigidBody::default()))
            .id();
        (world, ball)
    }

    #[test]
    fn test_desktop_torque_applied() {
        let input = BallInput {
            horizontal: 0.5,
            vertical: 1.0,
            ..Default::default()
        };
        let (mut world, ball) = world_with(InputSource::Desktop, input);
        world.run_system_once(apply_ball_torque).unwrap();

        let body = world.get::<RigidBody>(ball).unwrap();
        assert_eq!(body.pending_torque(), Vec3::new(10.0, 0.0, -5.0));
    }

    #[test]
    fn test_zero_input_adds_nothing() {
        let (mut world, ball) = world_with(InputSource::Desktop, BallInput::default());
        world.run_system_once(apply_ball_torque).unwrap();
        assert_eq!(world.get::<RigidBody>(ball).unwrap().pending_torque(), Vec3::ZERO);
    }

    #[test]
    fn test_accelerometer_torque_applied() {
        let input = BallInput {
            tilt: Vec2::new(-0.5, 0.05),
            ..Default::default()
        };
        let (mut world, ball) = world_with(InputSource::Accelerometer, input);
        world.run_system_once(apply_ball_torque).unwrap();

        let torque = world.get::<RigidBody>(ball).unwrap().pending_torque();
        assert!((torque.x - 0.5).abs() < 1e-6);
        assert_eq!(torque.y, 0.0);
        assert_eq!(torque.z, 1.0);
    }

    #[test]
    fn test_ball_without_body_is_skipped() {
        let mut world = World::new();
        world.insert_resource(InputSource::Desktop);
        world.insert_resource(BallInput {
            vertical: 1.0,
            ..Default::default()
        });
        world.spawn((Ball, BallController::default()));
        world.run_system_once(apply_ball_torque).unwrap();
    }
}
