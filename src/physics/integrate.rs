//! Fixed-step rigid body integration

use bevy::prelude::*;

use super::components::{GroundRoll, RigidBody};

/// Apply accumulated torque, then rotate (and roll) every body.
/// Runs in FixedUpdate after everything that adds torque.
pub fn integrate_rigid_bodies(
    mut query: Query<(&mut Transform, &mut RigidBody, Has<GroundRoll>)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut transform, mut body, rolls) in &mut query {
        body.step(dt);

        let omega = body.angular_velocity;
        if omega == Vec3::ZERO {
            continue;
        }

        transform.rotation = (Quat::from_scaled_axis(omega * dt) * transform.rotation).normalize();

        if rolls {
            transform.translation += rolling_velocity(omega, body.radius) * dt;
        }
    }
}

/// Linear velocity of a sphere rolling without slipping on a Y-up plane
pub fn rolling_velocity(angular_velocity: Vec3, radius: f32) -> Vec3 {
    let v = angular_velocity.cross(Vec3::Y * radius);
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ForceMode;

    #[test]
    fn test_rolling_velocity_directions() {
        // Spin about +X rolls toward +Z, spin about -Z rolls toward +X
        assert_eq!(rolling_velocity(Vec3::X, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(rolling_velocity(-Vec3::Z, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(rolling_velocity(Vec3::Y, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_integrate_moves_rolling_body() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, integrate_rigid_bodies);

        let mut body = RigidBody::sphere(1.0, 0.5);
        body.add_torque(Vec3::new(2.0, 0.0, 0.0), ForceMode::VelocityChange);
        let rolling = app
            .world_mut()
            .spawn((Transform::default(), body.clone(), GroundRoll))
            .id();
        let spinning = app.world_mut().spawn((Transform::default(), body)).id();

        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_millis(20),
        ));
        for _ in 0..5 {
            app.update();
        }

        let rolled = app.world().get::<Transform>(rolling).unwrap();
        assert!(rolled.translation.z > 0.0);
        assert_eq!(rolled.translation.y, 0.0);
        assert_ne!(rolled.rotation, Quat::IDENTITY);

        let spun = app.world().get::<Transform>(spinning).unwrap();
        assert_eq!(spun.translation, Vec3::ZERO);
        assert_ne!(spun.rotation, Quat::IDENTITY);
    }
}
