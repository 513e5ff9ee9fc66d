//! Smoothed third-person follow camera

use bevy::prelude::*;

use crate::constants::*;

/// Moves its entity toward a target's position plus an offset every frame
#[derive(Component, Debug, Clone)]
pub struct CameraFollower {
    /// Entity to follow. None = camera stays put.
    pub target: Option<Entity>,
    pub offset: Vec3,
    /// Fraction of the remaining distance covered per frame, in [0, 1]
    pub smooth_speed: f32,
    /// Also turn to look at the target
    pub follow_rotation: bool,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self {
            target: None,
            offset: CAMERA_OFFSET,
            smooth_speed: CAMERA_SMOOTH_SPEED,
            follow_rotation: false,
        }
    }
}

impl CameraFollower {
    pub fn following(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..Default::default()
        }
    }
}

/// One smoothing step. Not scaled by frame time, so convergence speed depends on frame rate.
pub fn smoothed_position(current: Vec3, target: Vec3, offset: Vec3, smooth_speed: f32) -> Vec3 {
    current.lerp(target + offset, smooth_speed)
}

/// World position to follow. Root entities use this frame's `Transform`; parented
/// targets use the last propagated `GlobalTransform`, one frame behind.
fn target_position(transform: &Transform, global: &GlobalTransform, parented: bool) -> Vec3 {
    if parented {
        global.translation()
    } else {
        transform.translation
    }
}

/// Runs in PostUpdate, after gameplay has moved targets and before transform propagation.
pub fn camera_follow(
    mut cameras: Query<(&mut Transform, &CameraFollower)>,
    targets: Query<(&Transform, &GlobalTransform, Has<ChildOf>), Without<CameraFollower>>,
) {
    for (mut transform, follower) in &mut cameras {
        let Some(target) = follower.target else {
            continue;
        };
        let Ok((target_transform, global, parented)) = targets.get(target) else {
            continue;
        };
        let target_pos = target_position(target_transform, global, parented);

        transform.translation = smoothed_position(
            transform.translation,
            target_pos,
            follower.offset,
            follower.smooth_speed,
        );

        if follower.follow_rotation {
            transform.look_at(target_pos, Vec3::Y);
        }
    }
}
