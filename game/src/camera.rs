//! First-person camera system

use bevy::prelude::*;
use sim::{PlayerConfig, PlayerState};

use crate::input::InputState;
use crate::player::LocalPlayer;

/// Eye level as a fraction of capsule height, measured from the center.
const EYE_OFFSET_FACTOR: f32 = 0.4;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 1.6, 6.0),
    ));
}

/// Place the camera at the player's eyes, honoring stance height.
pub fn update_camera(
    players: Query<&PlayerState, With<LocalPlayer>>,
    mut cameras: Query<&mut Transform, (With<Camera3d>, Without<LocalPlayer>)>,
    input_state: Res<InputState>,
    config: Res<PlayerConfig>,
    time: Res<Time>,
) {
    let Ok(state) = players.single() else {
        return;
    };
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    let eye_offset =
        config.capsule_height * EYE_OFFSET_FACTOR * state.stance.height_factor();
    let target = state.position + Vec3::Y * eye_offset;

    // Mild smoothing on the eye height so crouch transitions read smoothly;
    // position itself snaps to stay in lockstep with the sim.
    let rate: f32 = 25.0;
    let t = 1.0 - (-rate * time.delta_secs()).exp();
    let mut translation = target;
    translation.y = camera_transform.translation.y + (target.y - camera_transform.translation.y) * t;
    camera_transform.translation = translation;

    camera_transform.rotation =
        Quat::from_euler(EulerRot::YXZ, input_state.yaw, input_state.pitch, 0.0);
}
