//! Horizontal movement resolution.
//!
//! Exactly one [`MoveMode`] is picked per tick, in priority order, from the
//! input sample and the capability predicates. Wall blocks are released here
//! once the player turns far enough away from the blocking direction.

use bevy::prelude::*;

use crate::config::PlayerConfig;
use crate::input::InputSample;
use crate::modifier::ModifierKey;
use crate::player::{MoveMode, PlayerState};

/// Result of one horizontal resolution: the picked mode and the velocity the
/// mover should carry this tick. Climbing velocity may have a Y component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalResolution {
    pub mode: MoveMode,
    pub velocity: Vec3,
}

fn basis(yaw: f32) -> (Vec3, Vec3) {
    // +X right, +Y up, -Z forward at yaw 0.
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// Input-derived planar direction, unit length, diagonal-dampened.
///
/// When both axes are active the combined unit vector is scaled down so
/// diagonal movement is not faster than straight movement.
fn desired_direction(input: &InputSample, config: &PlayerConfig) -> Vec3 {
    let (forward, right) = basis(input.yaw);
    let mut dir = (forward * input.forward + right * input.strafe).normalize_or_zero();
    if input.forward != 0.0 && input.strafe != 0.0 {
        dir *= config.diagonal_damp;
    }
    dir
}

/// Climbing vector: input drives up/along the surface instead of across the
/// ground, with an extra forward lean to hug the surface while pulling up
/// airborne, or to peel off it when backing down from the ground.
fn climb_vector(input: &InputSample, grounded: bool) -> Vec3 {
    let (forward, right) = basis(input.yaw);
    let mut v = Vec3::Y * input.forward + right * input.strafe;
    if (!grounded && input.forward > 0.0) || (grounded && input.forward < 0.0) {
        v += forward * input.forward;
    }
    v
}

/// Resolve this tick's horizontal mode and velocity. May remove the
/// wall-block modifier when its release condition is met.
pub fn resolve(state: &mut PlayerState, input: &InputSample, config: &PlayerConfig) -> HorizontalResolution {
    let slowed = state.stance.is_lowered() || state.modifiers.has(ModifierKey::FallDamage);
    let slow_factor = if slowed { 0.5 } else { 1.0 };

    if state.climbing && state.can_climb() {
        return HorizontalResolution {
            mode: MoveMode::Climbing,
            velocity: climb_vector(input, state.grounded) * config.climb_speed * slow_factor,
        };
    }

    let desired = desired_direction(input, config);

    // Wall block holds the player at idle until they jump, crouch, or steer
    // far enough away from the blocked direction. The comparison uses the
    // desired input direction, not the current velocity: the block zeroes
    // velocity, which would satisfy the release condition immediately.
    if let Some(block) = state.modifiers.wall_block() {
        let released = state.jumping
            || state.stance.is_lowered()
            || block.dot(desired.normalize_or_zero()) < config.wall_hit_tolerance;
        if released {
            state.modifiers.remove(ModifierKey::WallBlock);
        } else {
            return HorizontalResolution {
                mode: MoveMode::Idle,
                velocity: Vec3::ZERO,
            };
        }
    }

    if input.run_held && input.forward > 0.0 && state.can_run() {
        return HorizontalResolution {
            mode: MoveMode::Running,
            velocity: desired * config.sprint_speed,
        };
    }

    if state.can_walk() && input.has_directional_input() {
        return HorizontalResolution {
            mode: MoveMode::Walking,
            velocity: desired * config.walk_speed * slow_factor,
        };
    }

    HorizontalResolution {
        mode: MoveMode::Idle,
        velocity: Vec3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;

    fn player() -> PlayerState {
        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0), &PlayerConfig::default());
        state.grounded = true;
        state
    }

    fn forward_input() -> InputSample {
        InputSample {
            forward: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let config = PlayerConfig::default();
        let mut state = player();
        let mut input = forward_input();
        input.run_held = true;
        let res = resolve(&mut state, &input, &config);
        state.mode = res.mode;
        assert!(!(state.is_walking() && state.is_running()));
        assert_eq!(res.mode, MoveMode::Running);
    }

    #[test]
    fn test_walk_speed_and_direction() {
        let config = PlayerConfig::default();
        let mut state = player();
        let res = resolve(&mut state, &forward_input(), &config);
        assert_eq!(res.mode, MoveMode::Walking);
        assert!((res.velocity.length() - config.walk_speed).abs() < 1e-4);
        // Yaw 0 faces -Z.
        assert!(res.velocity.z < 0.0);
    }

    #[test]
    fn test_diagonal_damp() {
        let config = PlayerConfig::default();
        let mut state = player();

        let straight = resolve(&mut state, &forward_input(), &config).velocity.length();

        let diagonal_input = InputSample {
            forward: 1.0,
            strafe: 1.0,
            ..Default::default()
        };
        let diagonal = resolve(&mut state, &diagonal_input, &config).velocity.length();
        assert!((diagonal - straight * 0.71).abs() < 1e-3, "diagonal {diagonal} straight {straight}");
    }

    #[test]
    fn test_running_needs_forward_and_gate() {
        let config = PlayerConfig::default();
        let mut state = player();

        // Run key held while strafing only: walk, not run.
        let input = InputSample {
            strafe: 1.0,
            run_held: true,
            ..Default::default()
        };
        assert_eq!(resolve(&mut state, &input, &config).mode, MoveMode::Walking);

        // Out of stamina blocks the run gate.
        state.modifiers.set(Modifier::OutOfStamina);
        let mut input = forward_input();
        input.run_held = true;
        let res = resolve(&mut state, &input, &config);
        assert_eq!(res.mode, MoveMode::Walking);
    }

    #[test]
    fn test_fall_damage_halves_walk_speed() {
        let config = PlayerConfig::default();
        let mut state = player();
        state.modifiers.set(Modifier::FallDamage(8.0));
        let res = resolve(&mut state, &forward_input(), &config);
        assert_eq!(res.mode, MoveMode::Walking);
        assert!((res.velocity.length() - config.walk_speed * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_wall_block_forces_idle_until_turned_away() {
        let config = PlayerConfig::default();
        let mut state = player();
        // Block facing -Z (the direction the player was moving).
        let block_dir = Vec3::new(0.0, 0.0, -1.0);
        state.modifiers.set(Modifier::WallBlock(block_dir));

        // Still pushing head-on: idle, zero velocity, block stays.
        let res = resolve(&mut state, &forward_input(), &config);
        assert_eq!(res.mode, MoveMode::Idle);
        assert_eq!(res.velocity, Vec3::ZERO);
        assert!(state.modifiers.has(ModifierKey::WallBlock));

        // Turned ~90 degrees: dot falls under the tolerance, block releases
        // and resolution resumes this same tick.
        let sideways = InputSample {
            strafe: 1.0,
            ..Default::default()
        };
        let res = resolve(&mut state, &sideways, &config);
        assert_eq!(res.mode, MoveMode::Walking);
        assert!(!state.modifiers.has(ModifierKey::WallBlock));
    }

    #[test]
    fn test_wall_block_released_by_crouch() {
        let config = PlayerConfig::default();
        let mut state = player();
        state.modifiers.set(Modifier::WallBlock(Vec3::NEG_Z));
        state.stance.try_toggle(true, || true);
        let res = resolve(&mut state, &forward_input(), &config);
        assert!(!state.modifiers.has(ModifierKey::WallBlock));
        assert_eq!(res.mode, MoveMode::Walking);
    }

    #[test]
    fn test_climb_vector_composition() {
        let config = PlayerConfig::default();
        let mut state = player();
        state.climbing = true;
        state.grounded = false;

        let res = resolve(&mut state, &forward_input(), &config);
        assert_eq!(res.mode, MoveMode::Climbing);
        // Pulling up while airborne climbs and hugs the surface (-Z forward).
        assert!(res.velocity.y > 0.0);
        assert!(res.velocity.z < 0.0);

        // Backing down from the ground peels away from the surface.
        state.grounded = true;
        let mut back = InputSample::default();
        back.forward = -1.0;
        let res = resolve(&mut state, &back, &config);
        assert!(res.velocity.y < 0.0);
        assert!(res.velocity.z > 0.0);
    }

    #[test]
    fn test_disable_movement_forces_idle() {
        let config = PlayerConfig::default();
        let mut state = player();
        state.modifiers.set(Modifier::DisableMovement);
        let res = resolve(&mut state, &forward_input(), &config);
        assert_eq!(res.mode, MoveMode::Idle);
        assert_eq!(res.velocity, Vec3::ZERO);
    }
}
