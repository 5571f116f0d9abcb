//! Player input handling
//!
//! Samples keyboard/mouse every frame and turns them into the per-tick
//! [`sim::InputSample`] the fixed-step simulation consumes. Button edges are
//! queued here and cleared by the tick that consumes them, so a press landing
//! between two fixed steps is never lost.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use std::f32::consts::FRAC_PI_2;

use crate::states::GameState;

/// Mouse sensitivity for look
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Client-side input state
#[derive(Resource, Default)]
pub struct InputState {
    pub forward: f32,
    pub strafe: f32,
    /// Mouse-controlled yaw
    pub yaw: f32,
    /// Mouse-controlled pitch
    pub pitch: f32,
    pub run_held: bool,
    // Queued button edges, consumed (and cleared) by the fixed tick.
    pub jump_queued: bool,
    pub crouch_queued: bool,
    pub interact_queued: bool,
    pub rotate_held_object: bool,
    pub secondary_action: bool,
}

impl InputState {
    /// Build the sample for one fixed tick and clear the consumed edges.
    pub fn take_sample(&mut self) -> sim::InputSample {
        let sample = sim::InputSample {
            forward: self.forward,
            strafe: self.strafe,
            yaw: self.yaw,
            jump_pressed: self.jump_queued,
            run_held: self.run_held,
            crouch_pressed: self.crouch_queued,
            interact_pressed: self.interact_queued,
            rotate_held_object: self.rotate_held_object,
            secondary_action: self.secondary_action,
        };
        self.jump_queued = false;
        self.crouch_queued = false;
        self.interact_queued = false;
        sample
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<InputState>,
) {
    let mut forward = 0.0;
    if keyboard.pressed(KeyCode::KeyW) {
        forward += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        forward -= 1.0;
    }
    let mut strafe = 0.0;
    if keyboard.pressed(KeyCode::KeyD) {
        strafe += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        strafe -= 1.0;
    }
    input_state.forward = forward;
    input_state.strafe = strafe;
    input_state.run_held =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if keyboard.just_pressed(KeyCode::Space) {
        input_state.jump_queued = true;
    }
    if keyboard.just_pressed(KeyCode::KeyC) || keyboard.just_pressed(KeyCode::ControlLeft) {
        input_state.crouch_queued = true;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        input_state.interact_queued = true;
    }
    input_state.rotate_held_object = keyboard.pressed(KeyCode::KeyR);
}

/// Handle mouse input for looking around
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut input_state: ResMut<InputState>,
) {
    input_state.secondary_action = mouse_button.pressed(MouseButton::Right);

    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }
    if delta != Vec2::ZERO {
        input_state.yaw -= delta.x * MOUSE_SENSITIVITY;
        input_state.pitch -= delta.y * MOUSE_SENSITIVITY;
        input_state.pitch = input_state.pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }
}

/// Toggle pause with Escape, grabbing/releasing the cursor to match.
pub fn handle_pause_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    let paused = state.get() == &GameState::Paused;
    next_state.set(if paused { GameState::Playing } else { GameState::Paused });

    if let Ok(window_entity) = windows.single() {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            if paused {
                cursor.grab_mode = CursorGrabMode::Locked;
                cursor.visible = false;
            } else {
                cursor.grab_mode = CursorGrabMode::None;
                cursor.visible = true;
            }
        }
    }
}

/// Grab the cursor once at startup.
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
) {
    if let Ok(window_entity) = windows.single() {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
    }
}
