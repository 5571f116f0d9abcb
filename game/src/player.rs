//! Player spawn and the fixed simulation tick.

use bevy::prelude::*;
use sim::{BlockWorld, PlayerConfig, PlayerState, Stance, TickEvents};

use crate::input::InputState;

/// Marker for the local player entity.
#[derive(Component)]
pub struct LocalPlayer;

/// Latest tick outputs, drained by the audio/animation sinks.
#[derive(Resource, Default)]
pub struct SimEvents(pub TickEvents);

/// Stand-in for an animation rig: crouch transitions take a fixed time, then
/// report completion back into the stance machine.
#[derive(Resource)]
pub struct CrouchAnim {
    timer: Timer,
}

impl Default for CrouchAnim {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.25, TimerMode::Once),
        }
    }
}

/// Spawn the player at the level's start position.
pub fn spawn_player(mut commands: Commands, config: Res<PlayerConfig>) {
    let start = Vec3::new(0.0, config.capsule_height * 0.5 + 0.5, 6.0);
    info!("Spawning player at {start}");
    commands.spawn((
        LocalPlayer,
        PlayerState::new(start, &config),
        Transform::from_translation(start),
    ));
}

/// Advance the simulation by one fixed tick and sync the transform.
pub fn fixed_tick(
    mut input_state: ResMut<InputState>,
    config: Res<PlayerConfig>,
    mut world: ResMut<BlockWorld>,
    mut events: ResMut<SimEvents>,
    mut crouch_anim: ResMut<CrouchAnim>,
    mut players: Query<(&mut PlayerState, &mut Transform), With<LocalPlayer>>,
    time: Res<Time>,
) {
    let Ok((mut state, mut transform)) = players.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    // Climbable trigger volume drives climb mode, not the locomotion engine.
    let was_climbing = state.climbing;
    state.climbing = world.in_climb_volume(state.position);
    if was_climbing != state.climbing {
        debug!("climbing: {}", state.climbing);
    }

    let sample = input_state.take_sample();
    sim::step(&mut state, &sample, &config, &mut *world, &mut events.0, dt);
    world.settle(dt);

    // Fake animation rig: time out crouch transitions and feed the
    // completion signal back into the stance machine.
    if state.stance.stance() == Stance::Crouching {
        crouch_anim.timer.tick(time.delta());
        if crouch_anim.timer.is_finished() {
            state.stance.crouch_animation_finished();
            crouch_anim.timer.reset();
        }
    } else {
        crouch_anim.timer.reset();
    }

    for body in &events.0.objects_under {
        debug!("standing on dynamic body {body:?}");
    }

    transform.translation = state.position;
}

/// Sync pushable crate visuals to the physics world.
#[derive(Component)]
pub struct CrateVisual(pub sim::BodyId);

pub fn sync_crates(
    world: Res<BlockWorld>,
    mut crates: Query<(&CrateVisual, &mut Transform)>,
) {
    for (visual, mut transform) in &mut crates {
        if let Some(pos) = world.body_position(visual.0) {
            transform.translation = pos;
        }
    }
}
