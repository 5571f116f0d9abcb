//! Audio sink for simulation cues.
//!
//! The simulation fires cues without rate limiting; holding the minimum
//! interval between repeats of the same cue is this sink's job. Footsteps
//! are derived here from the animation parameters rather than emitted by the
//! simulation, paced by the current movement speed.

use bevy::audio::Volume;
use bevy::prelude::*;
use std::collections::HashMap;

use sim::Cue;

use crate::anim::AnimState;
use crate::player::SimEvents;

/// Resource holding all loaded audio assets
#[derive(Resource)]
pub struct GameAudio {
    pub jump: Handle<AudioSource>,
    pub impact: Handle<AudioSource>,
    pub fall_damage: Handle<AudioSource>,
    pub low_stamina: Handle<AudioSource>,
    pub footstep: Handle<AudioSource>,
}

/// Per-cue playback bookkeeping.
#[derive(Resource, Default)]
pub struct AudioState {
    last_played: HashMap<Cue, f32>,
    last_footstep: f32,
}

/// Minimum seconds between repeats of the same cue.
fn min_interval(cue: Cue) -> f32 {
    match cue {
        Cue::Jump => 0.2,
        Cue::Impact => 0.3,
        Cue::FallDamage => 0.5,
        Cue::LowStamina => 2.0,
    }
}

fn cue_volume(cue: Cue) -> f32 {
    match cue {
        Cue::Jump => 0.6,
        Cue::Impact => 0.8,
        Cue::FallDamage => 1.0,
        Cue::LowStamina => 0.5,
    }
}

/// Load all audio assets on startup
pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("Audio system: loading cue assets");
    commands.insert_resource(GameAudio {
        jump: asset_server.load("audio/sfx/jump.ogg"),
        impact: asset_server.load("audio/sfx/impact.ogg"),
        fall_damage: asset_server.load("audio/sfx/fall_damage.ogg"),
        low_stamina: asset_server.load("audio/sfx/low_stamina.ogg"),
        footstep: asset_server.load("audio/sfx/footstep.ogg"),
    });
    commands.init_resource::<AudioState>();
}

impl GameAudio {
    fn handle_for(&self, cue: Cue) -> Handle<AudioSource> {
        match cue {
            Cue::Jump => self.jump.clone(),
            Cue::Impact => self.impact.clone(),
            Cue::FallDamage => self.fall_damage.clone(),
            Cue::LowStamina => self.low_stamina.clone(),
        }
    }
}

/// Play this tick's cues, dropping repeats inside their minimum interval.
pub fn play_cues(
    mut commands: Commands,
    events: Res<SimEvents>,
    audio: Option<Res<GameAudio>>,
    mut audio_state: ResMut<AudioState>,
    time: Res<Time>,
) {
    let Some(audio) = audio else { return };
    let now = time.elapsed_secs();

    for &cue in &events.0.cues {
        let last = audio_state.last_played.get(&cue).copied().unwrap_or(-60.0);
        if now - last < min_interval(cue) {
            continue;
        }
        audio_state.last_played.insert(cue, now);
        commands.spawn((
            AudioPlayer::new(audio.handle_for(cue)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(cue_volume(cue))),
        ));
    }
}

/// Footsteps, paced by movement speed while walking or running on ground.
pub fn play_footsteps(
    mut commands: Commands,
    anim: Res<AnimState>,
    audio: Option<Res<GameAudio>>,
    mut audio_state: ResMut<AudioState>,
    time: Res<Time>,
) {
    let Some(audio) = audio else { return };
    let params = anim.current;
    if !params.grounded || !(params.walking || params.running) || params.speed < 0.1 {
        return;
    }

    // Stride time shrinks as speed grows; running roughly doubles the pace.
    let interval = (2.0 / params.speed).clamp(0.25, 0.7);
    let now = time.elapsed_secs();
    if now - audio_state.last_footstep < interval {
        return;
    }
    audio_state.last_footstep = now;
    commands.spawn((
        AudioPlayer::new(audio.footstep.clone()),
        PlaybackSettings::DESPAWN.with_volume(Volume::Linear(0.4)),
    ));
}
