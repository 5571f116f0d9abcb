//! Demo frontend for the player simulation.
//!
//! Wires keyboard/mouse input, a first-person camera, an audio sink and a
//! small test level around the fixed-step `sim` core.

mod anim;
mod audio;
mod camera;
mod input;
mod level;
mod player;
mod states;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use sim::PlayerConfig;
use states::GameState;

/// Optional tuning override, loaded when present. Resolved against the
/// manifest directory, same as the asset root.
const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/player.ron");

/// Load the player tuning config, falling back to defaults when the file is
/// missing or malformed.
fn load_player_config() -> PlayerConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(text) => match ron::from_str::<PlayerConfig>(&text) {
            Ok(config) => {
                info!("Loaded player config from {CONFIG_PATH}");
                config
            }
            Err(e) => {
                warn!("Malformed {CONFIG_PATH} ({e}); using default player config");
                PlayerConfig::default()
            }
        },
        Err(_) => PlayerConfig::default(),
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Lowlight".to_string(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    }));

    app.init_state::<GameState>();

    // Fixed-step simulation clock.
    app.insert_resource(Time::<Fixed>::from_hz(sim::TICK_HZ));

    app.insert_resource(load_player_config());
    app.init_resource::<input::InputState>();
    app.init_resource::<player::SimEvents>();
    app.init_resource::<player::CrouchAnim>();
    app.init_resource::<anim::AnimState>();

    app.add_systems(
        Startup,
        (
            level::setup_level,
            player::spawn_player,
            camera::spawn_camera,
            audio::setup_audio,
            input::grab_cursor,
        ),
    );

    app.add_systems(
        Update,
        (
            input::handle_pause_toggle,
            (
                input::handle_keyboard_input,
                input::handle_mouse_input,
            )
                .run_if(in_state(GameState::Playing)),
            (
                camera::update_camera,
                player::sync_crates,
                anim::apply_anim_params,
                audio::play_cues,
                audio::play_footsteps,
            )
                .after(input::handle_mouse_input),
        ),
    );

    app.add_systems(
        FixedUpdate,
        player::fixed_tick.run_if(in_state(GameState::Playing)),
    );

    app.run();
}
