//! The per-tick orchestrator.
//!
//! One fixed-step call per simulation frame: decay timed effects, handle
//! stance and jump requests, resolve horizontal movement, integrate gravity,
//! move through the physics world, classify the move's contacts, and settle
//! the stamina economy. All player state is mutated here and nowhere else.
//!
//! Outputs to the outside world (audio cues, animation parameters, object-
//! under notifications) are collected into [`TickEvents`]; the tick never
//! waits on whoever consumes them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::contact::{classify, BodyId, ContactKind};
use crate::input::InputSample;
use crate::locomotion;
use crate::modifier::Modifier;
use crate::player::{MoveMode, PlayerState};
use crate::vertical::{resolve_landing, Landing};
use crate::world::{Capsule, PhysicsWorld};

/// Fire-and-forget audio cue identifiers. Frequency gating happens in the
/// audio sink, not here.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Impact,
    FallDamage,
    LowStamina,
}

/// Animation parameters pushed to the animation sink every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimParams {
    pub walking: bool,
    pub running: bool,
    pub crouched: bool,
    pub climbing: bool,
    pub grounded: bool,
    pub speed: f32,
}

/// Everything one tick wants the outside world to hear about.
#[derive(Clone, Debug, Default)]
pub struct TickEvents {
    pub cues: Vec<Cue>,
    /// Dynamic bodies found under the player's feet; interaction tools use
    /// this to force-release held objects being stood on.
    pub objects_under: Vec<BodyId>,
    pub anim: AnimParams,
}

impl TickEvents {
    pub fn clear(&mut self) {
        self.cues.clear();
        self.objects_under.clear();
        self.anim = AnimParams::default();
    }
}

/// Advance the player by one fixed tick.
pub fn step<W: PhysicsWorld>(
    state: &mut PlayerState,
    input: &InputSample,
    config: &PlayerConfig,
    world: &mut W,
    events: &mut TickEvents,
    dt: f32,
) {
    events.clear();
    let input = input.clamped();

    // 1. Timed effects.
    state.modifiers.decay_fall_damage(dt);

    // 2. Stance. The stand-up probe only runs when standing is attempted,
    // sweeping the full standing height from the crouched capsule's feet.
    if input.crouch_pressed {
        let can_crouch = state.can_crouch();
        let current = Capsule::with_height_factor(config, state.stance.height_factor());
        let origin =
            state.position - Vec3::Y * (current.half_height - config.probe_radius());
        state.stance.try_toggle(can_crouch, || {
            !world.probe(
                origin,
                config.probe_radius(),
                Vec3::Y,
                config.stand_probe_distance(),
            )
        });
    }

    // The collision capsule tracks the stance, so a full crouch fits under
    // geometry the standing capsule cannot.
    let capsule = Capsule::with_height_factor(config, state.stance.height_factor());
    // Overhead probes start one probe radius above the feet so the surface
    // currently stood on never counts as an obstruction.
    let probe_origin =
        state.position - Vec3::Y * (capsule.half_height - config.probe_radius());

    // 3. Jump. Overhead clearance first, then impulse plus the flat stamina
    // cost, spent exactly once.
    if input.jump_pressed && state.can_jump() {
        let clear = !world.probe(
            probe_origin,
            config.probe_radius(),
            Vec3::Y,
            config.jump_probe_distance(),
        );
        if clear {
            state.vertical_velocity = config.jump_impulse();
            state.jumping = true;
            state.stamina.spend_jump(&state.modifiers, config);
            events.cues.push(Cue::Jump);
        }
    }

    // 4. Horizontal resolution (may release a wall block).
    let resolution = locomotion::resolve(state, &input, config);
    state.mode = resolution.mode;

    // 5/6. Integrate and move. Climbing carries its own vertical component
    // and suspends gravity; everything else falls.
    let displacement;
    if state.mode == MoveMode::Climbing {
        state.vertical_velocity = 0.0;
        state.horizontal_velocity = Vec3::new(resolution.velocity.x, 0.0, resolution.velocity.z);
        displacement = resolution.velocity * dt;
    } else {
        state.horizontal_velocity = resolution.velocity;
        if !state.grounded {
            state.vertical_velocity -= config.gravity * dt;
        }
        displacement = (state.horizontal_velocity + Vec3::Y * state.vertical_velocity) * dt;
    }

    let expected_y = state.position.y + displacement.y;
    let result = world.move_by(state.position, displacement, capsule);
    state.position = result.position;
    state.grounded = result.grounded;

    // Head bump: an upward move clamped by a ceiling kills the ascent.
    if displacement.y > 0.0 && result.position.y < expected_y - 1e-4 {
        state.vertical_velocity = 0.0;
    }

    // 7. Landing.
    if state.grounded && state.vertical_velocity <= 0.0 {
        match resolve_landing(state.vertical_velocity, config) {
            Landing::Damage { recovery_seconds } => {
                state.modifiers.set(Modifier::FallDamage(recovery_seconds));
                events.cues.push(Cue::FallDamage);
            }
            Landing::Impact => events.cues.push(Cue::Impact),
            Landing::Soft => {}
        }
        state.vertical_velocity = config.ground_stick_velocity;
        state.jumping = false;
    }

    // 8. Classify this move's contacts. Collected during the move, applied
    // here; a wall block therefore gates locomotion from the next tick on.
    for contact in &result.contacts {
        match classify(contact, state.position, config) {
            Some(ContactKind::Push { body, velocity }) => world.push_body(body, velocity),
            Some(ContactKind::WallBlock { direction }) => {
                // A climb surface pressed against while climbing is not a wall.
                if state.mode != MoveMode::Climbing {
                    state.modifiers.set_if_absent(Modifier::WallBlock(direction));
                }
            }
            Some(ContactKind::ObjectUnder { body }) => events.objects_under.push(body),
            None => {}
        }
    }

    // 9. Stamina.
    let running = state.mode == MoveMode::Running;
    let low = state
        .stamina
        .tick(&mut state.modifiers, running, state.jumping, dt, config);
    if low {
        events.cues.push(Cue::LowStamina);
    }

    // 10. Animation parameters.
    events.anim = AnimParams {
        walking: state.is_walking(),
        running: state.is_running(),
        crouched: state.stance.is_lowered(),
        climbing: state.mode == MoveMode::Climbing,
        grounded: state.grounded,
        speed: state.horizontal_velocity.length(),
    };
}
