//! Animation sink.
//!
//! There is no skeletal rig in this demo; the sink keeps the latest
//! parameter set as a resource (the HUD/camera read it) and logs flag
//! transitions. Signals are fire-and-forget: nothing here reports back to
//! the simulation.

use bevy::prelude::*;
use sim::AnimParams;

use crate::player::SimEvents;

/// Latest animation parameters pushed by the simulation tick.
#[derive(Resource, Default)]
pub struct AnimState {
    pub current: AnimParams,
}

pub fn apply_anim_params(events: Res<SimEvents>, mut anim: ResMut<AnimState>) {
    let next = events.0.anim;
    let prev = anim.current;

    if next.walking != prev.walking {
        debug!("anim flag IsWalking = {}", next.walking);
    }
    if next.running != prev.running {
        debug!("anim flag IsRunning = {}", next.running);
    }
    if next.crouched != prev.crouched {
        debug!("anim flag IsCrouched = {}", next.crouched);
    }
    if next.climbing != prev.climbing {
        debug!("anim flag IsClimbing = {}", next.climbing);
    }
    if next.grounded != prev.grounded {
        debug!("anim flag IsGrounded = {}", next.grounded);
    }

    anim.current = next;
}
