//! Per-tick input sample consumed by the player simulation.

use serde::{Deserialize, Serialize};

/// Continuous axes plus the button edges/holds the simulation cares about,
/// sampled once per fixed tick by whatever frontend drives the sim.
///
/// `interact_pressed`, `rotate_held_object` and `secondary_action` are part
/// of the sample for the interaction tools that share this input source; the
/// locomotion core itself never reads them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Forward axis in [-1, 1]; positive is forward.
    pub forward: f32,
    /// Strafe axis in [-1, 1]; positive is right.
    pub strafe: f32,
    /// Facing yaw in radians (mouse look).
    pub yaw: f32,
    /// Jump was pressed this tick.
    pub jump_pressed: bool,
    /// Run modifier is held.
    pub run_held: bool,
    /// Crouch toggle was pressed this tick.
    pub crouch_pressed: bool,
    pub interact_pressed: bool,
    pub rotate_held_object: bool,
    pub secondary_action: bool,
}

impl InputSample {
    /// Clamp both axes into their valid range.
    pub fn clamped(mut self) -> Self {
        self.forward = self.forward.clamp(-1.0, 1.0);
        self.strafe = self.strafe.clamp(-1.0, 1.0);
        self
    }

    pub fn has_directional_input(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }
}
