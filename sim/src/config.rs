//! Tuning constants for the player simulation.
//!
//! Everything that affects game feel lives here so it can be overridden from
//! a config file without touching the systems. The defaults are the values
//! the rest of the crate's tests assume.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Full tuning set for locomotion, vertical kinematics and stamina.
#[derive(Resource, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in m/s.
    pub walk_speed: f32,
    /// Sprint speed in m/s.
    pub sprint_speed: f32,
    /// Climb speed in m/s (along the climbable surface).
    pub climb_speed: f32,
    /// Scale applied to the combined horizontal vector when both input axes
    /// are active, so diagonals are not faster than straight movement.
    pub diagonal_damp: f32,

    /// Gravity as a positive constant, applied subtractively to vertical
    /// velocity while airborne. The jump impulse is `sqrt(gravity) * jump_height`.
    pub gravity: f32,
    /// Jump height parameter (not literal apex height; see the impulse formula).
    pub jump_height: f32,
    /// Small negative vertical velocity held while grounded so the capsule
    /// stays pressed to the floor instead of resting at exactly zero.
    /// Tunable: the two historical sign conventions disagreed here.
    pub ground_stick_velocity: f32,

    /// Landing speeds below this (more negative) cause fall damage.
    pub fall_damage_threshold: f32,
    /// Landing speeds below this (but above the damage threshold) only
    /// trigger the impact cue.
    pub impact_threshold: f32,

    /// Capsule half dimensions used by the movement primitive and probes.
    pub capsule_height: f32,
    pub capsule_radius: f32,
    /// Uniform scale of the player model; feeds into probe distances.
    pub model_scale: f32,

    /// A head-on contact with `dot(move_dir, normal)` below the negated
    /// tolerance counts as running into a wall.
    pub wall_hit_tolerance: f32,
    /// Dynamic bodies at or under this mass get pushed instead of blocking.
    pub pushable_mass_limit: f32,

    pub stamina_max: f32,
    /// Base regen and drain rate, points per second.
    pub stamina_rate: f32,
    /// Flat stamina cost of one jump.
    pub jump_stamina_cost: f32,
    /// Below this the low-stamina cue plays; also the recovery threshold
    /// that clears the out-of-stamina effect.
    pub stamina_recover_threshold: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            sprint_speed: 6.0,
            climb_speed: 2.0,
            diagonal_damp: 0.71,

            gravity: 18.0,
            jump_height: 1.1,
            ground_stick_velocity: -0.5,

            fall_damage_threshold: -15.0,
            impact_threshold: -7.5,

            capsule_height: 1.8,
            capsule_radius: 0.3,
            model_scale: 1.0,

            wall_hit_tolerance: 0.8,
            pushable_mass_limit: 40.0,

            stamina_max: 100.0,
            stamina_rate: 10.0,
            jump_stamina_cost: 10.0,
            stamina_recover_threshold: 40.0,
        }
    }
}

impl PlayerConfig {
    /// Upward jump impulse in m/s.
    pub fn jump_impulse(&self) -> f32 {
        self.gravity.sqrt() * self.jump_height
    }

    /// Radius of the overhead clearance probe.
    pub fn probe_radius(&self) -> f32 {
        self.capsule_radius * 0.85
    }

    /// Distance of the overhead probe used before jumping.
    pub fn jump_probe_distance(&self) -> f32 {
        ((self.capsule_height + self.jump_height) * self.model_scale - self.capsule_radius) * 0.9
    }

    /// Distance of the overhead probe used before standing up from a crouch.
    pub fn stand_probe_distance(&self) -> f32 {
        self.capsule_height * self.model_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_impulse_matches_formula() {
        let config = PlayerConfig::default();
        // sqrt(18) * 1.1
        assert!((config.jump_impulse() - 4.6669).abs() < 1e-3);
    }

    #[test]
    fn probe_distances_scale_with_model() {
        let mut config = PlayerConfig::default();
        let base = config.jump_probe_distance();
        config.model_scale = 2.0;
        assert!(config.jump_probe_distance() > base);
        assert!((config.stand_probe_distance() - config.capsule_height * 2.0).abs() < 1e-6);
    }
}
