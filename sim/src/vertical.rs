//! Vertical kinematics: gravity, landings, fall damage, jump impulse.
//!
//! Sign convention (deliberately fixed here, tunable through the config):
//! `gravity` is a positive constant subtracted from vertical velocity while
//! airborne, and a small negative `ground_stick_velocity` is held while
//! grounded so the mover stays pressed to the floor.

use crate::config::PlayerConfig;

/// What touching the ground this tick amounts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Landing {
    /// Soft touchdown, nothing to report.
    Soft,
    /// Hard enough for the impact cue, not hard enough to hurt.
    Impact,
    /// Fall damage with this many seconds of recovery.
    Damage { recovery_seconds: f32 },
}

/// Recovery duration for a landing at vertical speed `velocity`.
///
/// `k` is chosen so that a landing exactly at the threshold maps to the
/// 5-second floor; the cubic then grows monotonically with impact speed up
/// to the 15-second ceiling.
pub fn fall_recovery_seconds(velocity: f32, config: &PlayerConfig) -> f32 {
    let k = 5.0_f32.cbrt() / config.fall_damage_threshold;
    (velocity * k).abs().powi(3).clamp(5.0, 15.0)
}

/// Classify a grounded, non-ascending vertical velocity.
pub fn resolve_landing(velocity: f32, config: &PlayerConfig) -> Landing {
    if velocity < config.fall_damage_threshold {
        Landing::Damage {
            recovery_seconds: fall_recovery_seconds(velocity, config),
        }
    } else if velocity < config.impact_threshold {
        Landing::Impact
    } else {
        Landing::Soft
    }
}
