//! Stamina pool with hysteresis on the out-of-stamina effect.

use crate::config::PlayerConfig;
use crate::modifier::{Modifier, ModifierKey, Modifiers};

/// Bounded stamina pool in `[0, stamina_max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stamina(pub f32);

impl Stamina {
    pub fn full(config: &PlayerConfig) -> Self {
        Self(config.stamina_max)
    }

    fn clamp(&mut self, config: &PlayerConfig) {
        self.0 = self.0.clamp(0.0, config.stamina_max);
    }

    /// Spend the flat jump cost. Called once at the jump impulse, never
    /// per second. Adrenaline makes jumps cheaper.
    pub fn spend_jump(&mut self, modifiers: &Modifiers, config: &PlayerConfig) {
        if modifiers.has(ModifierKey::DisableStamina) {
            return;
        }
        self.0 -= config.jump_stamina_cost / modifiers.adrenaline_multiplier();
        self.clamp(config);
    }

    /// Per-tick regen/drain plus the set/clear hysteresis of the
    /// out-of-stamina effect.
    ///
    /// Returns whether the low-stamina cue should play this tick. The cue is
    /// keyed off the pool level alone, independent of the modifier, and rate
    /// limiting is the audio sink's job.
    pub fn tick(
        &mut self,
        modifiers: &mut Modifiers,
        running: bool,
        jumping: bool,
        dt: f32,
        config: &PlayerConfig,
    ) -> bool {
        let disabled = modifiers.has(ModifierKey::DisableStamina);
        let boost = modifiers.adrenaline_multiplier();

        if running {
            if !disabled {
                self.0 -= config.stamina_rate / boost * dt;
            }
        } else if !jumping {
            self.0 += config.stamina_rate * boost * dt;
        }
        self.clamp(config);

        // Hysteresis band: set at <= 0, clear only once recovered to the
        // recover threshold. Nothing toggles inside the band.
        if self.0 <= 0.0 && !disabled {
            modifiers.set(Modifier::OutOfStamina);
        } else if self.0 >= config.stamina_recover_threshold {
            modifiers.remove(ModifierKey::OutOfStamina);
        }

        self.0 < config.stamina_recover_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> PlayerConfig {
        PlayerConfig::default()
    }

    #[test]
    fn test_drain_clamps_at_zero_and_sets_effect() {
        let config = config();
        let mut stamina = Stamina(5.0);
        let mut mods = Modifiers::new();

        // One second of running at 10/s from a pool of 5.
        for _ in 0..60 {
            stamina.tick(&mut mods, true, false, DT, &config);
        }
        assert_eq!(stamina.0, 0.0);
        assert!(mods.has(ModifierKey::OutOfStamina));
    }

    #[test]
    fn test_effect_clears_only_at_recover_threshold() {
        let config = config();
        let mut stamina = Stamina(0.0);
        let mut mods = Modifiers::new();
        mods.set(Modifier::OutOfStamina);

        // Regenerate up to just below the threshold: still out of stamina.
        while stamina.0 < 39.0 {
            stamina.tick(&mut mods, false, false, DT, &config);
            if stamina.0 < config.stamina_recover_threshold {
                assert!(mods.has(ModifierKey::OutOfStamina), "cleared at {}", stamina.0);
            }
        }
        // Crossing the threshold clears it.
        while stamina.0 < config.stamina_recover_threshold {
            stamina.tick(&mut mods, false, false, DT, &config);
        }
        stamina.tick(&mut mods, false, false, DT, &config);
        assert!(!mods.has(ModifierKey::OutOfStamina));
    }

    #[test]
    fn test_pool_stays_in_bounds() {
        let config = config();
        let mut stamina = Stamina::full(&config);
        let mut mods = Modifiers::new();
        for _ in 0..120 {
            stamina.tick(&mut mods, false, false, DT, &config);
            assert!(stamina.0 >= 0.0 && stamina.0 <= config.stamina_max);
        }
        for _ in 0..1200 {
            stamina.tick(&mut mods, true, false, DT, &config);
            assert!(stamina.0 >= 0.0 && stamina.0 <= config.stamina_max);
        }
    }

    #[test]
    fn test_adrenaline_scales_regen_and_drain() {
        let config = config();
        let mut mods = Modifiers::new();
        mods.set(Modifier::AdrenalineBoost(2.0));

        let mut boosted = Stamina(50.0);
        boosted.tick(&mut mods, false, false, 1.0, &config);
        assert!((boosted.0 - 70.0).abs() < 1e-3);

        let mut drained = Stamina(50.0);
        drained.tick(&mut mods, true, false, 1.0, &config);
        assert!((drained.0 - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_regen_mid_jump() {
        let config = config();
        let mut mods = Modifiers::new();
        let mut stamina = Stamina(50.0);
        stamina.tick(&mut mods, false, true, 1.0, &config);
        assert_eq!(stamina.0, 50.0);
    }

    #[test]
    fn test_disable_stamina_freezes_drain_and_effect() {
        let config = config();
        let mut mods = Modifiers::new();
        mods.set(Modifier::DisableStamina);
        let mut stamina = Stamina(1.0);
        for _ in 0..120 {
            stamina.tick(&mut mods, true, false, DT, &config);
        }
        assert_eq!(stamina.0, 1.0);
        assert!(!mods.has(ModifierKey::OutOfStamina));
    }

    #[test]
    fn test_jump_cost_is_flat_and_adrenaline_scaled() {
        let config = config();
        let mut mods = Modifiers::new();
        let mut stamina = Stamina(50.0);
        stamina.spend_jump(&mods, &config);
        assert!((stamina.0 - 40.0).abs() < 1e-6);

        mods.set(Modifier::AdrenalineBoost(2.0));
        stamina.spend_jump(&mods, &config);
        assert!((stamina.0 - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_low_stamina_cue_tracks_pool_not_modifier() {
        let config = config();
        let mut mods = Modifiers::new();
        let mut stamina = Stamina(30.0);
        assert!(stamina.tick(&mut mods, false, false, DT, &config));
        let mut high = Stamina(80.0);
        assert!(!high.tick(&mut mods, false, false, DT, &config));
    }
}
