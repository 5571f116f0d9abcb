//! Status effects ("modifiers") that gate or alter locomotion and interaction.
//!
//! Each effect is one variant of [`Modifier`] with its payload baked into the
//! variant, so a key can never be read with the wrong payload shape. The
//! store is a plain map keyed by the payload-free [`ModifierKey`] discriminant
//! and is only ever mutated from inside the player tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which kind of interaction currently holds exclusive access to the player.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Object,
    Item,
    Window,
    Door,
    Inventory,
}

/// An active status effect together with its payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Modifier {
    /// Stamina neither drains nor raises [`Modifier::OutOfStamina`].
    DisableStamina,
    /// Multiplier applied to stamina regen (and divided into drains/costs).
    AdrenalineBoost(f32),
    DisableInteraction,
    /// The interaction kind currently holding the exclusivity lock.
    Interacting(InteractionKind),
    DisableMovement,
    DisableRun,
    DisableJump,
    OutOfStamina,
    /// Seconds of recovery remaining; self-expires as it counts down.
    FallDamage(f32),
    /// The displacement direction that ran into the wall.
    WallBlock(Vec3),
}

/// Payload-free discriminant of [`Modifier`], used as the store key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    DisableStamina,
    AdrenalineBoost,
    DisableInteraction,
    Interacting,
    DisableMovement,
    DisableRun,
    DisableJump,
    OutOfStamina,
    FallDamage,
    WallBlock,
}

impl Modifier {
    pub fn key(&self) -> ModifierKey {
        match self {
            Modifier::DisableStamina => ModifierKey::DisableStamina,
            Modifier::AdrenalineBoost(_) => ModifierKey::AdrenalineBoost,
            Modifier::DisableInteraction => ModifierKey::DisableInteraction,
            Modifier::Interacting(_) => ModifierKey::Interacting,
            Modifier::DisableMovement => ModifierKey::DisableMovement,
            Modifier::DisableRun => ModifierKey::DisableRun,
            Modifier::DisableJump => ModifierKey::DisableJump,
            Modifier::OutOfStamina => ModifierKey::OutOfStamina,
            Modifier::FallDamage(_) => ModifierKey::FallDamage,
            Modifier::WallBlock(_) => ModifierKey::WallBlock,
        }
    }
}

/// The set of currently active modifiers. Presence of a key means the effect
/// is active; absence means it is not. No ordering semantics.
#[derive(Component, Clone, Debug, Default)]
pub struct Modifiers {
    active: HashMap<ModifierKey, Modifier>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate an effect, overwriting any previous payload under the same key.
    pub fn set(&mut self, modifier: Modifier) {
        self.active.insert(modifier.key(), modifier);
    }

    /// Activate an effect only if its key is not already present.
    ///
    /// Used for wall blocks: the direction captured by the first contact of a
    /// tick must not be clobbered by later contacts in the same tick.
    pub fn set_if_absent(&mut self, modifier: Modifier) {
        self.active.entry(modifier.key()).or_insert(modifier);
    }

    pub fn remove(&mut self, key: ModifierKey) -> Option<Modifier> {
        self.active.remove(&key)
    }

    pub fn has(&self, key: ModifierKey) -> bool {
        self.active.contains_key(&key)
    }

    pub fn get(&self, key: ModifierKey) -> Option<&Modifier> {
        self.active.get(&key)
    }

    /// Adrenaline multiplier, 1.0 when the boost is not active.
    pub fn adrenaline_multiplier(&self) -> f32 {
        match self.get(ModifierKey::AdrenalineBoost) {
            Some(Modifier::AdrenalineBoost(m)) if *m > 0.0 => *m,
            _ => 1.0,
        }
    }

    pub fn wall_block(&self) -> Option<Vec3> {
        match self.get(ModifierKey::WallBlock) {
            Some(Modifier::WallBlock(dir)) => Some(*dir),
            _ => None,
        }
    }

    pub fn fall_damage_seconds(&self) -> Option<f32> {
        match self.get(ModifierKey::FallDamage) {
            Some(Modifier::FallDamage(secs)) => Some(*secs),
            _ => None,
        }
    }

    pub fn interaction_lock(&self) -> Option<InteractionKind> {
        match self.get(ModifierKey::Interacting) {
            Some(Modifier::Interacting(kind)) => Some(*kind),
            _ => None,
        }
    }

    /// Count down the fall-damage recovery timer and drop the effect once it
    /// runs out.
    pub fn decay_fall_damage(&mut self, dt: f32) {
        if let Some(secs) = self.fall_damage_seconds() {
            let remaining = secs - dt;
            if remaining <= 0.0 {
                self.remove(ModifierKey::FallDamage);
            } else {
                self.set(Modifier::FallDamage(remaining));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_returns_none() {
        let mods = Modifiers::new();
        assert!(mods.get(ModifierKey::FallDamage).is_none());
        assert!(!mods.has(ModifierKey::OutOfStamina));
    }

    #[test]
    fn test_set_overwrites_payload() {
        let mut mods = Modifiers::new();
        mods.set(Modifier::FallDamage(10.0));
        mods.set(Modifier::FallDamage(3.0));
        assert_eq!(mods.fall_damage_seconds(), Some(3.0));
    }

    #[test]
    fn test_set_if_absent_keeps_first_wall_direction() {
        let mut mods = Modifiers::new();
        let first = Vec3::new(1.0, 0.0, 0.0);
        mods.set_if_absent(Modifier::WallBlock(first));
        mods.set_if_absent(Modifier::WallBlock(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(mods.wall_block(), Some(first));

        mods.remove(ModifierKey::WallBlock);
        let second = Vec3::new(0.0, 0.0, -1.0);
        mods.set_if_absent(Modifier::WallBlock(second));
        assert_eq!(mods.wall_block(), Some(second));
    }

    #[test]
    fn test_adrenaline_defaults_to_one() {
        let mut mods = Modifiers::new();
        assert_eq!(mods.adrenaline_multiplier(), 1.0);
        mods.set(Modifier::AdrenalineBoost(2.0));
        assert_eq!(mods.adrenaline_multiplier(), 2.0);
        // A zero or negative multiplier would divide costs into nonsense.
        mods.set(Modifier::AdrenalineBoost(0.0));
        assert_eq!(mods.adrenaline_multiplier(), 1.0);
    }

    #[test]
    fn test_fall_damage_self_expires() {
        let mut mods = Modifiers::new();
        mods.set(Modifier::FallDamage(0.05));
        mods.decay_fall_damage(0.02);
        assert!(mods.has(ModifierKey::FallDamage));
        mods.decay_fall_damage(0.04);
        assert!(!mods.has(ModifierKey::FallDamage));
    }
}
