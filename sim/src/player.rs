//! Player state and the capability predicates other systems query.

use bevy::prelude::*;

use crate::config::PlayerConfig;
use crate::modifier::{InteractionKind, ModifierKey, Modifiers};
use crate::stamina::Stamina;
use crate::stance::StanceMachine;

/// Horizontal movement mode, exactly one per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    Idle,
    Walking,
    Running,
    Climbing,
}

/// Everything the per-tick simulation owns about the player.
///
/// Mutated exclusively by [`crate::tick::step`]; everyone else reads.
#[derive(Component, Clone, Debug)]
pub struct PlayerState {
    /// Capsule center in world space.
    pub position: Vec3,
    pub horizontal_velocity: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
    /// Set at the jump impulse, cleared on landing.
    pub jumping: bool,
    /// Driven by an external climbable trigger volume, not by locomotion.
    pub climbing: bool,
    pub mode: MoveMode,
    pub stance: StanceMachine,
    pub stamina: Stamina,
    pub modifiers: Modifiers,
}

impl PlayerState {
    pub fn new(position: Vec3, config: &PlayerConfig) -> Self {
        Self {
            position,
            horizontal_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: false,
            jumping: false,
            climbing: false,
            mode: MoveMode::Idle,
            stance: StanceMachine::default(),
            stamina: Stamina::full(config),
            modifiers: Modifiers::new(),
        }
    }

    pub fn is_walking(&self) -> bool {
        self.mode == MoveMode::Walking
    }

    pub fn is_running(&self) -> bool {
        self.mode == MoveMode::Running
    }

    // --- capability predicates (pure, no side effects) ---

    pub fn can_move(&self) -> bool {
        !self.climbing && !self.modifiers.has(ModifierKey::DisableMovement)
    }

    pub fn can_walk(&self) -> bool {
        self.can_move() && !self.modifiers.has(ModifierKey::WallBlock)
    }

    pub fn can_run(&self) -> bool {
        self.can_move()
            && !self.stance.is_lowered()
            && !self.modifiers.has(ModifierKey::DisableRun)
            && !self.modifiers.has(ModifierKey::OutOfStamina)
            && !self.modifiers.has(ModifierKey::FallDamage)
            && !self.modifiers.has(ModifierKey::WallBlock)
    }

    pub fn can_climb(&self) -> bool {
        !self.modifiers.has(ModifierKey::DisableMovement)
    }

    pub fn can_jump(&self) -> bool {
        self.grounded
            && !self.jumping
            && !self.stance.is_lowered()
            && !self.modifiers.has(ModifierKey::DisableJump)
            && !self.modifiers.has(ModifierKey::OutOfStamina)
    }

    pub fn can_crouch(&self) -> bool {
        (self.grounded || self.climbing) && !self.jumping && self.can_move()
    }

    pub fn can_interact(&self) -> bool {
        !self.modifiers.has(ModifierKey::DisableInteraction)
    }

    /// Whether an interaction tool of `kind` may act this tick. The current
    /// lock holder keeps passing this check, so it can keep acting.
    pub fn can_interact_with(&self, kind: InteractionKind) -> bool {
        if self.modifiers.has(ModifierKey::DisableInteraction) {
            return false;
        }
        match self.modifiers.interaction_lock() {
            None => true,
            Some(lock) => lock == kind,
        }
    }

    /// Whether an interaction tool of `kind` must release its hold.
    pub fn can_end_interaction_with(&self, kind: InteractionKind) -> bool {
        self.modifiers.has(ModifierKey::DisableInteraction)
            || self.modifiers.interaction_lock() == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;

    fn grounded_player() -> PlayerState {
        let mut state = PlayerState::new(Vec3::new(0.0, 0.9, 0.0), &PlayerConfig::default());
        state.grounded = true;
        state
    }

    #[test]
    fn test_disable_movement_gates_everything_horizontal() {
        let mut state = grounded_player();
        assert!(state.can_move() && state.can_walk() && state.can_run());
        state.modifiers.set(Modifier::DisableMovement);
        assert!(!state.can_move());
        assert!(!state.can_walk());
        assert!(!state.can_run());
        // Crouching rides on can_move too.
        assert!(!state.can_crouch());
    }

    #[test]
    fn test_wall_block_stops_walk_and_run_but_not_move() {
        let mut state = grounded_player();
        state.modifiers.set(Modifier::WallBlock(Vec3::X));
        assert!(state.can_move());
        assert!(!state.can_walk());
        assert!(!state.can_run());
    }

    #[test]
    fn test_run_gates() {
        let mut state = grounded_player();
        assert!(state.can_run());
        state.modifiers.set(Modifier::FallDamage(5.0));
        assert!(!state.can_run());
        state.modifiers.remove(ModifierKey::FallDamage);
        state.modifiers.set(Modifier::OutOfStamina);
        assert!(!state.can_run());
    }

    #[test]
    fn test_jump_requires_ground_and_standing() {
        let mut state = grounded_player();
        assert!(state.can_jump());
        state.grounded = false;
        assert!(!state.can_jump());
        state.grounded = true;
        state.jumping = true;
        assert!(!state.can_jump());
        state.jumping = false;
        state.stance.try_toggle(true, || true);
        assert!(!state.can_jump());
    }

    #[test]
    fn test_climbing_suspends_can_move() {
        let mut state = grounded_player();
        state.climbing = true;
        assert!(!state.can_move());
        assert!(state.can_climb());
        // Crouch needs can_move, so climbing blocks it too.
        assert!(!state.can_crouch());
    }

    #[test]
    fn test_interaction_lock_serializes_tools() {
        let mut state = grounded_player();
        assert!(state.can_interact_with(InteractionKind::Door));
        assert!(state.can_interact_with(InteractionKind::Item));

        state.modifiers.set(Modifier::Interacting(InteractionKind::Door));
        assert!(state.can_interact_with(InteractionKind::Door));
        assert!(!state.can_interact_with(InteractionKind::Item));
        assert!(state.can_end_interaction_with(InteractionKind::Door));
        assert!(!state.can_end_interaction_with(InteractionKind::Item));

        state.modifiers.set(Modifier::DisableInteraction);
        assert!(!state.can_interact_with(InteractionKind::Door));
        // Everyone holding a lock is told to let go.
        assert!(state.can_end_interaction_with(InteractionKind::Item));
    }
}
