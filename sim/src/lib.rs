//! Deterministic first-person player simulation.
//!
//! One fixed-step [`tick::step`] call per frame resolves stance, locomotion
//! mode, vertical kinematics, the stamina economy and collision semantics,
//! against any backend implementing [`world::PhysicsWorld`]. The frontend
//! (see the `game` crate) samples input, forwards the emitted cues and
//! animation parameters, and renders the result.

pub mod config;
pub mod contact;
pub mod input;
pub mod locomotion;
pub mod modifier;
pub mod player;
pub mod stamina;
pub mod stance;
pub mod tick;
pub mod vertical;
pub mod world;

pub use config::PlayerConfig;
pub use contact::{BodyId, BodyRef, Contact, ContactKind, SurfaceTag};
pub use input::InputSample;
pub use modifier::{InteractionKind, Modifier, ModifierKey, Modifiers};
pub use player::{MoveMode, PlayerState};
pub use stance::Stance;
pub use tick::{step, AnimParams, Cue, TickEvents};
pub use world::{BlockWorld, Capsule, MoveResult, PhysicsWorld};

/// Fixed simulation rate, ticks per second.
pub const TICK_HZ: f64 = 60.0;
