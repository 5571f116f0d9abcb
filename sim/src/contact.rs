//! Classification of raw movement contacts into semantic collision events.
//!
//! The movement primitive reports every blocking contact of a move. This
//! module turns each report into at most one of three things: a push applied
//! to a light dynamic body, a wall block that freezes horizontal movement, or
//! a notification that an object ended up under the player's feet.
//!
//! Contacts are collected during the move and classified after it returns,
//! so nothing here mutates state mid-move. A wall block detected from this
//! tick's contacts gates locomotion starting next tick.

use bevy::prelude::*;

use crate::config::PlayerConfig;

/// Stable identifier of a dynamic body owned by the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Reference to the non-kinematic dynamic body attached to a contacted
/// surface, when there is one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyRef {
    pub id: BodyId,
    pub mass: f32,
}

/// Semantic tag of a contacted surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTag {
    /// A carryable/pushable world object.
    Object,
    Door,
    Other,
}

/// One raw contact reported by the movement primitive.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Contact point in world space.
    pub point: Vec3,
    /// Outward surface normal at the contact.
    pub normal: Vec3,
    /// The mover's displacement direction at the moment of contact.
    pub move_dir: Vec3,
    /// Dynamic body attached to the surface, if any.
    pub body: Option<BodyRef>,
    pub tag: SurfaceTag,
}

/// What a contact means for the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactKind {
    /// Shove a light dynamic body out of the way.
    Push { body: BodyId, velocity: Vec3 },
    /// The player ran head-on into something solid.
    WallBlock { direction: Vec3 },
    /// A dynamic object is under the player's feet.
    ObjectUnder { body: BodyId },
}

fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Classify a single contact. Returns `None` for contacts with no semantic
/// consequence (grazing hits, walkable ground, heavy static geometry hit at
/// a shallow angle).
pub fn classify(contact: &Contact, player_center: Vec3, config: &PlayerConfig) -> Option<ContactKind> {
    if contact.move_dir.y == 0.0 {
        // Horizontal contact: push or wall block.
        if let Some(body) = contact.body {
            if body.mass <= config.pushable_mass_limit {
                let strength = (1.0 / body.mass).clamp(0.5, 1.5);
                return Some(ContactKind::Push {
                    body: body.id,
                    velocity: planar(contact.move_dir) * strength,
                });
            }
        }
        if contact.tag != SurfaceTag::Object
            && contact.move_dir.dot(contact.normal) < -config.wall_hit_tolerance
        {
            return Some(ContactKind::WallBlock {
                direction: contact.move_dir,
            });
        }
        None
    } else {
        // Contact with a vertical component: check whether the touched object
        // sits below the player's body.
        let local = contact.point - player_center;
        let half_height = config.capsule_height * 0.5;
        if local.y < half_height - 0.3 {
            if let Some(body) = contact.body {
                return Some(ContactKind::ObjectUnder { body: body.id });
            }
        }
        None
    }
}
