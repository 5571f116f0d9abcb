//! Movement primitive and clearance probe.
//!
//! [`PhysicsWorld`] is the seam the simulation moves through; [`BlockWorld`]
//! is the concrete implementation used by the demo level and the tests: a
//! flat ground plane plus axis-aligned static blocks and pushable dynamic
//! blocks. Deliberately lightweight, in the same spirit as a height-sampled
//! terrain collider; a full rigid-body backend could replace it behind the
//! same trait.

use bevy::prelude::*;

use crate::config::PlayerConfig;
use crate::contact::{BodyId, BodyRef, Contact, SurfaceTag};

/// Mover capsule, approximated as a box of half extents
/// `(radius, half_height, radius)` for collision purposes.
#[derive(Clone, Copy, Debug)]
pub struct Capsule {
    pub half_height: f32,
    pub radius: f32,
}

impl Capsule {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::with_height_factor(config, 1.0)
    }

    /// Capsule shortened by the stance height factor; the radius never
    /// changes.
    pub fn with_height_factor(config: &PlayerConfig, factor: f32) -> Self {
        Self {
            half_height: config.capsule_height * 0.5 * factor * config.model_scale,
            radius: config.capsule_radius * config.model_scale,
        }
    }

    fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.half_height, self.radius)
    }
}

/// Outcome of one move: where the mover ended up, whether it is supported,
/// and every blocking contact hit along the way.
#[derive(Clone, Debug)]
pub struct MoveResult {
    pub position: Vec3,
    pub grounded: bool,
    pub contacts: Vec<Contact>,
}

/// The movement primitive and clearance probe the simulation is wired to.
pub trait PhysicsWorld {
    /// Move the capsule centered at `from` by `displacement`, sliding along
    /// blockers. Contacts are collected and returned, never dispatched
    /// mid-move.
    fn move_by(&mut self, from: Vec3, displacement: Vec3, capsule: Capsule) -> MoveResult;

    /// Directional sweep. Returns `true` when obstructed.
    fn probe(&self, origin: Vec3, radius: f32, direction: Vec3, distance: f32) -> bool;

    /// Apply a push velocity directly to a dynamic body.
    fn push_body(&mut self, body: BodyId, velocity: Vec3);
}

#[derive(Clone, Debug)]
struct StaticBlock {
    min: Vec3,
    max: Vec3,
    tag: SurfaceTag,
}

#[derive(Clone, Debug)]
struct DynamicBlock {
    id: BodyId,
    center: Vec3,
    half: Vec3,
    mass: f32,
    velocity: Vec3,
}

/// Flat ground at y = 0 plus axis-aligned blocks.
#[derive(Resource, Default)]
pub struct BlockWorld {
    statics: Vec<StaticBlock>,
    dynamics: Vec<DynamicBlock>,
    climb_volumes: Vec<(Vec3, Vec3)>,
    next_body: u32,
}

const CONTACT_EPS: f32 = 1e-4;

fn overlaps(a_min: Vec3, a_max: Vec3, b_min: Vec3, b_max: Vec3) -> bool {
    a_min.x < b_max.x - CONTACT_EPS
        && a_max.x > b_min.x + CONTACT_EPS
        && a_min.y < b_max.y - CONTACT_EPS
        && a_max.y > b_min.y + CONTACT_EPS
        && a_min.z < b_max.z - CONTACT_EPS
        && a_max.z > b_min.z + CONTACT_EPS
}

impl BlockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_block(&mut self, min: Vec3, max: Vec3, tag: SurfaceTag) {
        self.statics.push(StaticBlock { min, max, tag });
    }

    /// Add a pushable dynamic block; returns its stable id.
    pub fn add_dynamic(&mut self, center: Vec3, half: Vec3, mass: f32) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.dynamics.push(DynamicBlock {
            id,
            center,
            half,
            mass,
            velocity: Vec3::ZERO,
        });
        id
    }

    /// Region in which an external trigger puts the player into climb mode.
    pub fn add_climb_volume(&mut self, min: Vec3, max: Vec3) {
        self.climb_volumes.push((min, max));
    }

    pub fn in_climb_volume(&self, point: Vec3) -> bool {
        self.climb_volumes.iter().any(|(min, max)| {
            point.x >= min.x
                && point.x <= max.x
                && point.y >= min.y
                && point.y <= max.y
                && point.z >= min.z
                && point.z <= max.z
        })
    }

    pub fn body_position(&self, body: BodyId) -> Option<Vec3> {
        self.dynamics.iter().find(|d| d.id == body).map(|d| d.center)
    }

    /// Integrate dynamic blocks: carried velocity with exponential damping,
    /// clamped to the ground plane. Run once per fixed tick.
    pub fn settle(&mut self, dt: f32) {
        for block in &mut self.dynamics {
            block.center += block.velocity * dt;
            block.center.y = block.center.y.max(block.half.y);
            block.velocity *= (-5.0 * dt).exp();
            if block.velocity.length_squared() < 1e-4 {
                block.velocity = Vec3::ZERO;
            }
        }
    }

    /// All blocks as (min, max, tag, body) tuples for collision sweeps.
    fn blocks(&self) -> impl Iterator<Item = (Vec3, Vec3, SurfaceTag, Option<BodyRef>)> + '_ {
        let statics = self
            .statics
            .iter()
            .map(|b| (b.min, b.max, b.tag, None));
        let dynamics = self.dynamics.iter().map(|d| {
            (
                d.center - d.half,
                d.center + d.half,
                SurfaceTag::Object,
                Some(BodyRef { id: d.id, mass: d.mass }),
            )
        });
        statics.chain(dynamics)
    }

    /// Whether the capsule at `pos` rests on the ground plane or a block top.
    fn supported(&self, pos: Vec3, capsule: Capsule) -> bool {
        let he = capsule.half_extents();
        let bottom = pos.y - he.y;
        if bottom <= 0.05 {
            return true;
        }
        self.blocks().any(|(min, max, _, _)| {
            pos.x + he.x > min.x
                && pos.x - he.x < max.x
                && pos.z + he.z > min.z
                && pos.z - he.z < max.z
                && (bottom - max.y).abs() <= 0.05
        })
    }

    fn move_axis(
        &self,
        pos: &mut Vec3,
        delta: f32,
        axis: usize,
        capsule: Capsule,
        move_dir: Vec3,
        contacts: &mut Vec<Contact>,
    ) {
        if delta == 0.0 {
            return;
        }
        let he = capsule.half_extents();
        let start = *pos;
        let mut target = *pos;
        target[axis] += delta;

        for (min, max, tag, body) in self.blocks() {
            // Volume swept along the moved axis, capsule-sized on the others.
            let mut sweep_min = target - he;
            let mut sweep_max = target + he;
            sweep_min[axis] = (start[axis]).min(target[axis]) - he[axis];
            sweep_max[axis] = (start[axis]).max(target[axis]) + he[axis];
            if !overlaps(sweep_min, sweep_max, min, max) {
                continue;
            }
            // Clamp flush against the face we ran into and record the hit.
            let (face, normal_sign) = if delta > 0.0 {
                (min[axis] - he[axis], -1.0)
            } else {
                (max[axis] + he[axis], 1.0)
            };
            // Skip boxes behind the start; only clamp a restricting face.
            let ahead = if delta > 0.0 {
                face >= start[axis] - CONTACT_EPS && face < target[axis]
            } else {
                face <= start[axis] + CONTACT_EPS && face > target[axis]
            };
            if ahead {
                target[axis] = face;
                let mut normal = Vec3::ZERO;
                normal[axis] = normal_sign;
                let mut point = target;
                point[axis] = if delta > 0.0 { min[axis] } else { max[axis] };
                contacts.push(Contact {
                    point,
                    normal,
                    move_dir,
                    body,
                    tag,
                });
            }
        }
        *pos = target;
    }
}

impl PhysicsWorld for BlockWorld {
    fn move_by(&mut self, from: Vec3, displacement: Vec3, capsule: Capsule) -> MoveResult {
        let he = capsule.half_extents();
        let mut pos = from;
        let mut contacts = Vec::new();

        // Horizontal sweep, axis by axis, sliding along blockers.
        let planar = Vec3::new(displacement.x, 0.0, displacement.z);
        if planar != Vec3::ZERO {
            let move_dir = planar.normalize();
            self.move_axis(&mut pos, displacement.x, 0, capsule, move_dir, &mut contacts);
            self.move_axis(&mut pos, displacement.z, 2, capsule, move_dir, &mut contacts);
        }

        // Vertical sweep against block tops/bottoms and the ground plane.
        let dy = displacement.y;
        let mut grounded = false;
        if dy < 0.0 {
            let mut floor_top = 0.0_f32;
            let mut floor_hit: Option<(SurfaceTag, Option<BodyRef>)> = None;
            for (min, max, tag, body) in self.blocks() {
                let xz_overlap = pos.x + he.x > min.x + CONTACT_EPS
                    && pos.x - he.x < max.x - CONTACT_EPS
                    && pos.z + he.z > min.z + CONTACT_EPS
                    && pos.z - he.z < max.z - CONTACT_EPS;
                if !xz_overlap {
                    continue;
                }
                let bottom_before = pos.y - he.y;
                let bottom_after = bottom_before + dy;
                if max.y <= bottom_before + CONTACT_EPS && max.y > bottom_after && max.y > floor_top {
                    floor_top = max.y;
                    floor_hit = Some((tag, body));
                }
            }
            let bottom_after = pos.y - he.y + dy;
            if bottom_after <= floor_top {
                pos.y = floor_top + he.y;
                grounded = true;
                if let Some((tag, body)) = floor_hit {
                    contacts.push(Contact {
                        point: Vec3::new(pos.x, floor_top, pos.z),
                        normal: Vec3::Y,
                        move_dir: Vec3::NEG_Y,
                        body,
                        tag,
                    });
                }
            } else {
                pos.y += dy;
            }
        } else if dy > 0.0 {
            let mut ceiling = f32::INFINITY;
            let mut ceiling_hit: Option<(SurfaceTag, Option<BodyRef>)> = None;
            for (min, max, tag, body) in self.blocks() {
                let xz_overlap = pos.x + he.x > min.x + CONTACT_EPS
                    && pos.x - he.x < max.x - CONTACT_EPS
                    && pos.z + he.z > min.z + CONTACT_EPS
                    && pos.z - he.z < max.z - CONTACT_EPS;
                if !xz_overlap {
                    continue;
                }
                let top_before = pos.y + he.y;
                let top_after = top_before + dy;
                if min.y >= top_before - CONTACT_EPS && min.y < top_after && min.y < ceiling {
                    ceiling = min.y;
                    ceiling_hit = Some((tag, body));
                }
            }
            if ceiling.is_finite() {
                pos.y = ceiling - he.y;
                if let Some((tag, body)) = ceiling_hit {
                    contacts.push(Contact {
                        point: Vec3::new(pos.x, ceiling, pos.z),
                        normal: Vec3::NEG_Y,
                        move_dir: Vec3::Y,
                        body,
                        tag,
                    });
                }
            } else {
                pos.y += dy;
            }
        } else {
            grounded = self.supported(pos, capsule);
        }

        MoveResult {
            position: pos,
            grounded,
            contacts,
        }
    }

    fn probe(&self, origin: Vec3, radius: f32, direction: Vec3, distance: f32) -> bool {
        let end = origin + direction.normalize_or_zero() * distance;
        let inflate = Vec3::splat(radius);
        let sweep_min = origin.min(end) - inflate;
        let sweep_max = origin.max(end) + inflate;
        self.blocks()
            .any(|(min, max, _, _)| overlaps(sweep_min, sweep_max, min, max))
    }

    fn push_body(&mut self, body: BodyId, velocity: Vec3) {
        if let Some(block) = self.dynamics.iter_mut().find(|d| d.id == body) {
            block.velocity = velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule() -> Capsule {
        Capsule::from_config(&PlayerConfig::default())
    }

    fn standing_pos() -> Vec3 {
        Vec3::new(0.0, 0.9, 0.0)
    }

    #[test]
    fn test_free_horizontal_move() {
        let mut world = BlockWorld::new();
        let result = world.move_by(standing_pos(), Vec3::new(1.0, 0.0, 0.0), capsule());
        assert_eq!(result.position, Vec3::new(1.0, 0.9, 0.0));
        assert!(result.contacts.is_empty());
    }

    #[test]
    fn test_wall_stops_move_and_reports_contact() {
        let mut world = BlockWorld::new();
        world.add_block(
            Vec3::new(2.0, 0.0, -5.0),
            Vec3::new(3.0, 3.0, 5.0),
            SurfaceTag::Other,
        );
        let result = world.move_by(standing_pos(), Vec3::new(5.0, 0.0, 0.0), capsule());
        // Flush against the wall: 2.0 minus capsule radius.
        assert!((result.position.x - (2.0 - 0.3)).abs() < 1e-4);
        assert_eq!(result.contacts.len(), 1);
        let contact = &result.contacts[0];
        assert_eq!(contact.normal, Vec3::NEG_X);
        assert_eq!(contact.move_dir, Vec3::X);
        assert_eq!(contact.move_dir.y, 0.0);
    }

    #[test]
    fn test_slide_along_wall() {
        let mut world = BlockWorld::new();
        world.add_block(
            Vec3::new(2.0, 0.0, -5.0),
            Vec3::new(3.0, 3.0, 5.0),
            SurfaceTag::Other,
        );
        // Diagonal into the wall: x clamps, z passes.
        let result = world.move_by(standing_pos(), Vec3::new(5.0, 0.0, 2.0), capsule());
        assert!((result.position.x - 1.7).abs() < 1e-4);
        assert!((result.position.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_falling_lands_on_ground_plane() {
        let mut world = BlockWorld::new();
        let result = world.move_by(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -10.0, 0.0), capsule());
        assert!(result.grounded);
        assert!((result.position.y - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_landing_on_dynamic_box_reports_body_contact() {
        let mut world = BlockWorld::new();
        let id = world.add_dynamic(Vec3::new(0.0, 0.25, 0.0), Vec3::splat(0.25), 10.0);
        let result = world.move_by(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -5.0, 0.0), capsule());
        assert!(result.grounded);
        assert!((result.position.y - (0.5 + 0.9)).abs() < 1e-4);
        let contact = result
            .contacts
            .iter()
            .find(|c| c.body.map(|b| b.id) == Some(id))
            .expect("contact with the box under the player");
        assert_eq!(contact.normal, Vec3::Y);
        assert!(contact.move_dir.y < 0.0);
    }

    #[test]
    fn test_ceiling_clamps_upward_move() {
        let mut world = BlockWorld::new();
        world.add_block(
            Vec3::new(-5.0, 2.2, -5.0),
            Vec3::new(5.0, 2.5, 5.0),
            SurfaceTag::Other,
        );
        let result = world.move_by(standing_pos(), Vec3::new(0.0, 3.0, 0.0), capsule());
        assert!((result.position.y - (2.2 - 0.9)).abs() < 1e-4);
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_probe_detects_overhead_obstruction() {
        let mut world = BlockWorld::new();
        assert!(!world.probe(Vec3::ZERO, 0.25, Vec3::Y, 2.0));
        world.add_block(
            Vec3::new(-1.0, 1.5, -1.0),
            Vec3::new(1.0, 1.8, 1.0),
            SurfaceTag::Other,
        );
        assert!(world.probe(Vec3::ZERO, 0.25, Vec3::Y, 2.0));
        // Short probe stops under the obstruction.
        assert!(!world.probe(Vec3::ZERO, 0.25, Vec3::Y, 1.0));
    }

    #[test]
    fn test_push_and_settle_moves_dynamic_block() {
        let mut world = BlockWorld::new();
        let id = world.add_dynamic(Vec3::new(1.0, 0.25, 0.0), Vec3::splat(0.25), 5.0);
        world.push_body(id, Vec3::new(1.0, 0.0, 0.0));
        for _ in 0..30 {
            world.settle(1.0 / 60.0);
        }
        let pos = world.body_position(id).unwrap();
        assert!(pos.x > 1.05);
        // Damping brings it to rest.
        for _ in 0..600 {
            world.settle(1.0 / 60.0);
        }
        let rest = world.body_position(id).unwrap();
        for _ in 0..10 {
            world.settle(1.0 / 60.0);
        }
        assert!((world.body_position(id).unwrap() - rest).length() < 1e-3);
    }

    #[test]
    fn test_climb_volume_lookup() {
        let mut world = BlockWorld::new();
        world.add_climb_volume(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 1.0));
        assert!(world.in_climb_volume(Vec3::new(0.5, 1.0, 0.5)));
        assert!(!world.in_climb_volume(Vec3::new(2.0, 1.0, 0.5)));
    }
}
