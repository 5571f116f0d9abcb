//! Demo level: collision world plus matching visuals.
//!
//! The collision side lives in [`sim::BlockWorld`]; every block spawned
//! there gets a cuboid mesh at the same place so what you see is what the
//! capsule collides with.

use bevy::prelude::*;
use sim::{BlockWorld, SurfaceTag};

use crate::player::CrateVisual;

const WALL_COLOR: Color = Color::srgb(0.55, 0.52, 0.48);
const DOOR_COLOR: Color = Color::srgb(0.45, 0.3, 0.18);
const CRATE_COLOR: Color = Color::srgb(0.7, 0.55, 0.3);
const GROUND_COLOR: Color = Color::srgb(0.35, 0.4, 0.32);
const LADDER_COLOR: Color = Color::srgb(0.6, 0.6, 0.65);

struct BlockSpawn {
    min: Vec3,
    max: Vec3,
    tag: SurfaceTag,
    color: Color,
}

fn static_blocks() -> Vec<BlockSpawn> {
    vec![
        // Perimeter walls of the yard.
        BlockSpawn {
            min: Vec3::new(-10.0, 0.0, -10.5),
            max: Vec3::new(10.0, 3.0, -10.0),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        BlockSpawn {
            min: Vec3::new(-10.5, 0.0, -10.5),
            max: Vec3::new(-10.0, 3.0, 10.5),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        BlockSpawn {
            min: Vec3::new(10.0, 0.0, -10.5),
            max: Vec3::new(10.5, 3.0, 10.5),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        // A closed door slab in the south wall.
        BlockSpawn {
            min: Vec3::new(-1.0, 0.0, 10.0),
            max: Vec3::new(1.0, 2.2, 10.4),
            tag: SurfaceTag::Door,
            color: DOOR_COLOR,
        },
        BlockSpawn {
            min: Vec3::new(-10.5, 0.0, 10.0),
            max: Vec3::new(-1.0, 3.0, 10.5),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        BlockSpawn {
            min: Vec3::new(1.0, 0.0, 10.0),
            max: Vec3::new(10.5, 3.0, 10.5),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        // Crawl space: a slab low enough that only a crouched player fits,
        // and standing up underneath it is rejected by the overhead probe.
        BlockSpawn {
            min: Vec3::new(3.0, 1.2, -6.0),
            max: Vec3::new(8.0, 1.5, -2.0),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
        // A raised platform reachable from the ladder.
        BlockSpawn {
            min: Vec3::new(-8.0, 0.0, -8.0),
            max: Vec3::new(-4.0, 2.5, -5.0),
            tag: SurfaceTag::Other,
            color: WALL_COLOR,
        },
    ]
}

/// Build collision world and spawn matching visuals.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut world = BlockWorld::new();

    // Ground plane (visual only; the collision ground lives at y = 0).
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(40.0, 0.1, 40.0))),
        MeshMaterial3d(materials.add(GROUND_COLOR)),
        Transform::from_xyz(0.0, -0.05, 0.0),
    ));

    for block in static_blocks() {
        world.add_block(block.min, block.max, block.tag);
        let size = block.max - block.min;
        let center = (block.min + block.max) * 0.5;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(block.color)),
            Transform::from_translation(center),
        ));
    }

    // Ladder volume against the raised platform's east face.
    let ladder_min = Vec3::new(-4.0, 0.0, -7.5);
    let ladder_max = Vec3::new(-3.4, 3.0, -5.5);
    world.add_climb_volume(ladder_min, ladder_max);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.1, 2.5, 1.6))),
        MeshMaterial3d(materials.add(LADDER_COLOR)),
        Transform::from_xyz(-3.95, 1.25, -6.5),
    ));

    // Pushable crates of assorted masses.
    for (pos, half, mass) in [
        (Vec3::new(2.0, 0.3, 2.0), 0.3, 8.0),
        (Vec3::new(-2.0, 0.25, 3.0), 0.25, 3.0),
        (Vec3::new(0.0, 0.4, -4.0), 0.4, 25.0),
    ] {
        let id = world.add_dynamic(pos, Vec3::splat(half), mass);
        commands.spawn((
            CrateVisual(id),
            Mesh3d(meshes.add(Cuboid::new(half * 2.0, half * 2.0, half * 2.0))),
            MeshMaterial3d(materials.add(CRATE_COLOR)),
            Transform::from_translation(pos),
        ));
    }

    commands.insert_resource(world);

    // Key light plus ambient so the yard reads.
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });

    info!("Level ready: {} static blocks, 3 crates, 1 ladder", static_blocks().len());
}
