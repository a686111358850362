//! Mesh2d-based filled shapes for every gameplay entity.
//!
//! Each `attach_*` system queries `Added<T>` and inserts a retained
//! `Mesh2d` + `ColorMaterial` pair, so geometry is uploaded once at spawn
//! time and batched by Bevy from then on.  Gameplay code never touches
//! meshes; it spawns bare entities with a `Transform` and the matching
//! system here dresses them on the next frame.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

use crate::constants::*;
use crate::enemy::{BossArrow, BossBlade, BossOrb, Enemy, EnemyKind};
use crate::pickups::ExpOrb;
use crate::player::Player;
use crate::weapons::{Arrow, HomingMissile, OrbitBlade};

/// Build a filled convex polygon as a triangle fan.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Build a filled circle approximated by a regular polygon.
pub fn filled_circle_mesh(radius: f32, segments: u32) -> Mesh {
    let vertices: Vec<Vec2> = (0..segments)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / segments as f32;
            Vec2::from_angle(angle) * radius
        })
        .collect();
    filled_polygon_mesh(&vertices)
}

/// Build a small diamond, used for blades and arrows.
fn diamond_mesh(half_width: f32, half_height: f32) -> Mesh {
    filled_polygon_mesh(&[
        Vec2::new(half_height, 0.0),
        Vec2::new(0.0, half_width),
        Vec2::new(-half_height, 0.0),
        Vec2::new(0.0, -half_width),
    ])
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Runner => Color::srgb(0.78, 0.42, 0.18),
        EnemyKind::Stalker => Color::srgb(0.55, 0.20, 0.62),
        EnemyKind::Bruiser => Color::srgb(0.70, 0.14, 0.14),
        EnemyKind::Exploder => Color::srgb(0.92, 0.72, 0.18),
        EnemyKind::Boss => Color::srgb(0.85, 0.08, 0.30),
    }
}

pub fn attach_player_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_circle_mesh(PLAYER_RADIUS, 24))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.30, 0.85, 0.95)))),
        ));
    }
}

pub fn attach_enemy_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Enemy), Added<Enemy>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, enemy) in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_circle_mesh(enemy.radius, 20))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(enemy_color(enemy.kind)))),
        ));
    }
}

pub fn attach_orb_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &ExpOrb), Added<ExpOrb>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, orb) in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_circle_mesh(orb.radius, 10))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.35, 0.95, 0.45)))),
        ));
    }
}

pub fn attach_orbit_blade_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<OrbitBlade>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(diamond_mesh(6.0, 14.0))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.80, 0.88, 1.0)))),
        ));
    }
}

pub fn attach_arrow_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<Arrow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(diamond_mesh(3.0, VOLLEY_ARROW_RADIUS))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.95, 0.92, 0.60)))),
        ));
    }
}

pub fn attach_missile_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<HomingMissile>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_circle_mesh(6.0, 12))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.95, 0.55, 0.85)))),
        ));
    }
}

pub fn attach_boss_blade_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<BossBlade>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(diamond_mesh(10.0, 26.0))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.35, 0.35)))),
        ));
    }
}

pub fn attach_boss_arrow_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<BossArrow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(diamond_mesh(3.0, BOSS_ARROW_RADIUS * 2.0))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.45, 0.20)))),
        ));
    }
}

pub fn attach_boss_orb_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<BossOrb>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_circle_mesh(BOSS_ORB_RADIUS, 12))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.65, 0.20, 0.95)))),
        ));
    }
}

/// Registers every `Added<T>` mesh-attach system.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_player_mesh_system,
                attach_enemy_mesh_system,
                attach_orb_mesh_system,
                attach_orbit_blade_mesh_system,
                attach_arrow_mesh_system,
                attach_missile_mesh_system,
                attach_boss_blade_mesh_system,
                attach_boss_arrow_mesh_system,
                attach_boss_orb_mesh_system,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_mesh_has_a_triangle_fan() {
        let mesh = filled_circle_mesh(10.0, 12);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), (12 - 2) * 3);
    }

    #[test]
    fn polygon_mesh_carries_position_per_vertex() {
        let mesh = filled_polygon_mesh(&[
            Vec2::new(0.0, 10.0),
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
        ]);
        assert_eq!(mesh.count_vertices(), 3);
    }
}
