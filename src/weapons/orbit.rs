//! Orbit weapon: blades circling the player at constant angular speed.
//!
//! Blades are real entities so the renderer can attach meshes to them; their
//! positions are recomputed from the shared spin angle every frame.  Damage
//! is continuous contact: a blade tip overlapping an enemy damages it every
//! frame the overlap holds, so a fast spin can hit the same enemy on
//! consecutive frames.

use bevy::prelude::*;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::math;
use crate::player::Player;
use crate::session::RunClock;
use crate::weapons::{tables, Arsenal, WeaponKind};

/// Shared orbit angle in radians; all blades offset from this.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct OrbitSpin(pub f32);

/// One orbiting blade.
#[derive(Component, Debug, Default)]
pub struct OrbitBlade {
    /// Position in the blade ring; blades are spaced evenly.
    pub index: u32,
}

/// Keep the spawned blade count in sync with the orbit weapon's level.
///
/// Blades are append-only while the weapon levels up; losing the weapon is
/// impossible mid-run, so the despawn arm only matters on run reset.
pub fn sync_orbit_blades_system(
    mut commands: Commands,
    arsenal: Res<Arsenal>,
    blades: Query<Entity, With<OrbitBlade>>,
) {
    let wanted = arsenal
        .level(WeaponKind::Orbit)
        .map(|level| tables::ORBIT[level as usize].blades)
        .unwrap_or(0);

    let current = blades.iter().count() as u32;
    if current < wanted {
        for index in current..wanted {
            commands.spawn((
                OrbitBlade { index },
                Transform::from_xyz(0.0, 0.0, 0.8),
                Visibility::default(),
            ));
        }
    } else if current > wanted {
        for entity in blades.iter().take((current - wanted) as usize) {
            commands.entity(entity).despawn();
        }
    }
}

/// Advance the spin, place each blade at its tip position, and damage
/// overlapped enemies.
pub fn orbit_damage_system(
    clock: Res<RunClock>,
    arsenal: Res<Arsenal>,
    mut spin: ResMut<OrbitSpin>,
    player: Query<&Transform, With<Player>>,
    mut blades: Query<(&OrbitBlade, &mut Transform), Without<Player>>,
    mut enemies: Query<(&mut Enemy, &Transform), (Without<Player>, Without<OrbitBlade>)>,
) {
    let Some(level) = arsenal.level(WeaponKind::Orbit) else {
        return;
    };
    let row = tables::ORBIT[level as usize];
    let Ok(player_transform) = player.single() else {
        return;
    };
    let center = player_transform.translation.truncate();

    spin.0 = (spin.0 + ORBIT_ANGULAR_SPEED * clock.dt) % std::f32::consts::TAU;

    let tip_distance = ORBIT_RADIUS + ORBIT_TIP_OFFSET_PER_SCALE * row.scale;
    let hit_radius = ORBIT_HIT_RADIUS_PER_SCALE * row.scale;
    let damage = ORBIT_BASE_DAMAGE * row.scale;
    let spacing = std::f32::consts::TAU / row.blades as f32;

    for (blade, mut transform) in blades.iter_mut() {
        let angle = spin.0 + blade.index as f32 * spacing;
        let tip = center + Vec2::from_angle(angle) * tip_distance;
        transform.translation.x = tip.x;
        transform.translation.y = tip.y;

        for (mut enemy, enemy_transform) in enemies.iter_mut() {
            if !enemy.alive {
                continue;
            }
            let enemy_pos = enemy_transform.translation.truncate();
            if math::circles_overlap(tip, hit_radius, enemy_pos, enemy.radius) {
                enemy.take_damage(damage);
            }
        }
    }
}
