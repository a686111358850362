//! Volley weapon: fans of piercing arrows aimed at the nearest enemy.
//!
//! Arrows fly straight, pass through everything, and damage each enemy at
//! most once.  Critical hits are rolled per arrow at fire time, so one fan
//! can mix crits and normal hits.

use bevy::prelude::*;
use rand::Rng;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::math;
use crate::player::Player;
use crate::session::{Lifetime, RunClock, Velocity};
use crate::weapons::{tables, Arsenal, WeaponKind};

/// A piercing player arrow.
#[derive(Component, Debug)]
pub struct Arrow {
    pub damage: f32,
    /// Enemies this arrow has already damaged.
    pub hit: Vec<Entity>,
}

/// Fire a fan of arrows each interval, aimed at the nearest living enemy.
///
/// With no target on the field the fan still fires along +X, keeping the
/// cadence (and its sound cue) steady.
pub fn volley_fire_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    mut arsenal: ResMut<Arsenal>,
    player: Query<&Transform, With<Player>>,
    enemies: Query<(&Enemy, &Transform), Without<Player>>,
) {
    let Some(level) = arsenal.level(WeaponKind::Volley) else {
        return;
    };
    let row = tables::VOLLEY[level as usize];
    let Ok(player_transform) = player.single() else {
        return;
    };
    let origin = player_transform.translation.truncate();

    let slot = arsenal
        .slot_mut(WeaponKind::Volley)
        .expect("level() above proved the slot exists");
    slot.fire_timer -= clock.dt;
    if slot.fire_timer > 0.0 {
        return;
    }
    slot.fire_timer = row.interval;

    let base = enemies
        .iter()
        .filter(|(enemy, _)| enemy.alive)
        .map(|(_, transform)| transform.translation.truncate())
        .min_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        })
        .map(|target| math::direction_to(origin, target))
        .unwrap_or(Vec2::X);

    let mut rng = rand::thread_rng();
    let half = (row.arrows as f32 - 1.0) / 2.0;
    for i in 0..row.arrows {
        let offset = (i as f32 - half) * VOLLEY_GAP_RADIANS;
        let dir = Vec2::from_angle(offset).rotate(base);
        let crit = rng.gen::<f32>() < row.crit_chance;
        let damage = if crit {
            row.damage * row.crit_mult
        } else {
            row.damage
        };
        commands.spawn((
            Arrow {
                damage,
                hit: Vec::new(),
            },
            Velocity(dir * VOLLEY_ARROW_SPEED),
            Lifetime(VOLLEY_ARROW_LIFE_SECS),
            Transform::from_xyz(origin.x, origin.y, 0.8),
            Visibility::default(),
        ));
    }
}

/// Resolve arrow-enemy overlaps; arrows pierce and keep flying.
pub fn volley_hit_system(
    mut arrows: Query<(&mut Arrow, &Transform)>,
    mut enemies: Query<(Entity, &mut Enemy, &Transform), Without<Arrow>>,
) {
    for (mut arrow, arrow_transform) in arrows.iter_mut() {
        let pos = arrow_transform.translation.truncate();
        for (entity, mut enemy, enemy_transform) in enemies.iter_mut() {
            if !enemy.alive || arrow.hit.contains(&entity) {
                continue;
            }
            let enemy_pos = enemy_transform.translation.truncate();
            if math::circles_overlap(pos, VOLLEY_ARROW_RADIUS, enemy_pos, enemy.radius) {
                enemy.take_damage(arrow.damage);
                arrow.hit.push(entity);
            }
        }
    }
}
