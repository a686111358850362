//! Homing weapon: bursts of seeking missiles.
//!
//! Missiles launch in an even radial ring and steer toward the nearest
//! living enemy every frame using the shared constant-speed blend
//! ([`math::steer`]).  They are non-piercing: the first contact consumes the
//! missile.

use bevy::prelude::*;
use rand::Rng;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::math;
use crate::player::Player;
use crate::session::{Lifetime, RunClock, Velocity};
use crate::weapons::{tables, Arsenal, WeaponKind};

/// A player homing missile.
#[derive(Component, Debug)]
pub struct HomingMissile {
    pub damage: f32,
}

/// Release a radial burst each interval.
pub fn homing_fire_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    mut arsenal: ResMut<Arsenal>,
    player: Query<&Transform, With<Player>>,
) {
    let Some(level) = arsenal.level(WeaponKind::Homing) else {
        return;
    };
    let row = tables::HOMING[level as usize];
    let Ok(player_transform) = player.single() else {
        return;
    };
    let origin = player_transform.translation.truncate();

    let slot = arsenal
        .slot_mut(WeaponKind::Homing)
        .expect("level() above proved the slot exists");
    slot.fire_timer -= clock.dt;
    if slot.fire_timer > 0.0 {
        return;
    }
    slot.fire_timer = HOMING_INTERVAL_SECS;

    let damage = HOMING_BASE_DAMAGE * row.damage_mult;
    let start = rand::thread_rng().gen_range(0.0..std::f32::consts::TAU);
    for i in 0..row.burst {
        let angle = start + i as f32 * std::f32::consts::TAU / row.burst as f32;
        commands.spawn((
            HomingMissile { damage },
            Velocity(Vec2::from_angle(angle) * HOMING_SPEED),
            Lifetime(HOMING_LIFE_SECS),
            Transform::from_xyz(origin.x, origin.y, 0.8),
            Visibility::default(),
        ));
    }
}

/// Curve each missile toward its nearest living enemy.
pub fn homing_steer_system(
    enemies: Query<(&Enemy, &Transform), Without<HomingMissile>>,
    mut missiles: Query<(&Transform, &mut Velocity), With<HomingMissile>>,
) {
    for (transform, mut velocity) in missiles.iter_mut() {
        let pos = transform.translation.truncate();
        let Some(target) = enemies
            .iter()
            .filter(|(enemy, _)| enemy.alive)
            .map(|(_, t)| t.translation.truncate())
            .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)))
        else {
            continue;
        };
        velocity.0 = math::steer(
            velocity.0,
            math::direction_to(pos, target),
            HOMING_STRENGTH,
            HOMING_SPEED,
        );
    }
}

/// First contact damages the enemy and consumes the missile.
pub fn homing_hit_system(
    mut commands: Commands,
    missiles: Query<(Entity, &HomingMissile, &Transform)>,
    mut enemies: Query<(&mut Enemy, &Transform), Without<HomingMissile>>,
) {
    for (entity, missile, missile_transform) in missiles.iter() {
        let pos = missile_transform.translation.truncate();
        for (mut enemy, enemy_transform) in enemies.iter_mut() {
            if !enemy.alive {
                continue;
            }
            let enemy_pos = enemy_transform.translation.truncate();
            if math::circles_overlap(pos, HOMING_HIT_RADIUS, enemy_pos, enemy.radius) {
                enemy.take_damage(missile.damage);
                commands.entity(entity).despawn();
                break;
            }
        }
    }
}
