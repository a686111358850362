//! Sweep weapon: a periodic full-circle slash around the player.
//!
//! When the interval elapses the slash starts at bearing −π and advances to
//! +π over [`SWEEP_DURATION_SECS`].  An enemy is hit the moment the sweep
//! front passes its bearing while it sits inside the sweep radius; each enemy
//! is hit at most once per slash.  Hits knock the enemy straight back from
//! the player and heal the player by the lifesteal share of damage dealt.

use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::math;
use crate::player::{Player, PlayerHealth};
use crate::session::RunClock;
use crate::weapons::{tables, Arsenal, WeaponKind};

/// The slash currently in progress, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveSweep {
    /// Sweep front bearing covered so far, while a slash is active.
    pub front: Option<f32>,
    /// Enemies already hit by the current slash.
    pub hit: HashSet<Entity>,
}

/// Fire, advance, and resolve the sweep.
pub fn sweep_system(
    clock: Res<RunClock>,
    mut arsenal: ResMut<Arsenal>,
    mut sweep: ResMut<ActiveSweep>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    mut enemies: Query<(Entity, &mut Enemy, &mut Transform), Without<Player>>,
) {
    let Some(level) = arsenal.level(WeaponKind::Sweep) else {
        return;
    };
    let row = tables::SWEEP[level as usize];
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let center = player_transform.translation.truncate();

    // Cadence: the timer only runs while no slash is active.
    if sweep.front.is_none() {
        let slot = arsenal
            .slot_mut(WeaponKind::Sweep)
            .expect("level() above proved the slot exists");
        slot.fire_timer -= clock.dt;
        if slot.fire_timer > 0.0 {
            return;
        }
        slot.fire_timer = row.interval;
        sweep.front = Some(-PI);
        sweep.hit.clear();
    }

    let Some(front) = sweep.front else {
        return;
    };
    let new_front = front + TAU / SWEEP_DURATION_SECS * clock.dt;

    let damage = SWEEP_BASE_DAMAGE * row.damage_mult;
    for (entity, mut enemy, mut transform) in enemies.iter_mut() {
        if !enemy.alive || sweep.hit.contains(&entity) {
            continue;
        }
        let pos = transform.translation.truncate();
        if !math::circles_overlap(center, row.radius, pos, enemy.radius) {
            continue;
        }
        let bearing = (pos - center).to_angle();
        if bearing <= front || bearing > new_front {
            continue;
        }

        enemy.take_damage(damage);
        sweep.hit.insert(entity);

        let mut knocked = pos;
        enemy.knockback(&mut knocked, center, SWEEP_KNOCKBACK);
        transform.translation.x = knocked.x;
        transform.translation.y = knocked.y;

        health.heal(damage * row.lifesteal);
    }

    sweep.front = if new_front >= PI {
        None
    } else {
        Some(new_front)
    };
}
