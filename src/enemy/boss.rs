//! The arena boss: three-phase movement and a three-part attack kit.
//!
//! ## Movement
//!
//! The boss cycles chase → aim → dash.  It chases slightly faster than the
//! player can run, stands still for an aim window, then dashes along the
//! direction locked at the end of that window.  Every hit the boss takes
//! refreshes a short movement-speed slow, which is the player's main tool
//! for opening distance.
//!
//! ## Attack kit
//!
//! | Attack | Cadence | Effect |
//! |--------|---------|--------|
//! | Orbiting blade | continuous | Contact damage on a circling blade |
//! | Arrow volley | every 2.5 s | Fan of 5 straight arrows at the player |
//! | Homing orbs | every 4 s | 12 radial orbs that curve in, then detonate |

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::kind::{Enemy, EnemyKind};
use crate::math;
use crate::player::{Player, PlayerHealth};
use crate::session::{Lifetime, RunClock, Velocity};

// ── Components ────────────────────────────────────────────────────────────────

/// Boss movement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Chase,
    Aim,
    Dash,
}

/// Boss-only state carried alongside the shared [`Enemy`] component.
#[derive(Component, Debug, Clone)]
pub struct Boss {
    pub phase: BossPhase,
    /// Seconds remaining in the current phase.
    pub phase_timer: f32,
    /// Dash direction; tracks the player during aim, locked during the dash.
    pub dash_dir: Vec2,
    /// Seconds of movement slow remaining; refreshed by every hit taken.
    pub slow_timer: f32,
    /// HP observed last frame, for hit detection without coupling the
    /// weapons to boss internals.
    pub last_hp: f32,
    /// Current blade orbit angle in radians.
    pub blade_angle: f32,
    pub volley_timer: f32,
    pub orb_timer: f32,
}

/// The boss's orbiting blade; position is recomputed from the boss each frame.
#[derive(Component, Debug, Default)]
pub struct BossBlade;

/// Straight boss arrow.
#[derive(Component, Debug)]
pub struct BossArrow;

/// Homing boss orb; detonates when its [`Lifetime`] expires.
#[derive(Component, Debug)]
pub struct BossOrb;

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Spawn the boss and its blade at `pos`.
///
/// The boss is never difficulty-scaled; its stat block is an encounter of its
/// own.
pub fn spawn_boss(commands: &mut Commands, pos: Vec2) -> Entity {
    let boss = commands
        .spawn((
            Enemy::new(EnemyKind::Boss, 1.0),
            Boss {
                phase: BossPhase::Chase,
                phase_timer: BOSS_DASH_CYCLE_SECS,
                dash_dir: Vec2::X,
                slow_timer: 0.0,
                last_hp: BOSS_HP,
                blade_angle: 0.0,
                volley_timer: BOSS_VOLLEY_INTERVAL_SECS,
                orb_timer: BOSS_ORB_INTERVAL_SECS,
            },
            Transform::from_xyz(pos.x, pos.y, 0.5),
            Visibility::default(),
        ))
        .id();

    commands.spawn((
        BossBlade,
        Transform::from_xyz(pos.x + BOSS_BLADE_ORBIT_BASE, pos.y, 0.6),
        Visibility::default(),
    ));

    boss
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Drive the chase → aim → dash cycle and the slow debuff.
pub fn boss_movement_system(
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    mut bosses: Query<(&Enemy, &mut Boss, &mut Transform), Without<Player>>,
) {
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (enemy, mut boss, mut transform) in bosses.iter_mut() {
        if !enemy.alive {
            continue;
        }
        // Hit detection by HP delta; any damage refreshes the slow.
        if enemy.hp < boss.last_hp {
            boss.slow_timer = BOSS_SLOW_SECS;
        }
        boss.last_hp = enemy.hp;
        boss.slow_timer = (boss.slow_timer - clock.dt).max(0.0);

        let pos = transform.translation.truncate();
        boss.phase_timer -= clock.dt;

        match boss.phase {
            BossPhase::Chase => {
                let slow = if boss.slow_timer > 0.0 {
                    BOSS_SLOW_FACTOR
                } else {
                    1.0
                };
                let speed = config.player_move_speed * BOSS_SPEED_FACTOR * slow;
                let step = math::direction_to(pos, target) * speed * clock.dt;
                transform.translation.x += step.x;
                transform.translation.y += step.y;
                if boss.phase_timer <= 0.0 {
                    boss.phase = BossPhase::Aim;
                    boss.phase_timer = BOSS_AIM_SECS;
                }
            }
            BossPhase::Aim => {
                // Standing still, tracking; the last aim frame locks the dash.
                boss.dash_dir = math::direction_to(pos, target);
                if boss.phase_timer <= 0.0 {
                    boss.phase = BossPhase::Dash;
                    boss.phase_timer = BOSS_DASH_SECS;
                }
            }
            BossPhase::Dash => {
                let step = boss.dash_dir * BOSS_DASH_SPEED * clock.dt;
                transform.translation.x += step.x;
                transform.translation.y += step.y;
                let pos = transform.translation.truncate();
                if math::circles_overlap(pos, enemy.radius, target, config.player_radius) {
                    health.take_damage(BOSS_DASH_DAMAGE);
                }
                if boss.phase_timer <= 0.0 {
                    boss.phase = BossPhase::Chase;
                    boss.phase_timer = BOSS_DASH_CYCLE_SECS;
                }
            }
        }
    }
}

// ── Orbiting blade ────────────────────────────────────────────────────────────

/// Circle the blade around the boss and apply contact damage.
///
/// Blade hits rely on the player's invincibility window for rate limiting;
/// at one revolution per second the blade cannot double-hit inside it.
pub fn boss_blade_system(
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    mut bosses: Query<(&Enemy, &mut Boss, &Transform), Without<BossBlade>>,
    mut blades: Query<&mut Transform, (With<BossBlade>, Without<Player>)>,
    mut player: Query<(&Transform, &mut PlayerHealth), (With<Player>, Without<BossBlade>)>,
) {
    let Ok((boss_enemy, mut boss, boss_transform)) = bosses.single_mut() else {
        return;
    };
    if !boss_enemy.alive {
        return;
    }
    boss.blade_angle = (boss.blade_angle + BOSS_BLADE_ANGULAR_SPEED * clock.dt)
        % std::f32::consts::TAU;

    let orbit = BOSS_BLADE_ORBIT_BASE + BOSS_BLADE_ORBIT_PER_SCALE * BOSS_BLADE_SCALE;
    let blade_pos =
        boss_transform.translation.truncate() + Vec2::from_angle(boss.blade_angle) * orbit;

    for mut transform in blades.iter_mut() {
        transform.translation.x = blade_pos.x;
        transform.translation.y = blade_pos.y;
    }

    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let hit_radius = BOSS_BLADE_HIT_PER_SCALE * BOSS_BLADE_SCALE;
    if math::circles_overlap(
        blade_pos,
        hit_radius,
        player_transform.translation.truncate(),
        config.player_radius,
    ) {
        health.take_damage(BOSS_BLADE_DAMAGE);
    }
}

// ── Arrow volley ──────────────────────────────────────────────────────────────

/// Fire a fan of arrows at the player on a fixed cadence.
pub fn boss_volley_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    player: Query<&Transform, With<Player>>,
    mut bosses: Query<(&Enemy, &mut Boss, &Transform), Without<Player>>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (enemy, mut boss, transform) in bosses.iter_mut() {
        if !enemy.alive {
            continue;
        }
        boss.volley_timer -= clock.dt;
        if boss.volley_timer > 0.0 {
            continue;
        }
        boss.volley_timer = BOSS_VOLLEY_INTERVAL_SECS;

        let pos = transform.translation.truncate();
        let base = math::direction_to(pos, target);
        let half = (BOSS_VOLLEY_COUNT as f32 - 1.0) / 2.0;
        for i in 0..BOSS_VOLLEY_COUNT {
            let offset = (i as f32 - half) * BOSS_VOLLEY_GAP_RADIANS;
            let dir = Vec2::from_angle(offset).rotate(base);
            commands.spawn((
                BossArrow,
                Velocity(dir * BOSS_ARROW_SPEED),
                Lifetime(BOSS_ARROW_LIFE_SECS),
                Transform::from_xyz(pos.x, pos.y, 0.6),
                Visibility::default(),
            ));
        }
    }
}

// ── Homing orbs ───────────────────────────────────────────────────────────────

/// Release a radial ring of homing orbs on a fixed cadence.
pub fn boss_orb_release_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    mut bosses: Query<(&Enemy, &mut Boss, &Transform)>,
) {
    for (enemy, mut boss, transform) in bosses.iter_mut() {
        if !enemy.alive {
            continue;
        }
        boss.orb_timer -= clock.dt;
        if boss.orb_timer > 0.0 {
            continue;
        }
        boss.orb_timer = BOSS_ORB_INTERVAL_SECS;

        let pos = transform.translation.truncate();
        for i in 0..BOSS_ORB_COUNT {
            let angle = i as f32 * std::f32::consts::TAU / BOSS_ORB_COUNT as f32;
            commands.spawn((
                BossOrb,
                Velocity(Vec2::from_angle(angle) * BOSS_ORB_SPEED),
                Lifetime(BOSS_ORB_LIFE_SECS),
                Transform::from_xyz(pos.x, pos.y, 0.6),
                Visibility::default(),
            ));
        }
    }
}

/// Curve live orbs toward the player.
pub fn boss_orb_steer_system(
    player: Query<&Transform, With<Player>>,
    mut orbs: Query<(&Transform, &mut Velocity), (With<BossOrb>, Without<Player>)>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (transform, mut velocity) in orbs.iter_mut() {
        let pos = transform.translation.truncate();
        velocity.0 = math::steer(
            velocity.0,
            math::direction_to(pos, target),
            BOSS_ORB_HOMING_STRENGTH,
            BOSS_ORB_SPEED,
        );
    }
}

/// Direct hits from boss arrows and orbs.
pub fn boss_projectile_hit_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    arrows: Query<(Entity, &Transform), (With<BossArrow>, Without<Player>)>,
    orbs: Query<(Entity, &Transform), (With<BossOrb>, Without<Player>)>,
) {
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform) in arrows.iter() {
        let pos = transform.translation.truncate();
        if math::circles_overlap(pos, BOSS_ARROW_RADIUS, player_pos, config.player_radius) {
            health.take_damage(BOSS_ARROW_DAMAGE);
            commands.entity(entity).despawn();
        }
    }

    for (entity, transform) in orbs.iter() {
        let pos = transform.translation.truncate();
        if math::circles_overlap(pos, BOSS_ORB_RADIUS, player_pos, config.player_radius) {
            health.take_damage(BOSS_ORB_DETONATE_DAMAGE);
            commands.entity(entity).despawn();
        }
    }
}

/// Detonate orbs whose flight time has expired.
///
/// Orbs are excluded from the generic lifetime sweep so expiry can deal area
/// damage before the despawn.
pub fn boss_orb_detonation_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    mut orbs: Query<(Entity, &Transform, &mut Lifetime), (With<BossOrb>, Without<Player>)>,
) {
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform, mut lifetime) in orbs.iter_mut() {
        lifetime.0 -= clock.dt;
        if lifetime.0 > 0.0 {
            continue;
        }
        let pos = transform.translation.truncate();
        if math::circles_overlap(pos, BOSS_ORB_DETONATE_RADIUS, player_pos, config.player_radius) {
            health.take_damage(BOSS_ORB_DETONATE_DAMAGE);
        }
        commands.entity(entity).despawn();
    }
}

/// Remove the blade and any surviving boss projectiles once the boss is gone.
pub fn boss_support_cleanup_system(
    mut commands: Commands,
    bosses: Query<&Enemy, With<Boss>>,
    support: Query<Entity, Or<(With<BossBlade>, With<BossArrow>, With<BossOrb>)>>,
) {
    let boss_alive = bosses.iter().any(|enemy| enemy.alive);
    if boss_alive {
        return;
    }
    for entity in support.iter() {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::apply_velocity_system;

    fn boss_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(RunClock {
            elapsed: 0.0,
            dt: 0.1,
        });
        app.add_systems(
            Update,
            (
                boss_movement_system,
                boss_blade_system,
                boss_volley_system,
                boss_orb_release_system,
                boss_orb_steer_system,
                apply_velocity_system,
                boss_projectile_hit_system,
                boss_orb_detonation_system,
                boss_support_cleanup_system,
            )
                .chain(),
        );
        app
    }

    fn spawn_player(app: &mut App, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                PlayerHealth::default(),
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ))
            .id()
    }

    fn spawn_test_boss(app: &mut App, pos: Vec2) -> Entity {
        use bevy::ecs::system::RunSystemOnce;
        app.world_mut()
            .run_system_once(move |mut commands: Commands| spawn_boss(&mut commands, pos))
            .expect("boss spawn must run")
    }

    #[test]
    fn boss_chases_faster_than_the_player_runs() {
        let mut app = boss_test_app();
        spawn_player(&mut app, Vec2::ZERO);
        let boss = spawn_test_boss(&mut app, Vec2::new(800.0, 0.0));
        app.update();
        let x = app.world().get::<Transform>(boss).unwrap().translation.x;
        let expected = 800.0 - PLAYER_MOVE_SPEED * BOSS_SPEED_FACTOR * 0.1;
        assert!((x - expected).abs() < 1e-2);
    }

    #[test]
    fn damage_slows_the_chase() {
        let mut app = boss_test_app();
        spawn_player(&mut app, Vec2::ZERO);
        let boss = spawn_test_boss(&mut app, Vec2::new(800.0, 0.0));
        app.world_mut()
            .get_mut::<Enemy>(boss)
            .unwrap()
            .take_damage(100.0);
        app.update();
        let x = app.world().get::<Transform>(boss).unwrap().translation.x;
        let expected = 800.0 - PLAYER_MOVE_SPEED * BOSS_SPEED_FACTOR * BOSS_SLOW_FACTOR * 0.1;
        assert!((x - expected).abs() < 1e-2);
    }

    #[test]
    fn dash_direction_is_locked_at_aim_end() {
        let mut app = boss_test_app();
        let player = spawn_player(&mut app, Vec2::new(500.0, 0.0));
        let boss = spawn_test_boss(&mut app, Vec2::ZERO);
        {
            let mut state = app.world_mut().get_mut::<Boss>(boss).unwrap();
            state.phase = BossPhase::Aim;
            state.phase_timer = 0.05;
        }
        // Aim expires this frame, locking +X toward the player.
        app.update();
        assert_eq!(
            app.world().get::<Boss>(boss).unwrap().phase,
            BossPhase::Dash
        );
        // Move the player; the dash must keep its heading.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(0.0, 900.0, 0.0);
        app.update();
        let transform = app.world().get::<Transform>(boss).unwrap();
        assert!(transform.translation.x > 0.0);
        assert!(transform.translation.y.abs() < 1e-3);
    }

    #[test]
    fn volley_fires_a_fan_on_cadence() {
        let mut app = boss_test_app();
        spawn_player(&mut app, Vec2::new(600.0, 0.0));
        let boss = spawn_test_boss(&mut app, Vec2::ZERO);
        app.world_mut().get_mut::<Boss>(boss).unwrap().volley_timer = 0.05;
        app.update();
        let mut query = app.world_mut().query::<&BossArrow>();
        assert_eq!(
            query.iter(app.world()).count(),
            BOSS_VOLLEY_COUNT as usize
        );
    }

    #[test]
    fn orb_ring_releases_and_detonates_on_expiry() {
        let mut app = boss_test_app();
        let player = spawn_player(&mut app, Vec2::new(400.0, 0.0));
        let boss = spawn_test_boss(&mut app, Vec2::ZERO);
        app.world_mut().get_mut::<Boss>(boss).unwrap().orb_timer = 0.05;
        app.update();
        let mut query = app.world_mut().query::<&BossOrb>();
        assert_eq!(query.iter(app.world()).count(), BOSS_ORB_COUNT as usize);

        // Park the player far away and run the orbs out; they all expire
        // without a detonation in range.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(10_000.0, 10_000.0, 0.0);
        for _ in 0..((BOSS_ORB_LIFE_SECS / 0.1) as usize + 2) {
            app.update();
        }
        let mut query = app.world_mut().query::<&BossOrb>();
        assert_eq!(query.iter(app.world()).count(), 0);
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp);
    }

    #[test]
    fn orb_detonation_reaches_the_player_edge() {
        let mut app = boss_test_app();
        // Player centre just outside the bare detonation radius; the player
        // circle still intersects the blast.
        let player = spawn_player(
            &mut app,
            Vec2::new(BOSS_ORB_DETONATE_RADIUS + PLAYER_RADIUS + 15.0, 0.0),
        );
        app.world_mut().spawn((
            BossOrb,
            Velocity(Vec2::ZERO),
            Lifetime(0.05),
            Transform::from_xyz(0.0, 0.0, 0.0),
            Visibility::default(),
        ));
        // One frame: the orb steers toward the player, drifts 20 units, and
        // its lifetime expires.  It detonates 119 units out, within blast
        // radius + player radius but beyond the bare radius.
        app.update();
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp - BOSS_ORB_DETONATE_DAMAGE);
    }

    #[test]
    fn support_entities_die_with_the_boss() {
        let mut app = boss_test_app();
        spawn_player(&mut app, Vec2::new(600.0, 0.0));
        let boss = spawn_test_boss(&mut app, Vec2::ZERO);
        {
            let mut enemy = app.world_mut().get_mut::<Enemy>(boss).unwrap();
            let hp = enemy.hp;
            enemy.take_damage(hp);
        }
        app.update();
        let mut query = app.world_mut().query::<&BossBlade>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }
}
