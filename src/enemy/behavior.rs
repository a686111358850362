//! Regular-enemy behaviour: pursuit, bruiser charges, exploder detonation,
//! and contact damage against the player.
//!
//! All movement here is straight-line pursuit toward the player's current
//! position; nothing path-finds.  The boss has its own movement and attack
//! kit in [`super::boss`].

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::kind::{Enemy, EnemyKind};
use crate::math;
use crate::player::{Player, PlayerHealth};
use crate::session::RunClock;

// ── Variant components ────────────────────────────────────────────────────────

/// Bruiser charge state machine.
///
/// A bruiser walks at the player until it gets within
/// [`BRUISER_CHARGE_RANGE`] with its cooldown expired, then dashes along a
/// direction locked at charge start.
#[derive(Component, Debug, Clone, Default)]
pub struct Charge {
    /// Seconds until the next charge may begin.
    pub cooldown: f32,
    /// Locked dash direction and remaining dash time, while dashing.
    pub dash: Option<(Vec2, f32)>,
}

/// One-shot detonation guard for exploders.
///
/// An exploder detonates on player contact or on death, whichever comes
/// first, and never twice.
#[derive(Component, Debug, Clone, Default)]
pub struct ExploderFuse {
    pub exploded: bool,
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Straight pursuit for runners, stalkers, and exploders.
///
/// Bruisers are driven by [`bruiser_charge_system`] and the boss by its own
/// module; corpses do not move.
pub fn enemy_pursuit_system(
    clock: Res<RunClock>,
    player: Query<&Transform, With<Player>>,
    mut enemies: Query<(&Enemy, &mut Transform), (Without<Player>, Without<Charge>)>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (enemy, mut transform) in enemies.iter_mut() {
        if !enemy.alive || matches!(enemy.kind, EnemyKind::Boss) {
            continue;
        }
        let pos = transform.translation.truncate();
        let step = math::direction_to(pos, target) * enemy.speed * clock.dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
    }
}

/// Bruiser movement: pursuit until in range, then a locked-direction dash.
pub fn bruiser_charge_system(
    clock: Res<RunClock>,
    player: Query<&Transform, With<Player>>,
    mut bruisers: Query<(&Enemy, &mut Charge, &mut Transform), Without<Player>>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (enemy, mut charge, mut transform) in bruisers.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let pos = transform.translation.truncate();

        if let Some((dir, remaining)) = charge.dash {
            let step = dir * BRUISER_CHARGE_SPEED * clock.dt;
            transform.translation.x += step.x;
            transform.translation.y += step.y;
            let remaining = remaining - clock.dt;
            charge.dash = if remaining > 0.0 {
                Some((dir, remaining))
            } else {
                None
            };
            continue;
        }

        charge.cooldown = (charge.cooldown - clock.dt).max(0.0);

        if charge.cooldown <= 0.0 && pos.distance(target) < BRUISER_CHARGE_RANGE {
            // Direction locks now; the dash does not track the player.
            charge.dash = Some((math::direction_to(pos, target), BRUISER_CHARGE_DURATION));
            charge.cooldown = BRUISER_CHARGE_COOLDOWN;
            continue;
        }

        let step = math::direction_to(pos, target) * enemy.speed * clock.dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
    }
}

// ── Exploders ─────────────────────────────────────────────────────────────────

/// Detonate exploders on player contact or on death, exactly once.
///
/// A contact detonation kills the exploder itself; a weapon kill detonates
/// the corpse before the end-of-frame sweep converts it to an orb.  The
/// blast reaches the player's edge, not just its centre: the check is
/// [`EXPLODER_BLAST_RADIUS`] against the player circle, and the hit is
/// still gated by the invincibility window.
pub fn exploder_detonation_system(
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    mut exploders: Query<(&mut Enemy, &mut ExploderFuse, &Transform), Without<Player>>,
) {
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (mut enemy, mut fuse, transform) in exploders.iter_mut() {
        if fuse.exploded {
            continue;
        }
        let pos = transform.translation.truncate();
        let died = !enemy.alive;
        let contact = enemy.alive
            && math::circles_overlap(pos, enemy.radius, player_pos, config.player_radius);

        if !(died || contact) {
            continue;
        }

        fuse.exploded = true;
        if math::circles_overlap(pos, EXPLODER_BLAST_RADIUS, player_pos, config.player_radius) {
            health.take_damage(enemy.attack);
        }
        if contact {
            let hp = enemy.hp;
            enemy.take_damage(hp);
        }
    }
}

// ── Contact damage ────────────────────────────────────────────────────────────

/// Apply contact damage from overlapping enemies.
///
/// Contact damage is continuous while the circles overlap; the player's
/// invincibility window is the sole rate limit, so a surrounding swarm still
/// cannot multi-hit in a single window.  Exploders never use contact damage;
/// they detonate instead.
pub fn enemy_contact_damage_system(
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut PlayerHealth), With<Player>>,
    enemies: Query<(&Enemy, &Transform), Without<Player>>,
) {
    let Ok((player_transform, mut health)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (enemy, transform) in enemies.iter() {
        if !enemy.alive || matches!(enemy.kind, EnemyKind::Exploder) {
            continue;
        }
        let pos = transform.translation.truncate();
        if math::circles_overlap(pos, enemy.radius, player_pos, config.player_radius) {
            health.take_damage(enemy.attack);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behavior_test_app() -> App {
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
                crate::player::tick_invincibility_system,
                enemy_pursuit_system,
                bruiser_charge_system,
                exploder_detonation_system,
                enemy_contact_damage_system,
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

    #[test]
    fn runner_closes_on_the_player() {
        let mut app = behavior_test_app();
        spawn_player(&mut app, Vec2::new(0.0, 0.0));
        let runner = app
            .world_mut()
            .spawn((
                Enemy::new(EnemyKind::Runner, 1.0),
                Transform::from_xyz(500.0, 0.0, 0.0),
            ))
            .id();
        app.update();
        let x = app.world().get::<Transform>(runner).unwrap().translation.x;
        assert!((x - (500.0 - RUNNER_SPEED * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn dead_enemies_do_not_move() {
        let mut app = behavior_test_app();
        spawn_player(&mut app, Vec2::ZERO);
        let mut enemy = Enemy::new(EnemyKind::Runner, 1.0);
        let hp = enemy.hp;
        enemy.take_damage(hp);
        let corpse = app
            .world_mut()
            .spawn((enemy, Transform::from_xyz(300.0, 0.0, 0.0)))
            .id();
        app.update();
        let x = app.world().get::<Transform>(corpse).unwrap().translation.x;
        assert_eq!(x, 300.0);
    }

    #[test]
    fn bruiser_charges_in_locked_direction() {
        let mut app = behavior_test_app();
        let player = spawn_player(&mut app, Vec2::new(200.0, 0.0));
        let bruiser = app
            .world_mut()
            .spawn((
                Enemy::new(EnemyKind::Bruiser, 1.0),
                Charge::default(),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ))
            .id();

        // In range and off cooldown: the first update locks the dash toward +X.
        app.update();
        assert!(app.world().get::<Charge>(bruiser).unwrap().dash.is_some());

        // Teleport the player; the locked dash must not track the move.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(0.0, 500.0, 0.0);
        app.update();
        let transform = app.world().get::<Transform>(bruiser).unwrap();
        assert!(transform.translation.x > 0.0);
        assert!(transform.translation.y.abs() < 1e-3);
    }

    #[test]
    fn bruiser_outside_range_just_pursues() {
        let mut app = behavior_test_app();
        spawn_player(&mut app, Vec2::new(1000.0, 0.0));
        let bruiser = app
            .world_mut()
            .spawn((
                Enemy::new(EnemyKind::Bruiser, 1.0),
                Charge::default(),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ))
            .id();
        app.update();
        let charge = app.world().get::<Charge>(bruiser).unwrap();
        assert!(charge.dash.is_none());
        let x = app.world().get::<Transform>(bruiser).unwrap().translation.x;
        assert!((x - BRUISER_SPEED * 0.1).abs() < 1e-3);
    }

    #[test]
    fn exploder_detonates_once_on_contact() {
        let mut app = behavior_test_app();
        let player = spawn_player(&mut app, Vec2::ZERO);
        let exploder = app
            .world_mut()
            .spawn((
                Enemy::new(EnemyKind::Exploder, 1.0),
                ExploderFuse::default(),
                Transform::from_xyz(10.0, 0.0, 0.0),
            ))
            .id();
        app.update();

        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp - EXPLODER_ATTACK);
        let fuse = app.world().get::<ExploderFuse>(exploder).unwrap();
        assert!(fuse.exploded);
        assert!(!app.world().get::<Enemy>(exploder).unwrap().alive);

        // Clear invincibility and run again: no second blast.
        app.world_mut()
            .get_mut::<PlayerHealth>(player)
            .unwrap()
            .inv_timer = 0.0;
        app.update();
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp - EXPLODER_ATTACK);
    }

    #[test]
    fn exploder_killed_by_weapon_detonates_in_radius() {
        let mut app = behavior_test_app();
        let player = spawn_player(&mut app, Vec2::new(80.0, 0.0));
        let mut enemy = Enemy::new(EnemyKind::Exploder, 1.0);
        let hp = enemy.hp;
        enemy.take_damage(hp);
        app.world_mut().spawn((
            enemy,
            ExploderFuse::default(),
            Transform::from_xyz(0.0, 0.0, 0.0),
        ));
        app.update();
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp - EXPLODER_ATTACK);
    }

    #[test]
    fn exploder_death_outside_blast_radius_is_harmless() {
        let mut app = behavior_test_app();
        let player = spawn_player(&mut app, Vec2::new(500.0, 0.0));
        let mut enemy = Enemy::new(EnemyKind::Exploder, 1.0);
        let hp = enemy.hp;
        enemy.take_damage(hp);
        app.world_mut().spawn((
            enemy,
            ExploderFuse::default(),
            Transform::from_xyz(0.0, 0.0, 0.0),
        ));
        app.update();
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp);
    }

    #[test]
    fn contact_damage_is_gated_only_by_invincibility() {
        let mut app = behavior_test_app();
        let player = spawn_player(&mut app, Vec2::ZERO);
        // Stalker close enough that pursuit keeps it overlapping every frame.
        app.world_mut().spawn((
            Enemy::new(EnemyKind::Stalker, 1.0),
            Transform::from_xyz(30.0, 0.0, 0.0),
        ));

        app.update();
        let hp = app.world().get::<PlayerHealth>(player).unwrap().hp;
        assert_eq!(hp, PLAYER_MAX_HP - STALKER_ATTACK);

        // Four more frames sit inside the 0.5 s invincibility window.
        for _ in 0..4 {
            app.update();
        }
        let hp = app.world().get::<PlayerHealth>(player).unwrap().hp;
        assert_eq!(hp, PLAYER_MAX_HP - STALKER_ATTACK);

        // The frame the window closes, the still-overlapping enemy lands the
        // next hit immediately; nothing else delays it.
        app.update();
        let hp = app.world().get::<PlayerHealth>(player).unwrap().hp;
        assert_eq!(hp, PLAYER_MAX_HP - 2.0 * STALKER_ATTACK);
    }

    #[test]
    fn exploder_blast_reaches_the_player_edge() {
        let mut app = behavior_test_app();
        // Player centre outside the bare blast radius, but the player circle
        // still intersects the blast.
        let player = spawn_player(
            &mut app,
            Vec2::new(EXPLODER_BLAST_RADIUS + PLAYER_RADIUS - 1.0, 0.0),
        );
        let mut enemy = Enemy::new(EnemyKind::Exploder, 1.0);
        let hp = enemy.hp;
        enemy.take_damage(hp);
        app.world_mut().spawn((
            enemy,
            ExploderFuse::default(),
            Transform::from_xyz(0.0, 0.0, 0.0),
        ));
        app.update();
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(health.hp, health.max_hp - EXPLODER_ATTACK);
    }
}
