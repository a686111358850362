//! Experience orbs: the dead-enemy sweep, magnet attraction, and collection.
//!
//! The sweep is the only place enemies are despawned during play.  Combat
//! systems mark enemies dead ([`Enemy::take_damage`]); at the end of the
//! frame this sweep converts every corpse into an orb worth its
//! `exp_reward` and removes the entity.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::constants::ORB_RADIUS;
use crate::enemy::{Enemy, EnemyKind, EnemySpawnState};
use crate::math;
use crate::player::{
    apply_level_benefits, PendingLevelUps, Player, PlayerHealth, PlayerProgress,
};
use crate::session::RunClock;

/// An experience pickup dropped by a dead enemy.
#[derive(Component, Debug, Clone, Copy)]
pub struct ExpOrb {
    pub value: u32,
    pub radius: f32,
}

/// Convert dead enemies into orbs and despawn the corpses.
///
/// Runs after every combat system so nothing observes a half-removed enemy.
/// A dead boss also flips the spawn state back to regular waves.
pub fn dead_enemy_sweep_system(
    mut commands: Commands,
    mut spawn_state: ResMut<EnemySpawnState>,
    enemies: Query<(Entity, &Enemy, &Transform)>,
) {
    for (entity, enemy, transform) in enemies.iter() {
        if enemy.alive {
            continue;
        }
        commands.spawn((
            ExpOrb {
                value: enemy.exp_reward,
                radius: ORB_RADIUS,
            },
            Transform::from_translation(transform.translation.with_z(0.2)),
            Visibility::default(),
        ));
        commands.entity(entity).despawn();

        if matches!(enemy.kind, EnemyKind::Boss) {
            spawn_state.boss_defeated = true;
            info!("Boss defeated");
        }
    }
}

/// Pull orbs within the magnet radius toward the player.
pub fn orb_magnet_system(
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    player: Query<&Transform, With<Player>>,
    mut orbs: Query<&mut Transform, (With<ExpOrb>, Without<Player>)>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for mut transform in orbs.iter_mut() {
        let pos = transform.translation.truncate();
        if pos.distance(target) > config.magnet_radius {
            continue;
        }
        let step = math::direction_to(pos, target) * config.magnet_speed * clock.dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
    }
}

/// Collect orbs touching the player: bank the experience, apply level-up
/// benefits, and queue an upgrade choice per level gained.
pub fn orb_collect_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut pending: ResMut<PendingLevelUps>,
    mut player: Query<
        (&Transform, &mut PlayerProgress, &mut PlayerHealth),
        With<Player>,
    >,
    orbs: Query<(Entity, &ExpOrb, &Transform), Without<Player>>,
) {
    let Ok((player_transform, mut progress, mut health)) = player.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, orb, transform) in orbs.iter() {
        let pos = transform.translation.truncate();
        if !math::circles_overlap(pos, orb.radius, player_pos, config.player_radius) {
            continue;
        }
        let levels = progress.gain_exp(orb.value);
        if levels > 0 {
            apply_level_benefits(&mut health, levels, &config);
            pending.0 += levels;
        }
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EXP_TO_FIRST_LEVEL, RUNNER_EXP};

    fn pickup_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(RunClock {
            elapsed: 0.0,
            dt: 0.1,
        });
        app.init_resource::<EnemySpawnState>();
        app.init_resource::<PendingLevelUps>();
        app.add_systems(
            Update,
            (dead_enemy_sweep_system, orb_magnet_system, orb_collect_system).chain(),
        );
        app
    }

    fn spawn_player(app: &mut App, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                PlayerHealth::default(),
                PlayerProgress::default(),
                Transform::from_xyz(pos.x, pos.y, 0.0),
            ))
            .id()
    }

    fn orb_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&ExpOrb>();
        query.iter(app.world()).count()
    }

    #[test]
    fn corpses_become_orbs_worth_their_reward() {
        let mut app = pickup_test_app();
        spawn_player(&mut app, Vec2::new(5000.0, 5000.0));
        let mut enemy = Enemy::new(EnemyKind::Runner, 1.0);
        let hp = enemy.hp;
        enemy.take_damage(hp);
        let corpse = app
            .world_mut()
            .spawn((enemy, Transform::from_xyz(100.0, 100.0, 0.0)))
            .id();
        app.update();
        assert!(app.world().get_entity(corpse).is_err(), "corpse despawned");
        let mut query = app.world_mut().query::<&ExpOrb>();
        let orb = query.iter(app.world()).next().expect("orb dropped");
        assert_eq!(orb.value, RUNNER_EXP);
    }

    #[test]
    fn living_enemies_are_left_alone() {
        let mut app = pickup_test_app();
        spawn_player(&mut app, Vec2::new(5000.0, 5000.0));
        let enemy = app
            .world_mut()
            .spawn((
                Enemy::new(EnemyKind::Stalker, 1.0),
                Transform::from_xyz(100.0, 100.0, 0.0),
            ))
            .id();
        app.update();
        assert!(app.world().get_entity(enemy).is_ok());
        assert_eq!(orb_count(&mut app), 0);
    }

    #[test]
    fn magnet_pulls_and_collection_banks_exp() {
        let mut app = pickup_test_app();
        let player = spawn_player(&mut app, Vec2::new(800.0, 450.0));
        app.world_mut().spawn((
            ExpOrb {
                value: 50,
                radius: ORB_RADIUS,
            },
            Transform::from_xyz(1000.0, 450.0, 0.0),
        ));
        // 200 units at 500 u/s closes in ~0.4 s of simulated time.
        for _ in 0..8 {
            app.update();
        }
        assert_eq!(orb_count(&mut app), 0, "orb reached the player");
        let progress = app.world().get::<PlayerProgress>(player).unwrap();
        assert_eq!(progress.exp, 50);
    }

    #[test]
    fn an_oversized_orb_queues_multiple_level_ups() {
        let mut app = pickup_test_app();
        let player = spawn_player(&mut app, Vec2::new(800.0, 450.0));
        app.world_mut().spawn((
            ExpOrb {
                value: EXP_TO_FIRST_LEVEL * 3, // crosses 200 then 400
                radius: ORB_RADIUS,
            },
            Transform::from_xyz(800.0, 450.0, 0.0),
        ));
        app.update();
        assert_eq!(app.world().resource::<PendingLevelUps>().0, 2);
        let progress = app.world().get::<PlayerProgress>(player).unwrap();
        assert_eq!(progress.level, 3);
        let health = app.world().get::<PlayerHealth>(player).unwrap();
        assert_eq!(
            health.max_hp,
            crate::constants::PLAYER_MAX_HP + 2.0 * crate::constants::LEVEL_MAX_HP_BONUS
        );
    }

    #[test]
    fn boss_corpse_reopens_regular_spawning() {
        let mut app = pickup_test_app();
        spawn_player(&mut app, Vec2::new(5000.0, 5000.0));
        app.world_mut().resource_mut::<EnemySpawnState>().boss_spawned = true;
        let mut boss = Enemy::new(EnemyKind::Boss, 1.0);
        let hp = boss.hp;
        boss.take_damage(hp);
        app.world_mut()
            .spawn((boss, Transform::from_xyz(0.0, 0.0, 0.0)));
        app.update();
        let state = app.world().resource::<EnemySpawnState>();
        assert!(state.boss_defeated);
        assert!(state.regular_spawning_active());
    }
}
