//! Wave spawning: timed off-screen spawns, weighted kind selection, and the
//! boss trigger.
//!
//! Regular enemies appear on a ring around the player, far enough out to be
//! off-screen.  The kind of each wave is a weighted roll
//! ([`SPAWN_WEIGHTS`]: runner cluster / stalker / bruiser / exploder), and
//! every spawn is scaled by the current [`Difficulty`].  Once the run clock
//! passes the boss trigger, the field is cleared and regular spawning halts
//! until the boss is down.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::behavior::{Charge, ExploderFuse};
use crate::enemy::boss::spawn_boss;
use crate::enemy::kind::{Enemy, EnemyKind};
use crate::player::Player;
use crate::session::{Difficulty, RunClock};

/// Spawn pacing and boss-fight bookkeeping for the current run.
#[derive(Resource, Debug, Clone, Default)]
pub struct EnemySpawnState {
    /// Seconds until the next wave.
    pub timer: f32,
    /// The boss trigger has fired; regular spawning is suspended.
    pub boss_spawned: bool,
    /// The boss has died; regular spawning resumes.
    pub boss_defeated: bool,
}

impl EnemySpawnState {
    /// True while regular waves are allowed.
    pub fn regular_spawning_active(&self) -> bool {
        !self.boss_spawned || self.boss_defeated
    }
}

/// Spawn one regular enemy of `kind` at `pos`, with its variant components.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    pos: Vec2,
    difficulty: f32,
) -> Entity {
    let mut entity = commands.spawn((
        Enemy::new(kind, difficulty),
        Transform::from_xyz(pos.x, pos.y, 0.5),
        Visibility::default(),
    ));
    match kind {
        EnemyKind::Bruiser => {
            entity.insert(Charge::default());
        }
        EnemyKind::Exploder => {
            entity.insert(ExploderFuse::default());
        }
        _ => {}
    }
    entity.id()
}

/// Pick a wave kind from [`SPAWN_WEIGHTS`] by cumulative scan.
pub fn roll_wave_kind<R: Rng>(rng: &mut R) -> EnemyKind {
    let kinds = [
        EnemyKind::Runner,
        EnemyKind::Stalker,
        EnemyKind::Bruiser,
        EnemyKind::Exploder,
    ];
    let total: f32 = SPAWN_WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0.0..total);
    for (kind, weight) in kinds.iter().zip(SPAWN_WEIGHTS.iter()) {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    // Floating-point tail; the last kind absorbs it.
    EnemyKind::Exploder
}

/// Timed wave spawner.
///
/// Runner waves spawn [`RUNNER_CLUSTER_SIZE`] enemies with per-axis jitter so
/// the cluster does not stack on one point; every other kind spawns a single
/// enemy.
pub fn enemy_spawn_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    difficulty: Res<Difficulty>,
    mut spawn_state: ResMut<EnemySpawnState>,
    player: Query<&Transform, With<Player>>,
) {
    if !spawn_state.regular_spawning_active() {
        return;
    }
    let Ok(player_transform) = player.single() else {
        return;
    };

    spawn_state.timer -= clock.dt;
    if spawn_state.timer > 0.0 {
        return;
    }
    spawn_state.timer = config.spawn_interval_secs;

    let mut rng = rand::thread_rng();
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let pos = player_transform.translation.truncate()
        + Vec2::from_angle(angle) * config.spawn_ring_radius;

    match roll_wave_kind(&mut rng) {
        EnemyKind::Runner => {
            for _ in 0..RUNNER_CLUSTER_SIZE {
                let jitter = Vec2::new(
                    rng.gen_range(-RUNNER_CLUSTER_SPREAD..=RUNNER_CLUSTER_SPREAD),
                    rng.gen_range(-RUNNER_CLUSTER_SPREAD..=RUNNER_CLUSTER_SPREAD),
                );
                spawn_enemy(&mut commands, EnemyKind::Runner, pos + jitter, difficulty.0);
            }
        }
        kind => {
            spawn_enemy(&mut commands, kind, pos, difficulty.0);
        }
    }
}

/// Start the boss fight once the run clock crosses the trigger.
///
/// Every regular enemy is removed outright — no corpses, no experience orbs —
/// so the fight starts on an empty field.
pub fn boss_trigger_system(
    mut commands: Commands,
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    mut spawn_state: ResMut<EnemySpawnState>,
    player: Query<&Transform, With<Player>>,
    regulars: Query<Entity, With<Enemy>>,
) {
    if spawn_state.boss_spawned || clock.elapsed < config.boss_trigger_secs {
        return;
    }
    let Ok(player_transform) = player.single() else {
        return;
    };

    for entity in regulars.iter() {
        commands.entity(entity).despawn();
    }

    let pos = player_transform.translation.truncate()
        + Vec2::from_angle(std::f32::consts::FRAC_PI_2) * config.spawn_ring_radius;
    spawn_boss(&mut commands, pos);
    spawn_state.boss_spawned = true;
    info!("Boss fight triggered at {:.1}s", clock.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::boss::Boss;
    use crate::player::PlayerHealth;

    fn spawner_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(RunClock {
            elapsed: 0.0,
            dt: 0.1,
        });
        app.init_resource::<Difficulty>();
        app.init_resource::<EnemySpawnState>();
        app.add_systems(Update, (enemy_spawn_system, boss_trigger_system).chain());
        app
    }

    fn spawn_player(app: &mut App) {
        app.world_mut().spawn((
            Player,
            PlayerHealth::default(),
            Transform::from_xyz(800.0, 450.0, 0.0),
        ));
    }

    fn count_enemies(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&Enemy>();
        query.iter(app.world()).count()
    }

    #[test]
    fn waves_spawn_on_the_interval() {
        let mut app = spawner_test_app();
        spawn_player(&mut app);
        // Timer starts at zero, so the first update spawns a wave.
        app.update();
        let first_wave = count_enemies(&mut app);
        assert!(first_wave >= 1);
        // The next wave needs a full interval of simulated time.
        app.update();
        assert_eq!(count_enemies(&mut app), first_wave);
    }

    #[test]
    fn spawns_land_on_the_ring_around_the_player() {
        let mut app = spawner_test_app();
        spawn_player(&mut app);
        app.update();
        let config = GameConfig::default();
        let center = Vec2::new(800.0, 450.0);
        let mut checked = 0;
        let mut query = app.world_mut().query_filtered::<&Transform, With<Enemy>>();
        let positions: Vec<Vec2> = query
            .iter(app.world())
            .map(|t| t.translation.truncate())
            .collect();
        for pos in positions {
            let dist = pos.distance(center);
            // Runner cluster jitter can shift a spawn off the exact ring.
            assert!((dist - config.spawn_ring_radius).abs() < 2.0 * RUNNER_CLUSTER_SPREAD);
            checked += 1;
        }
        assert!(checked >= 1);
    }

    #[test]
    fn wave_kind_roll_matches_weights() {
        let mut rng = rand::thread_rng();
        let mut counts = [0u32; 4];
        let trials = 100_000;
        for _ in 0..trials {
            match roll_wave_kind(&mut rng) {
                EnemyKind::Runner => counts[0] += 1,
                EnemyKind::Stalker => counts[1] += 1,
                EnemyKind::Bruiser => counts[2] += 1,
                EnemyKind::Exploder => counts[3] += 1,
                EnemyKind::Boss => unreachable!("boss is never wave-rolled"),
            }
        }
        for (count, weight) in counts.iter().zip(SPAWN_WEIGHTS.iter()) {
            let observed = *count as f32 / trials as f32;
            assert!(
                (observed - weight).abs() < 0.02,
                "observed {observed} for weight {weight}"
            );
        }
    }

    #[test]
    fn boss_trigger_clears_the_field_and_halts_spawning() {
        let mut app = spawner_test_app();
        spawn_player(&mut app);
        app.update();
        assert!(count_enemies(&mut app) >= 1);

        app.world_mut().resource_mut::<RunClock>().elapsed = BOSS_TRIGGER_SECS + 1.0;
        app.update();
        // Command application despawns regulars and spawns the boss.
        let mut boss_query = app.world_mut().query::<&Boss>();
        let bosses = boss_query.iter(app.world()).count();
        assert_eq!(bosses, 1);
        assert_eq!(count_enemies(&mut app), 1, "only the boss remains");

        // Many intervals later, still no regular spawns.
        for _ in 0..50 {
            app.update();
        }
        assert_eq!(count_enemies(&mut app), 1);
    }

    #[test]
    fn spawning_resumes_after_boss_defeat() {
        let state = EnemySpawnState {
            timer: 0.0,
            boss_spawned: true,
            boss_defeated: false,
        };
        assert!(!state.regular_spawning_active());
        let state = EnemySpawnState {
            boss_defeated: true,
            ..state
        };
        assert!(state.regular_spawning_active());
    }

    #[test]
    fn spawned_variants_carry_their_state_components() {
        use bevy::ecs::system::RunSystemOnce;
        let mut world = World::new();
        let (bruiser, exploder) = world
            .run_system_once(|mut commands: Commands| {
                (
                    spawn_enemy(&mut commands, EnemyKind::Bruiser, Vec2::ZERO, 1.0),
                    spawn_enemy(&mut commands, EnemyKind::Exploder, Vec2::ZERO, 1.0),
                )
            })
            .expect("one-shot spawn must run");
        assert!(world.get::<Charge>(bruiser).is_some());
        assert!(world.get::<ExploderFuse>(exploder).is_some());
    }
}
