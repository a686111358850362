//! Nightfall: a top-down survival arena.
//!
//! One player against timed waves of enemies on a fixed arena.  Kills drop
//! experience orbs, levels buy weapon upgrades, and five minutes in the
//! waves stop for a boss.  The simulation is a single ordered system chain
//! driven by [`session::RunClock`], active only in `GameState::Playing`.

pub mod config;
pub mod constants;
pub mod enemy;
pub mod graphics;
pub mod hud;
pub mod math;
pub mod menu;
pub mod pickups;
pub mod player;
pub mod render;
pub mod save;
pub mod session;
pub mod weapons;

use bevy::prelude::*;

use menu::GameState;

/// The full per-frame simulation chain, active only while playing.
///
/// Ordering matters: the clock ticks first, combat marks enemies dead, and
/// the dead-enemy sweep near the end is the only place enemies despawn, so
/// every system in between observes a consistent field.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<session::RunClock>()
            .init_resource::<session::Difficulty>()
            .init_resource::<enemy::EnemySpawnState>()
            .init_resource::<player::InputAxis>()
            .init_resource::<player::PreferredGamepad>()
            .init_resource::<player::PendingLevelUps>()
            .init_resource::<weapons::Arsenal>()
            .init_resource::<weapons::OrbitSpin>()
            .init_resource::<weapons::ActiveSweep>()
            .add_systems(
                Update,
                player::gamepad_connection_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    session::run_clock_system,
                    player::clear_input_axis_system,
                    player::keyboard_to_axis_system,
                    player::gamepad_to_axis_system,
                    player::player_movement_system,
                    player::tick_invincibility_system,
                    enemy::enemy_spawn_system,
                    enemy::boss_trigger_system,
                    enemy::enemy_pursuit_system,
                    enemy::bruiser_charge_system,
                    enemy::boss_movement_system,
                    enemy::boss_blade_system,
                    enemy::boss_volley_system,
                    enemy::boss_orb_release_system,
                    enemy::boss_orb_steer_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    weapons::sync_orbit_blades_system,
                    weapons::orbit_damage_system,
                    weapons::sweep_system,
                    weapons::volley_fire_system,
                    weapons::homing_fire_system,
                    weapons::homing_steer_system,
                    session::apply_velocity_system,
                    weapons::volley_hit_system,
                    weapons::homing_hit_system,
                    enemy::boss_projectile_hit_system,
                    enemy::boss_orb_detonation_system,
                    enemy::exploder_detonation_system,
                    enemy::enemy_contact_damage_system,
                    session::expire_lifetimes_system,
                )
                    .chain()
                    .after(enemy::boss_orb_steer_system)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    enemy::boss_support_cleanup_system,
                    pickups::dead_enemy_sweep_system,
                    pickups::orb_magnet_system,
                    pickups::orb_collect_system,
                    player::level_up_trigger_system,
                    player::player_death_system,
                )
                    .chain()
                    .after(session::expire_lifetimes_system)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
