//! Runtime gameplay configuration loaded from `assets/tuning.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the run-shaping
//! constants in [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/tuning.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! The per-level weapon tables stay compiled (`crate::weapons::tables`); this
//! file covers arena shape, player stats, spawn pacing, and pickup behaviour.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.player_move_speed`, `config.spawn_interval_secs`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/tuning.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_radius: f32,
    pub player_max_hp: f32,
    pub player_move_speed: f32,
    pub player_invincibility_secs: f32,

    // ── Progression ───────────────────────────────────────────────────────────
    pub exp_to_first_level: u32,
    pub level_max_hp_bonus: f32,
    pub level_heal_fraction: f32,

    // ── Spawning ──────────────────────────────────────────────────────────────
    pub spawn_interval_secs: f32,
    pub spawn_ring_radius: f32,
    pub difficulty_ramp_per_minute: f32,
    pub boss_trigger_secs: f32,

    // ── Pickups ───────────────────────────────────────────────────────────────
    pub magnet_radius: f32,
    pub magnet_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Player
            player_radius: PLAYER_RADIUS,
            player_max_hp: PLAYER_MAX_HP,
            player_move_speed: PLAYER_MOVE_SPEED,
            player_invincibility_secs: PLAYER_INVINCIBILITY_SECS,
            // Progression
            exp_to_first_level: EXP_TO_FIRST_LEVEL,
            level_max_hp_bonus: LEVEL_MAX_HP_BONUS,
            level_heal_fraction: LEVEL_HEAL_FRACTION,
            // Spawning
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            spawn_ring_radius: SPAWN_RING_RADIUS,
            difficulty_ramp_per_minute: DIFFICULTY_RAMP_PER_MINUTE,
            boss_trigger_secs: BOSS_TRIGGER_SECS,
            // Pickups
            magnet_radius: MAGNET_RADIUS,
            magnet_speed: MAGNET_SPEED,
        }
    }
}

/// Startup system: attempt to load `assets/tuning.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/tuning.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded tuning config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.arena_width, ARENA_WIDTH);
        assert_eq!(config.player_move_speed, PLAYER_MOVE_SPEED);
        assert_eq!(config.exp_to_first_level, EXP_TO_FIRST_LEVEL);
        assert_eq!(config.boss_trigger_secs, BOSS_TRIGGER_SECS);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: GameConfig =
            toml::from_str("player_move_speed = 300.0\nspawn_interval_secs = 1.0\n")
                .expect("partial config must parse");
        assert_eq!(config.player_move_speed, 300.0);
        assert_eq!(config.spawn_interval_secs, 1.0);
        assert_eq!(config.player_max_hp, PLAYER_MAX_HP);
    }

    #[test]
    fn empty_toml_yields_pure_defaults() {
        let config: GameConfig = toml::from_str("").expect("empty config must parse");
        assert_eq!(config.arena_height, ARENA_HEIGHT);
    }
}
