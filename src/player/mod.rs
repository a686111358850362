//! Player module: components, input, movement, and progression.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `PlayerHealth`, `PlayerProgress`) and input resources (`InputAxis`, `PreferredGamepad`, `PendingLevelUps`) |
//! | [`control`] | Input systems: WASD/arrow keys, gamepad left stick, movement with arena clamping |
//! | [`progress`] | Invincibility countdown, level-up benefits and screen trigger, death transition |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod progress;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{
    clear_input_axis_system, gamepad_connection_system, gamepad_to_axis_system,
    keyboard_to_axis_system, player_movement_system,
};
pub use progress::{
    apply_level_benefits, level_up_trigger_system, player_death_system,
    tick_invincibility_system,
};
pub use state::{
    InputAxis, PendingLevelUps, Player, PlayerHealth, PlayerProgress, PreferredGamepad,
};

// ── Player spawn ──────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use bevy::prelude::*;

/// Spawn the player at the arena centre with full HP and fresh progression.
pub fn spawn_player(commands: &mut Commands, config: &GameConfig) -> Entity {
    let entity = commands
        .spawn((
            Player,
            PlayerHealth {
                hp: config.player_max_hp,
                max_hp: config.player_max_hp,
                inv_timer: 0.0,
                inv_window: config.player_invincibility_secs,
            },
            PlayerProgress {
                level: 1,
                exp: 0,
                exp_to_next: config.exp_to_first_level,
            },
            Transform::from_xyz(config.arena_width / 2.0, config.arena_height / 2.0, 1.0),
            Visibility::default(),
        ))
        .id();
    info!("Player spawned at arena centre");
    entity
}
