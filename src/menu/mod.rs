//! Menu screens and the `GameState` machine.
//!
//! ## States
//!
//! | State          | Description                                 |
//! |----------------|---------------------------------------------|
//! | `WeaponSelect` | Starting-weapon picker; initial state       |
//! | `Playing`      | Simulation running; all game systems active |
//! | `LevelUp`      | Upgrade-choice overlay; simulation frozen   |
//! | `Paused`       | Pause overlay; simulation frozen            |
//! | `SaveSelect`   | Save-slot screen, reached from the pause menu |
//! | `GameOver`     | End-of-run overlay                          |
//!
//! Each screen follows the same shape: an `OnEnter` setup system spawning a
//! root node, an `OnExit` cleanup despawning it, and `Update` handlers for
//! its buttons and keyboard shortcuts.

use bevy::prelude::*;

mod common;
pub mod game_over;
pub mod level_up;
pub mod pause;
pub mod save_select;
pub mod types;
pub mod weapon_select;

pub use common::format_elapsed;
pub use types::*;

use common::*;

/// Registers `GameState`, the choice messages, and every menu screen.
///
/// Must be added before any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is registered first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<StartingWeaponChoice>()
            .add_message::<UpgradeChoice>()
            .init_resource::<StartingOffer>()
            .init_resource::<UpgradeOptions>()
            // Weapon select
            .add_systems(OnEnter(GameState::WeaponSelect), weapon_select::setup_weapon_select)
            .add_systems(OnExit(GameState::WeaponSelect), weapon_select::cleanup_weapon_select)
            .add_systems(
                Update,
                (
                    weapon_select::weapon_select_button_system,
                    weapon_select::weapon_select_keyboard_system,
                    weapon_select::apply_starting_weapon_system,
                )
                    .chain()
                    .run_if(in_state(GameState::WeaponSelect)),
            )
            // Level up
            .add_systems(OnEnter(GameState::LevelUp), level_up::setup_level_up)
            .add_systems(OnExit(GameState::LevelUp), level_up::cleanup_level_up)
            .add_systems(
                Update,
                (
                    level_up::level_up_button_system,
                    level_up::level_up_keyboard_system,
                    level_up::apply_upgrade_choice_system,
                )
                    .chain()
                    .run_if(in_state(GameState::LevelUp)),
            )
            // Pause
            .add_systems(
                Update,
                pause::toggle_pause_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Paused), pause::setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), pause::cleanup_pause_menu)
            .add_systems(
                Update,
                (pause::pause_menu_button_system, pause::pause_resume_input_system)
                    .run_if(in_state(GameState::Paused)),
            )
            // Save select
            .add_systems(OnEnter(GameState::SaveSelect), save_select::setup_save_select)
            .add_systems(OnExit(GameState::SaveSelect), save_select::cleanup_save_select)
            .add_systems(
                Update,
                (
                    save_select::save_select_button_system,
                    save_select::refresh_slot_labels_system
                        .after(crate::save::handle_save_slot_requests_system),
                )
                    .run_if(in_state(GameState::SaveSelect)),
            )
            // Game over
            .add_systems(OnEnter(GameState::GameOver), game_over::setup_game_over)
            .add_systems(OnExit(GameState::GameOver), game_over::cleanup_game_over)
            .add_systems(
                Update,
                game_over::game_over_button_system.run_if(in_state(GameState::GameOver)),
            );
    }
}
