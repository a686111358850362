use bevy::prelude::*;

use crate::weapons::{UpgradeOption, WeaponKind};

/// Top-level application state machine.
///
/// Every gameplay system runs under `.run_if(in_state(GameState::Playing))`,
/// so the simulation is fully frozen on every overlay screen.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Starting-weapon picker; shown on startup and after a restart.
    #[default]
    WeaponSelect,
    /// Active simulation / gameplay.
    Playing,
    /// Upgrade-choice overlay; opened while level-ups are pending.
    LevelUp,
    /// Simulation frozen; in-game pause overlay is visible.
    Paused,
    /// Save-slot picker shown from the pause menu.
    SaveSelect,
    /// Player HP exhausted; game-over overlay shown.
    GameOver,
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// A starting weapon was chosen (button click or number key).
#[derive(Message, Debug, Clone, Copy)]
pub struct StartingWeaponChoice {
    pub kind: WeaponKind,
}

/// An upgrade card was chosen (button click or number key).
#[derive(Message, Debug, Clone, Copy)]
pub struct UpgradeChoice {
    pub index: usize,
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// The two distinct weapon kinds offered on the starting screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct StartingOffer(pub Vec<WeaponKind>);

/// Cards currently shown on the level-up screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct UpgradeOptions(pub Vec<UpgradeOption>);

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the weapon-select UI; despawned on `OnExit(WeaponSelect)`.
#[derive(Component)]
pub struct WeaponSelectRoot;

/// Tags a starting-weapon card button with its offer index.
#[derive(Component)]
pub struct WeaponCardButton(pub usize);

/// Root node of the level-up UI; despawned on `OnExit(LevelUp)`.
#[derive(Component)]
pub struct LevelUpRoot;

/// Tags an upgrade card button with its option index.
#[derive(Component)]
pub struct UpgradeCardButton(pub usize);

/// Root node of the pause-menu overlay; despawned on `OnExit(Paused)`.
#[derive(Component)]
pub struct PauseMenuRoot;

/// Tags the "Resume" button in the pause menu.
#[derive(Component)]
pub struct PauseResumeButton;

/// Tags the "Save / Load" button in the pause menu.
#[derive(Component)]
pub struct PauseSaveButton;

/// Tags the "Quit" button in the pause menu.
#[derive(Component)]
pub struct PauseQuitButton;

/// Root node of the save-slot screen; despawned on `OnExit(SaveSelect)`.
#[derive(Component)]
pub struct SaveSelectRoot;

/// Tags the "SAVE" button for one slot.
#[derive(Component)]
pub struct SaveSlotButton(pub u8);

/// Tags the "LOAD" button for one slot.
#[derive(Component)]
pub struct LoadSlotButton(pub u8);

/// Tags the metadata label text for one slot.
#[derive(Component)]
pub struct SlotLabelText(pub u8);

/// Tags the "Back" button on the save-slot screen.
#[derive(Component)]
pub struct SaveSelectBackButton;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Restart" button in the game-over overlay.
#[derive(Component)]
pub struct GameOverRestartButton;

/// Tags the "Quit" button in the game-over overlay.
#[derive(Component)]
pub struct GameOverQuitButton;
