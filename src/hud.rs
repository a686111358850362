//! In-run HUD: timer, HP, experience, weapon loadout, and the live enemy
//! count.  Text-only nodes in the screen corners, updated in place.

use bevy::prelude::*;

use crate::enemy::Enemy;
use crate::menu::{format_elapsed, GameState};
use crate::player::{Player, PlayerHealth, PlayerProgress};
use crate::session::RunClock;
use crate::weapons::Arsenal;

/// Marker for the run-timer text in the top centre.
#[derive(Component)]
pub struct HudTimerDisplay;

/// Marker for the HP readout in the top left.
#[derive(Component)]
pub struct HudHealthDisplay;

/// Marker for the level / experience readout under the HP line.
#[derive(Component)]
pub struct HudExpDisplay;

/// Marker for the weapon loadout line in the bottom left.
#[derive(Component)]
pub struct HudWeaponsDisplay;

/// Marker for the enemy counter in the top right.
#[derive(Component)]
pub struct HudEnemyCountDisplay;

fn hud_text(parent: &mut ChildSpawnerCommands<'_>, initial: &str, color: Color) {
    parent.spawn((
        Text::new(initial),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(color),
    ));
}

/// Spawn the HUD nodes once at startup; they live for the whole session and
/// are simply stale while a menu covers them.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Percent(50.0),
                ..default()
            },
            HudTimerDisplay,
        ))
        .with_children(|parent| {
            hud_text(parent, "00:00", Color::srgb(0.95, 0.95, 0.95));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                ..default()
            },
            HudHealthDisplay,
        ))
        .with_children(|parent| {
            hud_text(parent, "HP 100 / 100", Color::srgb(0.95, 0.40, 0.40));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(34.0),
                left: Val::Px(10.0),
                ..default()
            },
            HudExpDisplay,
        ))
        .with_children(|parent| {
            hud_text(parent, "LV1  0 / 200", Color::srgb(0.40, 0.90, 0.50));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                left: Val::Px(10.0),
                ..default()
            },
            HudWeaponsDisplay,
        ))
        .with_children(|parent| {
            hud_text(parent, "", Color::srgb(0.75, 0.75, 0.90));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                ..default()
            },
            HudEnemyCountDisplay,
        ))
        .with_children(|parent| {
            hud_text(parent, "Enemies: 0", Color::srgb(0.80, 0.60, 0.60));
        });
}

fn set_text(children: &Children, text_query: &mut Query<&mut Text>, value: String) {
    for child in children.iter() {
        if let Ok(mut text) = text_query.get_mut(child) {
            *text = Text::new(value.clone());
        }
    }
}

pub fn update_hud_timer_system(
    clock: Res<RunClock>,
    parent_query: Query<&Children, With<HudTimerDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    for children in parent_query.iter() {
        set_text(children, &mut text_query, format_elapsed(clock.elapsed));
    }
}

pub fn update_hud_player_system(
    player: Query<(&PlayerHealth, &PlayerProgress), With<Player>>,
    hp_query: Query<&Children, With<HudHealthDisplay>>,
    exp_query: Query<&Children, With<HudExpDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let Ok((health, progress)) = player.single() else {
        return;
    };
    for children in hp_query.iter() {
        set_text(
            children,
            &mut text_query,
            format!("HP {:.0} / {:.0}", health.hp, health.max_hp),
        );
    }
    for children in exp_query.iter() {
        set_text(
            children,
            &mut text_query,
            format!(
                "LV{}  {} / {}",
                progress.level, progress.exp, progress.exp_to_next
            ),
        );
    }
}

pub fn update_hud_weapons_system(
    arsenal: Res<Arsenal>,
    parent_query: Query<&Children, With<HudWeaponsDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !arsenal.is_changed() {
        return;
    }
    let line = arsenal
        .slots
        .iter()
        .map(|slot| format!("{} LV{}", slot.kind.label(), slot.level + 1))
        .collect::<Vec<_>>()
        .join("   ");
    for children in parent_query.iter() {
        set_text(children, &mut text_query, line.clone());
    }
}

pub fn update_hud_enemy_count_system(
    enemies: Query<&Enemy>,
    parent_query: Query<&Children, With<HudEnemyCountDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let count = enemies.iter().filter(|enemy| enemy.alive).count();
    for children in parent_query.iter() {
        set_text(children, &mut text_query, format!("Enemies: {count}"));
    }
}

/// Registers the HUD setup and its per-frame update systems.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud).add_systems(
            Update,
            (
                update_hud_timer_system,
                update_hud_player_system,
                update_hud_weapons_system,
                update_hud_enemy_count_system,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
