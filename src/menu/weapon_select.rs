use super::*;

use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::enemy::{Boss, BossArrow, BossBlade, BossOrb, Enemy, EnemySpawnState};
use crate::pickups::ExpOrb;
use crate::player::{spawn_player, InputAxis, PendingLevelUps, Player};
use crate::session::{Difficulty, RunClock};
use crate::weapons::{
    ActiveSweep, Arrow, Arsenal, HomingMissile, OrbitBlade, OrbitSpin, WeaponKind,
};

/// Roll the two starting-weapon cards and spawn the picker screen.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │              NIGHTFALL                      │
/// │         Choose your weapon                  │
/// │                                             │
/// │   ┌───────────┐       ┌───────────┐         │
/// │   │ 1. ORBIT  │       │ 2. VOLLEY │         │
/// │   │  blurb    │       │  blurb    │         │
/// │   └───────────┘       └───────────┘         │
/// │                                             │
/// │        1 / 2 or click to choose             │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_weapon_select(mut commands: Commands, mut offer: ResMut<StartingOffer>) {
    let mut kinds = WeaponKind::ALL.to_vec();
    kinds.shuffle(&mut rand::thread_rng());
    kinds.truncate(2);
    offer.0 = kinds.clone();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            WeaponSelectRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("NIGHTFALL"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Choose your starting weapon"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 48.0);

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(28.0),
                align_items: AlignItems::Stretch,
                ..default()
            })
            .with_children(|row| {
                for (index, kind) in kinds.iter().enumerate() {
                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(260.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            padding: UiRect::all(Val::Px(24.0)),
                            row_gap: Val::Px(10.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(card_bg()),
                        BorderColor::all(card_border()),
                        WeaponCardButton(index),
                    ))
                    .with_children(|card| {
                        card.spawn((
                            Text::new(format!("{}. {}", index + 1, kind.label())),
                            TextFont {
                                font_size: 22.0,
                                ..default()
                            },
                            TextColor(card_title_color()),
                        ));
                        card.spawn((
                            Text::new(kind.blurb()),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(card_desc_color()),
                        ));
                    });
                }
            });

            spacer(root, 48.0);

            root.spawn((
                Text::new("1 / 2 or click a card to choose"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Recursively despawn the weapon-select screen.
pub(super) fn cleanup_weapon_select(
    mut commands: Commands,
    query: Query<Entity, With<WeaponSelectRoot>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Clicking a card chooses the weapon at that card's offer index.
#[allow(clippy::type_complexity)]
pub(super) fn weapon_select_button_system(
    cards: Query<(&Interaction, &WeaponCardButton, &Children), Changed<Interaction>>,
    mut btn_text: Query<&mut TextColor>,
    offer: Res<StartingOffer>,
    mut choices: MessageWriter<StartingWeaponChoice>,
) {
    for (interaction, card, children) in cards.iter() {
        match interaction {
            Interaction::Pressed => {
                if let Some(&kind) = offer.0.get(card.0) {
                    choices.write(StartingWeaponChoice { kind });
                }
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(card_title_color());
                    }
                }
            }
        }
    }
}

/// Number keys 1 / 2 choose the corresponding card.
pub(super) fn weapon_select_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    offer: Res<StartingOffer>,
    mut choices: MessageWriter<StartingWeaponChoice>,
) {
    let index = if keys.just_pressed(KeyCode::Digit1) {
        0
    } else if keys.just_pressed(KeyCode::Digit2) {
        1
    } else {
        return;
    };
    if let Some(&kind) = offer.0.get(index) {
        choices.write(StartingWeaponChoice { kind });
    }
}

/// Tear down any previous run, equip the chosen weapon, spawn a fresh
/// player at the arena centre, and start playing.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub(super) fn apply_starting_weapon_system(
    mut commands: Commands,
    mut choices: MessageReader<StartingWeaponChoice>,
    config: Res<GameConfig>,
    leftovers: Query<
        Entity,
        Or<(
            With<Player>,
            With<Enemy>,
            With<ExpOrb>,
            With<Arrow>,
            With<HomingMissile>,
            With<OrbitBlade>,
            With<BossBlade>,
            With<BossArrow>,
            With<BossOrb>,
            With<Boss>,
        )>,
    >,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(choice) = choices.read().last().copied() else {
        return;
    };

    for entity in leftovers.iter() {
        commands.entity(entity).despawn();
    }
    commands.insert_resource(RunClock::default());
    commands.insert_resource(Difficulty::default());
    commands.insert_resource(EnemySpawnState::default());
    commands.insert_resource(PendingLevelUps::default());
    commands.insert_resource(InputAxis::default());
    commands.insert_resource(OrbitSpin::default());
    commands.insert_resource(ActiveSweep::default());
    commands.insert_resource(Arsenal::new(choice.kind));

    spawn_player(&mut commands, &config);
    next_state.set(GameState::Playing);
}
