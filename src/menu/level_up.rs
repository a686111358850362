use super::*;

use crate::player::PendingLevelUps;
use crate::weapons::Arsenal;

/// Spawn the upgrade-choice overlay centred over the frozen world.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ ░░░░░░░░░ semi-transparent overlay ░░░░░░░░ │
/// │ ░░░   ┌───────────────────────────┐   ░░░░ │
/// │ ░░░   │        LEVEL UP!          │   ░░░░ │
/// │ ░░░   │ [1. ...] [2. ...] [3. ...]│   ░░░░ │
/// │ ░░░   │   1 / 2 / 3 to choose     │   ░░░░ │
/// │ ░░░   └───────────────────────────┘   ░░░░ │
/// └─────────────────────────────────────────────┘
/// ```
///
/// Split from the `OnEnter` wrapper so the choice handler can rebuild the
/// cards in place when more level-ups are queued (an identity transition
/// would not re-fire `OnEnter(LevelUp)`).
pub(super) fn spawn_level_up_screen(commands: &mut Commands, options: &UpgradeOptions) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.70)),
            ZIndex(200),
            LevelUpRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(36.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.04, 0.07)),
                    BorderColor::all(card_border()),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("LEVEL UP!"),
                        TextFont {
                            font_size: 38.0,
                            ..default()
                        },
                        TextColor(title_color()),
                    ));

                    spacer(card, 4.0);

                    card.spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(18.0),
                        align_items: AlignItems::Stretch,
                        ..default()
                    })
                    .with_children(|row| {
                        for (index, option) in options.0.iter().enumerate() {
                            row.spawn((
                                Button,
                                Node {
                                    width: Val::Px(220.0),
                                    flex_direction: FlexDirection::Column,
                                    align_items: AlignItems::Center,
                                    padding: UiRect::all(Val::Px(18.0)),
                                    row_gap: Val::Px(8.0),
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(card_bg()),
                                BorderColor::all(card_border()),
                                UpgradeCardButton(index),
                            ))
                            .with_children(|btn| {
                                btn.spawn((
                                    Text::new(format!("{}. {}", index + 1, option.title)),
                                    TextFont {
                                        font_size: 18.0,
                                        ..default()
                                    },
                                    TextColor(card_title_color()),
                                ));
                                btn.spawn((
                                    Text::new(option.detail.clone()),
                                    TextFont {
                                        font_size: 13.0,
                                        ..default()
                                    },
                                    TextColor(card_desc_color()),
                                ));
                            });
                        }
                    });

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("1 / 2 / 3 or click to choose"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

pub(super) fn setup_level_up(mut commands: Commands, options: Res<UpgradeOptions>) {
    spawn_level_up_screen(&mut commands, &options);
}

/// Recursively despawn the level-up overlay.
pub(super) fn cleanup_level_up(mut commands: Commands, query: Query<Entity, With<LevelUpRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Clicking a card chooses the option at that card's index.
#[allow(clippy::type_complexity)]
pub(super) fn level_up_button_system(
    cards: Query<(&Interaction, &UpgradeCardButton, &Children), Changed<Interaction>>,
    mut btn_text: Query<&mut TextColor>,
    mut choices: MessageWriter<UpgradeChoice>,
) {
    for (interaction, card, children) in cards.iter() {
        match interaction {
            Interaction::Pressed => {
                choices.write(UpgradeChoice { index: card.0 });
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

/// Number keys 1 / 2 / 3 choose the corresponding card.
pub(super) fn level_up_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    options: Res<UpgradeOptions>,
    mut choices: MessageWriter<UpgradeChoice>,
) {
    let index = if keys.just_pressed(KeyCode::Digit1) {
        0
    } else if keys.just_pressed(KeyCode::Digit2) {
        1
    } else if keys.just_pressed(KeyCode::Digit3) {
        2
    } else {
        return;
    };
    if index < options.0.len() {
        choices.write(UpgradeChoice { index });
    }
}

/// Apply the chosen upgrade and either roll the next set of cards (more
/// level-ups queued) or resume play.
#[allow(clippy::too_many_arguments)]
pub(super) fn apply_upgrade_choice_system(
    mut commands: Commands,
    mut choices: MessageReader<UpgradeChoice>,
    mut arsenal: ResMut<Arsenal>,
    mut options: ResMut<UpgradeOptions>,
    mut pending: ResMut<PendingLevelUps>,
    roots: Query<Entity, With<LevelUpRoot>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(choice) = choices.read().last().copied() else {
        return;
    };
    let Some(option) = options.0.get(choice.index) else {
        return;
    };

    arsenal.apply(option.upgrade);
    pending.0 = pending.0.saturating_sub(1);

    if pending.0 == 0 {
        next_state.set(GameState::Playing);
        return;
    }

    // More choices owed: rebuild the cards in place.  Setting LevelUp again
    // is an identity transition and would not re-fire OnEnter.
    let regenerated =
        crate::weapons::generate_upgrade_options(&arsenal, &mut rand::thread_rng());
    if regenerated.is_empty() {
        pending.0 = 0;
        next_state.set(GameState::Playing);
        return;
    }
    options.0 = regenerated;
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
    spawn_level_up_screen(&mut commands, &options);
}
