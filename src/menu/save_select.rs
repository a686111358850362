use super::*;

use crate::save::{
    load_slot, slot_metadata, PendingLoadedSnapshot, SaveSlotRequest, SAVE_SLOT_COUNT,
};

fn slot_label(slot: u8) -> String {
    let meta = slot_metadata(slot);
    match meta.status.as_str() {
        "READY" => format!(
            "LV{}  ·  {}  ·  {}",
            meta.level.unwrap_or(1),
            format_elapsed(meta.elapsed_secs.unwrap_or(0.0)),
            format_saved_at(meta.saved_at_unix.unwrap_or(0)),
        ),
        other => other.to_string(),
    }
}

/// Spawn the save-slot screen: one row per slot with its metadata label and
/// SAVE / LOAD buttons, plus a Back button.
pub(super) fn setup_save_select(mut commands: Commands) {
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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(250),
            SaveSelectRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(36.0)),
                        row_gap: Val::Px(14.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(520.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.04, 0.07)),
                    BorderColor::all(slot_border()),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("SAVE SLOTS"),
                        TextFont {
                            font_size: 34.0,
                            ..default()
                        },
                        TextColor(title_color()),
                    ));

                    spacer(card, 4.0);

                    for slot in 1..=SAVE_SLOT_COUNT {
                        card.spawn(Node {
                            flex_direction: FlexDirection::Row,
                            column_gap: Val::Px(12.0),
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|row| {
                            row.spawn((
                                Text::new(format!("SLOT {slot}")),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(subtitle_color()),
                            ));

                            row.spawn((
                                Text::new(slot_label(slot)),
                                TextFont {
                                    font_size: 13.0,
                                    ..default()
                                },
                                TextColor(hint_color()),
                                SlotLabelText(slot),
                            ));

                            row.spawn((
                                Button,
                                Node {
                                    width: Val::Px(72.0),
                                    height: Val::Px(38.0),
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(resume_bg()),
                                BorderColor::all(resume_border()),
                                SaveSlotButton(slot),
                            ))
                            .with_children(|btn| {
                                btn.spawn((
                                    Text::new("SAVE"),
                                    TextFont {
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(resume_text()),
                                ));
                            });

                            row.spawn((
                                Button,
                                Node {
                                    width: Val::Px(72.0),
                                    height: Val::Px(38.0),
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(slot_bg()),
                                BorderColor::all(slot_border()),
                                LoadSlotButton(slot),
                            ))
                            .with_children(|btn| {
                                btn.spawn((
                                    Text::new("LOAD"),
                                    TextFont {
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(slot_text()),
                                ));
                            });
                        });
                    }

                    spacer(card, 4.0);

                    card.spawn((
                        Button,
                        Node {
                            width: Val::Px(160.0),
                            height: Val::Px(42.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(back_bg()),
                        BorderColor::all(back_border()),
                        SaveSelectBackButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("BACK"),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(back_text()),
                        ));
                    });
                });
        });
}

/// Recursively despawn the save-slot screen.
pub(super) fn cleanup_save_select(
    mut commands: Commands,
    query: Query<Entity, With<SaveSelectRoot>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle SAVE / LOAD / Back presses on the slot screen.
///
/// - **SAVE n** → emits [`SaveSlotRequest`]; the save system writes the file.
/// - **LOAD n** → parses the slot; on success stages it in
///   [`PendingLoadedSnapshot`] and resumes play, where it is applied.
/// - **BACK** → returns to the pause menu.
#[allow(clippy::type_complexity)]
pub(super) fn save_select_button_system(
    save_query: Query<(&Interaction, &SaveSlotButton, &Children), Changed<Interaction>>,
    load_query: Query<(&Interaction, &LoadSlotButton, &Children), Changed<Interaction>>,
    back_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<SaveSelectBackButton>),
    >,
    mut btn_text: Query<&mut TextColor>,
    mut save_writer: MessageWriter<SaveSlotRequest>,
    mut pending: ResMut<PendingLoadedSnapshot>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, button, children) in save_query.iter() {
        match interaction {
            Interaction::Pressed => {
                save_writer.write(SaveSlotRequest { slot: button.0 });
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
                        *color = TextColor(resume_text());
                    }
                }
            }
        }
    }

    for (interaction, button, children) in load_query.iter() {
        match interaction {
            Interaction::Pressed => match load_slot(button.0) {
                Ok(snapshot) => {
                    pending.0 = Some(snapshot);
                    next_state.set(GameState::Playing);
                }
                Err(err) => {
                    warn!("Cannot load slot {}: {}", button.0, err);
                }
            },
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
                        *color = TextColor(slot_text());
                    }
                }
            }
        }
    }

    for (interaction, children) in back_query.iter() {
        match interaction {
            Interaction::Pressed => {
                next_state.set(GameState::Paused);
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
                        *color = TextColor(back_text());
                    }
                }
            }
        }
    }
}

/// Refresh slot metadata labels after a save request lands.
///
/// The save system consumes [`SaveSlotRequest`] on the same frame; reading
/// the freshly-written file here one frame later keeps the labels honest.
pub(super) fn refresh_slot_labels_system(
    mut requests: MessageReader<SaveSlotRequest>,
    mut labels: Query<(&SlotLabelText, &mut Text)>,
) {
    if requests.read().count() == 0 {
        return;
    }
    for (label, mut text) in labels.iter_mut() {
        *text = Text::new(slot_label(label.0));
    }
}
