use bevy::prelude::*;

pub(super) fn title_color() -> Color {
    Color::srgb(0.92, 0.30, 0.30)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}

pub(super) fn card_bg() -> Color {
    Color::srgb(0.09, 0.06, 0.14)
}
pub(super) fn card_border() -> Color {
    Color::srgb(0.45, 0.22, 0.62)
}
pub(super) fn card_title_color() -> Color {
    Color::srgb(0.92, 0.85, 1.0)
}
pub(super) fn card_desc_color() -> Color {
    Color::srgb(0.52, 0.48, 0.65)
}

pub(super) fn resume_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub(super) fn resume_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub(super) fn resume_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}

pub(super) fn slot_bg() -> Color {
    Color::srgb(0.10, 0.18, 0.36)
}
pub(super) fn slot_border() -> Color {
    Color::srgb(0.22, 0.44, 0.78)
}
pub(super) fn slot_text() -> Color {
    Color::srgb(0.65, 0.80, 1.0)
}

pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}

pub(super) fn back_bg() -> Color {
    Color::srgb(0.12, 0.12, 0.18)
}
pub(super) fn back_border() -> Color {
    Color::srgb(0.30, 0.30, 0.46)
}
pub(super) fn back_text() -> Color {
    Color::srgb(0.55, 0.55, 0.70)
}

/// `MM:SS` run-time label for the HUD and the game-over screen.
pub fn format_elapsed(secs: f32) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub(super) fn format_saved_at(unix_secs: u64) -> String {
    if unix_secs == 0 {
        "saved: unknown".to_string()
    } else {
        format!("saved: unix {unix_secs}")
    }
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(0.0), "00:00");
        assert_eq!(format_elapsed(59.9), "00:59");
        assert_eq!(format_elapsed(61.0), "01:01");
        assert_eq!(format_elapsed(-3.0), "00:00");
    }
}
