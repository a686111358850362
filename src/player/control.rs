//! Input systems: keyboard and gamepad movement intent, player movement.
//!
//! Input flows through the [`InputAxis`] resource rather than straight into
//! the movement system, so both devices share one code path and headless
//! tests can write the axis directly.

use bevy::input::gamepad::{GamepadAxis, GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::player::state::{InputAxis, Player, PreferredGamepad};
use crate::session::RunClock;

/// Left-stick magnitude below which gamepad input is ignored.
const GAMEPAD_DEADZONE: f32 = 0.15;

// ── Step 1: clear last frame's intent ─────────────────────────────────────────

/// Reset [`InputAxis`] at the top of the frame so device systems re-assert it.
pub fn clear_input_axis_system(mut axis: ResMut<InputAxis>) {
    axis.0 = Vec2::ZERO;
}

// ── Step 2a: keyboard ─────────────────────────────────────────────────────────

/// WASD / arrow keys → movement axis.
pub fn keyboard_to_axis_system(keys: Res<ButtonInput<KeyCode>>, mut axis: ResMut<InputAxis>) {
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if direction != Vec2::ZERO {
        axis.0 = direction.normalize();
    }
}

// ── Step 2b: gamepad ──────────────────────────────────────────────────────────

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!(
                    "[gamepad] Gamepad {:?} connected (now preferred)",
                    event.gamepad
                );
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] Gamepad {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// Preferred gamepad left stick → movement axis.
///
/// Overrides the keyboard when the stick is outside the deadzone; stick
/// magnitude carries through so gentle tilts walk slowly.
pub fn gamepad_to_axis_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    mut axis: ResMut<InputAxis>,
) {
    let Some(gamepad_entity) = preferred.0 else {
        return;
    };

    let Ok(gamepad) = gamepads.get(gamepad_entity) else {
        return;
    };

    let lx = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
    let ly = gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    let left_stick = Vec2::new(lx, ly);

    if left_stick.length() < GAMEPAD_DEADZONE {
        return;
    }

    axis.0 = left_stick.clamp_length_max(1.0);
}

// ── Step 3: movement ──────────────────────────────────────────────────────────

/// Move the player by the input axis and clamp inside the arena.
///
/// The clamp keeps the whole player circle on the field:
/// `[radius, width - radius]` × `[radius, height - radius]`, so a fully
/// degenerate axis leaves the player exactly where it was.
pub fn player_movement_system(
    clock: Res<RunClock>,
    config: Res<GameConfig>,
    axis: Res<InputAxis>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    let step = axis.0 * config.player_move_speed * clock.dt;
    let r = config.player_radius;
    transform.translation.x = (transform.translation.x + step.x).clamp(r, config.arena_width - r);
    transform.translation.y = (transform.translation.y + step.y).clamp(r, config.arena_height - r);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::state::PlayerHealth;

    fn movement_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(RunClock {
            elapsed: 0.0,
            dt: 0.1,
        });
        app.init_resource::<InputAxis>();
        app.add_systems(Update, player_movement_system);
        app
    }

    fn spawn_player_at(app: &mut App, x: f32, y: f32) -> Entity {
        app.world_mut()
            .spawn((Player, PlayerHealth::default(), Transform::from_xyz(x, y, 0.0)))
            .id()
    }

    #[test]
    fn axis_moves_player_by_speed_times_dt() {
        let mut app = movement_app();
        let player = spawn_player_at(&mut app, 800.0, 450.0);
        app.world_mut().resource_mut::<InputAxis>().0 = Vec2::X;
        app.update();
        let transform = app.world().get::<Transform>(player).unwrap();
        let expected = 800.0 + crate::constants::PLAYER_MOVE_SPEED * 0.1;
        assert!((transform.translation.x - expected).abs() < 1e-3);
        assert!((transform.translation.y - 450.0).abs() < 1e-3);
    }

    #[test]
    fn player_is_clamped_to_arena_bounds() {
        let mut app = movement_app();
        let player = spawn_player_at(&mut app, 30.0, 30.0);
        app.world_mut().resource_mut::<InputAxis>().0 = Vec2::new(-1.0, -1.0).normalize();
        for _ in 0..20 {
            app.update();
        }
        let transform = app.world().get::<Transform>(player).unwrap();
        let r = crate::constants::PLAYER_RADIUS;
        assert_eq!(transform.translation.x, r);
        assert_eq!(transform.translation.y, r);
    }

    #[test]
    fn zero_axis_leaves_player_in_place() {
        let mut app = movement_app();
        let player = spawn_player_at(&mut app, 800.0, 450.0);
        app.update();
        let transform = app.world().get::<Transform>(player).unwrap();
        assert_eq!(transform.translation.x, 800.0);
        assert_eq!(transform.translation.y, 450.0);
    }
}
