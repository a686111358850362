use bevy::prelude::*;

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};

/// Setup camera for 2D rendering, centred on the arena.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0, 0.0),
    ));
}
