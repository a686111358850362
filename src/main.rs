use bevy::prelude::*;
use bevy::window::WindowResolution;

use nightfall::{config, graphics, hud, menu, render, save, GameplayPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Nightfall".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.03, 0.02, 0.05)))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/tuning.toml (if present) at startup.
        .insert_resource(config::GameConfig::default())
        .add_plugins(menu::MenuPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(GameplayPlugin)
        .add_plugins(render::RenderPlugin)
        .add_plugins(hud::HudPlugin)
        .add_systems(
            Startup,
            (
                config::load_game_config,
                graphics::setup_camera.after(config::load_game_config),
            ),
        )
        .run();
}
