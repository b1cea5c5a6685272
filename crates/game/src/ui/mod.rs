use bevy::prelude::*;

pub mod boss_bar;
pub mod cursor;
pub mod game_over;
pub mod hud;

pub struct GameUiPlugin;

impl Plugin for GameUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(hud::HudPlugin);
        app.add_plugins(boss_bar::BossBarPlugin);
        app.add_plugins(game_over::GameOverUiPlugin);
        app.add_plugins(cursor::CursorPlugin);
    }
}
