use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy::winit::cursor::{CursorIcon, CustomCursor};

use crate::{core::AppState, global_asset::GlobalAsset};

/// Hides and locks the cursor for play, shows a themed cursor in menus.
pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::InGame), grab_cursor);
        app.add_systems(OnExit(AppState::InGame), release_cursor);
        app.add_systems(
            Update,
            themed_cursor.run_if(not(in_state(AppState::InGame))),
        );
    }
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in windows.iter_mut() {
        window.cursor_options.visible = false;
        window.cursor_options.grab_mode = CursorGrabMode::Confined;
    }
}

fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in windows.iter_mut() {
        window.cursor_options.visible = true;
        window.cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Swaps the cursor image while the mouse button is held. Skipped until the
/// cursor textures have streamed in.
fn themed_cursor(
    mut commands: Commands,
    assets: Option<Res<GlobalAsset>>,
    asset_server: Res<AssetServer>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    let Some(assets) = assets else {
        return;
    };
    let handle = if buttons.pressed(MouseButton::Left) {
        &assets.cursor_click
    } else {
        &assets.cursor_normal
    };
    if !asset_server.load_state(handle).is_loaded() {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) && !buttons.just_released(MouseButton::Left) {
        return;
    }

    for window in windows.iter() {
        commands
            .entity(window)
            .insert(CursorIcon::Custom(CustomCursor::Image {
                handle: handle.clone(),
                hotspot: (4, 4),
            }));
    }
}
