//! Debug overlay for the wave controller.

use bevy::prelude::*;

use super::{WavePhase, WaveState};

/// Marker component for the wave debug text.
#[derive(Component)]
struct WaveDebugText;

/// Resource to toggle wave debug visibility.
#[derive(Resource, Default)]
pub struct WaveDebugEnabled(pub bool);

fn setup_wave_debug_ui(mut commands: Commands) {
    // Sits above the weapon readout in the bottom-left corner.
    commands.spawn((
        WaveDebugText,
        Text::new("Wave: --"),
        TextFont {
            font_size: 16.0,
            ..Default::default()
        },
        TextLayout::new_with_justify(JustifyText::Left),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(54.0),
            left: Val::Px(5.0),
            ..default()
        },
    ));
}

fn update_wave_debug_text(
    wave_state: Res<WaveState>,
    debug_enabled: Res<WaveDebugEnabled>,
    mut query: Query<(&mut Text, &mut Visibility), With<WaveDebugText>>,
) {
    for (mut text, mut visibility) in &mut query {
        if !debug_enabled.0 {
            *visibility = Visibility::Hidden;
            continue;
        }

        *visibility = Visibility::Visible;

        let phase_str = match wave_state.phase {
            WavePhase::Spawning => "SPAWN",
            WavePhase::Advancing => "NEXT",
            WavePhase::Complete => "DONE",
        };

        text.0 = format!(
            "Wave {:>2} | {} | Pending: {:>2} | Active: {:>2} | Down: {:>2}/{:<2} | Pts left: {:>3}",
            wave_state.current_wave,
            phase_str,
            wave_state.pending.len(),
            wave_state.active.len(),
            wave_state.destroyed,
            wave_state.total_this_wave,
            wave_state.budget_remaining,
        );
    }
}

fn toggle_wave_debug(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_enabled: ResMut<WaveDebugEnabled>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_enabled.0 = !debug_enabled.0;
        info!("Wave debug UI: {}", if debug_enabled.0 { "ON" } else { "OFF" });
    }
}

/// Plugin that adds the wave debug overlay.
pub struct WaveDebugPlugin;

impl Plugin for WaveDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveDebugEnabled>();
        app.add_systems(Startup, setup_wave_debug_ui);
        app.add_systems(Update, (toggle_wave_debug, update_wave_debug_text));
    }
}
