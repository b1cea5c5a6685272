use bevy::prelude::*;

use crate::{
    character::{health::Health, player::Player},
    core::AppState,
    waves::{WavePhase, WaveState},
    weapons::Weapon,
};

#[derive(Component)]
struct WaveText;

#[derive(Component)]
struct HealthText;

#[derive(Component)]
struct AmmoText;

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        WaveText,
        Text::new("Wave 1"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
    commands.spawn((
        HealthText,
        Text::new("HP"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.3, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
    commands.spawn((
        AmmoText,
        Text::new("Ammo"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.8, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(34.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn update_hud(
    wave_state: Res<WaveState>,
    player: Query<(&Health, &Weapon), With<Player>>,
    mut wave_text: Query<&mut Text, (With<WaveText>, Without<HealthText>, Without<AmmoText>)>,
    mut health_text: Query<&mut Text, (With<HealthText>, Without<WaveText>, Without<AmmoText>)>,
    mut ammo_text: Query<&mut Text, (With<AmmoText>, Without<WaveText>, Without<HealthText>)>,
) {
    for mut text in &mut wave_text {
        text.0 = match wave_state.phase {
            WavePhase::Complete => "All waves cleared".to_string(),
            _ => format!(
                "Wave {}  {}/{}",
                wave_state.current_wave.max(1),
                wave_state.destroyed,
                wave_state.total_this_wave
            ),
        };
    }

    let Ok((health, weapon)) = player.get_single() else {
        return;
    };
    for mut text in &mut health_text {
        text.0 = format!("HP {}/{}", health.current.max(0), health.max);
    }
    for mut text in &mut ammo_text {
        text.0 = if weapon.reload_spin_frames_left > 0 {
            "Reloading...".to_string()
        } else {
            format!("{} / {}", weapon.rounds_in_mag, weapon.reserve)
        };
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::InGame), setup_hud);
        app.add_systems(Update, update_hud.run_if(in_state(AppState::InGame)));
    }
}
