use bevy::prelude::*;

use crate::audio::SfxEvent;
use crate::character::health::{BossDefeatedEvent, PlayerDiedEvent};
use crate::core::AppState;
use crate::waves::WaveEvent;

pub struct GameOverUiPlugin;

impl Plugin for GameOverUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_player_death, handle_victory).run_if(in_state(AppState::InGame)),
        );
        app.add_systems(OnEnter(AppState::GameOver), spawn_game_over_ui);
        app.add_systems(OnEnter(AppState::Victory), spawn_victory_ui);
        app.add_systems(
            Update,
            button_system.run_if(in_state(AppState::GameOver).or(in_state(AppState::Victory))),
        );
    }
}

#[derive(Component)]
struct EndScreenRoot;

#[derive(Component)]
struct RestartButton;

fn handle_player_death(
    mut events: EventReader<PlayerDiedEvent>,
    mut app_state: ResMut<NextState<AppState>>,
) {
    if events.read().next().is_some() {
        app_state.set(AppState::GameOver);
    }
}

fn handle_victory(
    mut events: EventReader<WaveEvent>,
    mut boss_events: EventReader<BossDefeatedEvent>,
    mut app_state: ResMut<NextState<AppState>>,
) {
    // The boss falling ends the run on the spot, without waiting for the
    // final wave's timer.
    if boss_events.read().next().is_some() {
        info!("boss defeated, run complete");
        app_state.set(AppState::Victory);
        return;
    }
    for event in events.read() {
        if let WaveEvent::Completed { wave } = event {
            info!(wave, "run complete");
            app_state.set(AppState::Victory);
        }
    }
}

fn spawn_game_over_ui(mut commands: Commands) {
    spawn_end_screen(
        &mut commands,
        "GAME OVER",
        Color::srgba(0.5, 0.0, 0.0, 0.5),
    );
}

fn spawn_victory_ui(mut commands: Commands) {
    spawn_end_screen(
        &mut commands,
        "YOU SURVIVED",
        Color::srgba(0.0, 0.2, 0.4, 0.5),
    );
}

fn spawn_end_screen(commands: &mut Commands, title: &str, tint: Color) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(tint),
            EndScreenRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title.to_string()),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(65.0),
                        margin: UiRect::top(Val::Px(40.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.3, 0.3, 0.3)),
                    RestartButton,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new("Restart"),
                        TextFont {
                            font_size: 30.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn button_system(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<RestartButton>),
    >,
    mut sfx: EventWriter<SfxEvent>,
) {
    for (interaction, mut color) in &mut interaction_query {
        match *interaction {
            Interaction::Pressed => {
                sfx.send(SfxEvent::ButtonClick);
                // Restart means relaunch; the launcher script handles it.
                std::process::exit(0);
            }
            Interaction::Hovered => {
                *color = BackgroundColor(Color::srgb(0.4, 0.4, 0.4));
            }
            Interaction::None => {
                *color = BackgroundColor(Color::srgb(0.3, 0.3, 0.3));
            }
        }
    }
}
