use bevy::prelude::*;

use crate::{
    character::{
        enemy::Boss,
        health::Health,
    },
    core::AppState,
};

#[derive(Component)]
struct BossBarRoot;

#[derive(Component)]
struct BossBarFill;

/// Spawns the bar when a boss appears and tears it down when none is left.
fn sync_boss_bar(
    mut commands: Commands,
    boss: Query<(), With<Boss>>,
    bar: Query<Entity, With<BossBarRoot>>,
) {
    if !boss.is_empty() && bar.is_empty() {
        spawn_boss_bar(&mut commands);
    }
    if boss.is_empty() {
        for entity in &bar {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn spawn_boss_bar(commands: &mut Commands) {
    commands
        .spawn((
            BossBarRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Percent(25.0),
                width: Val::Percent(50.0),
                height: Val::Px(18.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor(Color::srgb(0.8, 0.8, 0.9)),
            BackgroundColor(Color::srgba(0.05, 0.05, 0.1, 0.8)),
        ))
        .with_children(|parent| {
            parent.spawn((
                BossBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.7, 0.15, 0.9)),
            ));
        });
}

/// Shrinks the fill to the boss's remaining health fraction.
fn update_boss_bar(
    boss: Query<&Health, With<Boss>>,
    mut fill: Query<&mut Node, With<BossBarFill>>,
) {
    let Ok(health) = boss.get_single() else {
        return;
    };
    let fraction = if health.max > 0 {
        health.current.max(0) as f32 / health.max as f32
    } else {
        0.0
    };
    for mut node in &mut fill {
        node.width = Val::Percent(fraction * 100.0);
    }
}

pub struct BossBarPlugin;

impl Plugin for BossBarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_boss_bar, update_boss_bar).run_if(in_state(AppState::InGame)),
        );
    }
}
