use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use crate::{
    character::{
        config::CharacterConfigs,
        health::Health,
        movement::{Facing, GroundLevel, Velocity},
    },
    weapons::{Weapon, WeaponConfig},
};

use super::{
    control::{get_input_map, PlayerAction},
    input::{DashState, MoveIntent},
    Player,
};

pub fn spawn_player(
    commands: &mut Commands,
    configs: &CharacterConfigs,
    weapon_config: &WeaponConfig,
    position: Vec2,
) -> Entity {
    let config = configs.get("player").cloned().unwrap_or_default();

    commands
        .spawn((
            Player,
            Health::new(config.health),
            Velocity::default(),
            Facing(Vec2::X),
            GroundLevel(position.y),
            MoveIntent::default(),
            DashState::default(),
            Weapon::new(weapon_config),
            get_input_map(),
            ActionState::<PlayerAction>::default(),
            Transform::from_xyz(position.x, position.y, 1.0),
            Visibility::default(),
        ))
        .id()
}

/// Attaches the configured sprite once the player exists. Kept out of spawn
/// so headless tests never need the asset server.
pub fn attach_player_sprite(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<CharacterConfigs>,
    players: Query<Entity, (Added<Player>, Without<Sprite>)>,
) {
    for entity in players.iter() {
        let Some(path) = configs.get("player").and_then(|c| c.sprite.clone()) else {
            continue;
        };
        if let Some(mut e) = commands.get_entity(entity) {
            e.insert(Sprite::from_image(asset_server.load(path)));
        }
    }
}
