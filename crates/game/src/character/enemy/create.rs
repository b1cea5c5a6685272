use bevy::prelude::*;

use crate::{
    character::{
        config::CharacterConfigs,
        health::Health,
        movement::{Facing, GroundLevel, Velocity},
    },
    waves::WaveEnemy,
};

use super::{
    ai::state::{AiProfile, AttackTimer, EnemyState},
    Enemy,
};

/// Spawns one enemy of the named kind. Unknown kinds fall back to default
/// stats so a config typo degrades instead of dropping the spawn.
pub fn spawn_enemy(
    name: &str,
    position: Vec2,
    facing: Vec2,
    wave: u32,
    configs: &CharacterConfigs,
    commands: &mut Commands,
) -> Entity {
    let config = match configs.get(name) {
        Some(config) => config.clone(),
        None => {
            warn!(kind = name, "unknown enemy kind, using defaults");
            Default::default()
        }
    };
    let ai = config.ai.unwrap_or_default();

    commands
        .spawn((
            Enemy,
            Name::new(name.to_string()),
            WaveEnemy { spawned_wave: wave },
            Health::new(config.health),
            Velocity::default(),
            Facing(facing),
            GroundLevel(position.y),
            AiProfile(ai),
            EnemyState::default(),
            AttackTimer::default(),
            Transform::from_xyz(position.x, position.y, 1.0),
            Visibility::default(),
        ))
        .id()
}

/// Fills in sprites for freshly spawned enemies outside the fixed loop.
pub fn attach_enemy_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configs: Res<CharacterConfigs>,
    enemies: Query<(Entity, &Name), (Added<Enemy>, Without<Sprite>)>,
) {
    for (entity, name) in enemies.iter() {
        let sprite_path = configs
            .get(name.as_str())
            .and_then(|c| c.sprite.clone());
        if let Some(path) = sprite_path {
            if let Some(mut e) = commands.get_entity(entity) {
                e.insert(Sprite::from_image(asset_server.load(path)));
            }
        }
    }
}
