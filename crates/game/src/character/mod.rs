pub mod config;
pub mod enemy;
pub mod health;
pub mod movement;
pub mod player;

use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use leafwing_input_manager::plugin::InputManagerPlugin;

use crate::{
    core::AppState,
    system_set::GameSystemSet,
};

use self::{
    config::{CharacterConfig, CharacterConfigs},
    enemy::{
        ai::behavior::{enemy_attack_system, enemy_movement_system, enemy_sprite_flip_system},
        create::attach_enemy_sprites,
        Boss, Enemy,
    },
    health::{
        apply_accumulated_damage, apply_death, collect_damage, BossDefeatedEvent, DamageEvent,
        EnemyDiedEvent, KnockbackImpulseConfig, PlayerDiedEvent,
    },
    movement::{apply_knockback_damping, KnockbackDampingConfig},
    player::{
        control::PlayerAction,
        create::attach_player_sprite,
        input::{apply_player_movement, read_player_inputs},
        Player,
    },
};

pub struct BaseCharacterGamePlugin;

impl Plugin for BaseCharacterGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<CharacterConfig>::new(&["ron"]));
        app.add_plugins(InputManagerPlugin::<PlayerAction>::default());

        app.init_resource::<CharacterConfigs>();
        app.init_resource::<KnockbackDampingConfig>();
        app.init_resource::<KnockbackImpulseConfig>();

        app.add_event::<DamageEvent>();
        app.add_event::<EnemyDiedEvent>();
        app.add_event::<PlayerDiedEvent>();
        app.add_event::<BossDefeatedEvent>();

        app.register_type::<Player>();
        app.register_type::<Enemy>();
        app.register_type::<Boss>();

        app.add_systems(
            FixedUpdate,
            (
                (read_player_inputs,).in_set(GameSystemSet::Input),
                (apply_player_movement,).in_set(GameSystemSet::Movement),
                (collect_damage, apply_accumulated_damage)
                    .chain()
                    .in_set(GameSystemSet::Damage),
                (apply_death,).in_set(GameSystemSet::DeathManagement),
                (apply_knockback_damping,)
                    .after(GameSystemSet::Weapon)
                    .before(GameSystemSet::EnemyAi),
                (enemy_movement_system, enemy_attack_system)
                    .chain()
                    .in_set(GameSystemSet::EnemyAi),
            )
                .run_if(in_state(AppState::InGame)),
        );

        // Visual touch-ups stay on the render clock.
        app.add_systems(
            Update,
            (
                attach_player_sprite,
                attach_enemy_sprites,
                enemy_sprite_flip_system,
            )
                .run_if(in_state(AppState::InGame)),
        );
    }
}
