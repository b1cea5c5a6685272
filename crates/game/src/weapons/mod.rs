//! Hitscan sidearm with a magazine, reserve ammo, recoil, and a reload spin.

use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use leafwing_input_manager::prelude::ActionState;
use serde::{Deserialize, Serialize};

use utils::frame::FrameCount;

use crate::{
    audio::SfxEvent,
    character::{
        enemy::Enemy,
        health::DamageEvent,
        movement::Facing,
        player::{control::PlayerAction, Player},
    },
    core::AppState,
    system_set::GameSystemSet,
};

#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub magazine_size: u32,
    pub starting_reserve: u32,
    pub fire_cooldown_frames: u32,
    pub damage: i32,
    /// Max hitscan distance.
    pub range: f32,
    /// Half-width of the hitscan ray.
    pub hit_radius: f32,
    /// Rounds granted by one ammo pickup.
    pub pickup_rounds: u32,
    pub recoil_kick: f32,
    pub recoil_clamp: f32,
    /// Fraction of the recoil offset recovered per frame.
    pub recoil_return: f32,
    pub reload_spin_frames: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            magazine_size: 8,
            starting_reserve: 24,
            fire_cooldown_frames: 12,
            damage: 5,
            range: 420.0,
            hit_radius: 10.0,
            pickup_rounds: 12,
            recoil_kick: 4.0,
            recoil_clamp: 12.0,
            recoil_return: 0.3,
            reload_spin_frames: 45,
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Weapon {
    pub rounds_in_mag: u32,
    pub reserve: u32,
    pub next_fire_frame: u32,
    /// Backward offset of the weapon sprite from recoil, always <= 0.
    pub recoil_offset: f32,
    pub reload_spin_frames_left: u32,
}

impl Weapon {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            rounds_in_mag: config.magazine_size,
            reserve: config.starting_reserve,
            ..Weapon::default()
        }
    }

    /// Tops the magazine up from the reserve. Returns false when there is
    /// nothing to do, so no reload animation plays.
    pub fn try_reload(&mut self, config: &WeaponConfig) -> bool {
        let needed = config.magazine_size.saturating_sub(self.rounds_in_mag);
        if needed == 0 || self.reserve == 0 {
            return false;
        }
        let moved = needed.min(self.reserve);
        self.rounds_in_mag += moved;
        self.reserve -= moved;
        self.reload_spin_frames_left = config.reload_spin_frames;
        true
    }

    pub fn add_reserve(&mut self, rounds: u32) {
        self.reserve += rounds;
    }
}

/// Fires a hitscan ray in the facing direction and damages the nearest enemy
/// cylinder it crosses. Dry fire is silent.
pub fn weapon_fire_system(
    frame: Res<FrameCount>,
    config: Res<WeaponConfig>,
    mut players: Query<
        (&ActionState<PlayerAction>, &mut Weapon, &Transform, &Facing),
        With<Player>,
    >,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    mut damage: EventWriter<DamageEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for (actions, mut weapon, transform, facing) in players.iter_mut() {
        if !actions.just_pressed(&PlayerAction::Fire) || frame.frame < weapon.next_fire_frame {
            continue;
        }
        if weapon.rounds_in_mag == 0 || weapon.reload_spin_frames_left > 0 {
            continue;
        }

        weapon.rounds_in_mag -= 1;
        weapon.next_fire_frame = frame.frame + config.fire_cooldown_frames;
        weapon.recoil_offset = (weapon.recoil_offset - config.recoil_kick).max(-config.recoil_clamp);
        sfx.send(SfxEvent::Fire);

        let origin = transform.translation.truncate();
        let direction = facing.0.normalize_or_zero();
        if direction == Vec2::ZERO {
            continue;
        }

        let mut best: Option<(Entity, f32, Vec2)> = None;
        for (entity, enemy_transform) in enemies.iter() {
            let to_enemy = enemy_transform.translation.truncate() - origin;
            let along = to_enemy.dot(direction);
            if along < 0.0 || along > config.range {
                continue;
            }
            let perpendicular = (to_enemy - direction * along).length();
            if perpendicular > config.hit_radius {
                continue;
            }
            if best.map(|(_, t, _)| along < t).unwrap_or(true) {
                best = Some((entity, along, origin));
            }
        }
        if let Some((entity, _, from)) = best {
            damage.send(DamageEvent {
                target: entity,
                amount: config.damage,
                from,
            });
        }
    }
}

pub fn weapon_reload_system(
    config: Res<WeaponConfig>,
    mut players: Query<(&ActionState<PlayerAction>, &mut Weapon), With<Player>>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for (actions, mut weapon) in players.iter_mut() {
        if actions.just_pressed(&PlayerAction::Reload) && weapon.try_reload(&config) {
            sfx.send(SfxEvent::Reload);
        }
    }
}

/// Recovers recoil and winds down the reload spin each frame.
pub fn weapon_recovery_system(config: Res<WeaponConfig>, mut weapons: Query<&mut Weapon>) {
    for mut weapon in weapons.iter_mut() {
        weapon.recoil_offset *= 1.0 - config.recoil_return;
        if weapon.recoil_offset > -0.01 {
            weapon.recoil_offset = 0.0;
        }
        weapon.reload_spin_frames_left = weapon.reload_spin_frames_left.saturating_sub(1);
    }
}

pub struct BaseWeaponGamePlugin;

impl Plugin for BaseWeaponGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<WeaponConfig>::new(&["ron"]));
        app.add_systems(
            FixedUpdate,
            (weapon_fire_system, weapon_reload_system, weapon_recovery_system)
                .chain()
                .in_set(GameSystemSet::Weapon)
                .run_if(in_state(AppState::InGame)),
        );
    }
}
