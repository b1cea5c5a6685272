//! World pickups: medkits and ammo boxes, plus their spawners.

pub mod spawner;

use bevy::prelude::*;

use utils::frame::TICK_SECONDS;

use crate::{
    audio::SfxEvent,
    character::{health::Health, player::Player},
    core::AppState,
    system_set::GameSystemSet,
    weapons::Weapon,
};

#[derive(Component, Debug, Clone, Copy)]
pub enum Pickup {
    Medkit { heal: i32 },
    Ammo { rounds: u32 },
}

/// Collection radius around the player's center.
pub const PICKUP_RADIUS: f32 = 18.0;

/// Cosmetic rotation for floating pickups.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spinner {
    pub degrees_per_second: f32,
}

pub fn spin_pickups(mut query: Query<(&Spinner, &mut Transform)>) {
    for (spinner, mut transform) in query.iter_mut() {
        transform.rotate_z(spinner.degrees_per_second.to_radians() * TICK_SECONDS);
    }
}

/// Grants pickups to a player that walked over them. A medkit stays in the
/// world when the player is at full health; ammo is always consumed.
pub fn collect_pickups(
    mut commands: Commands,
    mut players: Query<(&Transform, &mut Health, &mut Weapon), With<Player>>,
    pickups: Query<(Entity, &Transform, &Pickup)>,
    mut sfx: EventWriter<SfxEvent>,
) {
    let Ok((player_transform, mut health, mut weapon)) = players.get_single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform, pickup) in pickups.iter() {
        if transform.translation.truncate().distance(player_pos) > PICKUP_RADIUS {
            continue;
        }
        match pickup {
            Pickup::Medkit { heal } => {
                if !health.heal(*heal) {
                    continue;
                }
                sfx.send(SfxEvent::PickupMedkit);
            }
            Pickup::Ammo { rounds } => {
                weapon.add_reserve(*rounds);
                sfx.send(SfxEvent::PickupAmmo);
            }
        }
        commands.entity(entity).despawn_recursive();
    }
}

pub struct PickupsPlugin;

impl Plugin for PickupsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                spawner::maintain_pickup_spawners,
                collect_pickups,
                spin_pickups,
            )
                .chain()
                .in_set(GameSystemSet::Pickups)
                .run_if(in_state(AppState::InGame)),
        );
    }
}
