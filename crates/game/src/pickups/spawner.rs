use bevy::prelude::*;

use utils::frame::FrameCount;
use utils::rng::GameRng;

use crate::weapons::WeaponConfig;

use super::{Pickup, Spinner};

/// Keeps a region stocked with medkits. Checks on an interval, drops
/// handles to collected pickups, and refills up to `max_count`.
#[derive(Component, Debug, Clone)]
pub struct PickupSpawner {
    pub max_count: u32,
    /// False means spawn the initial batch once and never refill.
    pub maintain: bool,
    pub check_interval_frames: u32,
    pub next_check_frame: u32,
    /// Region half extents around the spawner's position.
    pub half_extents: Vec2,
    /// Minimum distance between spawned pickups.
    pub min_distance: f32,
    pub max_attempts: u32,
    pub heal: i32,
    pub spawned: Vec<Entity>,
}

impl Default for PickupSpawner {
    fn default() -> Self {
        Self {
            max_count: 3,
            maintain: true,
            check_interval_frames: 5 * utils::frame::TICKS_PER_SECOND,
            next_check_frame: 0,
            half_extents: Vec2::new(200.0, 0.0),
            min_distance: 40.0,
            max_attempts: 10,
            heal: 5,
            spawned: Vec::new(),
        }
    }
}

pub fn maintain_pickup_spawners(
    mut commands: Commands,
    frame: Res<FrameCount>,
    mut rng: ResMut<GameRng>,
    mut spawners: Query<(&mut PickupSpawner, &Transform)>,
    pickups: Query<&Transform, With<Pickup>>,
) {
    for (mut spawner, transform) in spawners.iter_mut() {
        if frame.frame < spawner.next_check_frame {
            continue;
        }
        spawner.next_check_frame = frame.frame + spawner.check_interval_frames;

        let before = spawner.spawned.len();
        spawner.spawned.retain(|&e| pickups.contains(e));
        if !spawner.maintain && before > 0 {
            continue;
        }

        let center = transform.translation.truncate();
        // Spawns are deferred, so track positions placed this pass by hand.
        let mut occupied: Vec<Vec2> = pickups.iter().map(|t| t.translation.truncate()).collect();
        while (spawner.spawned.len() as u32) < spawner.max_count {
            let Some(position) = place_pickup(center, &occupied, &spawner, &mut rng) else {
                // Region is saturated, try again next interval.
                break;
            };
            let entity = commands
                .spawn((
                    Pickup::Medkit { heal: spawner.heal },
                    Spinner {
                        degrees_per_second: 90.0,
                    },
                    Transform::from_xyz(position.x, position.y, 0.5),
                    Visibility::default(),
                ))
                .id();
            spawner.spawned.push(entity);
            occupied.push(position);
        }
    }
}

fn place_pickup(
    center: Vec2,
    occupied: &[Vec2],
    spawner: &PickupSpawner,
    rng: &mut GameRng,
) -> Option<Vec2> {
    let min_sq = spawner.min_distance * spawner.min_distance;
    for _ in 0..spawner.max_attempts {
        let candidate = center + rng.offset_in_box(spawner.half_extents);
        if occupied
            .iter()
            .all(|&p| p.distance_squared(candidate) >= min_sq)
        {
            return Some(candidate);
        }
    }
    None
}

/// Scatters ammo boxes over the level's ammo points at startup. Half of the
/// points receive a box, chosen at random.
pub fn scatter_ammo_pickups(
    commands: &mut Commands,
    points: &[[f32; 2]],
    weapon_config: &WeaponConfig,
    rng: &mut GameRng,
) {
    if points.is_empty() {
        return;
    }
    let mut indices: Vec<usize> = (0..points.len()).collect();
    rng.shuffle(&mut indices);
    let count = (points.len() / 2).max(1);

    for &index in indices.iter().take(count) {
        let [x, y] = points[index];
        commands.spawn((
            Pickup::Ammo {
                rounds: weapon_config.pickup_rounds,
            },
            Spinner {
                degrees_per_second: 45.0,
            },
            Transform::from_xyz(x, y, 0.5),
            Visibility::default(),
        ));
    }
}
