use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::{
    enemy::{Boss, Enemy},
    movement::Velocity,
    player::Player,
};

#[derive(Component, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Heals up to `max`. Returns false when already full so the caller can
    /// leave the medkit in the world.
    pub fn heal(&mut self, amount: i32) -> bool {
        if self.current >= self.max {
            return false;
        }
        self.current = (self.current + amount).min(self.max);
        true
    }
}

#[derive(Component, Clone, Debug, Default)]
pub struct Death;

/// Damage folded up over a frame, applied in one place.
#[derive(Component, Clone, Debug, Default)]
pub struct DamageAccumulator {
    pub total_damage: i32,
    pub hit_count: u32,
    /// World position the last hit came from, for knockback direction.
    pub last_hit_from: Option<Vec2>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: i32,
    pub from: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDiedEvent {
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

/// Sent when the boss falls, on top of its `EnemyDiedEvent`.
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDefeatedEvent;

#[derive(Resource, Clone, Copy, Debug)]
pub struct KnockbackImpulseConfig {
    pub force: f32,
    pub upward: f32,
}

impl Default for KnockbackImpulseConfig {
    fn default() -> Self {
        Self {
            force: 180.0,
            upward: 60.0,
        }
    }
}

/// Folds this frame's damage events into per-entity accumulators.
pub fn collect_damage(
    mut commands: Commands,
    mut events: EventReader<DamageEvent>,
    mut accumulators: Query<&mut DamageAccumulator>,
    targets: Query<(), With<Health>>,
) {
    let mut fresh: HashMap<Entity, DamageAccumulator> = HashMap::new();
    for event in events.read() {
        if !targets.contains(event.target) {
            continue;
        }
        if let Ok(mut accumulator) = accumulators.get_mut(event.target) {
            accumulator.total_damage += event.amount;
            accumulator.hit_count += 1;
            accumulator.last_hit_from = Some(event.from);
        } else {
            let entry = fresh.entry(event.target).or_default();
            entry.total_damage += event.amount;
            entry.hit_count += 1;
            entry.last_hit_from = Some(event.from);
        }
    }
    for (entity, accumulator) in fresh {
        if let Some(mut e) = commands.get_entity(entity) {
            e.insert(accumulator);
        }
    }
}

/// Applies accumulated damage, pushes the target away from the hit, and
/// marks it dead when health runs out.
pub fn apply_accumulated_damage(
    mut commands: Commands,
    config: Res<KnockbackImpulseConfig>,
    mut query: Query<(
        Entity,
        &DamageAccumulator,
        &mut Health,
        &Transform,
        Option<&mut Velocity>,
        Option<&Player>,
    )>,
) {
    for (entity, accumulator, mut health, transform, velocity, player) in query.iter_mut() {
        if accumulator.total_damage <= 0 {
            commands.entity(entity).remove::<DamageAccumulator>();
            continue;
        }

        health.current = health.current.saturating_sub(accumulator.total_damage);

        if let (Some(mut velocity), Some(from)) = (velocity, accumulator.last_hit_from) {
            // A moving player keeps control instead of being shoved around.
            let player_in_motion =
                player.is_some() && velocity.main.length_squared() > f32::EPSILON;
            if !player_in_motion {
                let away = (transform.translation.truncate() - from).normalize_or_zero();
                velocity.knockback += away * config.force + Vec2::Y * config.upward;
            }
        }

        commands.entity(entity).remove::<DamageAccumulator>();
        if health.current <= 0 {
            commands.entity(entity).insert(Death);
        }
    }
}

/// Despawns dead entities in a stable order and reports who fell.
pub fn apply_death(
    mut commands: Commands,
    query: Query<
        (
            Entity,
            &Transform,
            Option<&Enemy>,
            Option<&Player>,
            Option<&Boss>,
        ),
        With<Death>,
    >,
    mut enemy_died: EventWriter<EnemyDiedEvent>,
    mut player_died: EventWriter<PlayerDiedEvent>,
    mut boss_defeated: EventWriter<BossDefeatedEvent>,
) {
    let mut dead: Vec<_> = query.iter().collect();
    dead.sort_unstable_by_key(|(entity, ..)| entity.to_bits());

    for (entity, transform, enemy, player, boss) in dead {
        info!(?entity, "entity died");
        if enemy.is_some() {
            enemy_died.send(EnemyDiedEvent {
                position: transform.translation.truncate(),
            });
        }
        if player.is_some() {
            player_died.send(PlayerDiedEvent);
        }
        if boss.is_some() {
            boss_defeated.send(BossDefeatedEvent);
        }
        commands.entity(entity).despawn_recursive();
    }
}
