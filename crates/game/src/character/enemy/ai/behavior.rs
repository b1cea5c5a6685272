use std::f32::consts::PI;

use bevy::prelude::*;

use utils::frame::{FrameCount, TICK_SECONDS};

use crate::{
    audio::SfxEvent,
    character::{
        health::DamageEvent,
        movement::{Facing, GroundLevel, Velocity},
        player::Player,
    },
};

use super::state::{AiProfile, AttackTimer, EnemyBehavior, EnemyState};

/// Moves every enemy toward the player for one fixed tick.
pub fn enemy_movement_system(
    player: Query<&Transform, (With<Player>, Without<AiProfile>)>,
    mut enemies: Query<(
        &AiProfile,
        &mut EnemyState,
        &mut Transform,
        &mut Velocity,
        &mut Facing,
        &GroundLevel,
    )>,
) {
    let Ok(player_transform) = player.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (profile, mut state, mut transform, mut velocity, mut facing, ground) in
        enemies.iter_mut()
    {
        let position = transform.translation.truncate();
        let towards_x = (player_pos.x - position.x).signum();
        if towards_x != 0.0 {
            facing.0 = Vec2::new(towards_x, 0.0);
        }

        match profile.0.behavior {
            EnemyBehavior::Chaser => {
                velocity.main.x = towards_x * profile.0.move_speed;
                let delta = (velocity.main + velocity.knockback) * TICK_SECONDS;
                transform.translation.x += delta.x;
                transform.translation.y = ground.0;
            }
            EnemyBehavior::Hopper => match *state {
                EnemyState::Resting { frames_left } => {
                    if frames_left > 0 {
                        *state = EnemyState::Resting {
                            frames_left: frames_left - 1,
                        };
                    } else {
                        let hop = &profile.0.hop;
                        let start = Vec2::new(position.x, ground.0);
                        let target = Vec2::new(position.x + towards_x * hop.step, ground.0);
                        *state = EnemyState::Hopping {
                            progress: 0.0,
                            start,
                            target,
                        };
                    }
                }
                EnemyState::Hopping {
                    progress,
                    start,
                    target,
                } => {
                    let hop = &profile.0.hop;
                    let progress = (progress + hop.speed * TICK_SECONDS).min(1.0);
                    let flat = start.lerp(target, progress);
                    let arc = (PI * progress).sin() * hop.height;
                    transform.translation.x = flat.x + velocity.knockback.x * TICK_SECONDS;
                    transform.translation.y = (flat.y + arc).max(ground.0);
                    if progress >= 1.0 {
                        transform.translation.y = ground.0;
                        *state = EnemyState::Resting {
                            frames_left: hop.rest_frames,
                        };
                    } else {
                        *state = EnemyState::Hopping {
                            progress,
                            start,
                            target,
                        };
                    }
                }
            },
        }
    }
}

/// Deals contact damage when in range and off cooldown.
pub fn enemy_attack_system(
    frame: Res<FrameCount>,
    player: Query<(Entity, &Transform), With<Player>>,
    mut enemies: Query<(&AiProfile, &mut AttackTimer, &Transform)>,
    mut damage: EventWriter<DamageEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    let Ok((player_entity, player_transform)) = player.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (profile, mut timer, transform) in enemies.iter_mut() {
        let distance = transform.translation.truncate().distance(player_pos);
        if distance > profile.0.attack_range || frame.frame < timer.next_frame {
            continue;
        }
        timer.next_frame = frame.frame + profile.0.attack_cooldown_frames;
        damage.send(DamageEvent {
            target: player_entity,
            amount: profile.0.attack_damage,
            from: transform.translation.truncate(),
        });
        sfx.send(SfxEvent::EnemyAttack);
    }
}

/// Flips enemy sprites to look at the player. Visual only, runs in Update.
pub fn enemy_sprite_flip_system(
    player: Query<&Transform, (With<Player>, Without<AiProfile>)>,
    mut enemies: Query<(&Transform, &mut Sprite), With<AiProfile>>,
) {
    let Ok(player_transform) = player.get_single() else {
        return;
    };
    for (transform, mut sprite) in enemies.iter_mut() {
        sprite.flip_x = player_transform.translation.x < transform.translation.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::enemy::ai::state::EnemyAiConfig;

    fn chaser_app(player_x: f32, enemy_x: f32) -> (App, Entity) {
        let mut app = App::new();
        app.add_systems(Update, enemy_movement_system);
        app.world_mut()
            .spawn((Player, Transform::from_xyz(player_x, 0.0, 0.0)));
        let enemy = app
            .world_mut()
            .spawn((
                AiProfile(EnemyAiConfig::default()),
                EnemyState::default(),
                Velocity::default(),
                Facing::default(),
                GroundLevel(0.0),
                Transform::from_xyz(enemy_x, 0.0, 0.0),
            ))
            .id();
        (app, enemy)
    }

    #[test]
    fn chaser_closes_the_gap() {
        let (mut app, enemy) = chaser_app(0.0, 100.0);
        for _ in 0..60 {
            app.update();
        }
        let x = app.world().get::<Transform>(enemy).unwrap().translation.x;
        assert!(x < 100.0);
        assert!(x > 0.0);
    }

    #[test]
    fn chaser_faces_the_player() {
        let (mut app, enemy) = chaser_app(-50.0, 100.0);
        app.update();
        let facing = app.world().get::<Facing>(enemy).unwrap();
        assert_eq!(facing.0.x, -1.0);
    }

    #[test]
    fn hopper_leaves_the_ground_mid_hop() {
        let mut app = App::new();
        app.add_systems(Update, enemy_movement_system);
        app.world_mut()
            .spawn((Player, Transform::from_xyz(200.0, 0.0, 0.0)));
        let config = EnemyAiConfig {
            behavior: EnemyBehavior::Hopper,
            ..EnemyAiConfig::default()
        };
        let enemy = app
            .world_mut()
            .spawn((
                AiProfile(config),
                EnemyState::default(),
                Velocity::default(),
                Facing::default(),
                GroundLevel(0.0),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ))
            .id();
        // First tick starts the hop, the next few should be airborne.
        let mut airborne = false;
        for _ in 0..20 {
            app.update();
            if app.world().get::<Transform>(enemy).unwrap().translation.y > 0.0 {
                airborne = true;
            }
        }
        assert!(airborne);
    }
}
