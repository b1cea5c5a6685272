use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use utils::frame::TICK_SECONDS;

use crate::character::{
    config::CharacterConfigs,
    movement::{Facing, GroundLevel, Velocity},
    player::{control::PlayerAction, Player},
};

/// Movement intent sampled from the action state once per tick, so the
/// movement system itself never touches input directly.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MoveIntent {
    pub x: f32,
    pub jump: bool,
    pub dash: bool,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct DashState {
    pub frames_left: u32,
    pub cooldown_left: u32,
    pub direction: f32,
}

pub fn read_player_inputs(
    mut players: Query<(&ActionState<PlayerAction>, &mut MoveIntent), With<Player>>,
) {
    for (actions, mut intent) in players.iter_mut() {
        let mut x = 0.0;
        if actions.pressed(&PlayerAction::MoveLeft) {
            x -= 1.0;
        }
        if actions.pressed(&PlayerAction::MoveRight) {
            x += 1.0;
        }
        intent.x = x;
        intent.jump = actions.just_pressed(&PlayerAction::Jump);
        intent.dash = actions.just_pressed(&PlayerAction::Dash);
    }
}

/// Integrates player movement for one fixed tick: horizontal run and dash,
/// jump impulse, gravity, knockback drift, then the ground clamp.
pub fn apply_player_movement(
    configs: Res<CharacterConfigs>,
    mut players: Query<
        (
            &MoveIntent,
            &mut DashState,
            &mut Velocity,
            &mut Facing,
            &mut Transform,
            &GroundLevel,
        ),
        With<Player>,
    >,
) {
    let Some(config) = configs.get("player") else {
        return;
    };
    let movement = &config.movement;

    for (intent, mut dash, mut velocity, mut facing, mut transform, ground) in players.iter_mut() {
        let grounded = transform.translation.y <= ground.0 + f32::EPSILON;

        dash.cooldown_left = dash.cooldown_left.saturating_sub(1);
        if intent.dash && dash.frames_left == 0 && dash.cooldown_left == 0 {
            dash.frames_left = movement.dash_duration_frames;
            dash.cooldown_left = movement.dash_cooldown_frames;
            dash.direction = if intent.x != 0.0 {
                intent.x.signum()
            } else {
                facing.0.x.signum()
            };
        }

        let mut horizontal = intent.x * movement.move_speed;
        if dash.frames_left > 0 {
            dash.frames_left -= 1;
            horizontal = dash.direction * movement.move_speed * movement.dash_multiplier;
        }
        velocity.main.x = horizontal;

        if intent.x != 0.0 {
            facing.0 = Vec2::new(intent.x.signum(), 0.0);
        }

        if intent.jump && grounded {
            // Impulse sized so the apex lands on jump_height exactly.
            velocity.main.y = (2.0 * movement.jump_height * movement.gravity.abs()).sqrt();
        }
        velocity.main.y += movement.gravity * TICK_SECONDS;

        let delta = (velocity.main + velocity.knockback) * TICK_SECONDS;
        transform.translation.x += delta.x;
        transform.translation.y += delta.y;

        if transform.translation.y < ground.0 {
            transform.translation.y = ground.0;
            velocity.main.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::config::CharacterConfig;

    fn app_with_player() -> (App, Entity) {
        let mut app = App::new();
        let mut configs = CharacterConfigs::default();
        configs
            .0
            .insert("player".into(), CharacterConfig::default());
        app.insert_resource(configs);
        app.add_systems(Update, apply_player_movement);
        let entity = app
            .world_mut()
            .spawn((
                Player,
                MoveIntent::default(),
                DashState::default(),
                Velocity::default(),
                Facing::default(),
                Transform::from_xyz(0.0, 0.0, 0.0),
                GroundLevel(0.0),
            ))
            .id();
        (app, entity)
    }

    #[test]
    fn grounded_jump_gives_upward_velocity() {
        let (mut app, entity) = app_with_player();
        app.world_mut().get_mut::<MoveIntent>(entity).unwrap().jump = true;
        app.update();
        let velocity = app.world().get::<Velocity>(entity).unwrap();
        assert!(velocity.main.y > 0.0);
    }

    #[test]
    fn player_never_sinks_below_ground() {
        let (mut app, entity) = app_with_player();
        for _ in 0..240 {
            app.update();
        }
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!(transform.translation.y >= 0.0);
    }

    #[test]
    fn dash_cooldown_blocks_an_immediate_second_dash() {
        let (mut app, entity) = app_with_player();
        {
            let mut intent = app.world_mut().get_mut::<MoveIntent>(entity).unwrap();
            intent.x = 1.0;
            intent.dash = true;
        }
        let duration = CharacterConfig::default().movement.dash_duration_frames;
        // Ride the first dash out, then ask for another right away.
        for _ in 0..(duration + 1) {
            app.update();
        }
        app.update();
        let dash = app.world().get::<DashState>(entity).unwrap();
        assert_eq!(dash.frames_left, 0);
        assert!(dash.cooldown_left > 0);
    }

    #[test]
    fn dash_outpaces_normal_run() {
        let (mut app, entity) = app_with_player();
        {
            let mut intent = app.world_mut().get_mut::<MoveIntent>(entity).unwrap();
            intent.x = 1.0;
            intent.dash = true;
        }
        app.update();
        let dashing = app.world().get::<Velocity>(entity).unwrap().main.x;
        let config = CharacterConfig::default();
        assert!(dashing > config.movement.move_speed);
    }
}
