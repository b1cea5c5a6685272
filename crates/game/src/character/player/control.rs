use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    Fire,
    Reload,
}

pub fn get_input_map() -> InputMap<PlayerAction> {
    InputMap::new([
        (PlayerAction::MoveLeft, KeyCode::KeyA),
        (PlayerAction::MoveLeft, KeyCode::ArrowLeft),
        (PlayerAction::MoveRight, KeyCode::KeyD),
        (PlayerAction::MoveRight, KeyCode::ArrowRight),
        (PlayerAction::Jump, KeyCode::Space),
        (PlayerAction::Dash, KeyCode::KeyE),
        (PlayerAction::Reload, KeyCode::KeyR),
    ])
    .with(PlayerAction::Fire, MouseButton::Left)
}
