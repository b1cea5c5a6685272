pub mod control;
pub mod create;
pub mod input;

use bevy::prelude::*;

/// The locally controlled character.
#[derive(Component, Reflect, Default, Debug, Copy, Clone)]
#[reflect(Component)]
pub struct Player;
