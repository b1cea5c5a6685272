pub mod ai;
pub mod create;

use bevy::prelude::*;

#[derive(Component, Reflect, Default, Debug, Copy, Clone)]
#[reflect(Component)]
pub struct Enemy;

/// Marks the end-of-run boss. At most one exists; its death wins the run.
#[derive(Component, Reflect, Default, Debug, Copy, Clone)]
#[reflect(Component)]
pub struct Boss;
