use bevy::prelude::*;

/// Marks an enemy as owned by the wave controller.
#[derive(Component, Debug, Clone, Copy, Reflect)]
pub struct WaveEnemy {
    pub spawned_wave: u32,
}
