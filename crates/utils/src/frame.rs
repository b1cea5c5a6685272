use bevy::prelude::*;

/// Fixed-tick counter driving every frame-based countdown in the game.
#[derive(Resource, Default, Reflect, Hash, Clone, Copy)]
#[reflect(Hash)]
pub struct FrameCount {
    pub frame: u32,
}

/// Ticks per second of the gameplay schedule.
pub const TICKS_PER_SECOND: u32 = 60;

/// Seconds elapsed per gameplay tick.
pub const TICK_SECONDS: f32 = 1.0 / TICKS_PER_SECOND as f32;

impl std::fmt::Display for FrameCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}|{}", self.frame, self.frame % TICKS_PER_SECOND)
    }
}
