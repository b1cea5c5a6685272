use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Velocity split into self-driven movement and externally applied knockback.
/// `main.y` carries the vertical (jump and gravity) component.
#[derive(Component, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub main: Vec2,
    pub knockback: Vec2,
}

/// Direction the character is looking. Not necessarily normalized to the
/// movement direction; enemies face the player even while hopping away.
#[derive(Component, Clone, Copy, Debug)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Facing(Vec2::NEG_X)
    }
}

/// Y coordinate the character lands on. Flat ground per character, set at
/// spawn from the level config or the spawn position.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GroundLevel(pub f32);

#[derive(Resource, Clone, Copy, Debug)]
pub struct KnockbackDampingConfig {
    pub damping: f32,
}

impl Default for KnockbackDampingConfig {
    fn default() -> Self {
        Self { damping: 0.85 }
    }
}

/// Bleeds knockback off every frame, snapping to zero once it is negligible
/// so entities do not drift forever.
pub fn apply_knockback_damping(
    config: Res<KnockbackDampingConfig>,
    mut query: Query<&mut Velocity>,
) {
    for mut velocity in query.iter_mut() {
        velocity.knockback *= config.damping;
        if velocity.knockback.length_squared() < 0.01 {
            velocity.knockback = Vec2::ZERO;
        }
    }
}
