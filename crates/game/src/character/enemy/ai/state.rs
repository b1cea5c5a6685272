use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Walks straight at the player along the ground.
    Chaser,
    /// Rests, then arcs toward the player in fixed-length hops.
    Hopper,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HopConfig {
    /// Arc height at the midpoint of the hop.
    pub height: f32,
    /// Hop progress per second (1.0 means a one-second hop).
    pub speed: f32,
    /// Horizontal distance covered by one hop.
    pub step: f32,
    pub rest_frames: u32,
}

impl Default for HopConfig {
    fn default() -> Self {
        Self {
            height: 24.0,
            speed: 2.0,
            step: 48.0,
            rest_frames: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyAiConfig {
    pub behavior: EnemyBehavior,
    pub move_speed: f32,
    #[serde(default)]
    pub hop: HopConfig,
    pub attack_range: f32,
    pub attack_cooldown_frames: u32,
    pub attack_damage: i32,
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            behavior: EnemyBehavior::Chaser,
            move_speed: 60.0,
            hop: HopConfig::default(),
            attack_range: 20.0,
            attack_cooldown_frames: 45,
            attack_damage: 2,
        }
    }
}

/// Runtime component carrying the config, cloned from the character table
/// at spawn so AI systems read it without a resource lookup.
#[derive(Component, Debug, Clone, Default)]
pub struct AiProfile(pub EnemyAiConfig);

/// Hopper movement state. Chasers stay in `Resting` with zero frames.
#[derive(Component, Debug, Clone, Copy)]
pub enum EnemyState {
    Resting { frames_left: u32 },
    Hopping { progress: f32, start: Vec2, target: Vec2 },
}

impl Default for EnemyState {
    fn default() -> Self {
        EnemyState::Resting { frames_left: 0 }
    }
}

/// Earliest frame this enemy may attack again.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AttackTimer {
    pub next_frame: u32,
}
