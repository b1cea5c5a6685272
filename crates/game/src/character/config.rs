use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::enemy::ai::state::EnemyAiConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    pub move_speed: f32,
    /// Vertical acceleration, negative for downward.
    pub gravity: f32,
    /// Peak height of a full jump in world units.
    pub jump_height: f32,
    pub dash_multiplier: f32,
    pub dash_duration_frames: u32,
    pub dash_cooldown_frames: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 140.0,
            gravity: -980.0,
            jump_height: 64.0,
            dash_multiplier: 2.5,
            dash_duration_frames: 12,
            dash_cooldown_frames: 60,
        }
    }
}

/// Per-character-kind definition loaded from RON.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub health: i32,
    /// Body radius for hit tests and spawn separation.
    pub radius: f32,
    pub movement: MovementConfig,
    /// Present for enemy kinds only.
    pub ai: Option<EnemyAiConfig>,
    /// Sprite path relative to the asset root.
    pub sprite: Option<String>,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            health: 20,
            radius: 12.0,
            movement: MovementConfig::default(),
            ai: None,
            sprite: None,
        }
    }
}

/// All character configs by kind name, filled once loading finishes.
#[derive(Resource, Debug, Clone, Default)]
pub struct CharacterConfigs(pub HashMap<String, CharacterConfig>);

impl CharacterConfigs {
    pub fn get(&self, name: &str) -> Option<&CharacterConfig> {
        self.0.get(name)
    }
}
