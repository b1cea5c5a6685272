//! Wave controller configuration loaded from RON.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use utils::frame::TICKS_PER_SECOND;

/// A spawnable enemy type and its point cost against the wave budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyKind {
    /// Key into the character config table.
    pub name: String,
    pub cost: u32,
}

/// Wave configuration, loaded once at startup and immutable afterwards.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Catalog of spawnable kinds. May be empty, in which case waves run
    /// down their timer without spawning anything.
    pub catalog: Vec<EnemyKind>,

    /// Budget for wave `w` is `w * points_per_wave`.
    pub points_per_wave: u32,
    pub max_waves: u32,

    /// Length of a wave; also the window the spawn interval is derived from.
    pub wave_duration_frames: u32,

    /// Per-wave cap on how many spawns selection may pick. Indexed by wave
    /// number, clamped to the last entry for waves past the end.
    pub spawn_caps: Vec<u32>,

    /// Spawn locations. Empty means everything spawns at the origin.
    pub spawn_points: Vec<[f32; 2]>,
    /// Max random offset applied around the chosen spawn point.
    pub spawn_radius: f32,
    /// Minimum distance a spawn position must keep from live enemies.
    pub min_spawn_separation: f32,
    /// Placement retries before overlap is accepted.
    pub placement_attempts: u32,

    /// Face the player at spawn when true, else use `fallback_facing`.
    pub face_player: bool,
    pub fallback_facing: [f32; 2],

    /// Kind spawned once at the start of the final wave, outside the point
    /// budget. Its death ends the run.
    #[serde(default)]
    pub boss_kind: Option<String>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                EnemyKind {
                    name: "frost_frog".into(),
                    cost: 5,
                },
                EnemyKind {
                    name: "ice_stalker".into(),
                    cost: 10,
                },
            ],
            points_per_wave: 10,
            max_waves: 8,
            wave_duration_frames: 20 * TICKS_PER_SECOND,
            spawn_caps: vec![4, 6, 8, 10, 12],
            spawn_points: vec![[-240.0, 0.0], [240.0, 0.0]],
            spawn_radius: 48.0,
            min_spawn_separation: 24.0,
            placement_attempts: 20,
            face_player: true,
            fallback_facing: [-1.0, 0.0],
            boss_kind: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum WaveConfigError {
    #[error("enemy kind `{0}` has zero cost and would never drain the budget")]
    ZeroCostKind(String),
    #[error("spawn cap table is empty")]
    EmptySpawnCaps,
    #[error("wave duration is zero frames")]
    ZeroDuration,
}

impl WaveConfig {
    /// Point budget for the given wave number.
    pub fn budget_for(&self, wave: u32) -> u32 {
        wave.saturating_mul(self.points_per_wave)
    }

    /// Spawn-count cap for the given wave, clamping past the table's end.
    pub fn spawn_cap(&self, wave: u32) -> u32 {
        if self.spawn_caps.is_empty() {
            return 0;
        }
        let index = (wave.max(1) as usize - 1).min(self.spawn_caps.len() - 1);
        self.spawn_caps[index]
    }

    /// Frames between spawn releases; zero when nothing was selected.
    pub fn spawn_interval_frames(&self, total: u32) -> u32 {
        if total == 0 {
            0
        } else {
            self.wave_duration_frames / total
        }
    }

    /// Startup sanity check. Failures are reported and then tolerated; the
    /// controller degrades to no-ops rather than refusing to run.
    pub fn validate(&self) -> Result<(), WaveConfigError> {
        if let Some(kind) = self.catalog.iter().find(|k| k.cost == 0) {
            return Err(WaveConfigError::ZeroCostKind(kind.name.clone()));
        }
        if self.spawn_caps.is_empty() {
            return Err(WaveConfigError::EmptySpawnCaps);
        }
        if self.wave_duration_frames == 0 {
            return Err(WaveConfigError::ZeroDuration);
        }
        Ok(())
    }
}
