//! Wave-based enemy spawning.
//!
//! The wave controller owns a catalog of enemy kinds (each with a point
//! cost), fills a per-wave point budget with a greedy randomized selection,
//! releases the selected spawns on a fixed interval from the configured
//! spawn points, and advances to the next wave once the pending and active
//! lists are both empty and the wave timer has elapsed.
//!
//! # Wave flow
//!
//! ```text
//! Advancing → Spawning → Advancing → … → Complete
//! ```
//!
//! Wave numbering starts at 0 in `Advancing`, so wave 1 enters play through
//! the same advancement path as every later wave.
//!
//! When a boss kind is configured it joins the final wave outside the point
//! budget. The wave then cannot clear until the boss falls, and its death
//! also ends the run directly through [`BossDefeatedEvent`].
//!
//! [`BossDefeatedEvent`]: crate::character::health::BossDefeatedEvent

pub mod config;
pub mod debug;
pub mod state;
pub mod systems;
pub mod tracking;

use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;

use crate::core::AppState;
use crate::system_set::GameSystemSet;

pub use config::{EnemyKind, WaveConfig};
pub use debug::{WaveDebugEnabled, WaveDebugPlugin};
pub use state::{WavePhase, WaveState};
pub use tracking::WaveEnemy;

/// Events emitted at wave boundaries, consumed by the HUD and audio.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEvent {
    /// A new wave finished generation and started spawning.
    Started { wave: u32, total: u32 },
    /// A wave was cleared and a later wave exists; the next tick starts it.
    Advanced { wave: u32 },
    /// The final wave was cleared; the controller is in its terminal state.
    Completed { wave: u32 },
}

pub struct WaveSystemPlugin;

impl Plugin for WaveSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<WaveConfig>::new(&["ron"]));
        app.add_plugins(WaveDebugPlugin);

        app.init_resource::<WaveState>();
        app.add_event::<WaveEvent>();

        app.register_type::<WavePhase>();
        app.register_type::<WaveEnemy>();

        // Cleanup of despawned enemies runs before the spawn check so the
        // active list is consistent when placement looks at it.
        app.add_systems(
            FixedUpdate,
            (
                systems::wave_cleanup_system,
                systems::wave_state_machine_system,
                systems::wave_spawn_system,
            )
                .chain()
                .in_set(GameSystemSet::Spawning)
                .run_if(in_state(AppState::InGame)),
        );
    }
}
