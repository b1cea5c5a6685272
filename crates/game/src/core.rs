use bevy::{
    app::AppExit, app::PluginGroupBuilder, asset::AssetMetaCheck, log::LogPlugin, prelude::*,
    window::WindowResolution,
};
use serde::{Deserialize, Serialize};
use utils::frame::FrameCount;

use crate::{
    args::LaunchOptions,
    audio::SfxPlugin,
    character::{config::CharacterConfigs, player::create::spawn_player, BaseCharacterGamePlugin},
    cutscene::CutscenePlugin,
    frame::{increase_frame_system, FrameDebugUIPlugin},
    global_asset::{add_global_asset, loading_asset_system, GlobalAssetPlugin, LevelConfig},
    pickups::{spawner::scatter_ammo_pickups, spawner::PickupSpawner, PickupsPlugin},
    system_set::GameSystemSet,
    ui::GameUiPlugin,
    waves::{WaveState, WaveSystemPlugin},
    weapons::{BaseWeaponGamePlugin, WeaponConfig},
};

// Static configuration bundled with the game binary.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct CoreSetupConfig {
    pub app_name: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading, // Waiting on the global asset handles to resolve
    Cutscene, // Intro sequence, skippable
    InGame,
    GameOver,
    Victory,
}

/// Identity of this game instance, shown in the debug overlay.
#[derive(Debug, Clone, Resource)]
pub struct GameInfo {
    pub version: String,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Whether the app is running normally or tearing down. Systems that spawn
/// follow-up work (death sounds, respawns) consult this instead of a global.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Running,
    Exiting,
}

impl Lifecycle {
    pub fn is_exiting(&self) -> bool {
        *self == Lifecycle::Exiting
    }
}

fn watch_app_exit(mut exits: EventReader<AppExit>, mut lifecycle: ResMut<Lifecycle>) {
    if exits.read().next().is_some() {
        *lifecycle = Lifecycle::Exiting;
    }
}

/// Spawns the level content when play begins: camera target, player, pickup
/// spawners, ammo scatter, and the primed wave controller.
#[allow(clippy::too_many_arguments)]
fn setup_level(
    mut commands: Commands,
    options: Res<LaunchOptions>,
    level: Res<LevelConfig>,
    configs: Res<CharacterConfigs>,
    weapon_config: Res<WeaponConfig>,
    mut wave_state: ResMut<WaveState>,
    mut rng: ResMut<utils::rng::GameRng>,
) {
    let start = Vec2::new(level.player_start[0], level.ground_level);
    spawn_player(&mut commands, &configs, &weapon_config, start);

    commands.spawn((
        PickupSpawner {
            max_count: level.medkit_max_count,
            check_interval_frames: level.medkit_check_interval_frames,
            heal: level.medkit_heal,
            half_extents: Vec2::new(level.medkit_region_half_width, 0.0),
            ..PickupSpawner::default()
        },
        Transform::from_xyz(level.player_start[0], level.ground_level, 0.0),
        Visibility::default(),
    ));

    scatter_ammo_pickups(&mut commands, &level.ammo_points, &weapon_config, &mut rng);

    wave_state.reset_to(options.start_wave.max(1));
    info!(start_wave = options.start_wave, "level ready");
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

#[derive(Default)]
pub struct CoreSetupPlugin(pub CoreSetupConfig);

impl Plugin for CoreSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GlobalAssetPlugin);
        app.add_plugins(SfxPlugin);
        app.add_plugins(FrameDebugUIPlugin);
        app.add_plugins(CutscenePlugin);
        app.add_plugins(GameUiPlugin);

        app.add_plugins(BaseWeaponGamePlugin);
        app.add_plugins(BaseCharacterGamePlugin);
        app.add_plugins(WaveSystemPlugin);
        app.add_plugins(PickupsPlugin);

        app.init_resource::<GameInfo>();
        app.init_resource::<FrameCount>();
        app.init_resource::<Lifecycle>();
        app.init_resource::<utils::rng::GameRng>();

        app.init_state::<AppState>();
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.configure_sets(
            FixedUpdate,
            (
                GameSystemSet::Input,
                GameSystemSet::Movement,
                GameSystemSet::Weapon,
                GameSystemSet::Damage,
                GameSystemSet::DeathManagement,
                GameSystemSet::EnemyAi,
                GameSystemSet::Spawning,
                GameSystemSet::Pickups,
                GameSystemSet::FrameCounter,
            )
                .chain(),
        );

        app.add_systems(Startup, (add_global_asset, setup_camera));
        app.add_systems(
            Update,
            (
                loading_asset_system.run_if(in_state(AppState::Loading)),
                watch_app_exit,
            ),
        );

        app.add_systems(OnEnter(AppState::InGame), setup_level);

        app.add_systems(
            FixedUpdate,
            (increase_frame_system,)
                .in_set(GameSystemSet::FrameCounter)
                .run_if(in_state(AppState::InGame)),
        );
    }
}

impl CoreSetupPlugin {
    pub fn get_default_plugin(&self) -> PluginGroupBuilder {
        let window_plugin = WindowPlugin {
            primary_window: Some(Window {
                title: self.0.app_name.to_string(),
                resolution: WindowResolution::new(800., 600.),
                resizable: true,
                ..Default::default()
            }),
            ..Default::default()
        };

        DefaultPlugins
            .set(ImagePlugin::default_nearest())
            .set(AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..Default::default()
            })
            .disable::<LogPlugin>()
            .set(window_plugin)
    }
}
