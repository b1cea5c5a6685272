use std::collections::HashMap;

use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use bevy_kira_audio::AudioSource;
use serde::{Deserialize, Serialize};
use utils::bmap;

use crate::{
    args::LaunchOptions,
    character::config::{CharacterConfig, CharacterConfigs},
    core::AppState,
    waves::WaveConfig,
    weapons::WeaponConfig,
};

const PLAYER_CONFIG_PATH: &str = "characters/player.ron";
const WAVE_CONFIG_PATH: &str = "waves/wave_config.ron";
const WEAPON_CONFIG_PATH: &str = "weapons/sidearm.ron";
const LEVEL_CONFIG_PATH: &str = "level/tundra.ron";

/// Static level layout loaded from RON.
#[derive(Asset, TypePath, Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub player_start: [f32; 2],
    pub ground_level: f32,
    pub ammo_points: Vec<[f32; 2]>,
    pub medkit_max_count: u32,
    pub medkit_check_interval_frames: u32,
    pub medkit_heal: i32,
    pub medkit_region_half_width: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_start: [0.0, 0.0],
            ground_level: 0.0,
            ammo_points: Vec::new(),
            medkit_max_count: 3,
            medkit_check_interval_frames: 300,
            medkit_heal: 5,
            medkit_region_half_width: 200.0,
        }
    }
}

#[derive(Resource)]
pub struct GlobalAsset {
    pub character_configs: HashMap<String, Handle<CharacterConfig>>,
    pub wave_config: Handle<WaveConfig>,
    pub weapon_config: Handle<WeaponConfig>,
    pub level_config: Handle<LevelConfig>,
    pub sfx: HashMap<String, Handle<AudioSource>>,
    pub cursor_normal: Handle<Image>,
    pub cursor_click: Handle<Image>,
}

impl GlobalAsset {
    pub fn create(asset_server: &AssetServer) -> Self {
        Self {
            character_configs: bmap!(
                "player" => asset_server.load(PLAYER_CONFIG_PATH),
                "frost_frog" => asset_server.load("characters/frost_frog.ron"),
                "ice_stalker" => asset_server.load("characters/ice_stalker.ron"),
                "frost_brute" => asset_server.load("characters/frost_brute.ron"),
                "frost_monarch" => asset_server.load("characters/frost_monarch.ron")
            ),
            wave_config: asset_server.load(WAVE_CONFIG_PATH),
            weapon_config: asset_server.load(WEAPON_CONFIG_PATH),
            level_config: asset_server.load(LEVEL_CONFIG_PATH),
            sfx: bmap!(
                "fire" => asset_server.load("sfx/fire.ogg"),
                "reload" => asset_server.load("sfx/reload.ogg"),
                "pickup_medkit" => asset_server.load("sfx/pickup_medkit.ogg"),
                "pickup_ammo" => asset_server.load("sfx/pickup_ammo.ogg"),
                "enemy_attack" => asset_server.load("sfx/enemy_attack.ogg"),
                "enemy_died" => asset_server.load("sfx/enemy_died.ogg"),
                "player_hit" => asset_server.load("sfx/player_hit.ogg"),
                "button_click" => asset_server.load("sfx/button_click.ogg"),
                "button_click_alt" => asset_server.load("sfx/button_click_alt.ogg")
            ),
            cursor_normal: asset_server.load("ui/cursor_normal.png"),
            cursor_click: asset_server.load("ui/cursor_click.png"),
        }
    }
}

pub fn add_global_asset(mut commands: Commands, asset_server: Res<AssetServer>) {
    let global_asset = GlobalAsset::create(&asset_server);

    commands.insert_resource(global_asset);
}

pub struct GlobalAssetPlugin;

impl Plugin for GlobalAssetPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<LevelConfig>::new(&["ron"]));
    }
}

/// Gates on the RON configs only. Audio and cursor images stream in lazily
/// and are guarded at their use sites instead.
pub fn loading_asset_system(
    mut commands: Commands,
    mut app_state: ResMut<NextState<AppState>>,
    options: Res<LaunchOptions>,
    global_assets: Res<GlobalAsset>,
    asset_server: Res<AssetServer>,
    character_assets: Res<Assets<CharacterConfig>>,
    wave_assets: Res<Assets<WaveConfig>>,
    weapon_assets: Res<Assets<WeaponConfig>>,
    level_assets: Res<Assets<LevelConfig>>,
) {
    for (_, handle) in global_assets.character_configs.iter() {
        if !asset_server.load_state(handle).is_loaded() {
            return;
        }
    }
    if !asset_server.load_state(&global_assets.wave_config).is_loaded() {
        return;
    }
    if !asset_server.load_state(&global_assets.weapon_config).is_loaded() {
        return;
    }
    if !asset_server.load_state(&global_assets.level_config).is_loaded() {
        return;
    }

    let mut configs = CharacterConfigs::default();
    for (name, handle) in global_assets.character_configs.iter() {
        if let Some(config) = character_assets.get(handle) {
            configs.0.insert(name.clone(), config.clone());
        }
    }

    let wave_config = wave_assets
        .get(&global_assets.wave_config)
        .cloned()
        .unwrap_or_default();
    if let Err(error) = wave_config.validate() {
        warn!(%error, "wave config failed validation, running degraded");
    }

    let weapon_config = weapon_assets
        .get(&global_assets.weapon_config)
        .cloned()
        .unwrap_or_default();
    let level_config = level_assets
        .get(&global_assets.level_config)
        .cloned()
        .unwrap_or_default();

    commands.insert_resource(configs);
    commands.insert_resource(wave_config);
    commands.insert_resource(weapon_config);
    commands.insert_resource(level_config);

    info!("global assets loaded");
    if options.skip_cutscene {
        app_state.set(AppState::InGame);
    } else {
        app_state.set(AppState::Cutscene);
    }
}
