use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use utils::rng::GameRng;

use crate::{core::Lifecycle, global_asset::GlobalAsset};

/// One-shot sound requests, emitted from gameplay and played here so the
/// fixed loop never touches the audio backend.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxEvent {
    Fire,
    Reload,
    PickupMedkit,
    PickupAmmo,
    EnemyAttack,
    EnemyDied,
    PlayerHit,
    ButtonClick,
}

impl SfxEvent {
    fn key(self) -> &'static str {
        match self {
            SfxEvent::Fire => "fire",
            SfxEvent::Reload => "reload",
            SfxEvent::PickupMedkit => "pickup_medkit",
            SfxEvent::PickupAmmo => "pickup_ammo",
            SfxEvent::EnemyAttack => "enemy_attack",
            SfxEvent::EnemyDied => "enemy_died",
            SfxEvent::PlayerHit => "player_hit",
            SfxEvent::ButtonClick => "button_click",
        }
    }
}

/// Cycles through a short list of click sounds so rapid menu clicks do not
/// all sound identical.
#[derive(Resource, Debug, Default)]
pub struct ButtonSounds {
    pub next: usize,
}

fn play_sfx(
    mut events: EventReader<SfxEvent>,
    audio: Res<Audio>,
    assets: Option<Res<GlobalAsset>>,
    lifecycle: Res<Lifecycle>,
    mut rng: ResMut<GameRng>,
    mut buttons: ResMut<ButtonSounds>,
) {
    let Some(assets) = assets else {
        return;
    };
    for event in events.read() {
        // Death rattles during teardown would outlive the world.
        if *event == SfxEvent::EnemyDied && lifecycle.is_exiting() {
            continue;
        }

        let handle = match event {
            SfxEvent::ButtonClick => {
                let keys = ["button_click", "button_click_alt"];
                let key = keys[buttons.next % keys.len()];
                buttons.next += 1;
                assets.sfx.get(key)
            }
            other => assets.sfx.get(other.key()),
        };
        let Some(handle) = handle else {
            continue;
        };

        let rate = rng.next_f32_range(0.92, 1.08) as f64;
        audio
            .play(handle.clone())
            .with_volume(0.8)
            .with_playback_rate(rate);
    }
}

/// Turns death notifications into sound requests.
fn death_sfx(
    mut enemy_died: EventReader<crate::character::health::EnemyDiedEvent>,
    mut player_died: EventReader<crate::character::health::PlayerDiedEvent>,
    mut sfx: EventWriter<SfxEvent>,
) {
    for _ in enemy_died.read() {
        sfx.send(SfxEvent::EnemyDied);
    }
    for _ in player_died.read() {
        sfx.send(SfxEvent::PlayerHit);
    }
}

pub struct SfxPlugin;

impl Plugin for SfxPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin);
        app.add_event::<SfxEvent>();
        app.init_resource::<ButtonSounds>();
        app.add_systems(PostUpdate, (death_sfx, play_sfx).chain());
    }
}
