use bevy::prelude::*;

use utils::rng::GameRng;

use crate::character::{
    config::CharacterConfigs,
    enemy::{create::spawn_enemy, Boss, Enemy},
    player::Player,
};

use super::{
    config::WaveConfig,
    state::{WavePhase, WaveState},
    tracking::WaveEnemy,
    WaveEvent,
};

/// Drops handles to despawned enemies and counts them as destroyed.
///
/// Runs before the state machine so a wave whose last enemy died this frame
/// advances on the same tick.
pub fn wave_cleanup_system(
    mut state: ResMut<WaveState>,
    enemies: Query<(), With<WaveEnemy>>,
) {
    let before = state.active.len();
    state.active.retain(|&entity| enemies.contains(entity));
    state.destroyed += (before - state.active.len()) as u32;
}

/// Advances the wave cycle. Each wave boundary is crossed exactly once:
/// clearing a wave moves to `Advancing`, and the following tick starts the
/// next wave (or ends the run).
pub fn wave_state_machine_system(
    mut state: ResMut<WaveState>,
    config: Res<WaveConfig>,
    mut rng: ResMut<GameRng>,
    mut events: EventWriter<WaveEvent>,
) {
    match state.phase {
        WavePhase::Spawning => {
            state.tick_timers();
            // Both lists empty AND the minimum duration elapsed.
            if state.wave_cleared() && state.wave_timer_frames == 0 {
                state.phase = WavePhase::Advancing;
                if state.current_wave < config.max_waves {
                    events.send(WaveEvent::Advanced {
                        wave: state.current_wave,
                    });
                }
            }
        }
        WavePhase::Advancing => {
            if state.current_wave >= config.max_waves {
                state.phase = WavePhase::Complete;
                info!(wave = state.current_wave, "final wave cleared");
                events.send(WaveEvent::Completed {
                    wave: state.current_wave,
                });
                return;
            }
            state.current_wave += 1;
            state.begin_wave(&config, &mut rng);
            state.phase = WavePhase::Spawning;
            info!(
                wave = state.current_wave,
                total = state.total_this_wave,
                budget_left = state.budget_remaining,
                "wave started"
            );
            events.send(WaveEvent::Started {
                wave: state.current_wave,
                total: state.total_this_wave,
            });
        }
        WavePhase::Complete => {}
    }
}

/// Releases pending spawns on the stagger interval. The boss, when one is
/// due, is placed immediately at wave start rather than waiting its turn.
pub fn wave_spawn_system(
    mut commands: Commands,
    mut state: ResMut<WaveState>,
    config: Res<WaveConfig>,
    mut rng: ResMut<GameRng>,
    configs: Res<CharacterConfigs>,
    live_enemies: Query<&Transform, With<Enemy>>,
    player: Query<&Transform, With<Player>>,
) {
    if state.phase != WavePhase::Spawning {
        return;
    }

    if state.boss_pending {
        if let Some(kind) = config.boss_kind.clone() {
            let occupied: Vec<Vec2> = live_enemies
                .iter()
                .map(|t| t.translation.truncate())
                .collect();
            let base = pick_spawn_base(&config, &mut rng);
            let position = resolve_spawn_position(base, &occupied, &config, &mut rng);
            let facing = facing_towards_player(position, &player, &config);
            let entity = spawn_enemy(
                &kind,
                position,
                facing,
                state.current_wave,
                &configs,
                &mut commands,
            );
            commands.entity(entity).insert(Boss);
            state.active.push(entity);
            info!(wave = state.current_wave, %kind, "boss entered the field");
        }
        state.boss_pending = false;
    }

    if state.spawn_timer_frames > 0 || state.pending.is_empty() {
        return;
    }

    let Some(kind_index) = state.pending.pop_front() else {
        return;
    };
    let kind = &config.catalog[kind_index];

    let base = pick_spawn_base(&config, &mut rng);
    let occupied: Vec<Vec2> = live_enemies
        .iter()
        .map(|t| t.translation.truncate())
        .collect();
    let position = resolve_spawn_position(base, &occupied, &config, &mut rng);
    let facing = facing_towards_player(position, &player, &config);

    let entity = spawn_enemy(
        &kind.name,
        position,
        facing,
        state.current_wave,
        &configs,
        &mut commands,
    );
    state.active.push(entity);
    state.spawn_timer_frames = state.spawn_interval_frames;
}

fn pick_spawn_base(config: &WaveConfig, rng: &mut GameRng) -> Vec2 {
    if config.spawn_points.is_empty() {
        Vec2::ZERO
    } else {
        let point = config.spawn_points[rng.next_index(config.spawn_points.len())];
        Vec2::from(point)
    }
}

fn facing_towards_player(
    position: Vec2,
    player: &Query<&Transform, With<Player>>,
    config: &WaveConfig,
) -> Vec2 {
    player
        .get_single()
        .ok()
        .filter(|_| config.face_player)
        .map(|t| {
            let towards = t.translation.truncate() - position;
            towards.normalize_or_zero()
        })
        .filter(|f| *f != Vec2::ZERO)
        .unwrap_or_else(|| Vec2::from(config.fallback_facing))
}

/// Tries up to `placement_attempts` random offsets around `base`, keeping the
/// first that stays `min_spawn_separation` away from every live enemy. Falls
/// back to `base` itself when every attempt collides.
fn resolve_spawn_position(
    base: Vec2,
    occupied: &[Vec2],
    config: &WaveConfig,
    rng: &mut GameRng,
) -> Vec2 {
    let min_sq = config.min_spawn_separation * config.min_spawn_separation;
    for _ in 0..config.placement_attempts {
        let candidate = base + rng.offset_in_disc(config.spawn_radius);
        if occupied.iter().all(|&p| p.distance_squared(candidate) >= min_sq) {
            return candidate;
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_avoids_occupied_positions() {
        let config = WaveConfig {
            spawn_radius: 1.0,
            min_spawn_separation: 10.0,
            placement_attempts: 8,
            ..WaveConfig::default()
        };
        let mut rng = GameRng::from_seed(3);
        // Every candidate within radius 1 of the origin sits inside the
        // separation ring, so placement must give up and return the base.
        let occupied = vec![Vec2::new(0.5, 0.0)];
        let pos = resolve_spawn_position(Vec2::ZERO, &occupied, &config, &mut rng);
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn placement_finds_a_clear_spot_when_one_exists() {
        let config = WaveConfig {
            spawn_radius: 100.0,
            min_spawn_separation: 1.0,
            placement_attempts: 32,
            ..WaveConfig::default()
        };
        let mut rng = GameRng::from_seed(11);
        let occupied = vec![Vec2::new(0.0, 0.0)];
        let pos = resolve_spawn_position(Vec2::ZERO, &occupied, &config, &mut rng);
        assert!(pos.distance(occupied[0]) >= config.min_spawn_separation);
    }

    #[test]
    fn placement_without_neighbours_stays_in_radius() {
        let config = WaveConfig {
            spawn_radius: 16.0,
            ..WaveConfig::default()
        };
        let mut rng = GameRng::from_seed(5);
        let base = Vec2::new(100.0, -40.0);
        let pos = resolve_spawn_position(base, &[], &config, &mut rng);
        assert!(pos.distance(base) <= config.spawn_radius + f32::EPSILON);
    }
}
