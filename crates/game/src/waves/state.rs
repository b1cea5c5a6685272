use std::collections::VecDeque;

use bevy::prelude::*;

use utils::rng::GameRng;

use super::config::WaveConfig;

/// Where the controller currently is in the wave cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WavePhase {
    /// Releasing pending spawns and waiting the wave out.
    Spawning,
    /// Between waves; the next state machine tick starts the next one.
    #[default]
    Advancing,
    /// Final wave cleared. Terminal.
    Complete,
}

/// Mutable wave controller state. Holds entity handles so it stays out of
/// reflection; the debug overlay reads it directly instead.
#[derive(Resource, Debug, Default)]
pub struct WaveState {
    pub phase: WavePhase,
    pub current_wave: u32,

    pub budget_remaining: u32,
    /// Catalog indices selected for this wave, released oldest first.
    pub pending: VecDeque<usize>,
    pub active: Vec<Entity>,
    pub destroyed: u32,
    pub total_this_wave: u32,

    /// Frames until the next pending spawn is released.
    pub spawn_timer_frames: u32,
    /// Frames left before the wave force-advances.
    pub wave_timer_frames: u32,
    pub spawn_interval_frames: u32,

    /// Set when the final wave starts with a boss configured, cleared once
    /// the boss is placed.
    pub boss_pending: bool,
}

impl WaveState {
    /// Reset so that `start_wave` is the first wave the state machine starts.
    pub fn reset_to(&mut self, start_wave: u32) {
        *self = WaveState {
            current_wave: start_wave.saturating_sub(1),
            phase: WavePhase::Advancing,
            ..WaveState::default()
        };
    }

    /// Select this wave's enemies against the point budget and arm the timers.
    ///
    /// Selection picks uniformly from the catalog and stops at the first pick
    /// it cannot afford, so a wave can end with unspent points even when a
    /// cheaper kind would still fit.
    pub fn begin_wave(&mut self, config: &WaveConfig, rng: &mut GameRng) {
        let wave = self.current_wave;
        self.budget_remaining = config.budget_for(wave);
        self.pending.clear();
        self.active.clear();
        self.destroyed = 0;

        let cap = config.spawn_cap(wave);
        while !config.catalog.is_empty() && (self.pending.len() as u32) < cap {
            let index = rng.next_index(config.catalog.len());
            let cost = config.catalog[index].cost;
            if cost > self.budget_remaining {
                break;
            }
            self.budget_remaining -= cost;
            self.pending.push_back(index);
        }

        self.total_this_wave = self.pending.len() as u32;
        self.wave_timer_frames = config.wave_duration_frames;
        self.spawn_interval_frames = config.spawn_interval_frames(self.total_this_wave);
        self.spawn_timer_frames = 0;

        self.boss_pending = config.boss_kind.is_some() && wave == config.max_waves;
        if self.boss_pending {
            self.total_this_wave += 1;
        }
    }

    pub fn tick_timers(&mut self) {
        self.wave_timer_frames = self.wave_timer_frames.saturating_sub(1);
        self.spawn_timer_frames = self.spawn_timer_frames.saturating_sub(1);
    }

    /// True once everything selected for this wave is gone again.
    pub fn wave_cleared(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> GameRng {
        GameRng::from_seed(7)
    }

    #[test]
    fn selection_respects_spawn_cap() {
        let config = WaveConfig {
            spawn_caps: vec![2],
            points_per_wave: 1000,
            ..WaveConfig::default()
        };
        let mut state = WaveState::default();
        state.current_wave = 1;
        state.begin_wave(&config, &mut rng());
        assert_eq!(state.pending.len(), 2);
        assert_eq!(state.total_this_wave, 2);
    }

    #[test]
    fn selection_never_overspends() {
        let config = WaveConfig::default();
        for wave in 1..=12 {
            let mut state = WaveState::default();
            state.current_wave = wave;
            state.begin_wave(&config, &mut rng());
            let spent: u32 = state
                .pending
                .iter()
                .map(|&i| config.catalog[i].cost)
                .sum();
            assert_eq!(spent + state.budget_remaining, config.budget_for(wave));
        }
    }

    #[test]
    fn selection_stops_at_first_unaffordable_pick() {
        // Costs 10 and 5 with a budget of 10: either one 10 then a forced
        // stop, or up to two 5s. Leftover budget is always 0 or 5.
        let config = WaveConfig {
            catalog: vec![
                super::super::config::EnemyKind {
                    name: "big".into(),
                    cost: 10,
                },
                super::super::config::EnemyKind {
                    name: "small".into(),
                    cost: 5,
                },
            ],
            points_per_wave: 10,
            spawn_caps: vec![16],
            ..WaveConfig::default()
        };
        for seed in 0..32 {
            let mut state = WaveState::default();
            state.current_wave = 1;
            let mut rng = GameRng::from_seed(seed);
            state.begin_wave(&config, &mut rng);
            assert!(state.pending.len() <= 2);
            assert!(state.budget_remaining == 0 || state.budget_remaining == 5);
        }
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let config = WaveConfig {
            catalog: Vec::new(),
            ..WaveConfig::default()
        };
        let mut state = WaveState::default();
        state.current_wave = 3;
        state.begin_wave(&config, &mut rng());
        assert!(state.pending.is_empty());
        assert_eq!(state.spawn_interval_frames, 0);
        assert_eq!(state.wave_timer_frames, config.wave_duration_frames);
    }

    #[test]
    fn boss_is_queued_only_for_the_final_wave() {
        let config = WaveConfig {
            max_waves: 4,
            boss_kind: Some("frost_monarch".into()),
            ..WaveConfig::default()
        };
        let mut state = WaveState::default();
        state.current_wave = 3;
        state.begin_wave(&config, &mut rng());
        assert!(!state.boss_pending);

        state.current_wave = 4;
        state.begin_wave(&config, &mut rng());
        assert!(state.boss_pending);
        // The boss counts against the wave tally but not the point budget.
        assert_eq!(state.total_this_wave, state.pending.len() as u32 + 1);
    }

    #[test]
    fn reset_positions_state_before_the_start_wave() {
        let mut state = WaveState::default();
        state.current_wave = 6;
        state.phase = WavePhase::Complete;
        state.reset_to(3);
        assert_eq!(state.current_wave, 2);
        assert_eq!(state.phase, WavePhase::Advancing);
    }
}
