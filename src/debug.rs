//! Periodic state sampling
//!
//! When enabled, every Nth tick captures a [`DebugSnapshot`] and logs it as
//! JSON at debug level. Disabled samplers don't count ticks.

use serde::Serialize;

use crate::settings::DebugSettings;
use crate::sim::{Car, GameState, Player};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot {
    pub tick: u64,
    pub player: Player,
    pub cars: Vec<Car>,
}

impl DebugSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            player: state.player.clone(),
            cars: state.cars.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebugSampler {
    enabled: bool,
    every: u32,
    counter: u32,
    last: Option<DebugSnapshot>,
}

impl DebugSampler {
    pub fn new(settings: &DebugSettings) -> Self {
        Self {
            enabled: settings.enabled,
            every: settings.sample_every.max(1),
            counter: 0,
            last: None,
        }
    }

    /// Count a tick; returns true when a sample was taken
    pub fn on_tick(&mut self, state: &GameState) -> bool {
        if !self.enabled {
            return false;
        }
        self.counter += 1;
        if self.counter < self.every {
            return false;
        }
        self.counter = 0;

        let snapshot = DebugSnapshot::capture(state);
        match serde_json::to_string(&snapshot) {
            Ok(json) => log::debug!("state: {}", json),
            Err(e) => log::warn!("Failed to serialize debug snapshot: {}", e),
        }
        self.last = Some(snapshot);
        true
    }

    pub fn last(&self) -> Option<&DebugSnapshot> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_disabled_sampler_never_samples() {
        let state = GameState::new(&Settings::default());
        let mut sampler = DebugSampler::new(&DebugSettings::default());
        for _ in 0..100 {
            assert!(!sampler.on_tick(&state));
        }
        assert!(sampler.last().is_none());
    }

    #[test]
    fn test_samples_every_nth_tick() {
        let mut state = GameState::new(&Settings::default());
        let mut sampler = DebugSampler::new(&DebugSettings {
            enabled: true,
            sample_every: 3,
        });
        let mut sampled_at = Vec::new();
        for t in 1..=9 {
            state.time_ticks = t;
            if sampler.on_tick(&state) {
                sampled_at.push(t);
            }
        }
        assert_eq!(sampled_at, vec![3, 6, 9]);
        assert_eq!(sampler.last().map(|s| s.tick), Some(9));
    }
}
