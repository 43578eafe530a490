//! Obstacle spawner
//!
//! A self re-arming timer driven by an injected clock. Each firing picks a
//! direction, a car type and a vertical position, appends the car to the
//! live collection, then draws the next delay from the configured range.
//! Cars may overlap existing traffic at spawn time.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Arena, Car, CarType, Direction, GameState};
use crate::settings::SpawnerSettings;

#[derive(Debug, Clone)]
pub struct Spawner {
    settings: SpawnerSettings,
    rng: Pcg32,
    /// Time left until the next firing; `None` while stopped
    remaining: Option<Duration>,
}

impl Spawner {
    pub fn new(settings: SpawnerSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: Pcg32::seed_from_u64(seed),
            remaining: None,
        }
    }

    /// Schedule the first firing after a random delay
    pub fn arm(&mut self) {
        let delay = self.next_delay();
        log::debug!("Spawner armed, first car in {} ms", delay.as_millis());
        self.remaining = Some(delay);
    }

    /// Cancel the pending firing; `advance` becomes a no-op until re-armed
    pub fn stop(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.remaining
    }

    /// Run the clock forward. Fires at most once per call: an overdue
    /// deadline fires now and the next delay counts from the end of
    /// `elapsed`, so a stalled host never gets a burst of stacked cars.
    /// Returns the ID of the car created, if any.
    pub fn advance(&mut self, elapsed: Duration, state: &mut GameState) -> Option<u32> {
        let remaining = self.remaining?;
        if elapsed < remaining {
            self.remaining = Some(remaining - elapsed);
            return None;
        }
        let spawned = self.spawn(state);
        self.remaining = Some(self.next_delay());
        spawned
    }

    /// One spawn event. Returns `None` when the obstacle cap is reached.
    pub fn spawn(&mut self, state: &mut GameState) -> Option<u32> {
        if state.cars.len() >= self.settings.max_cars {
            log::warn!(
                "Skipping spawn: {} cars already live (cap {})",
                state.cars.len(),
                self.settings.max_cars
            );
            return None;
        }
        if state.car_types.is_empty() {
            return None;
        }

        let direction = if self.rng.random_bool(0.5) {
            Direction::FromLeft
        } else {
            Direction::FromRight
        };
        let car_type = state.car_types[self.rng.random_range(0..state.car_types.len())];
        let y = self.spawn_y(&car_type, direction, &state.arena);

        let id = state.next_entity_id();
        let car = Car::spawn(
            id,
            &car_type,
            direction,
            self.settings.car_speed,
            y,
            &state.arena,
        );
        log::debug!(
            "Spawned car {} ({}) {:?} at ({}, {})",
            id,
            car_type.kind.slug(),
            direction,
            car.pos.x,
            car.pos.y
        );
        state.cars.push(car);
        Some(id)
    }

    fn spawn_y(&mut self, car_type: &CarType, direction: Direction, arena: &Arena) -> f32 {
        match &self.settings.lanes {
            Some(lanes) if !lanes.is_empty() => {
                let lane_y = lanes[self.rng.random_range(0..lanes.len())];
                lane_y - car_type.height / 2.0
            }
            _ => match direction {
                Direction::FromLeft => arena.height - self.settings.band_margin - car_type.height,
                Direction::FromRight => self.settings.band_margin,
            },
        }
    }

    fn next_delay(&mut self) -> Duration {
        let min = self.settings.delay_min_ms;
        let max = self.settings.delay_max_ms.max(min + 1);
        // Zero would fire on every advance
        Duration::from_millis(self.rng.random_range(min..max).max(1))
    }
}
