//! Fixed tick game loop
//!
//! [`tick`] advances one frame: player motion, car motion, collision pass,
//! then culling. Cars are culled after the collision pass so a car touching
//! the player on its last visible tick still registers.
//!
//! [`Game`] wraps the state with the spawner and debug sampler and exposes
//! the callbacks a host wires to its frame, timer and keyboard events. The
//! spawner runs on its own clock (`advance_clock`); only car advancement is
//! tied to `step`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::collision::detect_collisions;
use super::motion::{advance_cars, cull_cars, update_player};
use super::spawner::Spawner;
use super::state::{CarKind, Direction, GamePhase, GameState};
use crate::debug::{DebugSampler, DebugSnapshot};
use crate::error::ConfigError;
use crate::input::Key;
use crate::render::{self, Playground};
use crate::settings::Settings;

/// Notifications for the host. The core never reacts to these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CarSpawned {
        car_id: u32,
        kind: CarKind,
        direction: Direction,
    },
    CarDespawned {
        car_id: u32,
    },
    /// The player's box touches a car's box
    Collision { car_id: u32, kind: CarKind },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;

    update_player(&mut state.player, &state.arena);
    advance_cars(&mut state.cars);

    for hit in detect_collisions(state) {
        log::debug!(
            "Tick {}: player hit car {} ({})",
            state.time_ticks,
            hit.car_id,
            hit.kind.slug()
        );
        events.push(GameEvent::Collision {
            car_id: hit.car_id,
            kind: hit.kind,
        });
    }

    events.extend(
        cull_cars(state)
            .into_iter()
            .map(|car_id| GameEvent::CarDespawned { car_id }),
    );

    events
}

/// A running game: state, spawner and debug sampler
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    spawner: Spawner,
    debug: DebugSampler,
}

impl Game {
    /// Validate settings and build a game in the `NotStarted` phase
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            state: GameState::new(settings),
            spawner: Spawner::new(settings.spawner.clone(), seed),
            debug: DebugSampler::new(&settings.debug),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Request every image the game will draw
    pub fn preload<P: Playground>(&self, playground: &mut P) {
        render::preload(&self.state.car_types, playground);
    }

    /// Asset-ready signal: `NotStarted -> Running`. Later calls are ignored.
    pub fn on_ready(&mut self) {
        if self.state.phase == GamePhase::Running {
            log::warn!("Ready signal received twice, ignoring");
            return;
        }
        self.state.player.reset(&self.state.arena);
        self.spawner.arm();
        self.state.phase = GamePhase::Running;
        log::info!(
            "Game started in a {}x{} arena",
            self.state.arena.width,
            self.state.arena.height
        );
    }

    /// Per-frame tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.state);
        if self.state.phase == GamePhase::Running {
            self.debug.on_tick(&self.state);
        }
        events
    }

    /// Timer signal: run the spawner clock forward by `elapsed`.
    /// At most one car spawns per call.
    pub fn advance_clock(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Running {
            return Vec::new();
        }
        self.spawner
            .advance(elapsed, &mut self.state)
            .into_iter()
            .filter_map(|id| self.state.car(id))
            .map(|car| GameEvent::CarSpawned {
                car_id: car.id,
                kind: car.kind,
                direction: car.direction,
            })
            .collect()
    }

    /// Draw the current state. Never mutates the game.
    /// Returns the number of draws skipped for missing images.
    pub fn render<P: Playground>(&self, playground: &mut P) -> usize {
        render::render(&self.state, playground)
    }

    pub fn key_down(&mut self, key: Key) {
        log::trace!("key down: {}", key.as_str());
        self.state.player.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        log::trace!("key up: {}", key.as_str());
        self.state.player.release(key);
    }

    /// Cancel the spawner's pending timer
    pub fn stop(&mut self) {
        self.spawner.stop();
    }

    /// Most recent debug sample, if sampling is enabled
    pub fn debug_snapshot(&self) -> Option<&DebugSnapshot> {
        self.debug.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PlayerSettings;
    use crate::sim::state::{Car, CarType};
    use glam::Vec2;

    fn scenario_game() -> Game {
        let mut settings = Settings::default();
        settings.player = PlayerSettings {
            width: 5.0,
            height: 10.0,
            speed: 1.0,
            bottom_margin: 2.0,
        };
        let mut game = Game::new(&settings, 7).expect("valid settings");
        game.on_ready();
        // Traffic is staged by hand
        game.stop();
        game
    }

    fn spawn_sedan(game: &mut Game, direction: Direction, y: f32) -> u32 {
        let state = game.state_mut();
        let id = state.next_entity_id();
        let sedan = CarType::new(CarKind::Sedan, 19.0, 10.0);
        let car = Car::spawn(id, &sedan, direction, 1.0, y, &state.arena);
        state.cars.push(car);
        id
    }

    #[test]
    fn test_not_started_does_nothing() {
        let mut game = Game::new(&Settings::default(), 1).expect("valid settings");
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.step().is_empty());
        assert!(game.advance_clock(Duration::from_secs(60)).is_empty());
        assert_eq!(game.state().time_ticks, 0);
        assert!(game.state().cars.is_empty());
    }

    #[test]
    fn test_ready_starts_once() {
        let mut game = Game::new(&Settings::default(), 1).expect("valid settings");
        game.state_mut().player.pos = Vec2::new(3.0, 3.0);
        game.on_ready();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.spawner().is_armed());
        assert_eq!(game.state().player.pos, Vec2::new(47.5, 88.0));

        game.state_mut().player.pos = Vec2::new(3.0, 3.0);
        game.on_ready();
        assert_eq!(game.state().player.pos, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_car_crosses_and_is_removed() {
        let mut game = scenario_game();
        assert_eq!(game.state().player.pos, Vec2::new(47.5, 88.0));
        let id = spawn_sedan(&mut game, Direction::FromLeft, 83.0);

        for _ in 0..25 {
            game.step();
        }
        assert_eq!(game.state().car(id).map(|c| c.pos.x), Some(6.0));

        for _ in 25..94 {
            game.step();
        }
        assert_eq!(game.state().car(id).map(|c| c.pos.x), Some(75.0));

        for _ in 94..119 {
            game.step();
        }
        // Sitting exactly on the far edge is still inside
        assert_eq!(game.state().car(id).map(|c| c.pos.x), Some(100.0));

        let events = game.step();
        assert!(game.state().car(id).is_none());
        assert!(events.contains(&GameEvent::CarDespawned { car_id: id }));
    }

    #[test]
    fn test_collision_event_while_crossing() {
        let mut game = scenario_game();
        let id = spawn_sedan(&mut game, Direction::FromLeft, 83.0);

        let mut hit_ticks = Vec::new();
        for t in 1..=130 {
            let events = game.step();
            if events.contains(&GameEvent::Collision {
                car_id: id,
                kind: CarKind::Sedan,
            }) {
                hit_ticks.push(t);
            }
        }
        // Car spans [x, x+19] and the player [47.5, 52.5]:
        // contact from x = 29 (tick 48) through x = 52 (tick 71)
        assert_eq!(hit_ticks.first(), Some(&48));
        assert_eq!(hit_ticks.last(), Some(&71));
        assert_eq!(hit_ticks.len(), 24);
    }

    #[test]
    fn test_player_moves_with_keys() {
        let mut game = scenario_game();
        game.key_down(Key::Left);
        game.step();
        assert_eq!(game.state().player.pos, Vec2::new(46.5, 88.0));

        game.key_down(Key::Right);
        game.key_up(Key::Left);
        game.step();
        assert_eq!(game.state().player.pos, Vec2::new(47.5, 88.0));

        game.key_up(Key::Right);
        game.key_down(Key::Down);
        for _ in 0..10 {
            game.step();
        }
        // Clamped to arena height - player height
        assert_eq!(game.state().player.pos.y, 90.0);
    }

    #[test]
    fn test_spawns_reported_as_events() {
        let mut game = Game::new(&Settings::default(), 3).expect("valid settings");
        game.on_ready();
        let mut spawned = 0;
        for _ in 0..300 {
            spawned += game
                .advance_clock(Duration::from_millis(100))
                .iter()
                .filter(|e| matches!(e, GameEvent::CarSpawned { .. }))
                .count();
        }
        assert!(spawned >= 5);
        assert_eq!(spawned, game.state().cars.len());
    }

    #[test]
    fn test_paused_host_does_not_burst() {
        let mut game = Game::new(&Settings::default(), 3).expect("valid settings");
        game.on_ready();
        let events = game.advance_clock(Duration::from_secs(600));
        assert_eq!(events.len(), 1);
        assert_eq!(game.state().cars.len(), 1);
    }

    #[test]
    fn test_debug_sampling_every_nth_tick() {
        let mut settings = Settings::default();
        settings.debug.enabled = true;
        settings.debug.sample_every = 10;
        let mut game = Game::new(&settings, 1).expect("valid settings");
        game.on_ready();

        for _ in 0..9 {
            game.step();
        }
        assert!(game.debug_snapshot().is_none());
        game.step();
        assert_eq!(game.debug_snapshot().map(|s| s.tick), Some(10));
        for _ in 0..15 {
            game.step();
        }
        assert_eq!(game.debug_snapshot().map(|s| s.tick), Some(20));
    }

    #[test]
    fn test_determinism() {
        let mut game1 = Game::new(&Settings::dense(), 99999).expect("valid settings");
        let mut game2 = Game::new(&Settings::dense(), 99999).expect("valid settings");
        game1.on_ready();
        game2.on_ready();

        for frame in 0..600 {
            if frame == 100 {
                game1.key_down(Key::Up);
                game2.key_down(Key::Up);
            }
            let frame_time = Duration::from_millis(16);
            let a = (game1.advance_clock(frame_time), game1.step());
            let b = (game2.advance_clock(frame_time), game2.step());
            assert_eq!(a, b);
        }

        assert_eq!(game1.state().cars, game2.state().cars);
        assert_eq!(game1.state().player, game2.state().player);
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let mut settings = Settings::default();
        settings.car_types.clear();
        assert!(matches!(
            Game::new(&settings, 1),
            Err(ConfigError::EmptyCatalog)
        ));
    }
}
