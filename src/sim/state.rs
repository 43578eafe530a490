//! Game state and core simulation types
//!
//! The whole simulation is one owned [`GameState`]; every system borrows it
//! explicitly for the duration of a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::input::Key;
use crate::settings::{PlayerSettings, Settings};

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the host's asset-ready signal
    NotStarted,
    /// Ticking
    Running,
}

/// Fixed-size simulation bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Largest position an entity of `size` may occupy while staying inside
    #[inline]
    pub fn max_position(&self, size: Vec2) -> Vec2 {
        self.size() - size
    }
}

/// Obstacle sprite classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarKind {
    Sedan,
    Wagon,
    Truck,
}

impl CarKind {
    pub const ALL: [CarKind; 3] = [CarKind::Sedan, CarKind::Wagon, CarKind::Truck];

    pub fn slug(&self) -> &'static str {
        match self {
            CarKind::Sedan => "sedan",
            CarKind::Wagon => "wagon",
            CarKind::Truck => "truck",
        }
    }
}

/// Immutable catalog entry used as a spawn template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarType {
    pub kind: CarKind,
    pub width: f32,
    pub height: f32,
}

impl CarType {
    pub const fn new(kind: CarKind, width: f32, height: f32) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Screen edge a car enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    FromLeft,
    FromRight,
}

impl Direction {
    /// Sign of the car's x velocity
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::FromLeft => 1.0,
            Direction::FromRight => -1.0,
        }
    }
}

/// An obstacle instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub kind: CarKind,
    pub direction: Direction,
    /// Pixels per tick, always positive
    pub speed: f32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Car {
    /// Create a car fully off-screen on its entry edge at height `y`
    pub fn spawn(
        id: u32,
        car_type: &CarType,
        direction: Direction,
        speed: f32,
        y: f32,
        arena: &Arena,
    ) -> Self {
        let x = match direction {
            Direction::FromLeft => -car_type.width,
            Direction::FromRight => arena.width + car_type.width,
        };
        Self {
            id,
            kind: car_type.kind,
            direction,
            speed,
            pos: Vec2::new(x, y),
            width: car_type.width,
            height: car_type.height,
        }
    }

    /// Move one tick along the direction of travel
    #[inline]
    pub fn advance(&mut self) {
        self.pos.x += self.direction.sign() * self.speed;
    }

    /// True once the car has fully left the arena on its far side
    pub fn has_exited(&self, arena: &Arena) -> bool {
        match self.direction {
            Direction::FromLeft => self.pos.x > arena.width,
            Direction::FromRight => self.pos.x < -self.width,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }
}

/// The player-controlled sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Magnitude applied per axis on key press
    pub speed: f32,
    /// Each component is 0 or ±speed
    pub vel: Vec2,
    /// Gap kept below the player at spawn
    pub bottom_margin: f32,
}

impl Player {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(settings.width, settings.height),
            speed: settings.speed,
            vel: Vec2::ZERO,
            bottom_margin: settings.bottom_margin,
        }
    }

    /// Horizontally centered, anchored just above the bottom edge
    pub fn start_position(&self, arena: &Arena) -> Vec2 {
        Vec2::new(
            arena.width / 2.0 - self.size.x / 2.0,
            arena.height - (self.size.y + self.bottom_margin),
        )
    }

    /// Restore the canonical start position
    pub fn reset(&mut self, arena: &Arena) {
        self.pos = self.start_position(arena);
    }

    /// Key down: drive the key's axis at full speed in its direction
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => self.vel.x = -self.speed,
            Key::Right => self.vel.x = self.speed,
            Key::Up => self.vel.y = -self.speed,
            Key::Down => self.vel.y = self.speed,
        }
    }

    /// Key up: stop the axis only if it is still moving the key's way
    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left if self.vel.x < 0.0 => self.vel.x = 0.0,
            Key::Right if self.vel.x > 0.0 => self.vel.x = 0.0,
            Key::Up if self.vel.y < 0.0 => self.vel.y = 0.0,
            Key::Down if self.vel.y > 0.0 => self.vel.y = 0.0,
            _ => {}
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub phase: GamePhase,
    /// Ticks run since the game started
    pub time_ticks: u64,
    pub player: Player,
    /// Read-only spawn templates
    pub car_types: Vec<CarType>,
    /// Live obstacles (iteration order only affects draw order)
    pub cars: Vec<Car>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build the initial state. Settings are expected to be validated.
    pub fn new(settings: &Settings) -> Self {
        let arena = Arena::new(settings.arena.width, settings.arena.height);
        let mut player = Player::new(&settings.player);
        player.reset(&arena);
        Self {
            arena,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            player,
            car_types: settings.car_types.clone(),
            cars: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Catalog lookup
    pub fn car_type(&self, kind: CarKind) -> Option<&CarType> {
        self.car_types.iter().find(|t| t.kind == kind)
    }

    pub fn car(&self, id: u32) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }
}
