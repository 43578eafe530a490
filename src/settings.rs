//! Game settings
//!
//! Loaded from JSON (string or file); every field falls back to its default.
//! [`Settings::validate`] rejects anything that would make spawn geometry or
//! clamping undefined.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{CarKind, CarType};

/// Simulation bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Player sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a key is held
    pub speed: f32,
    /// Gap between the spawn position and the bottom edge
    pub bottom_margin: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            bottom_margin: PLAYER_BOTTOM_MARGIN,
        }
    }
}

/// Traffic generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    /// Inclusive lower bound of the re-arm delay
    pub delay_min_ms: u64,
    /// Exclusive upper bound of the re-arm delay
    pub delay_max_ms: u64,
    /// Pixels per tick
    pub car_speed: f32,
    /// Lane center lines (y). Without lanes, cars use one band per direction.
    pub lanes: Option<Vec<f32>>,
    /// Band offset from the top/bottom edge when lanes are off
    pub band_margin: f32,
    /// Live obstacle cap; spawns beyond it are skipped
    pub max_cars: usize,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            delay_min_ms: SPAWN_DELAY_MIN_MS,
            delay_max_ms: SPAWN_DELAY_MAX_MS,
            car_speed: CAR_SPEED,
            lanes: None,
            band_margin: BAND_MARGIN,
            max_cars: MAX_CARS,
        }
    }
}

/// State sampling for external inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    pub enabled: bool,
    /// Sample every N ticks
    pub sample_every: u32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            sample_every: DEBUG_SAMPLE_EVERY,
        }
    }
}

/// Default catalog
pub fn default_car_types() -> Vec<CarType> {
    vec![
        CarType::new(CarKind::Sedan, 19.0, 10.0),
        CarType::new(CarKind::Wagon, 22.0, 10.0),
        CarType::new(CarKind::Truck, 30.0, 20.0),
    ]
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub player: PlayerSettings,
    pub car_types: Vec<CarType>,
    pub spawner: SpawnerSettings,
    pub debug: DebugSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: ArenaSettings::default(),
            player: PlayerSettings::default(),
            car_types: default_car_types(),
            spawner: SpawnerSettings::default(),
            debug: DebugSettings::default(),
        }
    }
}

impl Settings {
    /// Busier traffic on three fixed lanes
    pub fn dense() -> Self {
        let mut settings = Self::default();
        settings.spawner.delay_min_ms = 500;
        settings.spawner.delay_max_ms = 600;
        settings.spawner.lanes = Some(vec![25.0, 50.0, 75.0]);
        settings
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaSettings { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }

        let player = &self.player;
        let player_dims_ok = player.width.is_finite()
            && player.height.is_finite()
            && player.width > 0.0
            && player.height > 0.0;
        if !player_dims_ok
            || player.width > width
            || player.height + player.bottom_margin > height
        {
            return Err(ConfigError::PlayerTooLarge {
                width: player.width,
                height: player.height,
                arena_width: width,
                arena_height: height,
            });
        }
        check_speed("player", player.speed)?;

        if self.car_types.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, car_type) in self.car_types.iter().enumerate() {
            let dims_ok = car_type.width.is_finite()
                && car_type.height.is_finite()
                && car_type.width > 0.0
                && car_type.height > 0.0;
            if !dims_ok {
                return Err(ConfigError::InvalidCarType {
                    kind: car_type.kind,
                    width: car_type.width,
                    height: car_type.height,
                });
            }
            if self.car_types[..i].iter().any(|t| t.kind == car_type.kind) {
                return Err(ConfigError::DuplicateCarType {
                    kind: car_type.kind,
                });
            }
        }

        let spawner = &self.spawner;
        if spawner.delay_min_ms == 0 || spawner.delay_min_ms >= spawner.delay_max_ms {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: spawner.delay_min_ms,
                max_ms: spawner.delay_max_ms,
            });
        }
        check_speed("car", spawner.car_speed)?;
        if let Some(lanes) = &spawner.lanes {
            if lanes.is_empty() {
                return Err(ConfigError::EmptyLanes);
            }
            if let Some((index, &y)) = lanes
                .iter()
                .enumerate()
                .find(|(_, y)| !(y.is_finite() && **y >= 0.0 && **y <= height))
            {
                return Err(ConfigError::LaneOutOfBounds { index, y });
            }
        }
        if spawner.max_cars == 0 {
            return Err(ConfigError::ZeroCarCap);
        }

        if self.debug.sample_every == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }

        Ok(())
    }
}

fn check_speed(what: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed { what, value })
    }
}
