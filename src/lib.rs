//! Road Crossing - A lane-crossing arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawner, motion, collisions, game loop)
//! - `render`: Host drawing surface and the read-only frame renderer
//! - `assets`: Enum-keyed image identifiers and the preload manifest
//! - `input`: Logical keys delivered by the host
//! - `settings`: Data-driven configuration with validation
//! - `debug`: Periodic state sampling for external inspection

pub mod assets;
pub mod debug;
pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;
pub use sim::{Game, GameEvent, GameState};

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 100.0;
    pub const ARENA_HEIGHT: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 5.0;
    pub const PLAYER_HEIGHT: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 0.4;
    /// Gap between the player's spawn position and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 2.0;

    /// Spawn delay range in milliseconds, `[min, max)`
    pub const SPAWN_DELAY_MIN_MS: u64 = 2000;
    pub const SPAWN_DELAY_MAX_MS: u64 = 6000;
    /// Obstacle speed (pixels per tick)
    pub const CAR_SPEED: f32 = 1.0;
    /// Distance of the laneless traffic bands from the top/bottom edges
    pub const BAND_MARGIN: f32 = 7.0;
    /// Upper bound on live obstacles
    pub const MAX_CARS: usize = 64;

    /// Debug snapshot every N ticks
    pub const DEBUG_SAMPLE_EVERY: u32 = 10;

    /// Frame clear color
    pub const CLEAR_COLOR: &str = "#0f380f";
    /// Minimap placement, measured from the bottom-right corner
    pub const MINIMAP_WIDTH: f32 = 29.0;
    pub const MINIMAP_HEIGHT: f32 = 27.0;
    pub const MINIMAP_MARGIN: f32 = 2.0;
}
