//! Configuration errors
//!
//! Everything here is fatal at startup. Nothing in the tick loop returns an
//! error; render lookups degrade by skipping the draw.

use crate::sim::CarKind;

/// Invalid or unloadable [`Settings`](crate::Settings).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("arena dimensions must be finite and positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("car type catalog is empty")]
    EmptyCatalog,

    #[error("car type '{}' appears more than once in the catalog", .kind.slug())]
    DuplicateCarType { kind: CarKind },

    #[error("car type '{}' has invalid dimensions {width}x{height}", .kind.slug())]
    InvalidCarType {
        kind: CarKind,
        width: f32,
        height: f32,
    },

    #[error("player {width}x{height} does not fit in a {arena_width}x{arena_height} arena")]
    PlayerTooLarge {
        width: f32,
        height: f32,
        arena_width: f32,
        arena_height: f32,
    },

    #[error("{what} speed must be finite and positive, got {value}")]
    InvalidSpeed { what: &'static str, value: f32 },

    #[error("spawn delay range [{min_ms}, {max_ms}) ms is empty")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    #[error("lane table is present but empty")]
    EmptyLanes,

    #[error("lane {index} at y={y} lies outside the arena")]
    LaneOutOfBounds { index: usize, y: f32 },

    #[error("obstacle cap must be at least 1")]
    ZeroCarCap,

    #[error("debug sample interval must be at least 1 tick")]
    ZeroSampleInterval,

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
