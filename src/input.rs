//! Logical keys delivered by the host

use serde::{Deserialize, Serialize};

/// One of the four movement directions. Left/right drive the x axis,
/// up/down the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Left, Key::Right, Key::Up, Key::Down];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
        }
    }

    /// Map a raw key name. Keys the game doesn't use map to `None`.
    pub fn from_str(name: &str) -> Option<Self> {
        match name {
            "left" | "ArrowLeft" => Some(Key::Left),
            "right" | "ArrowRight" => Some(Key::Right),
            "up" | "ArrowUp" => Some(Key::Up),
            "down" | "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}
