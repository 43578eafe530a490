//! Axis-aligned bounding-box collision detection
//!
//! Touching counts as overlapping: two rectangles collide unless they are
//! strictly separated on at least one axis. No epsilon is applied.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{CarKind, GameState};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Inclusive AABB overlap test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.bottom() < b.top()
        || a.top() > b.bottom()
        || a.right() < b.left()
        || a.left() > b.right())
}

/// A car touching the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionHit {
    pub car_id: u32,
    pub kind: CarKind,
}

/// Test the player against every live car
pub fn detect_collisions(state: &GameState) -> Vec<CollisionHit> {
    if state.cars.is_empty() {
        return Vec::new();
    }

    let player = state.player.rect();
    state
        .cars
        .iter()
        .filter(|car| overlaps(&player, &car.rect()))
        .map(|car| CollisionHit {
            car_id: car.id,
            kind: car.kind,
        })
        .collect()
}
