//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, no wall clock reads
//! - Seeded RNG only (owned by the spawner)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionHit, Rect, detect_collisions, overlaps};
pub use motion::{advance_cars, cull_cars, keep_within_arena, update_player};
pub use spawner::Spawner;
pub use state::{Arena, Car, CarKind, CarType, Direction, GamePhase, GameState, Player};
pub use tick::{Game, GameEvent, tick};
