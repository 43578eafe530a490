//! Per-tick motion and containment
//!
//! The player integrates its velocity and is hard-clamped to the arena.
//! Cars translate along x and are culled once fully off their far edge.

use super::state::{Arena, Car, GameState, Player};

/// Clamp each axis into `[0, arena - size]`
pub fn keep_within_arena(player: &mut Player, arena: &Arena) {
    let max = arena.max_position(player.size).max(glam::Vec2::ZERO);
    player.pos = player.pos.clamp(glam::Vec2::ZERO, max);
}

/// Integrate velocity, then clamp
pub fn update_player(player: &mut Player, arena: &Arena) {
    player.pos += player.vel;
    keep_within_arena(player, arena);
}

/// Advance every live car by one tick
pub fn advance_cars(cars: &mut [Car]) {
    for car in cars {
        car.advance();
    }
}

/// Remove cars that have left the arena, returning their IDs
pub fn cull_cars(state: &mut GameState) -> Vec<u32> {
    let arena = state.arena;
    let mut culled = Vec::new();
    state.cars.retain(|car| {
        if car.has_exited(&arena) {
            log::debug!("Car {} ({}) left the arena", car.id, car.kind.slug());
            culled.push(car.id);
            false
        } else {
            true
        }
    });
    culled
}
