//! Blob Arena - authoritative simulation for a "bigger eats smaller" survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (AI, collisions, spawning, game state)
//! - `render`: Drawing contract the engine requires of a host renderer
//! - `profile`: External profile-image provider contract for bot appearances
//! - `game`: Per-frame orchestrator wiring the sim to host callbacks

pub mod config;
pub mod game;
pub mod profile;
pub mod render;
pub mod sim;

pub use config::WorldConfig;
pub use game::{Game, HostCallbacks};

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Clamp a position so a circle of `radius` stays fully inside the world.
///
/// Returns the clamped position and whether clamping moved it (a wall hit).
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, width: f32, height: f32) -> (Vec2, bool) {
    let clamped = Vec2::new(
        pos.x.clamp(radius, width - radius),
        pos.y.clamp(radius, height - radius),
    );
    (clamped, clamped != pos)
}
