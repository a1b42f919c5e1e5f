//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host animation-frame signal, never concurrent
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, growth_increment};
pub use spawn::SpawnManager;
pub use state::{Appearance, Bot, Food, GamePhase, Player, Viewport, WorldState};
pub use tick::{GameEvent, TickInput, tick};
