//! Population seeding and quadrant-balanced respawning
//!
//! Eaten bots are replaced one-for-one after collision resolution, each in a
//! pseudo-randomly chosen corner quadrant so the spatial distribution does
//! not collapse toward one region over a long session.

use glam::Vec2;
use rand::Rng;

use super::state::{Bot, Food, WorldState};
use crate::profile::{ProfileImageProvider, UsedImageRegistry, choose_appearance};

/// Each corner quadrant spans this fraction of the world on both axes
pub const QUADRANT_FRACTION: f32 = 0.4;

/// Spawn-radius jitter: initial size scaled by [0.8, 1.2)
pub const RADIUS_JITTER: f32 = 0.2;

/// Creates and replaces bots, assigning appearances from the injected
/// profile-image provider with the used-URL registry for dedup.
pub struct SpawnManager {
    provider: Box<dyn ProfileImageProvider>,
    registry: UsedImageRegistry,
}

impl SpawnManager {
    pub fn new(provider: Box<dyn ProfileImageProvider>) -> Self {
        Self {
            provider,
            registry: UsedImageRegistry::new(),
        }
    }

    /// URLs currently assigned this session (for inspection/tests)
    pub fn registry(&self) -> &UsedImageRegistry {
        &self.registry
    }

    /// Seed the initial population: the configured food count uniformly at
    /// random, then the configured bot count uniformly at random. Resets the
    /// used-image registry first.
    pub fn seed_world(&mut self, state: &mut WorldState) {
        self.registry.reset();

        let (w, h) = (state.config.world_width, state.config.world_height);
        let food_radius = state.config.food_radius;
        for _ in 0..state.config.food_count {
            let pos = Vec2::new(
                state.rng.random_range(food_radius..w - food_radius),
                state.rng.random_range(food_radius..h - food_radius),
            );
            state.foods.push(Food {
                pos,
                radius: food_radius,
            });
        }

        for _ in 0..state.config.bot_count {
            let pos = Vec2::new(state.rng.random_range(0.0..w), state.rng.random_range(0.0..h));
            self.spawn_bot_at(state, pos);
        }

        log::info!(
            "seeded world: {} bots, {} foods, {} profile images in use",
            state.bots.len(),
            state.foods.len(),
            self.registry.len()
        );
    }

    /// Replace one eaten bot, picking one of the four corner quadrants
    /// pseudo-randomly.
    pub fn respawn(&mut self, state: &mut WorldState) {
        let quadrant = state.rng.random_range(0..4u8);
        self.respawn_in_quadrant(state, quadrant);
    }

    /// Replace one eaten bot, placed uniformly within the given quadrant
    pub fn respawn_in_quadrant(&mut self, state: &mut WorldState, quadrant: u8) {
        let pos = quadrant_position(state, quadrant);
        let bot = self.spawn_bot_at(state, pos);
        log::debug!("respawned bot {bot} in quadrant {quadrant}");
    }

    /// Create one bot: jittered initial radius, zero smoothed velocity, and
    /// a target equal to the spawn position so it stays put until its first
    /// AI decision fires. Returns the new bot's id.
    fn spawn_bot_at(&mut self, state: &mut WorldState, pos: Vec2) -> u32 {
        let jitter = 1.0 - RADIUS_JITTER + state.rng.random::<f32>() * RADIUS_JITTER * 2.0;
        let radius = state.config.initial_size * jitter;
        let (pos, _) = crate::clamp_to_bounds(
            pos,
            radius,
            state.config.world_width,
            state.config.world_height,
        );
        let appearance = choose_appearance(self.provider.as_ref(), &mut self.registry, &mut state.rng);
        let personality = state.rng.random::<f32>();
        let id = state.next_entity_id();
        state.bots.push(Bot {
            id,
            pos,
            radius,
            speed: state.config.bot_cruise_speed,
            target: pos,
            last_decision_ms: 0.0,
            personality,
            vel: Vec2::ZERO,
            appearance,
        });
        id
    }
}

/// Uniform position inside one of the four fixed corner quadrants.
///
/// Quadrant 0 is top-left, 1 top-right, 2 bottom-left, 3 bottom-right; each
/// spans [`QUADRANT_FRACTION`] of the world per axis.
fn quadrant_position(state: &mut WorldState, quadrant: u8) -> Vec2 {
    let (w, h) = (state.config.world_width, state.config.world_height);
    let span_x = w * QUADRANT_FRACTION;
    let span_y = h * QUADRANT_FRACTION;
    let x = state.rng.random_range(0.0..span_x);
    let y = state.rng.random_range(0.0..span_y);
    match quadrant {
        0 => Vec2::new(x, y),
        1 => Vec2::new(w - span_x + x, y),
        2 => Vec2::new(x, h - span_y + y),
        _ => Vec2::new(w - span_x + x, h - span_y + y),
    }
}
