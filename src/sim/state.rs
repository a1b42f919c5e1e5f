//! World state and core entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::WorldConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active play
    Running,
    /// Run ended (terminal; only reached when a bigger bot eats the player)
    GameOver,
}

/// How an entity is filled when drawn.
///
/// Decided once at spawn time and never mutated; the renderer discriminates
/// on the variant, never on ad hoc runtime checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Flat fill color, identified by HSL hue in degrees
    Color { hue: f32 },
    /// Image fill clipped to the circle, with a hue to show until it loads
    ProfileImage { url: String, fallback_hue: f32 },
}

impl Appearance {
    /// Random-hue flat color
    pub fn random_color(rng: &mut Pcg32) -> Self {
        Appearance::Color {
            hue: rng.random_range(0.0..360.0),
        }
    }

    /// The hue drawn while an image is loading (or always, for colors)
    pub fn fallback_hue(&self) -> f32 {
        match self {
            Appearance::Color { hue } => *hue,
            Appearance::ProfileImage { fallback_hue, .. } => *fallback_hue,
        }
    }
}

/// The player's blob
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Base speed before size/boost multipliers
    pub speed: f32,
    pub speed_boost: bool,
    /// Wall-clock time (ms) when the boost expires
    pub speed_boost_ends_ms: Option<f64>,
}

/// An autonomous bot blob
#[derive(Debug, Clone)]
pub struct Bot {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Current cruise/flee speed, set by the AI each decision
    pub speed: f32,
    /// Where the AI is steering toward
    pub target: Vec2,
    /// Wall-clock time (ms) of the last AI decision
    pub last_decision_ms: f64,
    /// Reserved behavior scalar in [0, 1]; not yet branched on
    pub personality: f32,
    /// Smoothed velocity - the AI steers this, it is never set directly
    pub vel: Vec2,
    pub appearance: Appearance,
}

/// A food particle
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub pos: Vec2,
    pub radius: f32,
}

/// Camera window into world space
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Camera center in world units
    pub pos: Vec2,
    /// Screen-space size
    pub width: f32,
    pub height: f32,
}

/// The single mutable aggregate the whole core operates on per frame
#[derive(Debug, Clone)]
pub struct WorldState {
    pub config: WorldConfig,
    pub phase: GamePhase,
    pub player: Player,
    /// Live bots, stable order by spawn; ids are unique per session
    pub bots: Vec<Bot>,
    /// Seeded once at init and never replenished
    pub foods: Vec<Food>,
    pub viewport: Viewport,
    /// Monotonically non-decreasing
    pub score: u64,
    /// Wall-clock time of the previous tick, for survival scoring
    pub last_tick_ms: Option<f64>,
    /// Sub-second remainder of survival time not yet credited
    pub survival_accum_ms: f64,
    pub rng: Pcg32,
    next_id: u32,
}

impl WorldState {
    /// Create a world with the player centered and the camera on the player.
    ///
    /// Bots and food are seeded separately by [`SpawnManager::seed_world`].
    ///
    /// [`SpawnManager::seed_world`]: crate::sim::spawn::SpawnManager::seed_world
    pub fn new(config: WorldConfig, viewport_width: f32, viewport_height: f32, seed: u64) -> Self {
        let center = Vec2::new(config.world_width / 2.0, config.world_height / 2.0);
        let player = Player {
            pos: center,
            radius: config.initial_size,
            speed: config.player_speed,
            speed_boost: false,
            speed_boost_ends_ms: None,
        };
        Self {
            player,
            phase: GamePhase::Running,
            bots: Vec::with_capacity(config.bot_count),
            foods: Vec::with_capacity(config.food_count),
            viewport: Viewport {
                pos: center,
                width: viewport_width,
                height: viewport_height,
            },
            score: 0,
            last_tick_ms: None,
            survival_accum_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        }
    }

    /// Allocate a new bot ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_centers_player_and_camera() {
        let state = WorldState::new(WorldConfig::default(), 800.0, 600.0, 1);
        assert_eq!(state.player.pos, Vec2::new(1000.0, 1000.0));
        assert_eq!(state.viewport.pos, state.player.pos);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = WorldState::new(WorldConfig::default(), 800.0, 600.0, 1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_color_hue_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let Appearance::Color { hue } = Appearance::random_color(&mut rng) else {
                panic!("expected color variant");
            };
            assert!((0.0..360.0).contains(&hue));
        }
    }
}
