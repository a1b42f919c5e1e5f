//! World configuration
//!
//! Every tunable the simulation reads lives here. A config is supplied once
//! at world creation and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Immutable world tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in world units
    pub world_width: f32,
    /// World height in world units
    pub world_height: f32,
    /// Hard cap on any entity's radius
    pub max_size: f32,
    /// Starting radius for the player and (pre-jitter) for bots
    pub initial_size: f32,
    /// Background grid cell size (render hint only)
    pub grid_size: f32,

    /// Number of food particles seeded at world init (never replenished)
    pub food_count: usize,
    /// Fixed food particle radius
    pub food_radius: f32,
    /// Base growth increment for eating food, before the diminishing factor
    pub food_growth: f32,

    /// Live bot population size
    pub bot_count: usize,
    /// How far a bot can see food; threats are seen at 1.5x this
    pub view_range: f32,
    /// Minimum wall-clock interval between a bot's AI retargets (ms)
    pub decision_rate_ms: f64,
    /// Exponential smoothing coefficient for bot velocity
    pub movement_smoothing: f32,
    /// Bot cruise speed while seeking food or wandering
    pub bot_cruise_speed: f32,
    /// Bot speed while fleeing a threat
    pub bot_flee_speed: f32,

    /// Player base speed before multipliers
    pub player_speed: f32,
    /// Fixed radius increase when the player eats a bot
    pub player_eaten_growth: f32,

    /// Points for eating a food particle
    pub points_food: u64,
    /// Points for eating a bot
    pub points_player_eaten: u64,
    /// Points per whole second survived
    pub points_survival_per_sec: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 2000.0,
            world_height: 2000.0,
            max_size: 200.0,
            initial_size: 20.0,
            grid_size: 50.0,

            food_count: 30,
            food_radius: 3.0,
            food_growth: 1.0,

            bot_count: 20,
            view_range: 300.0,
            decision_rate_ms: 1000.0,
            movement_smoothing: 0.08,
            bot_cruise_speed: 2.0,
            bot_flee_speed: 3.0,

            player_speed: 2.0,
            player_eaten_growth: 3.0,

            points_food: 10,
            points_player_eaten: 50,
            points_survival_per_sec: 1,
        }
    }
}

/// A config value the simulation cannot run with
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid world config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl WorldConfig {
    /// Parse a config from JSON, falling back to defaults for absent fields
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig =
            serde_json::from_str(json).map_err(|e| ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(ConfigError("world dimensions must be positive".into()));
        }
        if self.initial_size <= 0.0 || self.max_size < self.initial_size {
            return Err(ConfigError(
                "initial size must be positive and no larger than max size".into(),
            ));
        }
        // Entities must fit in the world even at max size
        if self.max_size * 2.0 > self.world_width.min(self.world_height) {
            return Err(ConfigError("max size does not fit in the world".into()));
        }
        if self.food_radius <= 0.0 {
            return Err(ConfigError("food radius must be positive".into()));
        }
        if self.decision_rate_ms < 0.0 {
            return Err(ConfigError("decision rate must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.movement_smoothing) {
            return Err(ConfigError("movement smoothing must be in [0, 1]".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = WorldConfig::from_json(r#"{"bot_count": 5, "food_count": 10}"#).unwrap();
        assert_eq!(config.bot_count, 5);
        assert_eq!(config.food_count, 10);
        assert_eq!(config.world_width, 2000.0);
    }

    #[test]
    fn test_rejects_oversized_max() {
        let config = WorldConfig {
            world_width: 100.0,
            world_height: 100.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(WorldConfig::from_json("not json").is_err());
    }
}
