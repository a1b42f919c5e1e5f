//! Per-frame orchestrator
//!
//! Owns the world, the spawner, and the outward signal dispatch. The host
//! calls [`Game::frame`] once per animation-frame signal and stops calling
//! when the view is torn down or the run ends.

use crate::config::WorldConfig;
use crate::profile::ProfileImageProvider;
use crate::render::{RenderAdapter, render_world};
use crate::sim::spawn::SpawnManager;
use crate::sim::state::{GamePhase, WorldState};
use crate::sim::tick::{GameEvent, TickInput, tick};

/// The engine's only outward signals. Implementations decide UI effects;
/// `on_game_over` is guaranteed to be invoked exactly once per run.
pub trait HostCallbacks {
    fn on_score_changed(&mut self, _new_score: u64) {}
    fn on_game_over(&mut self) {}
}

/// No-op callbacks for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallbacks;

impl HostCallbacks for NoCallbacks {}

/// A single run of the blob arena
pub struct Game {
    state: WorldState,
    spawner: SpawnManager,
    events: Vec<GameEvent>,
    game_over_fired: bool,
}

impl Game {
    /// Create a world, seed its population, and start in `Running`
    pub fn new(
        config: WorldConfig,
        viewport_width: f32,
        viewport_height: f32,
        seed: u64,
        provider: Box<dyn ProfileImageProvider>,
    ) -> Self {
        let mut state = WorldState::new(config, viewport_width, viewport_height, seed);
        let mut spawner = SpawnManager::new(provider);
        spawner.seed_world(&mut state);
        log::info!("game started with seed {seed}");
        Self {
            state,
            spawner,
            events: Vec::new(),
            game_over_fired: false,
        }
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Grant the player a temporary x2 speed boost
    pub fn activate_speed_boost(&mut self, now_ms: f64, duration_ms: f64) {
        self.state.player.speed_boost = true;
        self.state.player.speed_boost_ends_ms = Some(now_ms + duration_ms);
        log::debug!("speed boost active for {duration_ms}ms");
    }

    /// Advance one frame: simulate, dispatch signals, then issue draw calls.
    ///
    /// Safe to call after game over; the simulation no-ops and only the
    /// final frame is redrawn.
    pub fn frame(
        &mut self,
        input: &TickInput,
        renderer: &mut dyn RenderAdapter,
        callbacks: &mut dyn HostCallbacks,
    ) {
        self.events.clear();
        tick(&mut self.state, input, &mut self.spawner, &mut self.events);

        for event in self.events.drain(..) {
            match event {
                GameEvent::ScoreChanged(score) => callbacks.on_score_changed(score),
                GameEvent::GameOver => {
                    if !self.game_over_fired {
                        self.game_over_fired = true;
                        callbacks.on_game_over();
                    }
                }
            }
        }

        render_world(&self.state, renderer);
    }
}
