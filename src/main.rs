//! Headless demo driver
//!
//! Runs a seeded world for a fixed number of frames with a scripted pointer
//! and a renderer that only counts draw calls, then prints the outcome.
//! Useful for eyeballing balance changes without a browser host.

use glam::Vec2;

use blob_arena::profile::NoProfiles;
use blob_arena::render::RenderAdapter;
use blob_arena::sim::state::{Appearance, Viewport};
use blob_arena::sim::tick::TickInput;
use blob_arena::sim::GamePhase;
use blob_arena::{Game, HostCallbacks, WorldConfig};

#[derive(Default)]
struct CountingRenderer {
    circles: u64,
}

impl RenderAdapter for CountingRenderer {
    fn draw_grid(&mut self, _viewport: &Viewport, _grid_size: f32) {}

    fn draw_circle(
        &mut self,
        _center: Vec2,
        _radius: f32,
        _appearance: &Appearance,
        _is_player: bool,
    ) {
        self.circles += 1;
    }
}

#[derive(Default)]
struct LoggingCallbacks;

impl HostCallbacks for LoggingCallbacks {
    fn on_score_changed(&mut self, new_score: u64) {
        log::info!("score: {new_score}");
    }

    fn on_game_over(&mut self) {
        log::info!("game over");
    }
}

fn main() {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::new(WorldConfig::default(), 800.0, 600.0, seed, Box::new(NoProfiles));
    log::info!("running headless demo, seed {seed}");

    let mut renderer = CountingRenderer::default();
    let mut callbacks = LoggingCallbacks;

    let frames = 3600; // one minute at 60 fps
    for frame in 0..frames {
        let t = frame as f32 * 0.02;
        // Sweep the pointer in a slow circle so the player roams the world
        let input = TickInput {
            pointer: Vec2::new(400.0 + 250.0 * t.cos(), 300.0 + 180.0 * t.sin()),
            now_ms: frame as f64 * (1000.0 / 60.0),
        };
        game.frame(&input, &mut renderer, &mut callbacks);
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    println!("phase:        {:?}", game.phase());
    println!("score:        {}", game.score());
    println!("player size:  {:.1}", state.player.radius);
    println!("food left:    {}", state.foods.len());
    println!("draw calls:   {}", renderer.circles);
}
