//! Per-frame simulation tick
//!
//! One tick runs per host animation-frame signal, in fixed order: bot AI
//! (decide + integrate), player controller, collision resolution, removal
//! filtering, then one replacement spawn per removal. A game-over resolution
//! aborts the remainder of the frame's collision work.

use glam::Vec2;

use super::ai;
use super::collision::{self, BotResolution, circles_overlap, grow};
use super::player::update_player;
use super::spawn::SpawnManager;
use super::state::{GamePhase, WorldState};

/// Host-supplied input for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Pointer position in screen space, read once per frame
    pub pointer: Vec2,
    /// Wall-clock time in milliseconds
    pub now_ms: f64,
}

/// Outward signal produced during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score increased; carries the new total
    ScoreChanged(u64),
    /// The run ended (a bigger bot ate the player)
    GameOver,
}

/// Advance the world by one frame. Events are appended to `events`.
pub fn tick(
    state: &mut WorldState,
    input: &TickInput,
    spawner: &mut SpawnManager,
    events: &mut Vec<GameEvent>,
) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    credit_survival(state, input.now_ms, events);

    // Bot decisions (throttled per bot) and movement (every frame)
    for i in 0..state.bots.len() {
        ai::decide(state, i, input.now_ms);
        ai::integrate(state, i);
    }

    update_player(state, input.pointer, input.now_ms);
    resolve_player_food(state, events);

    // Collision resolution, one pass per bot; bots marked eaten earlier in
    // the tick are skipped entirely.
    let mut removed = vec![false; state.bots.len()];
    for i in 0..state.bots.len() {
        if removed[i] {
            continue;
        }
        match collision::resolve_bot(state, i, &mut removed, events) {
            BotResolution::AtePlayer => {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver);
                log::info!("game over at score {}", state.score);
                return;
            }
            BotResolution::EatenByPlayer => {}
            BotResolution::Survived => collision::apply_boundaries(state, i),
        }
    }

    // Growth during collisions can push a wall-hugging player out of
    // bounds; re-clamp so positions are valid at tick end.
    let (pos, _) = crate::clamp_to_bounds(
        state.player.pos,
        state.player.radius,
        state.config.world_width,
        state.config.world_height,
    );
    state.player.pos = pos;

    // Population repair: exactly one respawn per removal
    let dropped = collision::filter_removed(state, &removed);
    for _ in 0..dropped {
        spawner.respawn(state);
    }
}

/// Accrue survival points from elapsed wall-clock time (one point batch per
/// whole second, remainder carried forward).
fn credit_survival(state: &mut WorldState, now_ms: f64, events: &mut Vec<GameEvent>) {
    if let Some(last) = state.last_tick_ms {
        let elapsed = (now_ms - last).max(0.0);
        state.survival_accum_ms += elapsed;
        let whole_secs = (state.survival_accum_ms / 1000.0).floor() as u64;
        if whole_secs > 0 {
            state.survival_accum_ms -= whole_secs as f64 * 1000.0;
            if state.config.points_survival_per_sec > 0 {
                state.score += whole_secs * state.config.points_survival_per_sec;
                events.push(GameEvent::ScoreChanged(state.score));
            }
        }
    }
    state.last_tick_ms = Some(now_ms);
}

/// The player eats any overlapping food with the same diminishing growth as
/// bots, earning the food point value per particle.
fn resolve_player_food(state: &mut WorldState, events: &mut Vec<GameEvent>) {
    let pos = state.player.pos;
    let mut radius = state.player.radius;
    let max_size = state.config.max_size;
    let food_growth = state.config.food_growth;

    let mut eaten = 0u64;
    state.foods.retain(|food| {
        if circles_overlap(pos, radius, food.pos, food.radius) {
            radius = grow(radius, food_growth, max_size);
            eaten += 1;
            false
        } else {
            true
        }
    });
    state.player.radius = radius;

    if eaten > 0 {
        state.score += eaten * state.config.points_food;
        events.push(GameEvent::ScoreChanged(state.score));
    }
}
