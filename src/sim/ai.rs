//! Bot decision making and movement integration
//!
//! Decisions (retargets) run on a per-bot wall-clock cadence, so they are
//! asynchronous across bots and decoupled from the frame rate. Movement
//! integration runs every frame regardless.

use glam::Vec2;
use rand::Rng;

use super::state::WorldState;
use crate::distance;

/// A threat must be at least this much bigger than the bot
pub const THREAT_RADIUS_FACTOR: f32 = 1.2;

/// Threats are noticed at this multiple of the food view range
pub const THREAT_RANGE_FACTOR: f32 = 1.5;

/// Re-evaluate the bot's target if its decision cadence has elapsed.
///
/// Priority order: flee the nearest threat, else seek the nearest visible
/// food, else wander to a random nearby point. Fleeing overrides food
/// seeking entirely for the decision cycle.
pub fn decide(state: &mut WorldState, i: usize, now_ms: f64) {
    if now_ms - state.bots[i].last_decision_ms < state.config.decision_rate_ms {
        return;
    }
    state.bots[i].last_decision_ms = now_ms;

    let bot_pos = state.bots[i].pos;
    let bot_radius = state.bots[i].radius;
    let view_range = state.config.view_range;
    let threat_range = view_range * THREAT_RANGE_FACTOR;
    let threat_radius = bot_radius * THREAT_RADIUS_FACTOR;

    // Nearest threat among the other bots and the player
    let mut nearest_threat: Option<(Vec2, f32)> = None;
    let mut consider = |pos: Vec2, radius: f32| {
        if radius <= threat_radius {
            return;
        }
        let dist = distance(bot_pos, pos);
        if dist < threat_range && nearest_threat.is_none_or(|(_, best)| dist < best) {
            nearest_threat = Some((pos, dist));
        }
    };
    for (j, other) in state.bots.iter().enumerate() {
        if j != i {
            consider(other.pos, other.radius);
        }
    }
    consider(state.player.pos, state.player.radius);

    if let Some((threat_pos, _)) = nearest_threat {
        // Flee to a point one view range directly away from the threat
        let away = (bot_pos - threat_pos).normalize_or_zero();
        let target = clamp_target(state, bot_pos + away * view_range, bot_radius);
        state.bots[i].speed = state.config.bot_flee_speed;
        state.bots[i].target = target;
        log::trace!("bot {} fleeing", state.bots[i].id);
        return;
    }

    state.bots[i].speed = state.config.bot_cruise_speed;

    // Nearest food within view range
    let nearest_food = state
        .foods
        .iter()
        .map(|food| (food.pos, distance(bot_pos, food.pos)))
        .filter(|(_, dist)| *dist < view_range)
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((food_pos, _)) = nearest_food {
        state.bots[i].target = food_pos;
    } else {
        // No food visible: wander to a random nearby point
        let dx = (state.rng.random::<f32>() - 0.5) * view_range;
        let dy = (state.rng.random::<f32>() - 0.5) * view_range;
        let target = clamp_target(state, bot_pos + Vec2::new(dx, dy), bot_radius);
        state.bots[i].target = target;
    }
}

fn clamp_target(state: &WorldState, target: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        target.x.clamp(radius, state.config.world_width - radius),
        target.y.clamp(radius, state.config.world_height - radius),
    )
}

/// Advance the bot one frame toward its current target.
///
/// The desired velocity shrinks as the bot approaches max size, and the
/// actual velocity is exponentially interpolated toward it, which gives the
/// bots inertia instead of instant direction changes.
pub fn integrate(state: &mut WorldState, i: usize) {
    let max_size = state.config.max_size;
    let smoothing = state.config.movement_smoothing;
    let bot = &mut state.bots[i];

    let delta = bot.target - bot.pos;
    let dist = delta.length();
    if dist > 0.0 {
        let speed = bot.speed * (1.0 - 0.5 * bot.radius / max_size);
        let desired = delta / dist * speed;
        bot.vel += (desired - bot.vel) * smoothing;
        bot.pos += bot.vel;
    }
}
