//! Pairwise collision detection and eat/grow/remove resolution
//!
//! Everything here is evaluated once per bot per tick, in a fixed order:
//! food contact, then player contact, then bot-vs-bot. Bots eaten during a
//! tick are only marked in a removal set; the live collection is filtered
//! once, after all pairwise checks complete, so later checks never see a
//! half-removed entity mid-iteration.

use glam::Vec2;

use super::state::WorldState;
use super::tick::GameEvent;
use crate::{clamp_to_bounds, distance};

/// Velocity damping applied on both axes when a bot hits a wall
pub const WALL_DAMPING: f32 = 0.8;

/// Floor on any growth increment, so eating never becomes fully flat
pub const MIN_GROWTH: f32 = 0.05;

/// Strict circle-circle contact test (touching exactly is not contact)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    distance(a_pos, b_pos) < a_radius + b_radius
}

/// Diminishing radius increment for an eat event.
///
/// Scales down linearly as the eater approaches `max_size`, floored at
/// [`MIN_GROWTH`] so growth slows near the cap but never stops entirely.
#[inline]
pub fn growth_increment(radius: f32, base: f32, max_size: f32) -> f32 {
    (base * (1.0 - radius / max_size)).max(MIN_GROWTH)
}

/// Apply one diminishing-growth eat event, clamped to `max_size`
#[inline]
pub fn grow(radius: f32, base: f32, max_size: f32) -> f32 {
    (radius + growth_increment(radius, base, max_size)).min(max_size)
}

/// How one bot's collision pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotResolution {
    /// Bot is still live after this pass
    Survived,
    /// Player ate the bot; its bot-vs-bot checks are skipped this tick
    EatenByPlayer,
    /// Bot was bigger than the player: terminal game over
    AtePlayer,
}

/// Run the full fixed-order collision pass for the bot at index `i`.
///
/// `removed` is the per-tick removal set, parallel to `state.bots`. The
/// caller must skip bots already marked there and must filter the collection
/// only after every bot's pass has run.
pub fn resolve_bot(
    state: &mut WorldState,
    i: usize,
    removed: &mut [bool],
    events: &mut Vec<GameEvent>,
) -> BotResolution {
    debug_assert!(!removed[i]);
    let max_size = state.config.max_size;
    let food_growth = state.config.food_growth;

    // Food contact: eaten food is removed immediately, so no later bot in
    // this tick can eat the same particle.
    let bot_pos = state.bots[i].pos;
    let mut bot_radius = state.bots[i].radius;
    state.foods.retain(|food| {
        if circles_overlap(bot_pos, bot_radius, food.pos, food.radius) {
            bot_radius = grow(bot_radius, food_growth, max_size);
            false
        } else {
            true
        }
    });
    state.bots[i].radius = bot_radius;

    // Player contact
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    if circles_overlap(bot_pos, bot_radius, player_pos, player_radius) {
        if bot_radius > player_radius {
            // Bot eats player: terminal. No state is touched; the caller
            // aborts the remainder of this tick's collision work.
            return BotResolution::AtePlayer;
        }
        removed[i] = true;
        state.player.radius = (player_radius + state.config.player_eaten_growth).min(max_size);
        state.score += state.config.points_player_eaten;
        events.push(GameEvent::ScoreChanged(state.score));
        // This bot's radius/position are now stale for pairwise comparisons
        return BotResolution::EatenByPlayer;
    }

    // Bot-vs-bot: only strictly larger eats; equal radii never resolve
    for j in 0..state.bots.len() {
        if j == i || removed[j] {
            continue;
        }
        let (other_pos, other_radius, other_id) = {
            let other = &state.bots[j];
            (other.pos, other.radius, other.id)
        };
        if state.bots[i].radius > other_radius
            && circles_overlap(state.bots[i].pos, state.bots[i].radius, other_pos, other_radius)
        {
            removed[j] = true;
            state.bots[i].radius = grow(state.bots[i].radius, food_growth, max_size);
            log::trace!("bot {} ate bot {}", state.bots[i].id, other_id);
        }
    }

    BotResolution::Survived
}

/// Clamp a bot into world bounds; on a wall hit, damp its smoothed velocity
/// so it cannot pin against the wall at full speed.
pub fn apply_boundaries(state: &mut WorldState, i: usize) {
    let bot = &mut state.bots[i];
    let (pos, hit_wall) = clamp_to_bounds(
        bot.pos,
        bot.radius,
        state.config.world_width,
        state.config.world_height,
    );
    bot.pos = pos;
    if hit_wall {
        bot.vel *= WALL_DAMPING;
    }
}

/// Drop all bots marked in the removal set, preserving order.
///
/// Returns how many were dropped, which is exactly how many replacement
/// spawns the caller owes.
pub fn filter_removed(state: &mut WorldState, removed: &[bool]) -> usize {
    debug_assert_eq!(removed.len(), state.bots.len());
    let before = state.bots.len();
    let mut idx = 0;
    state.bots.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
    before - state.bots.len()
}
