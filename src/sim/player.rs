//! Player movement and camera tracking
//!
//! Converts a screen-space pointer position into world-space movement
//! relative to the viewport center, then smooths both the player and the
//! camera toward their targets.

use glam::Vec2;

use super::state::WorldState;
use crate::clamp_to_bounds;

/// Pointer distance from viewport center below which the player holds still
pub const DEAD_ZONE: f32 = 20.0;

/// Exponential smoothing coefficient for player position
pub const MOVE_SMOOTHING: f32 = 0.4;

/// Camera smoothing coefficient; much slower so the camera lags the player
pub const CAMERA_SMOOTHING: f32 = 0.03;

/// Speed multiplier while a boost is active
pub const BOOST_MULTIPLIER: f32 = 2.0;

/// Run one frame of player movement and camera tracking.
///
/// `pointer` is in screen space; `now_ms` is wall-clock time used for boost
/// expiry.
pub fn update_player(state: &mut WorldState, pointer: Vec2, now_ms: f64) {
    let player = &mut state.player;

    // Boost auto-expires once the clock passes its stored end time
    if player.speed_boost
        && let Some(ends) = player.speed_boost_ends_ms
        && now_ms > ends
    {
        player.speed_boost = false;
        player.speed_boost_ends_ms = None;
        log::debug!("speed boost expired");
    }

    let offset = pointer - Vec2::new(state.viewport.width / 2.0, state.viewport.height / 2.0);
    let dist = offset.length();

    if dist > DEAD_ZONE {
        // Slower as the player grows, never below the base speed
        let size_multiplier =
            (3.0 - 0.5 * player.radius / state.config.initial_size).max(1.0);
        let boost_multiplier = if player.speed_boost {
            BOOST_MULTIPLIER
        } else {
            1.0
        };

        let step = offset / dist * player.speed * size_multiplier * boost_multiplier;
        player.pos += step * MOVE_SMOOTHING;

        let (clamped, _) = clamp_to_bounds(
            player.pos,
            player.radius,
            state.config.world_width,
            state.config.world_height,
        );
        player.pos = clamped;
    }

    // Camera trails the player every frame, even while the player holds still
    let player_pos = state.player.pos;
    state.viewport.pos += (player_pos - state.viewport.pos) * CAMERA_SMOOTHING;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn test_state() -> WorldState {
        WorldState::new(WorldConfig::default(), 800.0, 600.0, 42)
    }

    fn center_pointer(state: &WorldState) -> Vec2 {
        Vec2::new(state.viewport.width / 2.0, state.viewport.height / 2.0)
    }

    #[test]
    fn test_pointer_at_center_does_not_move_player() {
        let mut state = test_state();
        let start = state.player.pos;
        let pointer = center_pointer(&state);
        update_player(&mut state, pointer, 0.0);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_pointer_inside_dead_zone_does_not_move_player() {
        let mut state = test_state();
        let start = state.player.pos;
        let pointer = center_pointer(&state) + Vec2::new(15.0, 10.0); // dist < 20
        update_player(&mut state, pointer, 0.0);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_moves_toward_pointer() {
        let mut state = test_state();
        let start = state.player.pos;
        let pointer = center_pointer(&state) + Vec2::new(100.0, 0.0);
        update_player(&mut state, pointer, 0.0);
        assert!(state.player.pos.x > start.x);
        assert_eq!(state.player.pos.y, start.y);
    }

    #[test]
    fn test_boost_doubles_step() {
        let mut normal = test_state();
        let mut boosted = test_state();
        boosted.player.speed_boost = true;
        boosted.player.speed_boost_ends_ms = Some(10_000.0);

        let pointer = center_pointer(&normal) + Vec2::new(100.0, 0.0);
        let start = normal.player.pos;
        update_player(&mut normal, pointer, 0.0);
        update_player(&mut boosted, pointer, 0.0);

        let normal_step = normal.player.pos.x - start.x;
        let boosted_step = boosted.player.pos.x - start.x;
        assert!((boosted_step - normal_step * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_boost_expires() {
        let mut state = test_state();
        state.player.speed_boost = true;
        state.player.speed_boost_ends_ms = Some(5000.0);

        let pointer = center_pointer(&state);
        update_player(&mut state, pointer, 4000.0);
        assert!(state.player.speed_boost);

        update_player(&mut state, pointer, 5001.0);
        assert!(!state.player.speed_boost);
        assert!(state.player.speed_boost_ends_ms.is_none());
    }

    #[test]
    fn test_bigger_player_moves_slower() {
        let mut small = test_state();
        let mut big = test_state();
        big.player.radius = 200.0;

        let pointer = center_pointer(&small) + Vec2::new(100.0, 0.0);
        let start = small.player.pos;
        update_player(&mut small, pointer, 0.0);
        update_player(&mut big, pointer, 0.0);

        assert!(small.player.pos.x - start.x > big.player.pos.x - start.x);
        // But never below the base speed
        assert!(big.player.pos.x > start.x);
    }

    #[test]
    fn test_player_clamped_to_world() {
        let mut state = test_state();
        state.player.pos = Vec2::new(25.0, 25.0);
        let pointer = center_pointer(&state) + Vec2::new(-200.0, -200.0);
        for _ in 0..500 {
            update_player(&mut state, pointer, 0.0);
        }
        assert!(state.player.pos.x >= state.player.radius);
        assert!(state.player.pos.y >= state.player.radius);
    }

    #[test]
    fn test_camera_lags_player() {
        let mut state = test_state();
        let pointer = center_pointer(&state) + Vec2::new(200.0, 0.0);
        for _ in 0..30 {
            update_player(&mut state, pointer, 0.0);
        }
        // Camera has started following but has not caught up
        assert!(state.viewport.pos.x > 1000.0);
        assert!(state.viewport.pos.x < state.player.pos.x);
    }
}
