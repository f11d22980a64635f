//! Fixed-step simulation tick
//!
//! Core game loop that advances the session by one discrete step.

use super::collision::{expire_targets, resolve_bullets, resolve_movement};
use super::invariants::check_invariants;
use super::movement::apply_next_direction;
use super::spawn::spawn_target_batch;
use super::state::{GameEvent, GameState};
use crate::consts::TARGET_SPAWN_INTERVAL;

/// Advance the session by one tick
///
/// Does nothing unless a round is in progress. Order matters: timers, target
/// spawning, target expiry, bullets, one queued turn, then the snake's move
/// and its collisions.
pub fn tick(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    // Slowdown countdown
    if state.slowdown_timer > 0 {
        state.slowdown_timer -= 1;
        if state.slowdown_timer == 0 {
            log::debug!("Slowdown expired at tick {}", state.time_ticks);
            state.push_event(GameEvent::SlowdownEnded);
        }
    }

    state.target_spawn_timer += 1;
    if state.target_spawn_timer >= TARGET_SPAWN_INTERVAL {
        spawn_target_batch(state);
        state.target_spawn_timer = 0;
    }

    expire_targets(state);

    resolve_bullets(state);

    apply_next_direction(state);

    if state.is_playing() {
        resolve_movement(state);
    }

    debug_assert!(
        check_invariants(state).is_empty(),
        "{:?}",
        check_invariants(state)
    );
}
