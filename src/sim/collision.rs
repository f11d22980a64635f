//! Collision detection and response
//!
//! Two passes per tick. The bullet pass runs before the snake turns; the
//! movement pass runs after. Within each pass the checks happen in a fixed
//! order and the first decisive outcome stops the rest.

use glam::{IVec2, Vec2};

use super::spawn::spawn_food;
use super::state::{GameEvent, GameOverCause, GameState, TimedTarget};
use crate::consts::HIT_RADIUS;
use crate::{cell_center, cell_on_board};

/// Whether a bullet at `bullet` is close enough to the center of `cell`
#[inline]
pub fn bullet_hits_cell(bullet: Vec2, cell: IVec2) -> bool {
    bullet.distance(cell_center(cell)) < HIT_RADIUS
}

/// Index of the newest target a bullet at `bullet` overlaps
pub fn newest_hit<T: TimedTarget>(targets: &[T], bullet: Vec2) -> Option<usize> {
    targets.iter().rposition(|t| bullet_hits_cell(bullet, t.pos()))
}

/// Age every target by one tick and drop the expired ones
pub fn expire_targets(state: &mut GameState) {
    fn age_all<T: TimedTarget>(targets: &mut Vec<T>) {
        targets.iter_mut().for_each(|t| t.age());
        targets.retain(|t| !t.is_dead());
    }

    age_all(&mut state.targets);
    age_all(&mut state.slow_targets);
    age_all(&mut state.shrink_targets);
}

/// Move bullets and resolve what they hit
///
/// Bullets are walked newest first so removals never shift the ones still
/// to be visited. Each bullet scores at most one hit per tick, checked in
/// the order: food, dangerous, slow, shrink. Hitting the food ends the round
/// and stops the pass.
pub fn resolve_bullets(state: &mut GameState) {
    for i in (0..state.bullets.len()).rev() {
        state.bullets[i].step();
        if state.bullets[i].is_off_board() {
            state.bullets.remove(i);
            continue;
        }

        let pos = state.bullets[i].pos;

        if bullet_hits_cell(pos, state.food) {
            log::debug!("Bullet hit the food at {:?}", state.food);
            state.end_game(GameOverCause::ShotFood);
            break;
        }

        if let Some(j) = newest_hit(&state.targets, pos) {
            let target = state.targets.remove(j);
            state.bullets.remove(i);
            let points = target.rarity.points();
            state.score += u64::from(points);
            state.snake.grow(points as usize);
            state.targets_hit += 1;
            log::debug!(
                "Shot {} target at {:?} (+{})",
                target.rarity.as_str(),
                target.pos,
                points
            );
            state.push_event(GameEvent::TargetShot {
                cell: target.pos,
                rarity: target.rarity,
                points,
            });
            continue;
        }

        if let Some(j) = newest_hit(&state.slow_targets, pos) {
            let target = state.slow_targets.remove(j);
            state.bullets.remove(i);
            state.trigger_slowdown();
            state.targets_hit += 1;
            state.push_event(GameEvent::SlowdownTriggered { cell: target.pos });
            continue;
        }

        if let Some(j) = newest_hit(&state.shrink_targets, pos) {
            let target = state.shrink_targets.remove(j);
            state.bullets.remove(i);
            let new_length = state.snake.shrink_by_half();
            state.targets_hit += 1;
            log::debug!("Shrink target hit, length now {}", new_length);
            state.push_event(GameEvent::SnakeShrunk {
                cell: target.pos,
                new_length,
            });
        }
    }
}

/// Wall check, advance, then food, dangerous target and self collisions
///
/// The wall test looks at the head left by the previous tick, so a snake
/// that steps off the board is only caught on the following tick. Slow and
/// shrink targets are ignored here: driving through them is harmless.
pub fn resolve_movement(state: &mut GameState) {
    if !cell_on_board(state.snake.head) {
        state.end_game(GameOverCause::Wall);
        return;
    }

    let head = state.snake.advance();

    if head == state.food {
        spawn_food(state);
        state.snake.grow(1);
        state.score += 1;
        state.food_eaten += 1;
        state.push_event(GameEvent::FoodEaten { cell: head });
    }

    if state.targets.iter().any(|t| t.pos == head) {
        state.end_game(GameOverCause::DangerousTarget);
        return;
    }

    if state.snake.body_contains(head) {
        state.end_game(GameOverCause::SelfCollision);
    }
}
