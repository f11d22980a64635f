//! Idle/demo mode - a simple bot that plays the game
//!
//! Reads the session and proposes at most one command per tick. It never
//! mutates anything itself; the caller feeds the command back in like any
//! other input.

use glam::IVec2;

use super::collision::bullet_hits_cell;
use super::movement::Direction;
use super::session::Command;
use super::state::{Bullet, GameState, SessionPhase};
use crate::cell_on_board;

/// Pick the bot's next command, if any
pub fn steer(state: &GameState, allow_shooting: bool) -> Option<Command> {
    if state.phase != SessionPhase::Playing {
        return None;
    }

    // Let a queued turn land before deciding again
    if !state.directions.is_empty() {
        return None;
    }

    if allow_shooting && state.bullets.is_empty() && shot_scores(state) {
        return Some(Command::Shoot);
    }

    let head = state.snake.head;
    let current = Direction::from_velocity(state.snake.velocity);

    // Closest safe neighbour to the food, preferring to keep going straight
    let best = Direction::ALL
        .into_iter()
        .filter(|d| is_safe(state, head + d.velocity()))
        .min_by_key(|&d| {
            let next = head + d.velocity();
            let dist = (state.food - next).abs();
            (dist.x + dist.y, Some(d) != current)
        });

    // None when boxed in, or when straight ahead is already best
    best.filter(|&d| Some(d) != current).map(Command::Turn)
}

/// Whether a bullet fired now would hit a dangerous target before the food
///
/// Replays the bullet's path against the current board; targets don't move,
/// so this is exact unless one expires mid-flight.
pub fn shot_scores(state: &GameState) -> bool {
    let mut bullet = Bullet::fire(state.snake.head, state.snake.velocity);
    loop {
        bullet.step();
        if bullet.is_off_board() || bullet_hits_cell(bullet.pos, state.food) {
            return false;
        }
        if state.targets.iter().any(|t| bullet_hits_cell(bullet.pos, t.pos)) {
            return true;
        }
    }
}

fn is_safe(state: &GameState, cell: IVec2) -> bool {
    cell_on_board(cell)
        && !state.snake.body_contains(cell)
        && !state.targets.iter().any(|t| t.pos == cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BLOCK;
    use crate::sim::state::{DangerousTarget, Rarity};

    fn started(food: IVec2) -> GameState {
        let mut state = GameState::new(1);
        state.request_direction(BLOCK, 0);
        state.directions.clear();
        state.snake.velocity = Direction::Right.velocity();
        state.food = food;
        state
    }

    #[test]
    fn test_idle_outside_play() {
        let state = GameState::new(1);
        assert_eq!(steer(&state, true), None);
    }

    #[test]
    fn test_turns_toward_food() {
        // Food straight above the head
        let state = started(IVec2::new(400, 100));
        assert_eq!(steer(&state, false), Some(Command::Turn(Direction::Up)));
    }

    #[test]
    fn test_keeps_straight_when_aligned() {
        let state = started(IVec2::new(600, 300));
        assert_eq!(steer(&state, false), None);
    }

    #[test]
    fn test_avoids_dangerous_target() {
        let mut state = started(IVec2::new(600, 300));
        state.targets.push(DangerousTarget {
            pos: IVec2::new(420, 300),
            rarity: Rarity::Common,
            lifetime: 50.0,
            max_lifetime: 50.0,
        });
        let command = steer(&state, false);
        assert!(matches!(
            command,
            Some(Command::Turn(Direction::Up)) | Some(Command::Turn(Direction::Down))
        ));
    }

    #[test]
    fn test_shoots_target_in_line() {
        let mut state = started(IVec2::new(100, 100));
        // Bullet steps land at x = 460, 510, ...; the cell at 500 is centered on 510
        state.targets.push(DangerousTarget {
            pos: IVec2::new(500, 300),
            rarity: Rarity::Rare,
            lifetime: 50.0,
            max_lifetime: 50.0,
        });
        assert!(shot_scores(&state));
        assert_eq!(steer(&state, true), Some(Command::Shoot));
        assert_ne!(steer(&state, false), Some(Command::Shoot));
    }

    #[test]
    fn test_holds_fire_when_food_in_the_way() {
        let mut state = started(IVec2::new(500, 300));
        state.targets.push(DangerousTarget {
            pos: IVec2::new(700, 300),
            rarity: Rarity::Rare,
            lifetime: 50.0,
            max_lifetime: 50.0,
        });
        assert!(!shot_scores(&state));
    }
}
