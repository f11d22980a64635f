//! Session invariants - sanity checks that detect bugs.
//!
//! None of these can be broken by player input; a violation means the
//! simulation itself is wrong. `tick` asserts them in debug builds only.

use std::fmt;

use super::state::{GameState, TimedTarget};
use crate::cell_on_board;
use crate::consts::{DIRECTION_QUEUE_CAPACITY, SLOWDOWN_DURATION};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    let snake = &state.snake;
    if snake.logical_length < 1 {
        violation(format!("logical length {} < 1", snake.logical_length));
    }
    if snake.segments.len() > snake.logical_length {
        violation(format!(
            "{} segments exceed logical length {}",
            snake.segments.len(),
            snake.logical_length
        ));
    }
    if snake.segments.back() != Some(&snake.head) {
        violation(format!(
            "head {:?} is not the newest segment {:?}",
            snake.head,
            snake.segments.back()
        ));
    }

    if !cell_on_board(state.food) {
        violation(format!("food {:?} is off the board", state.food));
    }
    if snake.occupies(state.food) {
        violation(format!("food {:?} is under the snake", state.food));
    }

    let target_cells = state
        .targets
        .iter()
        .map(|t| t.pos())
        .chain(state.slow_targets.iter().map(|t| t.pos()))
        .chain(state.shrink_targets.iter().map(|t| t.pos()));
    for cell in target_cells {
        if !cell_on_board(cell) {
            violation(format!("target {:?} is off the board", cell));
        }
    }

    if state.slowdown_timer > SLOWDOWN_DURATION {
        violation(format!(
            "slowdown timer {} > duration {}",
            state.slowdown_timer, SLOWDOWN_DURATION
        ));
    }

    if state.directions.len() > DIRECTION_QUEUE_CAPACITY {
        violation(format!(
            "{} queued directions > capacity {}",
            state.directions.len(),
            DIRECTION_QUEUE_CAPACITY
        ));
    }

    if state.score > state.high_score && state.game_over_cause.is_some() {
        violation(format!(
            "finished round score {} above high score {}",
            state.score, state.high_score
        ));
    }

    violations
}
