//! Direction commands and snake steering
//!
//! Key presses land in a short FIFO and at most one of them is applied per
//! tick, so two turns pressed within one frame can never both take effect
//! before the snake has moved.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::{BLOCK, DIRECTION_QUEUE_CAPACITY};

/// A cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Per-tick velocity (screen coordinates, y grows downward)
    pub fn velocity(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -BLOCK),
            Direction::Down => IVec2::new(0, BLOCK),
            Direction::Left => IVec2::new(-BLOCK, 0),
            Direction::Right => IVec2::new(BLOCK, 0),
        }
    }

    /// Inverse of `velocity`; anything but a single cardinal step is rejected
    pub fn from_velocity(velocity: IVec2) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.velocity() == velocity)
    }
}

/// Bounded FIFO of pending direction changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(DIRECTION_QUEUE_CAPACITY),
        }
    }

    /// Queue a direction, returning whether it was accepted
    ///
    /// Dropped when the queue is full, or when it repeats the effective last
    /// direction (the newest queued entry, or `current` if nothing is queued).
    /// Reversals are accepted.
    pub fn enqueue(&mut self, direction: Direction, current: IVec2) -> bool {
        if self.pending.len() >= DIRECTION_QUEUE_CAPACITY {
            return false;
        }

        let last = self
            .pending
            .back()
            .map(|d| d.velocity())
            .unwrap_or(current);
        if direction.velocity() == last {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Newest queued direction
    pub fn last(&self) -> Option<Direction> {
        self.pending.back().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}

/// Queue a direction against the snake's current velocity
pub fn enqueue_direction(state: &mut GameState, direction: Direction) -> bool {
    let accepted = state.directions.enqueue(direction, state.snake.velocity);
    if !accepted {
        log::trace!("Direction {:?} dropped", direction);
    }
    accepted
}

/// Pop at most one queued direction and make it the active velocity
///
/// There is no turn validation: an exact reversal is applied like any other
/// turn, and running into the body afterwards is the player's problem.
pub fn apply_next_direction(state: &mut GameState) -> Option<Direction> {
    let next = state.directions.pop()?;
    state.snake.velocity = next.velocity();
    Some(next)
}
