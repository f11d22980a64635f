//! Food placement and periodic target batches

use glam::IVec2;
use rand::Rng;

use super::state::{DangerousTarget, GameEvent, GameState, Rarity, ShrinkTarget, SlowTarget};
use crate::consts::*;

/// Which kind of target a spawn roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Slow,
    Shrink,
    Dangerous,
}

impl TargetKind {
    /// Map a 0-99 roll: 15% slow, 10% shrink, 75% dangerous
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..15 => TargetKind::Slow,
            15..25 => TargetKind::Shrink,
            _ => TargetKind::Dangerous,
        }
    }
}

/// Uniformly random cell, excluding the one-cell border
pub fn random_interior_cell(rng: &mut impl Rng) -> IVec2 {
    let cols = (GAME_WIDTH - BLOCK * 2) / BLOCK;
    let rows = (GAME_HEIGHT - BLOCK * 2) / BLOCK;
    IVec2::new(
        (rng.random_range(0..cols) + 1) * BLOCK,
        (rng.random_range(0..rows) + 1) * BLOCK,
    )
}

/// Move the food to a random interior cell not covered by the snake
///
/// Retries without bound; the snake never covers more than a sliver of the
/// board.
pub fn spawn_food(state: &mut GameState) {
    loop {
        let cell = random_interior_cell(&mut state.rng);
        if !state.snake.occupies(cell) {
            state.food = cell;
            return;
        }
    }
}

/// A target may not share a cell with food, snake, or any other target
pub fn is_valid_target_cell(state: &GameState, cell: IVec2) -> bool {
    cell != state.food && !state.snake.occupies(cell) && !state.target_at(cell)
}

/// Spawn between 0 and `MAX_TARGETS_PER_BATCH` targets
///
/// Each target gets `TARGET_PLACEMENT_ATTEMPTS` tries at finding a free cell
/// and is skipped if none turns up. Returns how many were placed.
pub fn spawn_target_batch(state: &mut GameState) -> usize {
    let count = state.rng.random_range(0..=MAX_TARGETS_PER_BATCH);
    let mut placed = 0;

    for _ in 0..count {
        let Some(cell) = find_target_cell(state) else {
            continue;
        };

        match TargetKind::from_roll(state.rng.random_range(0..100)) {
            TargetKind::Slow => {
                let target = SlowTarget::new(cell, &mut state.rng);
                state.slow_targets.push(target);
            }
            TargetKind::Shrink => {
                let target = ShrinkTarget::new(cell, &mut state.rng);
                state.shrink_targets.push(target);
            }
            TargetKind::Dangerous => {
                let rarity = Rarity::from_roll(state.rng.random_range(0..100));
                let target = DangerousTarget::new(cell, rarity, &mut state.rng);
                state.targets.push(target);
            }
        }
        placed += 1;
    }

    if placed > 0 {
        log::debug!(
            "Spawned {} targets ({} dangerous, {} slow, {} shrink live)",
            placed,
            state.targets.len(),
            state.slow_targets.len(),
            state.shrink_targets.len()
        );
        state.push_event(GameEvent::TargetsSpawned { count: placed });
    }

    placed
}

fn find_target_cell(state: &mut GameState) -> Option<IVec2> {
    for _ in 0..TARGET_PLACEMENT_ATTEMPTS {
        let cell = random_interior_cell(&mut state.rng);
        if is_valid_target_cell(state, cell) {
            return Some(cell);
        }
    }
    None
}
