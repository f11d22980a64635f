//! Read-only view of the session for renderers
//!
//! Taken once per tick after the simulation step. Owns its data, so the
//! renderer never borrows into the live session.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::movement::Direction;
use super::scheduler::TickRate;
use super::state::{
    Bullet, DangerousTarget, GameOverCause, GameState, SessionPhase, ShrinkTarget, SlowTarget,
};

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub high_score: u64,
    pub total_shots: u32,
    pub targets_hit: u32,
    pub food_eaten: u32,
    pub slowdown_timer: u32,
    pub tick_rate: TickRate,
    pub time_ticks: u64,
    pub game_over_cause: Option<GameOverCause>,
    /// Tail first, head last
    pub segments: Vec<IVec2>,
    pub logical_length: usize,
    /// Turns waiting to be applied, oldest first
    pub queued_directions: Vec<Direction>,
    pub food: IVec2,
    pub targets: Vec<DangerousTarget>,
    pub slow_targets: Vec<SlowTarget>,
    pub shrink_targets: Vec<ShrinkTarget>,
    pub bullets: Vec<Bullet>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            total_shots: self.total_shots,
            targets_hit: self.targets_hit,
            food_eaten: self.food_eaten,
            slowdown_timer: self.slowdown_timer,
            tick_rate: TickRate::for_state(self),
            time_ticks: self.time_ticks,
            game_over_cause: self.game_over_cause,
            segments: self.snake.segments.iter().copied().collect(),
            logical_length: self.snake.logical_length,
            queued_directions: self.directions.iter().copied().collect(),
            food: self.food,
            targets: self.targets.clone(),
            slow_targets: self.slow_targets.clone(),
            shrink_targets: self.shrink_targets.clone(),
            bullets: self.bullets.clone(),
        }
    }
}

impl Snapshot {
    pub fn head(&self) -> Option<IVec2> {
        self.segments.last().copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(31337);
        state.request_shoot();
        state.request_shoot();
        state.trigger_slowdown();

        let snap = state.snapshot();
        assert_eq!(snap.phase, SessionPhase::Playing);
        assert_eq!(snap.head(), Some(state.snake.head));
        assert_eq!(snap.food, state.food);
        assert_eq!(snap.bullets.len(), 1);
        assert_eq!(snap.total_shots, 1);
        assert_eq!(snap.tick_rate, TickRate::Slow);
        assert!(snap.queued_directions.is_empty());

        state.request_direction(-crate::consts::BLOCK, 0);
        assert_eq!(state.snapshot().queued_directions, vec![Direction::Left]);
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::new(8);
        let json = state.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
