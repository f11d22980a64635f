//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, scanned newest first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod invariants;
pub mod movement;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{bullet_hits_cell, resolve_bullets, resolve_movement};
pub use invariants::{InvariantViolation, check_invariants};
pub use movement::{Direction, DirectionQueue};
pub use scheduler::{TickRate, TickScheduler};
pub use session::{Command, CommandOutcome};
pub use snapshot::Snapshot;
pub use spawn::{spawn_food, spawn_target_batch};
pub use state::{
    Bullet, DangerousTarget, GameEvent, GameOverCause, GameState, Rarity, SessionPhase,
    ShrinkTarget, SlowTarget, Snake, TimedTarget, START_CELL,
};
pub use tick::tick;
