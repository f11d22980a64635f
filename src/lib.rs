//! Fire Snake - grid snake with a gun
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, session state)
//! - `settings`: Runner configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Side length of one grid cell, in pixels
    pub const BLOCK: i32 = 20;
    /// Board dimensions (pixels)
    pub const GAME_WIDTH: i32 = 800;
    pub const GAME_HEIGHT: i32 = 600;

    /// Tick periods (12 Hz normal, 6 Hz while slowed)
    pub const NORMAL_TICK: Duration = Duration::from_millis(1000 / 12);
    pub const SLOW_TICK: Duration = Duration::from_millis(1000 / 6);
    /// Maximum ticks per scheduler update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ticks a slowdown lasts (10 seconds at 12 Hz)
    pub const SLOWDOWN_DURATION: u32 = 120;
    /// Ticks between target batch spawns
    pub const TARGET_SPAWN_INTERVAL: u32 = 60;
    /// Largest target batch (inclusive)
    pub const MAX_TARGETS_PER_BATCH: u32 = 5;
    /// Placement attempts per target before giving up on it
    pub const TARGET_PLACEMENT_ATTEMPTS: u32 = 50;

    /// Bullet travel per tick (pixels)
    pub const BULLET_SPEED: f32 = 50.0;
    /// Bullet-to-cell-center distance that counts as a hit
    pub const HIT_RADIUS: f32 = BLOCK as f32 / 2.0 + 5.0;

    /// Pending direction commands
    pub const DIRECTION_QUEUE_CAPACITY: usize = 3;
}

/// Continuous center of a grid cell
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2() + Vec2::splat(consts::BLOCK as f32 / 2.0)
}

/// Whether a cell lies on the board: `[0, GAME_WIDTH) x [0, GAME_HEIGHT)`
#[inline]
pub fn cell_on_board(cell: IVec2) -> bool {
    (0..consts::GAME_WIDTH).contains(&cell.x) && (0..consts::GAME_HEIGHT).contains(&cell.y)
}

/// Whether a continuous point lies outside the board (edges count as inside)
#[inline]
pub fn point_off_board(point: Vec2) -> bool {
    point.x < 0.0
        || point.x > consts::GAME_WIDTH as f32
        || point.y < 0.0
        || point.y > consts::GAME_HEIGHT as f32
}
