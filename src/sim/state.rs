//! Game state and core simulation types
//!
//! The session owns every entity collection. Spawning only appends to them,
//! collision resolution only removes or mutates, and nothing outside the
//! session holds a reference into them.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::movement::DirectionQueue;
use super::spawn::spawn_food;
use crate::consts::*;
use crate::{cell_center, point_off_board};

/// Maximum undrained events kept on the session
pub const MAX_PENDING_EVENTS: usize = 256;

/// Cell the snake starts on (board center, snapped to the grid)
pub const START_CELL: IVec2 = IVec2::new(
    (GAME_WIDTH / 2 / BLOCK) * BLOCK,
    (GAME_HEIGHT / 2 / BLOCK) * BLOCK,
);

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Snake static, waiting for the first movement or shoot input
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Round ended, entities frozen until restart
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Head was off the board at the start of a move
    Wall,
    /// Head ran into its own body
    SelfCollision,
    /// Head entered a dangerous target's cell
    DangerousTarget,
    /// A bullet hit the food
    ShotFood,
    /// Player quit the round
    Escaped,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::Wall => "hit the wall",
            GameOverCause::SelfCollision => "bit itself",
            GameOverCause::DangerousTarget => "touched a dangerous target",
            GameOverCause::ShotFood => "shot the food",
            GameOverCause::Escaped => "escaped",
        }
    }
}

/// Rarity tiers for dangerous targets
///
/// Everything a tier changes is plain data, so it lives in lookup methods
/// rather than per-tier types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Fast,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Fast,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Score (and growth) awarded for shooting a target of this tier
    pub fn points(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Fast => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 5,
            Rarity::Legendary => 10,
        }
    }

    /// Position in the tier list, 0 for Common
    pub fn ordinal(&self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Fast => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Multiplier applied to the base lifetime (rarer tiers live shorter)
    pub fn lifetime_scale(&self) -> f32 {
        1.0 / (1.0 + self.ordinal() as f32 * 0.2)
    }

    /// Map a 0-99 roll onto the tier weights (50/25/15/8/2)
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..50 => Rarity::Common,
            50..75 => Rarity::Fast,
            75..90 => Rarity::Rare,
            90..98 => Rarity::Epic,
            _ => Rarity::Legendary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Fast => "Fast",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// The player's snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied cells, tail first, head last
    pub segments: VecDeque<IVec2>,
    /// Current head cell (always `segments.back()`)
    pub head: IVec2,
    /// Length the segment list converges toward
    pub logical_length: usize,
    /// Per-tick movement: one cardinal `BLOCK` step, or zero while static
    pub velocity: IVec2,
}

impl Snake {
    pub fn new(start: IVec2) -> Self {
        let mut segments = VecDeque::with_capacity(16);
        segments.push_back(start);
        Self {
            segments,
            head: start,
            logical_length: 1,
            velocity: IVec2::ZERO,
        }
    }

    /// Move the head one step along the velocity and drop the oldest segments
    pub fn advance(&mut self) -> IVec2 {
        self.head += self.velocity;
        self.segments.push_back(self.head);
        self.trim();
        self.head
    }

    /// Drop tail segments until the list fits the logical length
    pub fn trim(&mut self) {
        while self.segments.len() > self.logical_length.max(1) {
            self.segments.pop_front();
        }
    }

    pub fn grow(&mut self, amount: usize) {
        self.logical_length += amount;
    }

    /// Halve the logical length (integer division, never below 1) and trim
    pub fn shrink_by_half(&mut self) -> usize {
        self.logical_length = (self.logical_length / 2).max(1);
        self.trim();
        self.logical_length
    }

    /// Whether any segment, head included, is on `cell`
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.segments.contains(&cell)
    }

    /// Whether any non-head segment is on `cell`
    pub fn body_contains(&self, cell: IVec2) -> bool {
        let body_len = self.segments.len().saturating_sub(1);
        self.segments.iter().take(body_len).any(|&s| s == cell)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Shared behaviour of the three timed target kinds
pub trait TimedTarget {
    fn pos(&self) -> IVec2;
    fn lifetime(&self) -> f32;
    fn lifetime_mut(&mut self) -> &mut f32;

    /// Count one tick off the remaining lifetime
    fn age(&mut self) {
        *self.lifetime_mut() -= 1.0;
    }

    fn is_dead(&self) -> bool {
        self.lifetime() <= 0.0
    }
}

/// Square target: fatal to touch, worth points to shoot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DangerousTarget {
    pub pos: IVec2,
    pub rarity: Rarity,
    /// Ticks left before it vanishes
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl DangerousTarget {
    pub fn new(pos: IVec2, rarity: Rarity, rng: &mut impl Rng) -> Self {
        let base = 60 + rng.random_range(0..=60u32);
        let max_lifetime = base as f32 * rarity.lifetime_scale();
        Self {
            pos,
            rarity,
            lifetime: max_lifetime,
            max_lifetime,
        }
    }
}

/// Circle target: safe to touch, shooting it slows the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowTarget {
    pub pos: IVec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl SlowTarget {
    pub fn new(pos: IVec2, rng: &mut impl Rng) -> Self {
        let max_lifetime = (80 + rng.random_range(0..40u32)) as f32;
        Self {
            pos,
            lifetime: max_lifetime,
            max_lifetime,
        }
    }
}

/// Triangle target: safe to touch, shooting it halves the snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrinkTarget {
    pub pos: IVec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl ShrinkTarget {
    pub fn new(pos: IVec2, rng: &mut impl Rng) -> Self {
        let max_lifetime = (70 + rng.random_range(0..50u32)) as f32;
        Self {
            pos,
            lifetime: max_lifetime,
            max_lifetime,
        }
    }
}

macro_rules! impl_timed_target {
    ($($ty:ty),*) => {
        $(impl TimedTarget for $ty {
            fn pos(&self) -> IVec2 {
                self.pos
            }

            fn lifetime(&self) -> f32 {
                self.lifetime
            }

            fn lifetime_mut(&mut self) -> &mut f32 {
                &mut self.lifetime
            }
        })*
    };
}

impl_timed_target!(DangerousTarget, SlowTarget, ShrinkTarget);

/// A projectile fired from the snake's head
///
/// No lifetime: bullets leave by flying off the board or hitting something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    /// Fire from the center of `cell` along `direction` (straight up if zero)
    pub fn fire(cell: IVec2, direction: IVec2) -> Self {
        let dir = if direction == IVec2::ZERO {
            Vec2::NEG_Y
        } else {
            direction.as_vec2().normalize()
        };
        Self {
            pos: cell_center(cell),
            vel: dir * BULLET_SPEED,
        }
    }

    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_off_board(&self) -> bool {
        point_off_board(self.pos)
    }
}

/// Things that happened since the events were last drained
///
/// Renderers use these for cosmetic effects; the simulation never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    BulletFired { origin: IVec2 },
    FoodEaten { cell: IVec2 },
    TargetShot { cell: IVec2, rarity: Rarity, points: u32 },
    SlowdownTriggered { cell: IVec2 },
    SlowdownEnded,
    SnakeShrunk { cell: IVec2, new_length: usize },
    TargetsSpawned { count: usize },
    GameOver { cause: GameOverCause, score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Single randomness source for every spawn and lifetime roll
    pub(crate) rng: Pcg32,
    pub phase: SessionPhase,
    pub score: u64,
    /// Best score this process has seen (survives resets, never persisted)
    pub high_score: u64,
    pub total_shots: u32,
    pub targets_hit: u32,
    pub food_eaten: u32,
    /// Ticks of slowdown remaining (0 = normal speed)
    pub slowdown_timer: u32,
    /// Ticks since the last target batch
    pub target_spawn_timer: u32,
    /// Ticks simulated this round
    pub time_ticks: u64,
    pub snake: Snake,
    pub food: IVec2,
    pub directions: DirectionQueue,
    /// Dangerous (square) targets, oldest first
    pub targets: Vec<DangerousTarget>,
    pub slow_targets: Vec<SlowTarget>,
    pub shrink_targets: Vec<ShrinkTarget>,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Set once when the round ends
    pub game_over_cause: Option<GameOverCause>,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::NotStarted,
            score: 0,
            high_score: 0,
            total_shots: 0,
            targets_hit: 0,
            food_eaten: 0,
            slowdown_timer: 0,
            target_spawn_timer: 0,
            time_ticks: 0,
            snake: Snake::new(START_CELL),
            food: IVec2::ZERO,
            directions: DirectionQueue::new(),
            targets: Vec::new(),
            slow_targets: Vec::new(),
            shrink_targets: Vec::new(),
            bullets: Vec::new(),
            game_over_cause: None,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        };

        spawn_food(&mut state);

        state
    }

    /// Any target (of any kind) on `cell`
    pub fn target_at(&self, cell: IVec2) -> bool {
        self.targets.iter().any(|t| t.pos == cell)
            || self.slow_targets.iter().any(|t| t.pos == cell)
            || self.shrink_targets.iter().any(|t| t.pos == cell)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Record an event, dropping the oldest when nobody is draining them
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events recorded since the last drain, oldest first
    pub fn events(&self) -> &VecDeque<GameEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}
