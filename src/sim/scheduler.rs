//! Tick pacing
//!
//! A fixed-timestep accumulator whose step length depends on whether the
//! session is slowed. The period is re-read after every tick, so a slowdown
//! triggered (or expiring) during a tick only stretches the ticks after it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::tick::tick;
use crate::consts::{MAX_SUBSTEPS, NORMAL_TICK, SLOW_TICK};

/// Which of the two tick periods is in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickRate {
    #[default]
    Normal,
    Slow,
}

impl TickRate {
    pub fn period(&self) -> Duration {
        match self {
            TickRate::Normal => NORMAL_TICK,
            TickRate::Slow => SLOW_TICK,
        }
    }

    /// Slow while any slowdown ticks remain
    pub fn for_state(state: &GameState) -> Self {
        if state.slowdown_timer > 0 {
            TickRate::Slow
        } else {
            TickRate::Normal
        }
    }
}

/// Drives `tick` from elapsed wall-clock time
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    accumulator: Duration,
    rate: TickRate,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate(&self) -> TickRate {
        self.rate
    }

    /// Period of the next scheduled tick
    pub fn period(&self) -> Duration {
        self.rate.period()
    }

    /// Pick up a period change made outside a tick (e.g. a reset)
    pub fn sync(&mut self, state: &GameState) {
        let rate = TickRate::for_state(state);
        if rate != self.rate {
            log::debug!("Tick rate {:?} -> {:?}", self.rate, rate);
            self.rate = rate;
        }
    }

    /// Accumulate `elapsed` and run every tick that is due
    ///
    /// Runs at most `MAX_SUBSTEPS` ticks per call; time beyond that is
    /// dropped rather than replayed later. Returns the number of ticks run.
    pub fn update(&mut self, state: &mut GameState, elapsed: Duration) -> u32 {
        self.sync(state);
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.period() && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.period();
            tick(state);
            self.sync(state);
            ticks += 1;
        }

        if ticks == MAX_SUBSTEPS && self.accumulator >= self.period() {
            log::warn!("Scheduler fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Wall time left before the next tick is due
    pub fn time_until_next_tick(&self) -> Duration {
        self.period().saturating_sub(self.accumulator)
    }
}
