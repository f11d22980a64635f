//! Session state machine and player commands
//!
//! NotStarted -> Playing on the first movement or shoot input, Playing ->
//! GameOver when a collision (or escape) ends the round, and GameOver back to
//! NotStarted (or straight to Playing) on the next movement or shoot input.
//! Commands take effect immediately; queued turns land on the next tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::movement::{Direction, enqueue_direction};
use super::spawn::spawn_food;
use super::state::{Bullet, GameEvent, GameOverCause, GameState, SessionPhase, Snake, START_CELL};
use crate::consts::SLOWDOWN_DURATION;

/// A player command, already mapped from whatever input device produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Turn(Direction),
    Shoot,
    Escape,
    Restart,
}

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// Escape outside of play: the process should exit (code 0)
    Exit,
}

impl GameState {
    /// Apply a command to the session
    pub fn handle_command(&mut self, command: Command) -> CommandOutcome {
        use SessionPhase::*;

        match (self.phase, command) {
            (NotStarted | GameOver, Command::Escape) => return CommandOutcome::Exit,
            (Playing, Command::Escape) => self.end_game(GameOverCause::Escaped),
            (_, Command::Restart) => self.reset(),
            (GameOver, Command::Shoot) => self.reset(),
            (GameOver, Command::Turn(direction)) => {
                self.reset();
                self.begin();
                enqueue_direction(self, direction);
            }
            // The starting press only starts the round; it fires nothing
            (NotStarted, Command::Shoot) => self.begin(),
            (NotStarted, Command::Turn(direction)) => {
                self.begin();
                enqueue_direction(self, direction);
            }
            (Playing, Command::Shoot) => self.shoot(),
            (Playing, Command::Turn(direction)) => {
                enqueue_direction(self, direction);
            }
        }

        CommandOutcome::Continue
    }

    /// Raw velocity request; anything but one cardinal `BLOCK` step is ignored
    pub fn request_direction(&mut self, dx: i32, dy: i32) -> CommandOutcome {
        match Direction::from_velocity(IVec2::new(dx, dy)) {
            Some(direction) => self.handle_command(Command::Turn(direction)),
            None => {
                log::trace!("Ignoring direction request ({}, {})", dx, dy);
                CommandOutcome::Continue
            }
        }
    }

    pub fn request_shoot(&mut self) -> CommandOutcome {
        self.handle_command(Command::Shoot)
    }

    pub fn request_escape(&mut self) -> CommandOutcome {
        self.handle_command(Command::Escape)
    }

    pub fn request_restart(&mut self) -> CommandOutcome {
        self.handle_command(Command::Restart)
    }

    /// Fire a bullet from the head along the current velocity
    ///
    /// A static snake fires straight up. Ignored outside of play.
    pub fn shoot(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        let origin = self.snake.head;
        self.bullets.push(Bullet::fire(origin, self.snake.velocity));
        self.total_shots += 1;
        self.push_event(GameEvent::BulletFired { origin });
    }

    /// Start (or restart) the slowdown countdown
    pub fn trigger_slowdown(&mut self) {
        if self.slowdown_timer == 0 {
            log::debug!("Slowdown triggered ({} ticks)", SLOWDOWN_DURATION);
        }
        self.slowdown_timer = SLOWDOWN_DURATION;
    }

    /// End the round; later calls in the same round are ignored
    pub fn end_game(&mut self, cause: GameOverCause) {
        if self.phase == SessionPhase::GameOver {
            return;
        }

        self.phase = SessionPhase::GameOver;
        self.game_over_cause = Some(cause);
        if self.score > self.high_score {
            log::info!("New high score: {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
        }
        log::info!(
            "Game over: {} (score {}, length {}, shots {}, hits {}, food {})",
            cause.as_str(),
            self.score,
            self.snake.logical_length,
            self.total_shots,
            self.targets_hit,
            self.food_eaten
        );
        self.push_event(GameEvent::GameOver {
            cause,
            score: self.score,
        });
    }

    /// Fresh round: new entities, zeroed stats, same high score and RNG stream
    pub fn reset(&mut self) {
        self.phase = SessionPhase::NotStarted;
        self.score = 0;
        self.total_shots = 0;
        self.targets_hit = 0;
        self.food_eaten = 0;
        self.slowdown_timer = 0;
        self.target_spawn_timer = 0;
        self.time_ticks = 0;
        self.snake = Snake::new(START_CELL);
        self.directions.clear();
        self.targets.clear();
        self.slow_targets.clear();
        self.shrink_targets.clear();
        self.bullets.clear();
        self.game_over_cause = None;
        spawn_food(self);
        log::info!("Session reset (high score {})", self.high_score);
    }

    fn begin(&mut self) {
        self.phase = SessionPhase::Playing;
        log::info!("Round started");
        self.push_event(GameEvent::RoundStarted);
    }
}
