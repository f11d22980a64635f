//! Fire Snake entry point
//!
//! Runs a headless session driven by the demo bot on the tick scheduler.
//! Rendering and keyboard input live elsewhere; this loop stands in for both.

use std::path::PathBuf;
use std::time::Instant;

use fire_snake::Settings;
use fire_snake::consts::NORMAL_TICK;
use fire_snake::sim::{
    Command, CommandOutcome, Direction, GameEvent, GameState, SessionPhase, TickScheduler,
    autopilot,
};

const DEFAULT_SETTINGS_PATH: &str = "fire-snake.json";

/// Runner holding the session and its pacing
struct Game {
    state: GameState,
    scheduler: TickScheduler,
    settings: Settings,
    /// Ticks across every round
    total_ticks: u64,
    rounds_finished: u32,
    best_round: u64,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed),
            scheduler: TickScheduler::new(),
            settings,
            total_ticks: 0,
            rounds_finished: 0,
            best_round: 0,
        }
    }

    /// Stand-in for the keyboard: decide this frame's command
    fn next_command(&self) -> Option<Command> {
        match self.state.phase {
            SessionPhase::NotStarted => Some(Command::Turn(Direction::Right)),
            SessionPhase::Playing => autopilot::steer(&self.state, self.settings.autopilot_shoots),
            SessionPhase::GameOver if self.rounds_finished >= self.settings.rounds => {
                Some(Command::Escape)
            }
            // Turning after game over restarts straight into play
            SessionPhase::GameOver => Some(Command::Turn(Direction::Up)),
        }
    }

    /// Run until the bot escapes or the tick budget runs out
    fn run(&mut self) {
        let mut last_time = Instant::now();

        loop {
            if let Some(command) = self.next_command() {
                if self.state.handle_command(command) == CommandOutcome::Exit {
                    log::info!("Exiting after {} rounds", self.rounds_finished);
                    break;
                }
            }

            let elapsed = if self.settings.realtime {
                std::thread::sleep(self.scheduler.time_until_next_tick());
                let now = Instant::now();
                let elapsed = now - last_time;
                last_time = now;
                elapsed
            } else {
                self.scheduler.time_until_next_tick()
            };

            let ran = self.scheduler.update(&mut self.state, elapsed);
            self.total_ticks += u64::from(ran);

            for event in self.state.drain_events() {
                self.on_event(event);
            }

            if ran > 0 && self.settings.snapshot_every > 0 {
                self.maybe_log_snapshot(ran);
            }

            if self.total_ticks >= self.settings.max_ticks {
                log::info!("Tick budget of {} reached", self.settings.max_ticks);
                self.shut_down();
                break;
            }
        }

        log::info!(
            "Done: {} rounds, {} ticks, best round {}, high score {}",
            self.rounds_finished,
            self.total_ticks,
            self.best_round,
            self.state.high_score
        );
    }

    /// Press escape until the session asks to exit
    ///
    /// A round in play only ends on the first press; the next one exits.
    fn shut_down(&mut self) {
        while self.state.request_escape() != CommandOutcome::Exit {
            for event in self.state.drain_events() {
                self.on_event(event);
            }
        }
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { cause, score } => {
                self.rounds_finished += 1;
                self.best_round = self.best_round.max(score);
                log::info!(
                    "Round {} over after {} ticks: {} ({} points)",
                    self.rounds_finished,
                    self.state.time_ticks,
                    cause.as_str(),
                    score
                );
            }
            GameEvent::TargetShot { rarity, points, .. } => {
                log::debug!("{} target down (+{})", rarity.as_str(), points);
            }
            other => log::trace!("{:?}", other),
        }
    }

    /// Log a JSON snapshot when this update crossed a multiple of `snapshot_every`
    fn maybe_log_snapshot(&self, ran: u32) {
        let every = self.settings.snapshot_every;
        let before = self.total_ticks - u64::from(ran);
        if before / every == self.total_ticks / every {
            return;
        }
        match self.state.snapshot().to_json() {
            Ok(json) => log::debug!("snapshot {}", json),
            Err(e) => log::warn!("Snapshot serialization failed: {}", e),
        }
    }
}

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let mut settings = match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Settings::default()
        }
    };
    settings.validate();

    let seed = settings.resolve_seed();
    log::info!("Fire Snake starting (seed {})", seed);
    if settings.realtime {
        log::info!("Real-time pacing, {:?} per tick", NORMAL_TICK);
    }

    let mut game = Game::new(seed, settings);
    game.run();
}
