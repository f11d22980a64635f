//! Whole-round scenarios driven through the public API.

use glam::IVec2;

use fire_snake::consts::*;
use fire_snake::sim::{
    Command, CommandOutcome, DangerousTarget, Direction, GameEvent, GameOverCause, GameState,
    Rarity, SessionPhase, ShrinkTarget, SlowTarget, TickRate, TickScheduler, START_CELL, tick,
};

/// A session with the food parked in the top-left corner
fn session() -> GameState {
    let mut state = GameState::new(2718);
    state.food = IVec2::new(BLOCK, BLOCK);
    state
}

fn dangerous(pos: IVec2, rarity: Rarity) -> DangerousTarget {
    DangerousTarget {
        pos,
        rarity,
        lifetime: 100.0,
        max_lifetime: 100.0,
    }
}

#[test]
fn eating_food_grows_and_scores() {
    let mut state = session();
    state.food = START_CELL + IVec2::new(BLOCK, 0);
    state.request_direction(BLOCK, 0);

    tick(&mut state);

    assert_eq!(state.snake.logical_length, 2);
    assert_eq!(state.score, 1);
    assert_eq!(state.food_eaten, 1);
    assert_ne!(state.food, START_CELL + IVec2::new(BLOCK, 0));
    assert!(!state.snake.occupies(state.food));

    // The tail catches up one tick later
    tick(&mut state);
    assert_eq!(state.snake.len(), 2);
}

/// A started session where the shoot key is live: the first press only starts
fn started_static() -> GameState {
    let mut state = session();
    assert_eq!(state.request_shoot(), CommandOutcome::Continue);
    assert_eq!(state.phase, SessionPhase::Playing);
    state
}

#[test]
fn starting_press_fires_nothing() {
    let mut state = session();
    state.food = IVec2::new(400, 240);
    state.request_shoot();
    assert!(state.bullets.is_empty());
    assert_eq!(state.total_shots, 0);

    tick(&mut state);
    assert_eq!(state.phase, SessionPhase::Playing);
    assert_eq!(state.game_over_cause, None);
}

#[test]
fn shooting_each_rarity_awards_its_points() {
    for rarity in Rarity::ALL {
        let mut state = session();
        state.request_direction(BLOCK, 0);
        tick(&mut state);
        assert_eq!(state.snake.head, IVec2::new(420, 300));

        // Bullet starts at (430, 310) and its first step lands on (480, 310)
        state.targets.push(dangerous(IVec2::new(460, 300), rarity));
        state.request_shoot();
        tick(&mut state);

        let points = rarity.points();
        assert_eq!(state.phase, SessionPhase::Playing, "{:?}", rarity);
        assert_eq!(state.score, u64::from(points), "{:?}", rarity);
        assert_eq!(state.snake.logical_length, 1 + points as usize);
        assert_eq!(state.targets_hit, 1);
        assert!(state.targets.is_empty());
        assert!(state.bullets.is_empty());
    }
}

#[test]
fn static_snake_that_grows_bites_itself() {
    let mut state = started_static();
    // Fired straight up; first bullet step lands on (410, 260)
    state.targets.push(dangerous(IVec2::new(400, 240), Rarity::Common));
    state.request_shoot();
    tick(&mut state);

    // Scored, then the unmoving head re-entered its own cell
    assert_eq!(state.score, 1);
    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.game_over_cause, Some(GameOverCause::SelfCollision));
}

#[test]
fn shooting_safe_targets_scores_nothing() {
    let mut state = started_static();
    state.slow_targets.push(SlowTarget {
        pos: IVec2::new(400, 240),
        lifetime: 100.0,
        max_lifetime: 100.0,
    });
    state.request_shoot();
    tick(&mut state);
    assert_eq!(state.score, 0);
    assert_eq!(state.targets_hit, 1);

    state.shrink_targets.push(ShrinkTarget {
        pos: IVec2::new(400, 240),
        lifetime: 100.0,
        max_lifetime: 100.0,
    });
    state.request_shoot();
    tick(&mut state);
    assert_eq!(state.score, 0);
    assert_eq!(state.targets_hit, 2);
}

#[test]
fn shooting_the_food_is_fatal() {
    let mut state = started_static();
    state.food = IVec2::new(400, 240);
    state.score = 3;
    state.request_shoot();
    tick(&mut state);

    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.game_over_cause, Some(GameOverCause::ShotFood));
    assert_eq!(state.high_score, 3);
    assert!(
        state
            .events()
            .contains(&GameEvent::GameOver { cause: GameOverCause::ShotFood, score: 3 })
    );
}

#[test]
fn walking_into_dangerous_target_is_fatal() {
    let mut state = session();
    state.targets.push(dangerous(START_CELL + IVec2::new(BLOCK, 0), Rarity::Common));
    state.request_direction(BLOCK, 0);
    tick(&mut state);

    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.game_over_cause, Some(GameOverCause::DangerousTarget));
    // Touching is never worth points
    assert_eq!(state.score, 0);
}

#[test]
fn walking_through_safe_targets_is_harmless() {
    let mut state = session();
    state.slow_targets.push(SlowTarget {
        pos: START_CELL + IVec2::new(BLOCK, 0),
        lifetime: 100.0,
        max_lifetime: 100.0,
    });
    state.shrink_targets.push(ShrinkTarget {
        pos: START_CELL + IVec2::new(2 * BLOCK, 0),
        lifetime: 100.0,
        max_lifetime: 100.0,
    });
    state.request_direction(BLOCK, 0);
    for _ in 0..3 {
        tick(&mut state);
    }

    assert_eq!(state.phase, SessionPhase::Playing);
    assert_eq!(state.snake.head, START_CELL + IVec2::new(3 * BLOCK, 0));
    assert_eq!(state.slowdown_timer, 0);
    assert_eq!(state.slow_targets.len(), 1);
    assert_eq!(state.shrink_targets.len(), 1);
}

#[test]
fn shrink_halves_with_floor_of_one() {
    let mut state = session();
    state.request_direction(BLOCK, 0);
    state.snake.grow(4);
    for _ in 0..5 {
        tick(&mut state);
    }
    assert_eq!(state.snake.len(), 5);

    // Moving right, a bullet fired now reaches x = head + 60 on its first step
    let head = state.snake.head;
    state.shrink_targets.push(ShrinkTarget {
        pos: head + IVec2::new(3 * BLOCK, 0),
        lifetime: 100.0,
        max_lifetime: 100.0,
    });
    state.request_shoot();
    tick(&mut state);
    assert_eq!(state.snake.logical_length, 2);
    assert_eq!(state.snake.len(), 2);

    let mut single = session();
    single.request_direction(BLOCK, 0);
    tick(&mut single);
    single.snake.shrink_by_half();
    assert_eq!(single.snake.logical_length, 1);
    assert_eq!(single.snake.len(), 1);
}

#[test]
fn reversing_into_the_body_is_fatal() {
    let mut state = session();
    state.request_direction(BLOCK, 0);
    state.snake.grow(2);
    tick(&mut state);
    tick(&mut state);
    assert_eq!(state.snake.len(), 3);

    // No 180-degree guard: the reversal is accepted and kills the snake
    state.request_direction(-BLOCK, 0);
    tick(&mut state);
    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.game_over_cause, Some(GameOverCause::SelfCollision));
}

#[test]
fn wall_death_lags_one_tick() {
    let mut state = session();
    state.request_direction(BLOCK, 0);
    let steps_to_edge = ((GAME_WIDTH - START_CELL.x) / BLOCK) as usize;

    // The last of these moves puts the head just past the right edge
    for _ in 0..steps_to_edge {
        tick(&mut state);
        assert_eq!(state.phase, SessionPhase::Playing);
    }
    assert_eq!(state.snake.head.x, GAME_WIDTH);

    tick(&mut state);
    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.game_over_cause, Some(GameOverCause::Wall));
}

#[test]
fn direction_queue_limits() {
    let mut state = session();
    state.request_direction(0, -BLOCK);
    state.request_direction(-BLOCK, 0);
    state.request_direction(0, BLOCK);
    assert_eq!(state.directions.len(), 3);

    state.request_direction(BLOCK, 0);
    assert_eq!(state.directions.len(), 3);

    tick(&mut state);
    assert_eq!(state.directions.len(), 2);
    // Repeat of the newest queued entry
    state.request_direction(0, BLOCK);
    assert_eq!(state.directions.len(), 2);
}

#[test]
fn slowdown_lasts_exactly_its_duration() {
    let mut state = started_static();
    state.slow_targets.push(SlowTarget {
        pos: IVec2::new(400, 240),
        lifetime: 500.0,
        max_lifetime: 500.0,
    });
    let mut scheduler = TickScheduler::new();
    state.request_shoot();

    scheduler.update(&mut state, scheduler.period());
    assert_eq!(state.slowdown_timer, SLOWDOWN_DURATION);
    assert_eq!(scheduler.period(), SLOW_TICK);

    let mut slowed_ticks = 0;
    while scheduler.rate() == TickRate::Slow {
        assert_eq!(scheduler.update(&mut state, scheduler.period()), 1);
        slowed_ticks += 1;
    }
    assert_eq!(slowed_ticks, SLOWDOWN_DURATION);
    assert_eq!(scheduler.period(), NORMAL_TICK);
}

#[test]
fn game_over_then_restart_keeps_high_score() {
    let mut state = session();
    state.request_direction(BLOCK, 0);
    state.score = 9;
    assert_eq!(state.handle_command(Command::Escape), CommandOutcome::Continue);
    assert_eq!(state.high_score, 9);

    assert_eq!(
        state.handle_command(Command::Turn(Direction::Left)),
        CommandOutcome::Continue
    );
    assert_eq!(state.phase, SessionPhase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.high_score, 9);
    assert_eq!(state.snake.head, START_CELL);

    tick(&mut state);
    assert_eq!(state.snake.head, START_CELL - IVec2::new(BLOCK, 0));
}

#[test]
fn targets_expire_on_their_own() {
    let mut state = session();
    state.targets.push(DangerousTarget {
        lifetime: 3.0,
        ..dangerous(IVec2::new(100, 500), Rarity::Legendary)
    });
    state.request_shoot();

    tick(&mut state);
    tick(&mut state);
    assert_eq!(state.targets.len(), 1);
    tick(&mut state);
    assert!(state.targets.is_empty());
}
