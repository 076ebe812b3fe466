//! Integration tests for the session lifecycle driven by a manual clock.

use grid_merge::core::{GameSession, ManualScheduler, Scheduler, SessionEvent};
use grid_merge::types::{Command, Direction, GameOverReason, LifecycleEvent, Phase, PLAY_SECONDS};

fn new_game(seed: u32) -> GameSession<ManualScheduler> {
    GameSession::new(seed, ManualScheduler::new())
}

/// Advance the clock one second at a time, draining fires as a host would.
fn run_seconds(game: &mut GameSession<ManualScheduler>, seconds: u32) {
    for _ in 0..seconds {
        game.scheduler_mut().advance(1000);
        game.pump();
    }
}

fn start_playing(seed: u32) -> GameSession<ManualScheduler> {
    let mut game = new_game(seed);
    assert!(game.start_countdown());
    run_seconds(&mut game, 3);
    assert_eq!(game.phase(), Phase::Playing);
    game
}

/// Cycle through the four directions until a merge scores or the game ends.
fn play_until_scored(game: &mut GameSession<ManualScheduler>) {
    for dir in Direction::ALL.into_iter().cycle().take(400) {
        if game.phase() != Phase::Playing || game.score() > 0 {
            return;
        }
        game.scheduler_mut().advance(100);
        game.request_move(dir);
    }
}

#[test]
fn test_countdown_leads_to_play() {
    let mut game = new_game(12345);
    game.start_countdown();
    assert_eq!(game.phase(), Phase::Countdown);
    assert_eq!(game.countdown(), 3);

    run_seconds(&mut game, 2);
    assert_eq!(game.phase(), Phase::Countdown);
    assert_eq!(game.countdown(), 1);

    run_seconds(&mut game, 1);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.time_left(), PLAY_SECONDS);
    assert_eq!(game.board().tile_count(), 2);
    assert_eq!(game.scheduler().active_timers(), 1);
}

#[test]
fn test_play_clock_expires_after_ninety_seconds() {
    let mut game = start_playing(1);
    run_seconds(&mut game, PLAY_SECONDS - 1);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.time_left(), 1);

    run_seconds(&mut game, 1);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.time_left(), 0);
    assert_eq!(game.game_over_reason(), Some(GameOverReason::TimeExpired));
    assert_eq!(game.scheduler().active_timers(), 0);
}

#[test]
fn test_lagging_host_catches_up_in_one_pump() {
    let mut game = start_playing(1);
    game.scheduler_mut().advance(10_500);
    assert!(game.pump());
    assert_eq!(game.time_left(), PLAY_SECONDS - 10);
}

#[test]
fn test_pause_freezes_clock_and_moves() {
    let mut game = start_playing(3);
    run_seconds(&mut game, 10);
    assert_eq!(game.time_left(), 80);

    assert!(game.apply_command(Command::TogglePause));
    assert!(game.paused());
    run_seconds(&mut game, 30);
    assert_eq!(game.time_left(), 80);
    for dir in Direction::ALL {
        assert!(game.request_move(dir).is_none());
    }

    assert!(game.apply_command(Command::TogglePause));
    run_seconds(&mut game, 1);
    assert_eq!(game.time_left(), 79);
}

#[test]
fn test_background_during_countdown_returns_to_idle() {
    let mut game = new_game(5);
    game.start_countdown();
    run_seconds(&mut game, 1);

    game.apply_command(Command::Lifecycle(LifecycleEvent::Backgrounded));
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.scheduler().active_timers(), 0);

    run_seconds(&mut game, 10);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.board().tile_count(), 0);
}

#[test]
fn test_background_during_play_pauses_until_foreground() {
    let mut game = start_playing(5);
    game.lifecycle_event(LifecycleEvent::Backgrounded);
    run_seconds(&mut game, 20);
    assert_eq!(game.time_left(), PLAY_SECONDS);

    game.lifecycle_event(LifecycleEvent::Foregrounded);
    run_seconds(&mut game, 2);
    assert_eq!(game.time_left(), PLAY_SECONDS - 2);
}

#[test]
fn test_at_most_one_timer_runs() {
    let mut game = new_game(9);
    let script = [
        Command::StartCountdown,
        Command::StartCountdown,
        Command::Lifecycle(LifecycleEvent::Backgrounded),
        Command::StartCountdown,
        Command::Reset,
        Command::StartCountdown,
        Command::TogglePause,
        Command::Move(Direction::Left),
    ];
    for command in script {
        game.apply_command(command);
        assert!(game.scheduler().active_timers() <= 1, "after {command:?}");
        run_seconds(&mut game, 1);
        assert!(game.scheduler().active_timers() <= 1, "after {command:?}");
    }

    run_seconds(&mut game, 5);
    game.apply_command(Command::TogglePause);
    assert_eq!(game.scheduler().active_timers(), 0);
    game.apply_command(Command::TogglePause);
    assert_eq!(game.scheduler().active_timers(), 1);
}

#[test]
fn test_reset_keeps_high_score() {
    let mut game = start_playing(2024);
    play_until_scored(&mut game);
    let scored = game.score();

    run_seconds(&mut game, PLAY_SECONDS);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.high_score(), scored);

    game.apply_command(Command::Reset);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), scored);
    assert_eq!(game.take_last_event(), Some(SessionEvent::Reset));
}

#[test]
fn test_new_round_after_game_over() {
    let mut game = start_playing(77);
    run_seconds(&mut game, PLAY_SECONDS);
    assert_eq!(game.phase(), Phase::GameOver);

    assert!(game.start_countdown());
    assert_eq!(game.game_over_reason(), None);
    run_seconds(&mut game, 3);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.time_left(), PLAY_SECONDS);
}

#[test]
fn test_moves_keep_board_consistent() {
    let mut game = start_playing(31337);
    let mut last_score = 0;
    for dir in Direction::ALL.into_iter().cycle().take(200) {
        let before = game.board().tile_count();
        let Some(report) = game.request_move(dir) else {
            break;
        };
        if report.changed {
            let spawned = usize::from(report.spawned.is_some());
            assert_eq!(game.board().tile_count(), before - report.merges.len() + spawned);
        } else {
            assert_eq!(game.board().tile_count(), before);
        }
        assert!(game.board().is_consistent());
        assert!(game.score() >= last_score);
        last_score = game.score();
        game.scheduler_mut().advance(250);
    }
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Left,
        Direction::Up,
    ];

    let mut a = start_playing(42);
    let mut b = start_playing(42);
    for dir in script {
        a.scheduler_mut().advance(700);
        b.scheduler_mut().advance(700);
        assert_eq!(a.request_move(dir), b.request_move(dir));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_streak_uses_scheduler_clock() {
    let mut game = start_playing(8);
    let now = game.scheduler().now_ms();
    play_until_scored(&mut game);
    assert!(game.score() > 0);
    assert!(game.scheduler().now_ms() > now);
    // The scoring move was the last one, stamped with the scheduler clock.
    assert_eq!(game.session().last_merge_at, Some(game.scheduler().now_ms()));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let game = start_playing(12345);
    let snap = game.snapshot();
    let json = serde_json::to_value(snap).unwrap();

    assert_eq!(json["phase"], "playing");
    assert_eq!(json["time_left"], PLAY_SECONDS);
    assert_eq!(json["paused"], false);
    assert!(json["game_over_reason"].is_null());
    assert_eq!(json["board"].as_array().unwrap().len(), 4);
    assert_eq!(json["seed"], 12345);

    let tiles = json["board"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|v| v.as_u64() != Some(0))
        .count();
    assert_eq!(tiles, 2);
}

#[test]
fn test_events_and_commands_use_stable_json() {
    let event = SessionEvent::GameOver {
        reason: GameOverReason::NoMovesLeft,
    };
    assert_eq!(
        serde_json::to_value(event).unwrap(),
        serde_json::json!({"event": "game_over", "reason": "no_moves_left"})
    );

    let command: Command = serde_json::from_str(r#"{"type":"move","value":"left"}"#).unwrap();
    assert_eq!(command, Command::Move(Direction::Left));
    let command: Command = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
    assert_eq!(command, Command::Reset);
}
