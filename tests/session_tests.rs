//! Session timing and lifecycle with a simulated clock

use std::time::{Duration, Instant};

use blockfall::core::{GameState, ScriptedIndex};
use blockfall::engine::{GameConfig, NoopSink, Session};
use blockfall::types::{GameAction, PieceKind};

const TICK: Duration = Duration::from_millis(500);

fn o_game() -> GameState<ScriptedIndex> {
    let o = PieceKind::ALL.iter().position(|&k| k == PieceKind::O).unwrap();
    GameState::with_source(20, 10, ScriptedIndex::new(vec![o]))
}

fn row_of<S: blockfall::engine::GameOverSink>(session: &Session<ScriptedIndex, S>) -> i32 {
    session.game().current_piece().unwrap().position.row
}

#[test]
fn test_gravity_follows_the_clock() {
    let t0 = Instant::now();
    let mut session = Session::new(o_game(), TICK, NoopSink);
    session.start(t0);

    assert!(!session.advance(t0 + Duration::from_millis(499)));
    assert_eq!(row_of(&session), 0);
    assert!(session.advance(t0 + TICK));
    assert_eq!(row_of(&session), 1);
    assert_eq!(session.time_until_tick(t0 + TICK), Some(TICK));
}

#[test]
fn test_late_poll_ticks_once() {
    let t0 = Instant::now();
    let mut session = Session::new(o_game(), TICK, NoopSink);
    session.start(t0);

    assert!(session.advance(t0 + Duration::from_secs(3)));
    assert!(!session.advance(t0 + Duration::from_secs(3)));
    assert_eq!(row_of(&session), 1);
}

#[test]
fn test_restart_rearms_from_now() {
    let t0 = Instant::now();
    let mut session = Session::new(o_game(), TICK, NoopSink);
    session.start(t0);
    session.handle(GameAction::SoftDrop, t0);
    assert_eq!(row_of(&session), 1);

    let t1 = t0 + Duration::from_millis(400);
    session.handle(GameAction::Restart, t1);
    assert_eq!(row_of(&session), 0);
    assert_eq!(session.game().episode_id(), 1);
    // Old deadline (t0 + 500ms) no longer applies.
    assert!(!session.advance(t0 + TICK));
    assert!(session.advance(t1 + TICK));
}

#[test]
fn test_game_over_reports_once_and_restart_resumes() {
    let t0 = Instant::now();
    let mut reports = Vec::new();
    let mut session = Session::new(o_game(), TICK, |score: u32| reports.push(score));
    session.start(t0);

    let mut now = t0;
    while !session.game().is_game_over() {
        now += TICK;
        session.advance(now);
    }
    assert!(!session.is_ticking());
    assert!(session.snapshot().game_over);

    // Intents after game over change nothing and don't re-notify.
    session.handle(GameAction::MoveLeft, now);
    session.handle(GameAction::Rotate, now);
    assert!(!session.advance(now + Duration::from_secs(60)));

    session.handle(GameAction::Restart, now);
    assert!(session.is_ticking());
    assert!(!session.game().is_game_over());
    drop(session);
    assert_eq!(reports, vec![0]);
}

#[test]
fn test_session_from_config() {
    let config = GameConfig::from_lookup(|key| match key {
        "BLOCKFALL_ROWS" => Some("8".to_string()),
        "BLOCKFALL_COLUMNS" => Some("6".to_string()),
        "BLOCKFALL_TICK_MS" => Some("100".to_string()),
        _ => None,
    });
    config.validate().unwrap();

    let t0 = Instant::now();
    let game = GameState::with_source(config.rows, config.columns, ScriptedIndex::new(vec![1]));
    let mut session = Session::new(game, config.tick_interval, NoopSink);
    session.start(t0);

    let snap = session.snapshot();
    assert_eq!((snap.rows, snap.columns), (8, 6));
    assert_eq!(snap.active.unwrap().position.col, 2);
    assert!(session.advance(t0 + Duration::from_millis(100)));
}
