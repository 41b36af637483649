//! Session tests - fixed stepping, slow motion, restart and signal forwarding

use std::cell::RefCell;
use std::rc::Rc;

use bonus_tetris::core::{GameConfig, GameRng, TetrominoData, TileSurface};
use bonus_tetris::engine::{ManualClock, RecordingSink, Session, Signal};
use bonus_tetris::types::{BonusKind, Cell, GameAction, InputFrame, ShapeKind, Tile};

fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.bonus.probability = 0.0;
    config
}

fn session_with_sink() -> (Session, Rc<RefCell<RecordingSink>>) {
    let mut session = Session::new(quiet_config(), GameRng::new(2024)).unwrap();
    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    session.set_sink(Box::new(sink.clone()));
    session.start();
    (session, sink)
}

fn press(f: impl FnOnce(&mut InputFrame)) -> InputFrame {
    let mut frame = InputFrame::default();
    f(&mut frame);
    frame
}

fn run_steps(session: &mut Session, steps: usize) {
    let tick = session.board().config().timing.tick;
    for _ in 0..steps {
        session.advance(tick, InputFrame::default());
    }
}

/// Swap the active piece for a slow motion bonus piece and hard drop it.
fn trigger_slow_motion(session: &mut Session) {
    let board = session.board_mut();
    board.clear_piece();
    board.spawn_with(TetrominoData::template(ShapeKind::O).with_bonus(BonusKind::SlowMotion));

    let tick = session.board().config().timing.tick;
    session.advance(tick, press(|f| f.hard_drop = true));
}

#[test]
fn test_start_publishes_initial_score() {
    let (_session, sink) = session_with_sink();
    assert_eq!(sink.borrow().signals, vec![Signal::Score(0)]);
}

#[test]
fn test_score_signal_tracks_board_score() {
    let (mut session, sink) = session_with_sink();
    let tick = session.board().config().timing.tick;

    session.advance(tick, press(|f| f.hard_drop = true));
    assert!(session.board().score() > 0);
    assert_eq!(sink.borrow().last_score(), Some(session.board().score()));
}

#[test]
fn test_slow_motion_halves_game_time_then_expires() {
    let (mut session, sink) = session_with_sink();
    trigger_slow_motion(&mut session);

    // 18 rows of hard drop, then the bonus
    assert_eq!(session.board().score(), 36 + 100);
    assert_eq!(session.time_rate(), 0.5);
    assert!(sink.borrow().signals.contains(&Signal::TimeRate(0.5)));

    let tick = session.board().config().timing.tick;
    let game_before = session.game_time();
    let real_before = session.real_time();

    // Five game seconds at half rate take ten real seconds
    run_steps(&mut session, 594);
    assert_eq!(session.time_rate(), 0.5);
    assert!(session.real_time() - real_before > 9.8);
    assert!((session.game_time() - game_before - 594.0 * tick * 0.5).abs() < 1e-3);
    assert!(session.slow_motion_remaining().unwrap() < 0.2);

    run_steps(&mut session, 12);
    assert_eq!(session.time_rate(), 1.0);
    assert_eq!(session.slow_motion_remaining(), None);
    assert_eq!(sink.borrow().signals.last(), Some(&Signal::TimeRate(1.0)));
}

#[test]
fn test_slow_motion_does_not_touch_timer_lengths() {
    let (mut session, _sink) = session_with_sink();
    trigger_slow_motion(&mut session);

    let delay = session.board().piece().step_delay();
    let y = session.board().piece().origin().y;

    // One real second at half speed is half a game second: no gravity step yet
    run_steps(&mut session, 60);
    assert_eq!(session.board().piece().origin().y, y);
    assert_eq!(session.board().piece().step_delay(), delay);

    // The second real second crosses the one game-second step delay
    run_steps(&mut session, 61);
    assert_eq!(session.board().piece().origin().y, y - 1);
}

#[test]
fn test_restart_mid_slow_motion_restores_rate() {
    let (mut session, sink) = session_with_sink();
    trigger_slow_motion(&mut session);
    assert_eq!(session.time_rate(), 0.5);

    session.advance(0.0, press(|f| f.restart = true));
    assert_eq!(session.time_rate(), 1.0);
    assert_eq!(session.slow_motion_remaining(), None);
    assert_eq!(session.board().score(), 0);

    let signals = sink.borrow().signals.clone();
    let restart_at = signals
        .iter()
        .position(|s| *s == Signal::RestartRequested)
        .unwrap();
    let after = &signals[restart_at..];
    assert!(after.contains(&Signal::Score(0)));
    assert!(after.contains(&Signal::TimeRate(1.0)));
    assert!(after.contains(&Signal::GameOver(false)));
}

#[test]
fn test_game_over_and_restart_signals() {
    let mut session = Session::new(quiet_config(), GameRng::new(5)).unwrap();
    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    session.set_sink(Box::new(sink.clone()));

    let bounds = session.board().bounds();
    for col in bounds.columns() {
        for row in [8, 9] {
            session
                .board_mut()
                .surface_mut()
                .set_tile(Cell::new(col, row), Some(Tile::Shape(ShapeKind::Z)));
        }
    }
    session.start();
    assert!(session.board().is_game_over());
    assert!(sink.borrow().signals.contains(&Signal::GameOver(true)));

    // Ticking a finished game does nothing
    run_steps(&mut session, 10);
    assert!(session.board().is_game_over());

    assert!(session.apply_action(GameAction::Restart));
    assert!(!session.board().is_game_over());
    assert_eq!(sink.borrow().signals.last(), Some(&Signal::GameOver(false)));
    assert_eq!(session.board().surface().occupied_count(), 4);
}

#[test]
fn test_missing_sink_does_not_stop_scoring() {
    let mut session = Session::new(quiet_config(), GameRng::new(8)).unwrap();
    session.start();
    let tick = session.board().config().timing.tick;

    session.advance(tick, press(|f| f.hard_drop = true));
    let first = session.board().score();
    assert!(first > 0);

    session.advance(tick, press(|f| f.hard_drop = true));
    assert!(session.board().score() > first);
}

#[test]
fn test_frame_reads_clock_deltas() {
    let mut session = Session::new(quiet_config(), GameRng::new(1)).unwrap();
    session.start();
    let tick = session.board().config().timing.tick;

    let mut clock = ManualClock::new();
    let mut idle = InputFrame::default;

    // First frame only establishes the reference time
    assert_eq!(session.frame(&clock, &mut idle), 0);

    clock.advance(tick * 3.5);
    assert_eq!(session.frame(&clock, &mut idle), 3);
    clock.advance(tick * 0.75);
    assert_eq!(session.frame(&clock, &mut idle), 1);
}

#[test]
fn test_rotation_edges_fire_once_per_press() {
    let mut session = Session::new(quiet_config(), GameRng::new(11)).unwrap();
    session.start();
    let board = session.board_mut();
    board.clear_piece();
    board.spawn_with(TetrominoData::template(ShapeKind::T));

    let tick = session.board().config().timing.tick;
    // One press spread over a frame that runs three steps
    session.advance(tick * 3.0, press(|f| f.rotate_right = true));
    assert_eq!(session.board().piece().rotation(), 1);
}

#[test]
fn test_same_seed_and_inputs_replay_identically() {
    let play = || {
        let mut session = Session::new(GameConfig::default(), GameRng::new(31337)).unwrap();
        session.start();
        let tick = session.board().config().timing.tick;
        for i in 0..2000 {
            let input = press(|f| {
                f.move_left = i % 7 < 3;
                f.rotate_right = i % 45 == 0;
                f.hard_drop = i % 120 == 119;
            });
            session.advance(tick, input);
        }
        (
            session.board().score(),
            session.board().surface().occupied().collect::<Vec<_>>(),
        )
    };
    assert_eq!(play(), play());
}
