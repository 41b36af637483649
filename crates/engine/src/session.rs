//! Session - fixed-step driver, time rate owner and signal forwarder
//!
//! Each frame the session reads the real clock, accumulates the elapsed time and
//! runs as many fixed steps as fit (bounded by `max_steps_per_frame`). A step
//! scales its real length by the current time rate before handing it to the
//! board, which is the only place slow motion exists.

use log::{debug, warn};

use crate::clock::{Clock, InputSource};
use crate::core::{Board, BoardEvent, GameConfig, GameRng, TileGrid, TileSurface};
use crate::signals::SignalSink;
use crate::types::{ConfigError, GameAction, InputFrame};

const NORMAL_RATE: f32 = 1.0;

pub struct Session<G: TileSurface = TileGrid> {
    board: Board<G>,
    sink: Option<Box<dyn SignalSink>>,
    warned_missing_sink: bool,

    time_rate: f32,
    /// Game time at which slow motion ends
    slow_motion_until: Option<f64>,

    /// Real time covered by completed steps
    real_now: f64,
    /// Game time: sum of scaled step lengths. Narrowed to `f32` at the board.
    game_now: f64,
    last_clock: Option<f32>,
    accumulator: f32,
    /// Edge events waiting for the next step to consume them
    pending: InputFrame,
}

impl Session<TileGrid> {
    pub fn new(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        Ok(Self::from_board(Board::new(config, rng)?))
    }
}

impl<G: TileSurface> Session<G> {
    pub fn from_board(board: Board<G>) -> Self {
        Self {
            board,
            sink: None,
            warned_missing_sink: false,
            time_rate: NORMAL_RATE,
            slow_motion_until: None,
            real_now: 0.0,
            game_now: 0.0,
            last_clock: None,
            accumulator: 0.0,
            pending: InputFrame::default(),
        }
    }

    /// Attach the presentation collaborator that receives score and game-over signals.
    pub fn set_sink(&mut self, sink: Box<dyn SignalSink>) {
        self.sink = Some(sink);
        self.warned_missing_sink = false;
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<G> {
        &mut self.board
    }

    pub fn time_rate(&self) -> f32 {
        self.time_rate
    }

    pub fn is_slow_motion(&self) -> bool {
        self.slow_motion_until.is_some()
    }

    /// Game seconds of slow motion left, if active
    pub fn slow_motion_remaining(&self) -> Option<f32> {
        self.slow_motion_until
            .map(|end| (end - self.game_now).max(0.0) as f32)
    }

    pub fn real_time(&self) -> f32 {
        self.real_now as f32
    }

    pub fn game_time(&self) -> f32 {
        self.game_now as f32
    }

    /// Start the first game.
    pub fn start(&mut self) {
        self.board.start();
        self.dispatch_events();
    }

    /// Read the clock and input once and run the fixed steps they cover.
    ///
    /// Returns the number of steps run.
    pub fn frame(&mut self, clock: &impl Clock, input: &mut impl InputSource) -> u32 {
        let now = clock.now();
        let elapsed = match self.last_clock {
            Some(prev) => (now - prev).max(0.0),
            None => 0.0,
        };
        self.last_clock = Some(now);

        let frame = input.poll();
        self.advance(elapsed, frame)
    }

    /// Accumulate `real_dt` seconds and run the fixed steps that fit.
    pub fn advance(&mut self, real_dt: f32, input: InputFrame) -> u32 {
        if input.restart {
            self.restart();
        }

        self.merge_pending(&input);
        self.accumulator += real_dt;

        let tick = self.board.config().timing.tick;
        let max_steps = self.board.config().timing.max_steps_per_frame;
        let mut steps = 0;

        while self.accumulator >= tick && steps < max_steps {
            self.accumulator -= tick;
            let edges = std::mem::take(&mut self.pending);
            let frame = InputFrame {
                rotate_left: edges.rotate_left,
                rotate_right: edges.rotate_right,
                hard_drop: edges.hard_drop,
                ..input.held_only()
            };
            self.step(tick, &frame);
            steps += 1;
        }

        if steps == max_steps && self.accumulator >= tick {
            debug!("dropping {:.3}s of backlog", self.accumulator - tick);
            self.accumulator = tick;
        }

        steps
    }

    fn merge_pending(&mut self, input: &InputFrame) {
        self.pending.rotate_left |= input.rotate_left;
        self.pending.rotate_right |= input.rotate_right;
        self.pending.hard_drop |= input.hard_drop;
    }

    /// One fixed step of `real_dt` real seconds.
    pub fn step(&mut self, real_dt: f32, input: &InputFrame) {
        self.real_now += f64::from(real_dt);
        self.expire_slow_motion();

        let game_dt = real_dt * self.time_rate;
        self.game_now += f64::from(game_dt);
        self.board.tick(self.game_now as f32, game_dt, input);

        self.dispatch_events();
    }

    /// Apply a discrete action; restart goes through the same path as the restart input.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart();
            return true;
        }
        let changed = self.board.apply_action(action);
        self.dispatch_events();
        changed
    }

    /// Restart from any state, including mid slow motion and after game over.
    ///
    /// Edge inputs still waiting for a step belong to the old game and are dropped.
    pub fn restart(&mut self) {
        self.pending = InputFrame::default();
        if let Some(sink) = self.sink.as_mut() {
            sink.restart_requested();
        }
        self.board.restart_game();
        self.dispatch_events();
    }

    fn expire_slow_motion(&mut self) {
        if let Some(end) = self.slow_motion_until {
            if self.game_now > end {
                debug!("slow motion over");
                self.slow_motion_until = None;
                self.set_time_rate(NORMAL_RATE);
            }
        }
    }

    fn set_time_rate(&mut self, rate: f32) {
        if self.time_rate == rate {
            return;
        }
        self.time_rate = rate;
        if let Some(sink) = self.sink.as_mut() {
            sink.time_rate_changed(rate);
        }
    }

    fn dispatch_events(&mut self) {
        let events: Vec<BoardEvent> = self.board.drain_events().collect();

        for event in events {
            match event {
                BoardEvent::ScoreChanged { total } => match self.sink.as_mut() {
                    Some(sink) => sink.score_changed(total),
                    None => {
                        if !self.warned_missing_sink {
                            warn!("no score display attached; score {total} is kept internally");
                            self.warned_missing_sink = true;
                        }
                    }
                },
                BoardEvent::GameOver => {
                    if let Some(sink) = self.sink.as_mut() {
                        sink.game_over(true);
                    }
                }
                BoardEvent::Restarted => {
                    self.slow_motion_until = None;
                    self.set_time_rate(NORMAL_RATE);
                    if let Some(sink) = self.sink.as_mut() {
                        sink.game_over(false);
                    }
                }
                BoardEvent::SlowMotionRequested { factor, duration } => {
                    self.slow_motion_until = Some(self.game_now + f64::from(duration));
                    self.set_time_rate(factor);
                }
                other => debug!("{other:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_session() -> Session {
        let mut config = GameConfig::default();
        config.bonus.probability = 0.0;
        Session::new(config, GameRng::new(9)).unwrap()
    }

    #[test]
    fn accumulator_runs_whole_steps_only() {
        let mut session = quiet_session();
        session.start();

        let tick = session.board().config().timing.tick;
        assert_eq!(session.advance(tick * 0.5, InputFrame::default()), 0);
        assert_eq!(session.advance(tick * 0.6, InputFrame::default()), 1);
        assert_eq!(session.advance(tick * 3.0, InputFrame::default()), 3);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut session = quiet_session();
        session.start();

        let max = session.board().config().timing.max_steps_per_frame;
        assert_eq!(session.advance(10.0, InputFrame::default()), max);
        // Backlog was dropped down to a single step
        assert_eq!(session.advance(0.0, InputFrame::default()), 1);
    }

    #[test]
    fn edge_input_survives_a_frame_without_steps() {
        let mut session = quiet_session();
        session.start();
        let tick = session.board().config().timing.tick;

        let drop = InputFrame {
            hard_drop: true,
            ..InputFrame::default()
        };
        session.advance(tick * 0.1, drop);
        assert_eq!(session.board().score(), 0);

        session.advance(tick, InputFrame::default());
        assert!(session.board().score() > 0);
    }

    #[test]
    fn restart_drops_edges_buffered_for_the_old_game() {
        let mut session = quiet_session();
        session.start();
        let tick = session.board().config().timing.tick;

        let drop = InputFrame {
            hard_drop: true,
            ..InputFrame::default()
        };
        session.advance(tick * 0.1, drop);

        let restart = InputFrame {
            restart: true,
            ..InputFrame::default()
        };
        session.advance(0.0, restart);
        assert_eq!(session.advance(tick, InputFrame::default()), 1);
        assert_eq!(session.board().score(), 0);
    }

    #[test]
    fn edges_pressed_with_restart_apply_to_the_new_game() {
        let mut session = quiet_session();
        session.start();
        let tick = session.board().config().timing.tick;

        let input = InputFrame {
            restart: true,
            hard_drop: true,
            ..InputFrame::default()
        };
        session.advance(tick, input);
        assert!(session.board().score() > 0);
    }

    #[test]
    fn hour_of_steps_keeps_clock_exact() {
        let mut session = quiet_session();
        session.start();
        let tick = session.board().config().timing.tick;

        let steps = 216_000;
        for _ in 0..steps {
            session.step(tick, &InputFrame::default());
        }
        let expected = f64::from(tick) * f64::from(steps);
        assert!((f64::from(session.real_time()) - expected).abs() < 1e-2);
        assert!((f64::from(session.game_time()) - expected).abs() < 1e-2);
    }

    #[test]
    fn slow_motion_event_scales_game_time() {
        let mut session = quiet_session();
        session.start();
        session
            .board_mut()
            .activate_bonus(crate::types::BonusKind::SlowMotion, Default::default());
        session.dispatch_events();

        assert_eq!(session.time_rate(), 0.5);
        let before = session.game_time();
        session.step(0.1, &InputFrame::default());
        assert!((session.game_time() - before - 0.05).abs() < 1e-6);
    }
}
