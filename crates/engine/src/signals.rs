//! Outward signals for presentation collaborators (score label, game over panel).

/// Receiver for session notifications. Only the score and game over hooks are required.
pub trait SignalSink {
    fn score_changed(&mut self, total: u32);

    fn game_over(&mut self, over: bool);

    fn restart_requested(&mut self) {}

    fn time_rate_changed(&mut self, _rate: f32) {}
}

/// Everything a [`RecordingSink`] has seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Score(u32),
    GameOver(bool),
    RestartRequested,
    TimeRate(f32),
}

/// Sink that keeps every signal in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub signals: Vec<Signal>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_score(&self) -> Option<u32> {
        self.signals.iter().rev().find_map(|s| match s {
            Signal::Score(total) => Some(*total),
            _ => None,
        })
    }
}

impl SignalSink for RecordingSink {
    fn score_changed(&mut self, total: u32) {
        self.signals.push(Signal::Score(total));
    }

    fn game_over(&mut self, over: bool) {
        self.signals.push(Signal::GameOver(over));
    }

    fn restart_requested(&mut self) {
        self.signals.push(Signal::RestartRequested);
    }

    fn time_rate_changed(&mut self, rate: f32) {
        self.signals.push(Signal::TimeRate(rate));
    }
}

/// Shared handle, so a test can keep reading what the session sent.
impl<S: SignalSink> SignalSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn score_changed(&mut self, total: u32) {
        self.borrow_mut().score_changed(total);
    }

    fn game_over(&mut self, over: bool) {
        self.borrow_mut().game_over(over);
    }

    fn restart_requested(&mut self) {
        self.borrow_mut().restart_requested();
    }

    fn time_rate_changed(&mut self, rate: f32) {
        self.borrow_mut().time_rate_changed(rate);
    }
}
