//! Clock and input collaborators consumed by the session.

use std::time::Instant;

use crate::types::InputFrame;

/// Monotonic real-time source, in seconds.
pub trait Clock {
    fn now(&self) -> f32;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock advanced by hand, for tests and replays
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f32) {
        self.now += secs.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.now
    }
}

/// Produces one input sample per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

impl<F: FnMut() -> InputFrame> InputSource for F {
    fn poll(&mut self) -> InputFrame {
        self()
    }
}
