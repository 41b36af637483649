//! Session controller - drives the board from a clock and an input source.
//!
//! The board only knows game time. This crate owns the mapping from real time to
//! game time: a fixed-step accumulator plus a time rate that slow motion bonuses
//! lower for a while. It also forwards the board's events to whatever
//! presentation layer is listening.

pub mod clock;
pub mod session;
pub mod signals;

pub use bonus_tetris_core as core;
pub use bonus_tetris_types as types;

pub use clock::{Clock, InputSource, ManualClock, SystemClock};
pub use session::Session;
pub use signals::{RecordingSink, Signal, SignalSink};
