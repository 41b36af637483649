//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the seven per-frame input flags of
//! [`crate::types::InputFrame`]. Held keys (move left/right, soft drop) stay down
//! until a release event arrives or, on terminals without release events, until
//! a short timeout passes without the key being seen again.

pub mod handler;
pub mod map;

pub use bonus_tetris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit, InputKey};
