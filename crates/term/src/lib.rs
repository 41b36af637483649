//! Terminal front-end.
//!
//! Renders the board into a character framebuffer, then flushes only the runs
//! that changed since the previous frame. Board cells are drawn 2 columns wide
//! to roughly square them up in a typical terminal font.

pub mod board_view;
pub mod fb;
pub mod hud;
pub mod renderer;

pub use bonus_tetris_core as core;
pub use bonus_tetris_engine as engine;
pub use bonus_tetris_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use hud::Hud;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
