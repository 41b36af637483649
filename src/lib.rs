//! Bonus Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof:
//! `bonus_tetris::{core,engine,input,term,types}`.

pub use bonus_tetris_core as core;
pub use bonus_tetris_engine as engine;
pub use bonus_tetris_input as input;
pub use bonus_tetris_term as term;
pub use bonus_tetris_types as types;
