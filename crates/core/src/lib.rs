//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game: shapes and rotation, the falling
//! piece, the board state machine, bonus effects and scoring. It performs no I/O
//! and owns no clock, making it:
//!
//! - **Deterministic**: the same seed and the same sequence of ticks replay the same game
//! - **Testable**: every rule is reachable without a terminal or a real clock
//! - **Portable**: the grid is reached through the [`TileSurface`] trait
//!
//! # Module Structure
//!
//! - [`catalog`]: tetromino cells, the rotation transform and wall kick tables
//! - [`piece`]: the active piece with its movement, rotation and lock timers
//! - [`board`]: validity, line clears, bonus effects, scoring and game over/restart
//! - [`grid`]: the tile surface trait and the default flat-array grid
//! - [`rng`]: seedable random source for shapes and bonuses
//! - [`scoring`]: point tables for line clears, hard drops and bonuses
//! - [`config`]: session configuration with validation
//!
//! # Game Rules
//!
//! - **Wall kicks**: rotations try five translations per transition, first fit wins
//! - **Lock delay**: a piece that has not moved for 0.5s locks on its next gravity step
//! - **Speed ramp**: every 10s of play the gravity interval shrinks by 10%, down to 0.1s
//! - **Bonus pieces**: 15% of spawns carry a row clear, column clear, bomb or slow motion effect
//! - **Game over**: a blocked spawn, or a lock that reaches the top row
//!
//! # Example
//!
//! ```
//! use bonus_tetris_core::{Board, GameConfig, GameRng};
//! use bonus_tetris_core::types::GameAction;
//!
//! let mut board = Board::new(GameConfig::default(), GameRng::new(12345)).unwrap();
//! board.start();
//!
//! board.apply_action(GameAction::MoveRight);
//! board.apply_action(GameAction::RotateCw);
//! board.apply_action(GameAction::HardDrop);
//!
//! assert!(board.score() > 0); // hard drop awards points
//! ```
//!
//! # Timing
//!
//! [`Board::tick`] takes the game clock and the frame delta in seconds. The caller
//! owns the time rate: slow motion is applied by scaling the delta before it gets
//! here.

pub mod board;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;

pub use bonus_tetris_types as types;

pub use board::{is_valid_placement, Board, BoardEvent};
pub use catalog::{rotate_cells, ShapeCatalog, TetrominoData};
pub use config::{BonusConfig, GameConfig, TimingConfig};
pub use grid::{TileGrid, TileSurface};
pub use piece::{Piece, PieceOutcome};
pub use rng::GameRng;
