//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data used across the workspace. Everything here
//! is free of game logic so it can be shared by the simulation core, the session
//! controller and the terminal front-end alike.
//!
//! # Coordinates
//!
//! Cells are addressed by signed `(x, y)` pairs. Rows grow upward, and the
//! playfield is a rectangle whose minimum corner sits at `(-width/2, -height/2)`:
//!
//! - **Width**: 10 columns (x in -5..5)
//! - **Height**: 20 rows (y in -10..10)
//! - **Spawn origin**: (-1, 8)
//!
//! # Timing Constants
//!
//! Timing values are in game seconds (real seconds scaled by the session time rate):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_STEP_DELAY_SECS` | 1.0 | Gravity step interval at game start |
//! | `MIN_STEP_DELAY_SECS` | 0.1 | Gravity never gets faster than this |
//! | `MOVE_DELAY_SECS` | 0.1 | Repeat interval for held moves |
//! | `LOCK_DELAY_SECS` | 0.5 | Grace period before a grounded piece locks |
//! | `ACCELERATION_INTERVAL_SECS` | 10.0 | Speed ramp interval |
//! | `ACCELERATION_FACTOR` | 0.9 | Step delay multiplier per ramp level |
//!
//! # Examples
//!
//! ```
//! use bonus_tetris_types::{Bounds, Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let bounds = Bounds::centered(BOARD_WIDTH, BOARD_HEIGHT);
//! assert_eq!(bounds.x_min(), -5);
//! assert_eq!(bounds.y_max(), 10);
//! assert!(bounds.contains(Cell::new(-5, -10)));
//! assert!(!bounds.contains(Cell::new(5, 0)));
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! ```

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Origin new pieces spawn at
pub const SPAWN_ORIGIN: Cell = Cell::new(-1, 8);

/// Fixed timestep interval in seconds (~60 FPS)
pub const TICK_SECS: f32 = 1.0 / 60.0;

/// Upper bound on fixed steps run for a single frame, so a stalled frame cannot spiral.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Gravity interval when a game starts
pub const INITIAL_STEP_DELAY_SECS: f32 = 1.0;

/// Gravity interval floor
pub const MIN_STEP_DELAY_SECS: f32 = 0.1;

/// Minimum time between two accepted held moves
pub const MOVE_DELAY_SECS: f32 = 0.1;

/// Time a piece may rest without moving before an automatic step locks it
pub const LOCK_DELAY_SECS: f32 = 0.5;

/// Elapsed game time per speed ramp level
pub const ACCELERATION_INTERVAL_SECS: f32 = 10.0;

/// Step delay multiplier applied once per ramp level
pub const ACCELERATION_FACTOR: f32 = 0.9;

/// Chance that a freshly spawned piece carries a bonus
pub const BONUS_PROBABILITY: f32 = 0.15;

/// Time rate while slow motion is active
pub const SLOW_MOTION_FACTOR: f32 = 0.5;

/// How long slow motion lasts, in game seconds
pub const SLOW_MOTION_DURATION_SECS: f32 = 5.0;

/// Half-size of the bomb blast square (1 = 3x3)
pub const BOMB_RADIUS: i32 = 1;

/// Rows below the top bound at which a locked piece ends the game
pub const GAME_OVER_MARGIN: i32 = 1;

/// Points per cell travelled by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Line clear scoring table, indexed by rows cleared in one pass.
///
/// - 1 line: 10 points
/// - 2 lines: 30 points
/// - 3 lines: 50 points
/// - 4 lines: 80 points
pub const LINE_SCORES: [u32; 5] = [0, 10, 30, 50, 80];

/// Points for a random row clear bonus
pub const LINE_CLEAR_BONUS_POINTS: u32 = 200;

/// Points for a random column clear bonus
pub const COLUMN_CLEAR_BONUS_POINTS: u32 = 200;

/// Points for a bomb bonus
pub const BOMB_BONUS_POINTS: u32 = 150;

/// Points for a slow motion bonus
pub const SLOW_MOTION_BONUS_POINTS: u32 = 100;

/// A grid coordinate. `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, other: Cell) -> Cell {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

/// Playfield rectangle. Minimum corner inclusive, maximum exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    x_min: i32,
    y_min: i32,
    width: i32,
    height: i32,
}

impl Bounds {
    pub const fn new(x_min: i32, y_min: i32, width: i32, height: i32) -> Self {
        Self {
            x_min,
            y_min,
            width,
            height,
        }
    }

    /// Rectangle of the given size with its minimum corner at `(-width/2, -height/2)`.
    pub const fn centered(width: i32, height: i32) -> Self {
        Self::new(-width / 2, -height / 2, width, height)
    }

    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn x_max(&self) -> i32 {
        self.x_min + self.width
    }

    pub fn y_max(&self) -> i32 {
        self.y_min + self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells inside the rectangle
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x_min && cell.x < self.x_max() && cell.y >= self.y_min && cell.y < self.y_max()
    }

    /// Column indices, left to right
    pub fn columns(&self) -> std::ops::Range<i32> {
        self.x_min..self.x_max()
    }

    /// Row indices, bottom to top
    pub fn rows(&self) -> std::ops::Range<i32> {
        self.y_min..self.y_max()
    }
}

/// The seven tetromino shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bonus_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }

    /// I and O rotate around the corner between four cells rather than a cell center.
    pub fn has_half_cell_pivot(&self) -> bool {
        matches!(self, ShapeKind::I | ShapeKind::O)
    }
}

/// Special effect carried by a bonus piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BonusKind {
    #[default]
    None,
    LineClear,
    ColumnClear,
    Bomb,
    SlowMotion,
}

impl BonusKind {
    /// The kinds a bonus roll can produce
    pub const ACTIVE: [BonusKind; 4] = [
        BonusKind::LineClear,
        BonusKind::ColumnClear,
        BonusKind::Bomb,
        BonusKind::SlowMotion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BonusKind::None => "none",
            BonusKind::LineClear => "lineClear",
            BonusKind::ColumnClear => "columnClear",
            BonusKind::Bomb => "bomb",
            BonusKind::SlowMotion => "slowMotion",
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual tile stored in an occupied grid cell. Opaque to the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Shape(ShapeKind),
    Bonus,
}

/// Wrap `input` into `min..max`, handling values below `min`.
///
/// # Examples
///
/// ```
/// use bonus_tetris_types::wrap;
///
/// assert_eq!(wrap(4, 0, 4), 0);
/// assert_eq!(wrap(-1, 0, 4), 3);
/// assert_eq!(wrap(-1, 0, 8), 7);
/// ```
pub fn wrap(input: i32, min: i32, max: i32) -> i32 {
    (input - min).rem_euclid(max - min) + min
}

/// Discrete actions a driver can apply to the board outside of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use bonus_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Restart => "restart",
        }
    }
}

/// Input sampled for one frame.
///
/// Edge fields fire once per key press; held fields stay set while the key is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub hard_drop: bool,
    pub restart: bool,
    pub soft_drop: bool,
    pub move_left: bool,
    pub move_right: bool,
}

impl InputFrame {
    /// Same held state with every edge event cleared.
    ///
    /// Used when one frame is split into several fixed steps.
    pub fn held_only(&self) -> Self {
        Self {
            soft_drop: self.soft_drop,
            move_left: self.move_left,
            move_right: self.move_right,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Rejected setup data. Raised before any game loop starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Board too small to hold a piece
    BoardTooSmall { width: i32, height: i32 },
    /// Spawn origin outside the board
    SpawnOutOfBounds(Cell),
    /// Supplied tile surface does not cover the configured board
    SurfaceTooSmall { width: i32, height: i32 },
    /// Probability outside 0..=1
    InvalidProbability(f32),
    /// A timing or rate value that must be positive is not
    NonPositive(&'static str),
    /// Acceleration factor outside (0, 1]
    InvalidAccelerationFactor(f32),
    /// Game-over margin below zero
    NegativeMargin(i32),
    /// Line score table is not non-decreasing
    LineScoresDecreasing,
    /// Static shape catalog data failed verification
    MalformedCatalog { kind: ShapeKind, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { width, height } => {
                write!(f, "board {width}x{height} is too small (minimum 4x4)")
            }
            ConfigError::SpawnOutOfBounds(cell) => {
                write!(f, "spawn origin ({}, {}) is outside the board", cell.x, cell.y)
            }
            ConfigError::SurfaceTooSmall { width, height } => {
                write!(f, "tile surface does not cover a {width}x{height} board")
            }
            ConfigError::InvalidProbability(p) => write!(f, "probability {p} is outside 0..=1"),
            ConfigError::NonPositive(name) => write!(f, "{name} must be positive"),
            ConfigError::InvalidAccelerationFactor(v) => {
                write!(f, "acceleration factor {v} is outside (0, 1]")
            }
            ConfigError::NegativeMargin(m) => write!(f, "game-over margin {m} is negative"),
            ConfigError::LineScoresDecreasing => f.write_str("line scores must be non-decreasing"),
            ConfigError::MalformedCatalog { kind, reason } => {
                write!(f, "shape catalog entry {} is malformed: {reason}", kind.as_str())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
