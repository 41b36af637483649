//! Piece module - the active falling shape
//!
//! A `Piece` owns its cells, origin, rotation and timers but not the grid. Every
//! operation that needs to know whether a placement is legal takes a validity
//! predicate `(cells, origin) -> bool` supplied by the board, so the board can
//! lift the piece off the grid before asking.
//!
//! Timers are deadlines on the game clock handed in by the caller. Slow motion
//! scales that clock, never the timers themselves.

use crate::catalog::{kick_index, rotate_cells, TetrominoData};
use crate::config::TimingConfig;
use crate::types::{wrap, Cell, InputFrame, ShapeKind};

pub const LEFT: Cell = Cell::new(-1, 0);
pub const RIGHT: Cell = Cell::new(1, 0);
pub const DOWN: Cell = Cell::new(0, -1);

/// What the board has to do after a piece tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceOutcome {
    /// Piece is still falling; write it back
    Falling,
    /// Piece dropped `distance` rows and must lock now
    HardDropped { distance: u32 },
    /// Lock delay ran out on an automatic step
    LockRequested,
}

#[derive(Debug, Clone)]
pub struct Piece {
    data: TetrominoData,
    cells: [Cell; 4],
    origin: Cell,
    rotation: i32,
    active: bool,
    timing: TimingConfig,
    /// Deadline for the next automatic step
    step_time: f32,
    /// Deadline after which held moves are accepted again
    move_time: f32,
    /// Time since the last successful move or rotation
    lock_time: f32,
    step_delay: f32,
    session_start: f32,
    acceleration_level: i32,
}

impl Piece {
    /// An inert piece. It becomes active on the first `initialize`.
    pub fn new(timing: TimingConfig) -> Self {
        let data = TetrominoData::template(ShapeKind::T);
        Self {
            cells: *data.cells(),
            data,
            origin: Cell::default(),
            rotation: 0,
            active: false,
            step_delay: timing.initial_step_delay,
            timing,
            step_time: 0.0,
            move_time: 0.0,
            lock_time: 0.0,
            session_start: 0.0,
            acceleration_level: 0,
        }
    }

    /// Reset for a fresh spawn at `origin`. The caller checks validity.
    pub fn initialize(&mut self, origin: Cell, data: TetrominoData, now: f32, session_start: f32) {
        self.cells = *data.cells();
        self.data = data;
        self.origin = origin;
        self.rotation = 0;
        self.active = true;

        self.step_delay = self.timing.initial_step_delay;
        self.session_start = session_start;
        self.acceleration_level = 0;
        // A piece spawned late in the game falls at the current ramp speed from its first step
        self.update_speed(now);

        self.step_time = now + self.step_delay;
        self.move_time = now + self.timing.move_delay;
        self.lock_time = 0.0;
    }

    pub fn data(&self) -> &TetrominoData {
        &self.data
    }

    pub fn kind(&self) -> ShapeKind {
        self.data.kind()
    }

    /// Cell offsets relative to the origin in the current rotation
    pub fn cells(&self) -> &[Cell; 4] {
        &self.cells
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Rotation state, 0..=3
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn step_delay(&self) -> f32 {
        self.step_delay
    }

    pub fn lock_time(&self) -> f32 {
        self.lock_time
    }

    /// Absolute board cells
    pub fn board_cells(&self) -> [Cell; 4] {
        self.cells.map(|c| c + self.origin)
    }

    /// One frame of falling-piece logic. The board has already lifted the piece
    /// off the grid and puts it back (or locks it) based on the outcome.
    pub fn tick<V>(&mut self, now: f32, dt: f32, input: &InputFrame, is_valid: &V) -> PieceOutcome
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        self.lock_time += dt;
        self.update_speed(now);

        if input.rotate_left {
            self.rotate(-1, now, is_valid);
        } else if input.rotate_right {
            self.rotate(1, now, is_valid);
        }

        if input.hard_drop {
            let distance = self.drop_to_floor(now, is_valid);
            return PieceOutcome::HardDropped { distance };
        }

        if now > self.move_time {
            self.handle_move_inputs(now, input, is_valid);
        }

        if now > self.step_time && self.step(now, is_valid) {
            return PieceOutcome::LockRequested;
        }

        PieceOutcome::Falling
    }

    /// Exponential speed ramp over elapsed session time, floored at the minimum delay.
    fn update_speed(&mut self, now: f32) {
        let level = ((now - self.session_start) / self.timing.acceleration_interval).floor() as i32;

        if level > self.acceleration_level {
            self.acceleration_level = level;
            self.step_delay = (self.timing.initial_step_delay
                * self.timing.acceleration_factor.powi(level))
            .max(self.timing.min_step_delay);
        }
    }

    fn handle_move_inputs<V>(&mut self, now: f32, input: &InputFrame, is_valid: &V)
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        if input.soft_drop {
            self.soft_drop(now, is_valid);
        } else if input.move_left {
            self.try_move(LEFT, now, is_valid);
        } else if input.move_right {
            self.try_move(RIGHT, now, is_valid);
        }
    }

    /// Automatic gravity step. Returns true when the piece should lock.
    fn step<V>(&mut self, now: f32, is_valid: &V) -> bool
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        self.step_time = now + self.step_delay;
        self.try_move(DOWN, now, is_valid);
        self.lock_time >= self.timing.lock_delay
    }

    /// Move one row down, pushing the next automatic step back on success.
    pub fn soft_drop<V>(&mut self, now: f32, is_valid: &V) -> bool
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        let moved = self.try_move(DOWN, now, is_valid);
        if moved {
            self.step_time = now + self.step_delay;
        }
        moved
    }

    /// Translate by `delta` if the target is valid. A successful move restarts
    /// the held-move timer and the lock delay.
    pub fn try_move<V>(&mut self, delta: Cell, now: f32, is_valid: &V) -> bool
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        let target = self.origin + delta;
        let valid = is_valid(&self.cells, target);

        if valid {
            self.origin = target;
            self.move_time = now + self.timing.move_delay;
            self.lock_time = 0.0;
        }

        valid
    }

    /// Rotate by `direction` (+1 clockwise, -1 counter-clockwise) with wall kicks.
    /// All or nothing: on failure rotation and cells are restored exactly.
    pub fn rotate<V>(&mut self, direction: i32, now: f32, is_valid: &V) -> bool
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        let original_rotation = self.rotation;
        let original_cells = self.cells;

        self.rotation = wrap(self.rotation + direction, 0, 4);
        rotate_cells(self.data.kind(), &mut self.cells, direction);

        if self.test_wall_kicks(direction, now, is_valid) {
            return true;
        }

        self.rotation = original_rotation;
        self.cells = original_cells;
        false
    }

    fn test_wall_kicks<V>(&mut self, direction: i32, now: f32, is_valid: &V) -> bool
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        let kicks = self.data.kicks();
        let row = &kicks[kick_index(self.rotation, direction, kicks.len())];

        row.iter()
            .any(|&kick| self.try_move(Cell::from(kick), now, is_valid))
    }

    /// Move down until blocked, returning the rows travelled.
    pub fn drop_to_floor<V>(&mut self, now: f32, is_valid: &V) -> u32
    where
        V: Fn(&[Cell; 4], Cell) -> bool,
    {
        let mut distance = 0;
        while self.try_move(DOWN, now, is_valid) {
            distance += 1;
        }
        distance
    }
}
