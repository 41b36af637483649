//! Board module - grid state machine, scoring and game lifecycle
//!
//! The board owns the tile surface, the single long-lived [`Piece`], the injected
//! RNG and the score. Rows are scanned bottom-up; the playfield is the
//! [`Bounds`] rectangle derived from the config.
//!
//! The board never calls out. Anything the outside world cares about (score,
//! game over, restart, slow motion) is queued as a [`BoardEvent`] and drained by
//! whoever drives the board, usually the session controller.

use log::{debug, info};

use crate::catalog::{ShapeCatalog, TetrominoData};
use crate::config::GameConfig;
use crate::grid::{TileGrid, TileSurface};
use crate::piece::{Piece, PieceOutcome, LEFT, RIGHT};
use crate::rng::GameRng;
use crate::scoring::{bonus_points, hard_drop_points, line_clear_points};
use crate::types::{
    BonusKind, Bounds, Cell, ConfigError, GameAction, InputFrame, ShapeKind, Tile, BOMB_RADIUS,
};

/// Outward notification queued by the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardEvent {
    ScoreChanged { total: u32 },
    Spawned { kind: ShapeKind, bonus: BonusKind },
    LinesCleared { count: u32, points: u32 },
    BonusActivated { kind: BonusKind, points: u32 },
    /// The driver should scale its clock by `factor` until `duration` game seconds have passed
    SlowMotionRequested { factor: f32, duration: f32 },
    GameOver,
    Restarted,
}

/// Validity of `cells` placed at `origin`: every cell inside `bounds` and empty.
pub fn is_valid_placement<G: TileSurface>(
    bounds: &Bounds,
    grid: &G,
    cells: &[Cell; 4],
    origin: Cell,
) -> bool {
    cells.iter().all(|&offset| {
        let cell = offset + origin;
        bounds.contains(cell) && !grid.has_tile(cell)
    })
}

pub struct Board<G: TileSurface = TileGrid> {
    config: GameConfig,
    bounds: Bounds,
    grid: G,
    catalog: ShapeCatalog,
    piece: Piece,
    rng: GameRng,
    score: u32,
    game_over: bool,
    started: bool,
    /// Game clock as of the last tick
    now: f32,
    /// Game clock when the current game began, for the speed ramp
    session_start: f32,
    events: Vec<BoardEvent>,
}

impl Board<TileGrid> {
    /// Board backed by an in-memory grid
    pub fn new(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        let grid = TileGrid::new(config.bounds());
        Self::with_surface(config, grid, rng)
    }
}

impl<G: TileSurface> Board<G> {
    /// Board over a caller-supplied surface. Fails on invalid config or catalog data,
    /// or when the surface does not cover the playfield corners.
    pub fn with_surface(config: GameConfig, grid: G, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.bounds();
        let corners = [
            Cell::new(bounds.x_min(), bounds.y_min()),
            Cell::new(bounds.x_max() - 1, bounds.y_max() - 1),
        ];
        if !corners.iter().all(|&c| grid.contains(c)) {
            return Err(ConfigError::SurfaceTooSmall {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        let catalog = ShapeCatalog::standard()?;

        Ok(Self {
            bounds: config.bounds(),
            piece: Piece::new(config.timing),
            config,
            grid,
            catalog,
            rng,
            score: 0,
            game_over: false,
            started: false,
            now: 0.0,
            session_start: 0.0,
            events: Vec::new(),
        })
    }

    /// Publish the initial score and spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.session_start = self.now;
        self.update_score(0);
        self.spawn_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn surface(&self) -> &G {
        &self.grid
    }

    /// Direct grid access for harnesses and front-ends that pre-fill the board.
    pub fn surface_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.grid.get_tile(cell)
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Advance the active piece by one frame.
    ///
    /// `now` and `dt` are on the game clock, already scaled by the time rate.
    pub fn tick(&mut self, now: f32, dt: f32, input: &InputFrame) {
        self.now = now;
        if !self.started || self.game_over || !self.piece.is_active() {
            return;
        }

        self.clear_piece();

        let outcome = {
            let bounds = self.bounds;
            let grid = &self.grid;
            let is_valid = |cells: &[Cell; 4], origin: Cell| {
                is_valid_placement(&bounds, grid, cells, origin)
            };
            self.piece.tick(now, dt, input, &is_valid)
        };

        match outcome {
            PieceOutcome::Falling => self.set_piece(),
            PieceOutcome::HardDropped { distance } => {
                debug!("hard drop distance {distance}");
                self.update_score(hard_drop_points(distance) as i32);
                self.lock_piece();
            }
            PieceOutcome::LockRequested => self.lock_piece(),
        }
    }

    /// Apply one discrete action immediately, outside the tick timers.
    ///
    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.restart_game();
            return true;
        }
        if !self.started || self.game_over || !self.piece.is_active() {
            return false;
        }

        self.clear_piece();

        let now = self.now;
        let bounds = self.bounds;
        let grid = &self.grid;
        let is_valid =
            |cells: &[Cell; 4], origin: Cell| is_valid_placement(&bounds, grid, cells, origin);

        let changed = match action {
            GameAction::MoveLeft => self.piece.try_move(LEFT, now, &is_valid),
            GameAction::MoveRight => self.piece.try_move(RIGHT, now, &is_valid),
            GameAction::SoftDrop => self.piece.soft_drop(now, &is_valid),
            GameAction::RotateCw => self.piece.rotate(1, now, &is_valid),
            GameAction::RotateCcw => self.piece.rotate(-1, now, &is_valid),
            GameAction::HardDrop => {
                let distance = self.piece.drop_to_floor(now, &is_valid);
                self.update_score(hard_drop_points(distance) as i32);
                self.lock_piece();
                return true;
            }
            GameAction::Restart => unreachable!("handled above"),
        };

        self.set_piece();
        changed
    }

    /// Whether the active piece's cells fit at `origin`.
    pub fn is_valid_position(&self, piece: &Piece, origin: Cell) -> bool {
        is_valid_placement(&self.bounds, &self.grid, piece.cells(), origin)
    }

    /// Spawn a random piece, possibly a bonus one.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.rng.shape_kind();
        let mut data = self.catalog.template(kind).clone();

        if self.rng.roll(self.config.bonus.probability) {
            data = data.with_bonus(self.rng.bonus_kind());
        }

        self.spawn_with(data)
    }

    /// Spawn a specific piece at the configured origin. A blocked spawn ends the game.
    pub fn spawn_with(&mut self, data: TetrominoData) -> bool {
        let kind = data.kind();
        let bonus = data.bonus();
        let origin = self.config.spawn_origin;
        self.piece.initialize(origin, data, self.now, self.session_start);

        if self.is_valid_position(&self.piece, origin) {
            self.set_piece();
            self.events.push(BoardEvent::Spawned { kind, bonus });
            true
        } else {
            info!("spawn of {} blocked", kind.as_str());
            self.game_over();
            false
        }
    }

    /// Write the active piece's tile into its cells.
    pub fn set_piece(&mut self) {
        let tile = self.piece.data().tile();
        for cell in self.piece.board_cells() {
            self.grid.set_tile(cell, Some(tile));
        }
    }

    /// Erase the active piece's cells.
    pub fn clear_piece(&mut self) {
        for cell in self.piece.board_cells() {
            self.grid.set_tile(cell, None);
        }
    }

    /// Commit the active piece, then resolve game over, lines, bonus and respawn.
    fn lock_piece(&mut self) {
        self.set_piece();

        // Checked before clearing lines: a lock this high ends the game even if
        // it would have completed a row.
        let threshold = self.bounds.y_max() - self.config.game_over_margin;
        if self.piece.board_cells().iter().any(|c| c.y >= threshold) {
            info!("piece locked at the top, game over");
            self.game_over();
            return;
        }

        self.clear_lines();

        let data = self.piece.data();
        if data.is_bonus() {
            let kind = data.bonus();
            let origin = self.piece.origin();
            self.activate_bonus(kind, origin);
        }

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Remove every full row, compacting the rows above. Returns rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mut row = self.bounds.y_min();
        let mut lines = 0;

        while row < self.bounds.y_max() {
            if self.is_line_full(row) {
                // Re-check the same index: the row above just moved into it
                self.line_clear(row);
                lines += 1;
            } else {
                row += 1;
            }
        }

        if lines > 0 {
            let points = line_clear_points(lines, &self.config.line_scores);
            info!("cleared {lines} lines (+{points})");
            self.events.push(BoardEvent::LinesCleared {
                count: lines,
                points,
            });
            self.update_score(points as i32);
        }

        lines
    }

    pub fn is_line_full(&self, row: i32) -> bool {
        self.bounds
            .columns()
            .all(|col| self.grid.has_tile(Cell::new(col, row)))
    }

    /// Erase `row` and shift everything above it down by one.
    pub fn line_clear(&mut self, row: i32) {
        for col in self.bounds.columns() {
            self.grid.set_tile(Cell::new(col, row), None);
        }

        let top = self.bounds.y_max();
        for r in row..top {
            for col in self.bounds.columns() {
                let above = if r + 1 < top {
                    self.grid.get_tile(Cell::new(col, r + 1))
                } else {
                    None
                };
                self.grid.set_tile(Cell::new(col, r), above);
            }
        }
    }

    /// Run a bonus effect and award its points once.
    pub fn activate_bonus(&mut self, kind: BonusKind, origin: Cell) {
        match kind {
            BonusKind::None => return,
            BonusKind::LineClear => {
                let row = self.rng.next_range(self.bounds.rows());
                self.line_clear(row);
            }
            BonusKind::ColumnClear => {
                let col = self.rng.next_range(self.bounds.columns());
                self.clear_column(col);
            }
            BonusKind::Bomb => self.explode_around(origin),
            BonusKind::SlowMotion => {
                self.events.push(BoardEvent::SlowMotionRequested {
                    factor: self.config.bonus.slow_motion_factor,
                    duration: self.config.bonus.slow_motion_duration,
                });
            }
        }

        let points = bonus_points(kind, &self.config.bonus);
        info!("activated bonus {kind} (+{points})");
        self.events.push(BoardEvent::BonusActivated { kind, points });
        self.update_score(points as i32);
    }

    fn clear_column(&mut self, col: i32) {
        for row in self.bounds.rows() {
            self.grid.set_tile(Cell::new(col, row), None);
        }
    }

    /// Clear the square of radius [`BOMB_RADIUS`] around `center`. Cells off the board are skipped.
    fn explode_around(&mut self, center: Cell) {
        for dx in -BOMB_RADIUS..=BOMB_RADIUS {
            for dy in -BOMB_RADIUS..=BOMB_RADIUS {
                let cell = center + Cell::new(dx, dy);
                if self.bounds.contains(cell) {
                    self.grid.set_tile(cell, None);
                }
            }
        }
    }

    /// Add `delta` to the score (saturating at zero) and publish the total.
    pub fn update_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add_signed(delta);
        debug!("score {} ({delta:+})", self.score);
        self.events.push(BoardEvent::ScoreChanged { total: self.score });
    }

    /// Enter the terminal state: empty grid, inert piece.
    pub fn game_over(&mut self) {
        self.game_over = true;
        self.grid.clear_all();
        self.piece.set_active(false);
        self.events.push(BoardEvent::GameOver);
    }

    /// Back to the initial state of a fresh game, whatever state we are in.
    pub fn restart_game(&mut self) {
        info!("restarting game");
        self.game_over = false;
        self.started = true;
        self.score = 0;
        self.update_score(0);
        self.grid.clear_all();
        self.events.push(BoardEvent::Restarted);

        self.session_start = self.now;
        self.piece.set_active(true);
        self.spawn_piece();
    }
}
