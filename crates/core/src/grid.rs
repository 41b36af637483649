//! Grid surface - where occupied cells live
//!
//! The rules only talk to the grid through [`TileSurface`], so a front-end can
//! back it with whatever tile store it already has. [`TileGrid`] is the default
//! in-memory implementation: a flat row-major array over a [`Bounds`] rectangle.

use crate::types::{Bounds, Cell, Tile};

/// Tile storage consumed by the board.
pub trait TileSurface {
    /// Write `tile` (or empty) at `cell`. Writes outside the surface are ignored.
    fn set_tile(&mut self, cell: Cell, tile: Option<Tile>);

    /// Tile at `cell`, or `None` when empty or outside the surface.
    fn get_tile(&self, cell: Cell) -> Option<Tile>;

    /// Whether `cell` lies on the surface at all.
    fn contains(&self, cell: Cell) -> bool;

    fn has_tile(&self, cell: Cell) -> bool {
        self.get_tile(cell).is_some()
    }

    /// Empty every cell.
    fn clear_all(&mut self);
}

/// Flat array grid covering one bounds rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    bounds: Bounds,
    /// Row-major from the bottom row: (y - y_min) * width + (x - x_min)
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.area()],
        }
    }

    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        let col = (cell.x - self.bounds.x_min()) as usize;
        let row = (cell.y - self.bounds.y_min()) as usize;
        Some(row * self.bounds.width() as usize + col)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Occupied cells with their tiles, bottom row first
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        let bounds = self.bounds;
        let width = bounds.width() as usize;
        self.cells.iter().enumerate().filter_map(move |(i, tile)| {
            tile.map(|t| {
                let x = bounds.x_min() + (i % width) as i32;
                let y = bounds.y_min() + (i / width) as i32;
                (Cell::new(x, y), t)
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }
}

impl TileSurface for TileGrid {
    fn set_tile(&mut self, cell: Cell, tile: Option<Tile>) {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = tile;
        }
    }

    fn get_tile(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).and_then(|idx| self.cells[idx])
    }

    fn contains(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    fn clear_all(&mut self) {
        self.cells.fill(None);
    }
}
