//! Shape catalog - tetromino cell data, rotation transform and wall kick tables
//!
//! Every kind is described by four cells around a pivot at `(0, 0)` in its spawn
//! orientation. Other orientations are produced by rotating those cells rather than
//! being stored, so the rotation transform below is part of the catalog contract.

use crate::types::{wrap, Cell, ConfigError, ShapeKind, Tile};
use crate::types::BonusKind;

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i32, i32);

/// Wall kick candidates: 8 rotation transitions, 5 translations each
pub type KickTable = [[CellOffset; 5]; 8];

/// 90° rotation matrix `[cos, sin, -sin, cos]`, scaled by the rotation direction.
pub const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

/// Get the spawn orientation cells for a shape kind
pub fn base_cells(kind: ShapeKind) -> [CellOffset; 4] {
    match kind {
        ShapeKind::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
        ShapeKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
        ShapeKind::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
        ShapeKind::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
        ShapeKind::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
    }
}

/// Get the kick table for a shape kind
pub fn kick_table(kind: ShapeKind) -> &'static KickTable {
    match kind {
        ShapeKind::I => &I_KICKS,
        _ => &JLOSTZ_KICKS,
    }
}

const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Shared by J, L, O, S, T and Z
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Row of the kick table for a transition.
///
/// `rotation_index` is the orientation *after* rotating. Counter-clockwise
/// transitions use the row before the clockwise one.
pub fn kick_index(rotation_index: i32, direction: i32, rows: usize) -> usize {
    let mut index = rotation_index * 2;
    if direction < 0 {
        index -= 1;
    }
    wrap(index, 0, rows as i32) as usize
}

/// Rotate cells in place by 90° in `direction` (+1 clockwise, -1 counter-clockwise).
///
/// I and O pivot on a cell corner: each cell is shifted by half a cell before the
/// transform and the result is rounded up. Everything else rounds to nearest.
pub fn rotate_cells(kind: ShapeKind, cells: &mut [Cell; 4], direction: i32) {
    let m = ROTATION_MATRIX;
    let d = direction as f32;

    for cell in cells.iter_mut() {
        let (x, y) = if kind.has_half_cell_pivot() {
            let cx = cell.x as f32 - 0.5;
            let cy = cell.y as f32 - 0.5;
            (
                ((cx * m[0] * d) + (cy * m[1] * d)).ceil(),
                ((cx * m[2] * d) + (cy * m[3] * d)).ceil(),
            )
        } else {
            let cx = cell.x as f32;
            let cy = cell.y as f32;
            (
                ((cx * m[0] * d) + (cy * m[1] * d)).round(),
                ((cx * m[2] * d) + (cy * m[3] * d)).round(),
            )
        };
        *cell = Cell::new(x as i32, y as i32);
    }
}

/// Shape descriptor for one piece.
///
/// The catalog keeps one template per kind; spawning clones it and may then mark
/// the clone as a bonus piece without touching the template.
#[derive(Debug, Clone, PartialEq)]
pub struct TetrominoData {
    kind: ShapeKind,
    tile: Tile,
    bonus: BonusKind,
    cells: [Cell; 4],
    kicks: &'static KickTable,
}

impl TetrominoData {
    pub fn template(kind: ShapeKind) -> Self {
        Self {
            kind,
            tile: Tile::Shape(kind),
            bonus: BonusKind::None,
            cells: base_cells(kind).map(Cell::from),
            kicks: kick_table(kind),
        }
    }

    /// Mark as a bonus piece drawn with the bonus tile.
    pub fn with_bonus(mut self, bonus: BonusKind) -> Self {
        self.bonus = bonus;
        self.tile = match bonus {
            BonusKind::None => Tile::Shape(self.kind),
            _ => Tile::Bonus,
        };
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn bonus(&self) -> BonusKind {
        self.bonus
    }

    pub fn is_bonus(&self) -> bool {
        self.bonus != BonusKind::None
    }

    pub fn cells(&self) -> &[Cell; 4] {
        &self.cells
    }

    pub fn kicks(&self) -> &'static KickTable {
        self.kicks
    }
}

/// Templates for all seven kinds, verified on construction.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    templates: [TetrominoData; 7],
}

impl ShapeCatalog {
    pub fn standard() -> Result<Self, ConfigError> {
        let templates = ShapeKind::ALL.map(TetrominoData::template);
        for data in &templates {
            verify(data)?;
        }
        Ok(Self { templates })
    }

    pub fn template(&self, kind: ShapeKind) -> &TetrominoData {
        // ALL is in declaration order, so the discriminant is the index
        &self.templates[kind as usize]
    }
}

fn verify(data: &TetrominoData) -> Result<(), ConfigError> {
    let malformed = |reason| ConfigError::MalformedCatalog {
        kind: data.kind,
        reason,
    };

    let cells = data.cells;
    for (i, a) in cells.iter().enumerate() {
        if cells[i + 1..].contains(a) {
            return Err(malformed("duplicate cell"));
        }
    }

    if data.kicks.iter().any(|row| row[0] != (0, 0)) {
        return Err(malformed("first kick of a row must be (0, 0)"));
    }

    for direction in [1, -1] {
        let mut rotated = cells;
        for _ in 0..4 {
            rotate_cells(data.kind, &mut rotated, direction);
        }
        if rotated != cells {
            return Err(malformed("four rotations do not return to the spawn cells"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_of(kind: ShapeKind) -> [Cell; 4] {
        base_cells(kind).map(Cell::from)
    }

    #[test]
    fn standard_catalog_verifies() {
        let catalog = ShapeCatalog::standard().unwrap();
        for kind in ShapeKind::ALL {
            assert_eq!(catalog.template(kind).kind(), kind);
        }
    }

    #[test]
    fn t_rotates_clockwise_about_center() {
        let mut cells = cells_of(ShapeKind::T);
        rotate_cells(ShapeKind::T, &mut cells, 1);
        assert_eq!(
            cells,
            [(1, 0), (0, 1), (0, 0), (0, -1)].map(Cell::from)
        );
    }

    #[test]
    fn i_rotates_about_cell_corner() {
        let mut cells = cells_of(ShapeKind::I);
        rotate_cells(ShapeKind::I, &mut cells, 1);
        assert_eq!(cells, [(1, 2), (1, 1), (1, 0), (1, -1)].map(Cell::from));

        rotate_cells(ShapeKind::I, &mut cells, 1);
        assert_eq!(cells, [(2, 0), (1, 0), (0, 0), (-1, 0)].map(Cell::from));
    }

    #[test]
    fn o_keeps_its_footprint() {
        let mut cells = cells_of(ShapeKind::O);
        rotate_cells(ShapeKind::O, &mut cells, -1);
        let mut sorted = cells.to_vec();
        sorted.sort_by_key(|c| (c.x, c.y));
        let mut expected = cells_of(ShapeKind::O).to_vec();
        expected.sort_by_key(|c| (c.x, c.y));
        assert_eq!(sorted, expected);
    }

    #[test]
    fn kick_index_wraps_counter_clockwise_from_spawn() {
        assert_eq!(kick_index(1, 1, 8), 2);
        assert_eq!(kick_index(2, 1, 8), 4);
        assert_eq!(kick_index(0, 1, 8), 0);
        // 1 -> 0 counter-clockwise lands on row -1, wrapped to 7
        assert_eq!(kick_index(0, -1, 8), 7);
        assert_eq!(kick_index(3, -1, 8), 5);
    }

    #[test]
    fn bonus_clone_leaves_template_untouched() {
        let catalog = ShapeCatalog::standard().unwrap();
        let bonus = catalog
            .template(ShapeKind::S)
            .clone()
            .with_bonus(BonusKind::Bomb);

        assert!(bonus.is_bonus());
        assert_eq!(bonus.tile(), Tile::Bonus);
        assert!(!catalog.template(ShapeKind::S).is_bonus());
        assert_eq!(catalog.template(ShapeKind::S).tile(), Tile::Shape(ShapeKind::S));
    }
}
