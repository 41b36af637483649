//! Scoring module - point values for the named score events
//!
//! Three things award points: clearing lines, hard-dropping, and activating a
//! bonus. The values live in [`GameConfig`](crate::config::GameConfig); these
//! helpers only do the table lookups.

use crate::config::BonusConfig;
use crate::types::{BonusKind, HARD_DROP_POINTS_PER_CELL};

/// Points for clearing `lines` rows in a single pass.
///
/// Anything outside the table (0, or more than four rows) scores nothing.
pub fn line_clear_points(lines: u32, table: &[u32; 5]) -> u32 {
    match lines {
        1..=4 => table[lines as usize],
        _ => 0,
    }
}

/// Points for a hard drop of `distance` cells
pub fn hard_drop_points(distance: u32) -> u32 {
    distance * HARD_DROP_POINTS_PER_CELL
}

/// Points awarded when a bonus of `kind` activates
pub fn bonus_points(kind: BonusKind, bonus: &BonusConfig) -> u32 {
    match kind {
        BonusKind::None => 0,
        BonusKind::LineClear => bonus.line_clear_points,
        BonusKind::ColumnClear => bonus.column_clear_points,
        BonusKind::Bomb => bonus.bomb_points,
        BonusKind::SlowMotion => bonus.slow_motion_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LINE_SCORES;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0, &LINE_SCORES), 0);
        assert_eq!(line_clear_points(1, &LINE_SCORES), 10);
        assert_eq!(line_clear_points(2, &LINE_SCORES), 30);
        assert_eq!(line_clear_points(3, &LINE_SCORES), 50);
        assert_eq!(line_clear_points(4, &LINE_SCORES), 80);
        assert_eq!(line_clear_points(5, &LINE_SCORES), 0);
    }

    #[test]
    fn test_hard_drop_points() {
        assert_eq!(hard_drop_points(0), 0);
        assert_eq!(hard_drop_points(17), 34);
    }

    #[test]
    fn test_bonus_points() {
        let bonus = BonusConfig::default();
        assert_eq!(bonus_points(BonusKind::None, &bonus), 0);
        assert_eq!(bonus_points(BonusKind::LineClear, &bonus), 200);
        assert_eq!(bonus_points(BonusKind::ColumnClear, &bonus), 200);
        assert_eq!(bonus_points(BonusKind::Bomb, &bonus), 150);
        assert_eq!(bonus_points(BonusKind::SlowMotion, &bonus), 100);
    }
}
