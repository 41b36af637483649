//! BoardView: maps a board plus HUD state into a framebuffer.
//!
//! Pure, no I/O. World rows grow upward, screen rows grow downward, so the top
//! board row lands on the first line inside the frame.

use crate::core::{Board, TileSurface};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::hud::Hud;
use crate::types::{Cell, ShapeKind, Tile};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BONUS_FG: Rgb = Rgb::new(255, 255, 255);
const BONUS_BG: Rgb = Rgb::new(170, 40, 170);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board cell size in terminal cells.
pub struct BoardView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into a reused framebuffer, resizing it to the viewport first.
    pub fn render_into<G: TileSurface>(
        &self,
        board: &Board<G>,
        hud: &Hud,
        slow_motion_remaining: Option<f32>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let bounds = board.bounds();
        let well_w = bounds.width() as u16 * self.cell_w;
        let well_h = bounds.height() as u16 * self.cell_h;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;

        let left = viewport.width.saturating_sub(frame_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_frame(fb, left, top, frame_w, frame_h);

        for (row, y) in bounds.rows().rev().enumerate() {
            for (col, x) in bounds.columns().enumerate() {
                let glyph = match board.tile_at(Cell::new(x, y)) {
                    Some(tile) => tile_glyph(tile),
                    None => Style::new(Rgb::new(90, 90, 100), WELL_BG).glyph('·'),
                };
                let px = left + 1 + col as u16 * self.cell_w;
                let py = top + 1 + row as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph);
            }
        }

        self.draw_panel(fb, hud, slow_motion_remaining, left + frame_w + 2, top);

        if hud.game_over || board.is_game_over() {
            let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let mid = top + frame_h / 2;
            centered(fb, left, frame_w, mid, "GAME OVER", style);
            centered(fb, left, frame_w, mid + 1, "R to restart", style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<G: TileSurface>(
        &self,
        board: &Board<G>,
        hud: &Hud,
        slow_motion_remaining: Option<f32>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, hud, slow_motion_remaining, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put(x, y, style.glyph('┌'));
        fb.put(right, y, style.glyph('┐'));
        fb.put(x, bottom, style.glyph('└'));
        fb.put(right, bottom, style.glyph('┘'));
        for cx in x + 1..right {
            fb.put(cx, y, style.glyph('─'));
            fb.put(cx, bottom, style.glyph('─'));
        }
        for cy in y + 1..bottom {
            fb.put(x, cy, style.glyph('│'));
            fb.put(right, cy, style.glyph('│'));
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &Hud,
        slow_motion_remaining: Option<f32>,
        x: u16,
        y: u16,
    ) {
        if x >= fb.width() {
            return;
        }
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &hud.score.to_string(), value);

        fb.put_str(x, y + 3, "GAME", label);
        fb.put_str(x, y + 4, &hud.games.to_string(), value);

        if let Some(left) = slow_motion_remaining {
            let slow = Style::new(BONUS_BG, PANEL_BG).bold();
            fb.put_str(x, y + 6, "SLOW MOTION", slow);
            fb.put_str(x, y + 7, &format!("x{:.1}  {:.1}s", hud.time_rate, left), value);
        }
    }
}

fn centered(fb: &mut FrameBuffer, left: u16, width: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    fb.put_str(left + width.saturating_sub(len) / 2, y, text, style);
}

fn tile_glyph(tile: Tile) -> Glyph {
    match tile {
        Tile::Bonus => Style::new(BONUS_FG, BONUS_BG).bold().glyph('▓'),
        Tile::Shape(kind) => Style::new(shape_color(kind), WELL_BG).bold().glyph('█'),
    }
}

fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}
