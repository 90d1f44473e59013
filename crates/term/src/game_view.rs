//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameState, Mask};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, Color};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
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

/// Screen placement of the grid frame, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Draws the grid, the side panel and the pause/game-over banners.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell compensates for the terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Where the grid frame lands for `state` in `viewport`, centered.
    pub fn frame_rect(&self, state: &GameState, viewport: Viewport) -> FrameRect {
        let w = state.grid().width().saturating_mul(self.cell_w).saturating_add(2);
        let h = state.grid().height().saturating_add(2);
        FrameRect {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render the whole frame into an existing framebuffer.
    ///
    /// Falling cells are already painted into the grid, so drawing the grid
    /// draws the active piece too. Rows above the grid are not shown.
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let frame = self.frame_rect(state, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, frame, border);

        let grid = state.grid();
        for y in 0..grid.height() {
            let Some(row) = grid.row(y as i32) else {
                break;
            };
            for (x, cell) in row.iter().enumerate() {
                self.draw_grid_cell(fb, frame, x as u16, y, *cell);
            }
        }

        self.draw_side_panel(fb, state, viewport, frame);

        if state.game_over() {
            let text = if state.new_high_score() {
                "GAME OVER HIGHSCORE"
            } else {
                "GAME OVER"
            };
            self.draw_banner(fb, frame, text);
        } else if state.paused() {
            self.draw_banner(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: FrameRect, style: CellStyle) {
        let FrameRect { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_grid_cell(&self, fb: &mut FrameBuffer, frame: FrameRect, x: u16, y: u16, cell: Cell) {
        let px = frame.x + 1 + x * self.cell_w;
        fb.put_block(px, frame.y + 1 + y, self.cell_w, cell, PLAY_BG);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        frame: FrameRect,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.score().to_string(), value);
        if state.is_high_score() {
            let digits = state.score().to_string().len() as u16;
            let gold = CellStyle::new(Rgb::new(240, 200, 60), PANEL_BG).bold();
            fb.put_char(panel_x + digits + 1, y, '*', gold);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGH", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.high_score().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.rows_cleared().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = state.next_piece() {
            self.draw_preview(fb, panel_x, y, &next.mask(), next.color());
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, mask: &Mask, color: Color) {
        for cell in mask.solid_cells() {
            let px = x + cell.x as u16 * self.cell_w;
            fb.put_block(px, y + cell.y as u16, self.cell_w, Cell::Falling(color), PANEL_BG);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, frame: FrameRect, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
