//! FieldCanvas: the terminal implementation of the engine's render port.
//!
//! Drawing is pure (into a [`FrameBuffer`]); [`TerminalCanvas`] pairs a canvas
//! with a [`TerminalRenderer`] and flushes on `present`.

use anyhow::Result;

use crate::core::Phase;
use crate::engine::{Renderer, Status};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;

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

    /// Current terminal size, 80x24 when it cannot be queried
    pub fn from_terminal() -> Self {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::new(w, h)
    }
}

const BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const EMPTY: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), BG).dim();
const BLOCK: CellStyle = CellStyle::new(Rgb::new(80, 220, 220), BG).bold();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Draws the field with a border, two columns per cell, plus a status panel
#[derive(Debug, Clone)]
pub struct FieldCanvas {
    field_w: u16,
    field_h: u16,
    /// Field cell width in terminal columns
    cell_w: u16,
    viewport: Viewport,
    fb: FrameBuffer,
    dirty: bool,
}

impl FieldCanvas {
    pub fn new(field_w: usize, field_h: usize, viewport: Viewport) -> Self {
        Self {
            field_w: field_w as u16,
            field_h: field_h as u16,
            // 2x1 compensates for the usual terminal glyph aspect ratio.
            cell_w: 2,
            viewport,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            dirty: false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Takes effect on the next `clear`
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Whether a frame was presented since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn frame_size(&self) -> (u16, u16) {
        (self.field_w * self.cell_w + 2, self.field_h + 2)
    }

    /// Top-left corner of the border
    fn origin(&self) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            self.viewport.width.saturating_sub(frame_w) / 2,
            self.viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn fill_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        let (ox, oy) = self.origin();
        let px = ox + 1 + x * self.cell_w;
        self.fb.fill_rect(px, oy + 1 + y, self.cell_w, 1, ch, style);
    }

    fn draw_border(&mut self) {
        let (x, y) = self.origin();
        let (w, h) = self.frame_size();
        let fb = &mut self.fb;

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_banner(&mut self, text: &str) {
        let (x, y) = self.origin();
        let (w, h) = self.frame_size();
        let text_w = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
        self.fb.put_str(tx, y + h / 2, text, BANNER);
    }
}

impl Renderer for FieldCanvas {
    fn clear(&mut self) {
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.clear(Cell::default());
        self.draw_border();
        for y in 0..self.field_h {
            for x in 0..self.field_w {
                self.fill_cell(x, y, '·', EMPTY);
            }
        }
    }

    fn draw_occupied(&mut self, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            // A fresh piece may still stick out above the field.
            if x < 0 || y < 0 || x >= self.field_w as i32 || y >= self.field_h as i32 {
                continue;
            }
            self.fill_cell(x as u16, y as u16, '█', BLOCK);
        }
    }

    fn draw_status(&mut self, status: &Status) {
        let (ox, oy) = self.origin();
        let (frame_w, _) = self.frame_size();
        let panel_x = ox.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(8) <= self.viewport.width {
            let rows = [
                ("SCORE", status.score),
                ("BEST", status.best_score),
                ("LINES", status.lines),
                ("SPEED", status.speed),
            ];
            let mut y = oy;
            for (label, value) in rows {
                self.fb.put_str(panel_x, y, label, LABEL);
                self.fb.put_u32(panel_x, y + 1, value, VALUE);
                y = y.saturating_add(3);
            }
        }

        if status.phase == Phase::GameOver {
            self.draw_banner("GAME OVER");
        }
    }

    fn present(&mut self) -> Result<()> {
        self.dirty = true;
        Ok(())
    }
}

/// A [`FieldCanvas`] flushed to the real terminal after every frame
pub struct TerminalCanvas {
    canvas: FieldCanvas,
    terminal: TerminalRenderer,
}

impl TerminalCanvas {
    pub fn new(canvas: FieldCanvas, terminal: TerminalRenderer) -> Self {
        Self { canvas, terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalRenderer {
        &mut self.terminal
    }
}

impl Renderer for TerminalCanvas {
    fn clear(&mut self) {
        let viewport = Viewport::from_terminal();
        if viewport != self.canvas.viewport() {
            self.canvas.set_viewport(viewport);
            self.terminal.invalidate();
        }
        self.canvas.clear();
    }

    fn draw_occupied(&mut self, cells: &[(i32, i32)]) {
        self.canvas.draw_occupied(cells);
    }

    fn draw_status(&mut self, status: &Status) {
        self.canvas.draw_status(status);
    }

    fn present(&mut self) -> Result<()> {
        self.canvas.present()?;
        self.terminal.draw_swap(self.canvas.framebuffer_mut())
    }
}
