//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A frame is written as horizontal runs of cells. The first frame (and any
//! frame after a resize or [`TerminalRenderer::invalidate`]) sends every row;
//! later frames only send the runs that differ from the frame before.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }

    /// Send every cell on the next draw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand the previously shown frame back through `fb` so the
    /// caller can draw the next frame into it without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let same_size = |shown: &FrameBuffer| {
            shown.width() == fb.width() && shown.height() == fb.height()
        };
        let mut shown = match self.shown.take() {
            Some(shown) if same_size(&shown) => {
                encode_diff_into(&shown, fb, &mut self.bytes)?;
                shown
            }
            stale => {
                encode_full_into(fb, &mut self.bytes)?;
                let mut shown = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                shown.resize(fb.width(), fb.height());
                shown
            }
        };
        self.flush()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.bytes)
            .and_then(|_| self.stdout.flush())
            .context("failed to write to the terminal")
    }
}

/// Writes cell runs, switching style only when it changes
struct RunEncoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> RunEncoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn run(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in (x..x + len).filter_map(|cx| fb.get(cx, y)) {
            if self.style != Some(cell.style) {
                set_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut enc = RunEncoder::new(out);
    for y in 0..fb.height() {
        enc.run(fb, 0, y, fb.width())?;
    }
    enc.finish()
}

/// Encode only the runs of `next` that differ from `prev` into `out`.
///
/// Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = RunEncoder::new(out);
    for (x, y, len) in changed_runs(prev, next) {
        enc.run(next, x, y, len)?;
    }
    enc.finish()
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute reset also resets colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetColors(Colors::new(color(style.fg), color(style.bg))))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Horizontal runs `(x, y, len)` of cells that differ between two frames
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    let differs = move |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    (0..next.height()).flat_map(move |y| {
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x, y) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
