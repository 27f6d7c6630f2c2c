//! Render port.
//!
//! The engine never owns a drawing surface. After every transition it performs a
//! pure read of the game and pushes it through a [`Renderer`] supplied by the UI
//! layer.

use anyhow::Result;

use blockfall_core::{GameState, Phase};

/// Numbers shown next to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub score: u32,
    pub best_score: u32,
    pub lines: u32,
    pub speed: u32,
    pub phase: Phase,
}

impl From<&GameState> for Status {
    fn from(game: &GameState) -> Self {
        Self {
            score: game.score(),
            best_score: game.best_score(),
            lines: game.lines(),
            speed: game.speed(),
            phase: game.phase(),
        }
    }
}

/// Drawing surface owned by the UI layer
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self);

    /// Draw occupied cells, in field coordinates
    fn draw_occupied(&mut self, cells: &[(i32, i32)]);

    fn draw_status(&mut self, _status: &Status) {}

    /// Finish the frame
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Read the game and draw one frame: settled cells, then the falling piece.
pub fn paint<R: Renderer + ?Sized>(game: &GameState, out: &mut R) -> Result<()> {
    out.clear();

    let settled: Vec<(i32, i32)> = game
        .field()
        .occupied_cells()
        .map(|(x, y)| (x as i32, y as i32))
        .collect();
    out.draw_occupied(&settled);

    let piece = game.piece().occupied_cells();
    out.draw_occupied(&piece);

    out.draw_status(&Status::from(game));
    out.present()
}

/// Renderer that draws nothing (headless hosts)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}

    fn draw_occupied(&mut self, _cells: &[(i32, i32)]) {}
}
