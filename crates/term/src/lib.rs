//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the engine's render port draws into a
//! plain framebuffer, which is then flushed to the terminal as a diff against the
//! previous frame. Field cells are two columns wide to keep them roughly square.

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use canvas::{FieldCanvas, TerminalCanvas, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
