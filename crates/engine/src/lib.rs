//! Engine module - drives a [`GameState`](blockfall_core::GameState) in real time.
//!
//! The core crate has no clock and no screen. This crate supplies both through
//! two small ports:
//!
//! - [`timer`]: periodic tick sources ([`TokioTimer`] for play, [`ManualTimer`] for tests)
//! - [`render`]: the [`Renderer`] trait the UI implements
//!
//! [`engine::Engine`] serializes ticks, commands, speed changes and restarts
//! through one queue, so the game is only ever touched by one event at a time.
//! [`store`] persists the best score as JSON.

pub mod engine;
pub mod render;
pub mod store;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use engine::{run, Engine, EngineEvent, Flow};
pub use render::{paint, NullRenderer, Renderer, Status};
pub use store::{JsonFileStore, DEFAULT_BEST_SCORE_FILE};
pub use timer::{ManualTimer, Timer, TimerHandle, TimerOp, TokioTimer, MIN_PERIOD};
