//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules: the field, the falling piece, collision,
//! merging, line clears, scoring and speed progression. It has **no dependencies**
//! on timers, screens, keyboards or files, which makes it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable from plain method calls
//! - **Portable**: Any host (terminal, GUI, headless) can drive it
//!
//! # Module Structure
//!
//! - [`field`]: settled-cell grid with collision detection and row removal
//! - [`piece`]: the seven square shape templates and transpose-based rotation
//! - [`game_state`]: the tick/input state machine
//! - [`score_tracker`]: running score plus the persisted best score
//! - [`scoring`]: line-clear awards and speed steps
//! - [`rng`]: seeded uniform shape selection
//! - [`snapshot`]: owned read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, MemoryStore};
//!
//! let mut game = GameState::new(GameConfig::default(), Box::new(MemoryStore::new()));
//! game.start();
//!
//! game.move_piece(-1);
//! game.rotate(1);
//! game.tick();
//!
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.tick_interval().as_millis(), 1000);
//! ```
//!
//! # Timing
//!
//! The state has no clock. A host calls [`GameState::tick`] every
//! [`GameState::tick_interval`] and replaces its timer whenever a
//! [`GameEvent::SpeedChanged`] or [`GameEvent::Restarted`] event shows up. Events
//! pile up until [`GameState::take_events`] drains them; past
//! [`MAX_PENDING_EVENTS`] the oldest are dropped.

pub mod config;
pub mod field;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod score_tracker;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use field::Field;
pub use game_state::{GameEvent, GameState, Phase, MAX_PENDING_EVENTS};
pub use piece::{Matrix, Offset, Piece};
pub use rng::SimpleRng;
pub use score_tracker::{BestScoreStore, MemoryStore, ScoreTracker};
pub use scoring::{line_clear_award, should_speed_up, tick_interval};
pub use snapshot::{GameSnapshot, PieceSnapshot};
