//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Anything that is
//! not a command (quit keys, key releases, unbound keys) is reported separately so
//! the host decides what to do with it.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
