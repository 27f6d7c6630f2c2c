//! Shared types module - plain data and constants
//!
//! This crate defines the vocabulary shared by the core rules, the host engine and
//! the terminal front-end. Everything here is plain data with no external
//! dependencies, so it can be used from any layer.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn offset**: (3, 0), the top-left corner of a fresh piece's matrix
//!
//! # Speed
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED` | 1 | Speed level of a fresh game |
//! | `LINES_PER_SPEED` | 10 | Cleared lines per speed step |
//! | `TICK_BASE_MS` | 1000 | Tick period is `TICK_BASE_MS / speed` |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{tick_period_ms, Command, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("move-left"), Some(Command::MoveLeft));
//! assert_eq!(tick_period_ms(2), 500);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Column of a fresh piece's matrix top-left corner
pub const SPAWN_X: i32 = 3;

/// Row of a fresh piece's matrix top-left corner
pub const SPAWN_Y: i32 = 0;

/// Speed level of a fresh game
pub const BASE_SPEED: u32 = 1;

/// Lowest accepted speed level
pub const MIN_SPEED: u32 = 1;

/// Cumulative cleared lines needed for each speed step
pub const LINES_PER_SPEED: u32 = 10;

/// Tick period numerator in milliseconds
pub const TICK_BASE_MS: u32 = 1000;

/// Shortest tick period in milliseconds
pub const MIN_TICK_MS: u32 = 1;

/// Largest template edge (the I piece is 6x6)
pub const MAX_SHAPE_SIZE: usize = 6;

/// Tick period in milliseconds for a speed level.
///
/// Levels below [`MIN_SPEED`] are treated as [`MIN_SPEED`]. The period never
/// drops below [`MIN_TICK_MS`], however high the level.
pub fn tick_period_ms(speed: u32) -> u32 {
    (TICK_BASE_MS / speed.max(MIN_SPEED)).max(MIN_TICK_MS)
}

/// The seven canonical shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    L,
    J,
    S,
    Z,
    O,
    I,
}

impl ShapeKind {
    /// All shapes in template order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::O,
        ShapeKind::I,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::O => "o",
            ShapeKind::I => "i",
        }
    }
}

/// Discrete player commands delivered by an input source.
///
/// The core has no knowledge of physical keys; front-ends map their own
/// events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    /// Rotate clockwise
    Rotate,
    /// Rotate counter-clockwise
    RotateBack,
    Restart,
}

impl Command {
    /// Parse command from its wire name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("soft-drop"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hard-drop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "move-left" => Some(Command::MoveLeft),
            "move-right" => Some(Command::MoveRight),
            "soft-drop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "rotate-back" => Some(Command::RotateBack),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "move-left",
            Command::MoveRight => "move-right",
            Command::SoftDrop => "soft-drop",
            Command::Rotate => "rotate",
            Command::RotateBack => "rotate-back",
            Command::Restart => "restart",
        }
    }
}

/// How a line-clear event is converted into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// `rows_cleared * speed`
    #[default]
    SpeedMultiplied,
    /// `rows_cleared`, regardless of speed
    Flat,
}
