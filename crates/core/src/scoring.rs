//! Scoring module - line-clear awards and speed progression
//!
//! A line-clear event awards `rows * speed` points under
//! [`ScoringPolicy::SpeedMultiplied`] or a flat `rows` under
//! [`ScoringPolicy::Flat`]. The speed steps up by one whenever the cumulative
//! line count crosses the next multiple of the configured step.

use std::time::Duration;

use crate::types::{tick_period_ms, ScoringPolicy};

/// Points for one line-clear event
/// rows: number of rows removed together
/// speed: speed level in effect before the clear
pub fn line_clear_award(rows: usize, speed: u32, policy: ScoringPolicy) -> u32 {
    let rows = rows as u32;
    match policy {
        ScoringPolicy::SpeedMultiplied => rows.saturating_mul(speed),
        ScoringPolicy::Flat => rows,
    }
}

/// Whether the cumulative line count has outgrown the current speed
pub fn should_speed_up(total_lines: u32, speed: u32, lines_per_speed: u32) -> bool {
    total_lines / lines_per_speed.max(1) + 1 > speed
}

/// Tick period for a speed level
pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_millis(tick_period_ms(speed) as u64)
}
