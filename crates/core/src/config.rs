//! Game configuration.

use crate::piece::Offset;
use crate::types::{
    ScoringPolicy, BASE_SPEED, FIELD_HEIGHT, FIELD_WIDTH, LINES_PER_SPEED, SPAWN_X, SPAWN_Y,
};

/// Rules and dimensions of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Speed level of a fresh game (and after every restart)
    pub base_speed: u32,
    /// Cumulative lines per speed step
    pub lines_per_speed: u32,
    pub scoring: ScoringPolicy,
    /// Where fresh pieces appear
    pub spawn: Offset,
    pub seed: u32,
    /// Restart immediately on game over instead of parking in `GameOver`
    pub auto_restart: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            base_speed: BASE_SPEED,
            lines_per_speed: LINES_PER_SPEED,
            scoring: ScoringPolicy::SpeedMultiplied,
            spawn: Offset::new(SPAWN_X, SPAWN_Y),
            seed: 1,
            auto_restart: true,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    pub fn with_base_speed(mut self, base_speed: u32) -> Self {
        self.base_speed = base_speed;
        self
    }
}
