//! Game state module - the tick/input state machine
//!
//! Ties together the field, the active piece, the score tracker and speed
//! progression. Every transition (tick, move, rotate, drop, restart) runs to
//! completion before the next one starts; the host is responsible for feeding
//! transitions in one at a time.
//!
//! The state never talks to a timer or a screen. Instead every mutating call bumps
//! [`GameState::revision`] (the "render now" signal) and records [`GameEvent`]s the
//! host drains with [`GameState::take_events`] to reschedule its tick timer. Only
//! the newest [`MAX_PENDING_EVENTS`] undrained events are kept.

use std::time::Duration;

use crate::config::GameConfig;
use crate::field::Field;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::score_tracker::{BestScoreStore, ScoreTracker};
use crate::scoring::{line_clear_award, should_speed_up, tick_interval};
use crate::snapshot::GameSnapshot;
use crate::types::{ShapeKind, MIN_SPEED};

/// Undrained events beyond this count drop the oldest first
pub const MAX_PENDING_EVENTS: usize = 64;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Built but not started
    Idle,
    /// A piece is falling
    Active,
    /// The last spawn collided; waiting for `restart()`
    GameOver,
}

/// Observable outcome of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned(ShapeKind),
    /// The active piece was merged into the field
    Settled,
    LinesCleared { rows: u32, award: u32 },
    /// The tick period changed; hosts must replace their timer
    SpeedChanged(u32),
    GameOver,
    /// Field, piece, score, lines and speed were reset
    Restarted,
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    field: Field,
    piece: Piece,
    rng: SimpleRng,
    score: ScoreTracker,
    lines: u32,
    speed: u32,
    phase: Phase,
    /// Bumped by every mutating call (render hook)
    revision: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game; the best score is loaded from `store`
    pub fn new(config: GameConfig, store: Box<dyn BestScoreStore>) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let piece = Piece::generate(&mut rng, config.spawn);

        Self {
            field: Field::new(config.width, config.height),
            piece,
            rng,
            score: ScoreTracker::new(store),
            lines: 0,
            speed: config.base_speed.max(MIN_SPEED),
            phase: Phase::Idle,
            revision: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Active;
        self.spawn_piece();
        self.touch();
    }

    /// Reset field, piece, score, lines and speed; the best score survives
    pub fn restart(&mut self) {
        self.field = Field::new(self.config.width, self.config.height);
        self.score.reset();
        self.lines = 0;
        self.speed = self.config.base_speed.max(MIN_SPEED);
        self.phase = Phase::Active;
        self.emit(GameEvent::Restarted);
        self.spawn_piece();
        self.touch();
    }

    /// Change the speed level; levels below 1 clamp to 1
    pub fn set_speed(&mut self, speed: u32) {
        let speed = speed.max(MIN_SPEED);
        if speed != self.speed {
            self.speed = speed;
            self.emit(GameEvent::SpeedChanged(speed));
        }
        self.touch();
    }

    /// One fixed-period gravity step
    pub fn tick(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.piece.record_tick();
        if !self.move_down(true) {
            self.settle();
        }
    }

    /// Shift the piece one column (`direction` < 0 left, > 0 right).
    ///
    /// A blocked shift is rolled back silently.
    pub fn move_piece(&mut self, direction: i32) {
        if self.phase != Phase::Active {
            return;
        }
        let dx = direction.signum();
        self.piece.shift(dx, 0);
        if self.field.will_collide(&self.piece) {
            self.piece.shift(-dx, 0);
        }
        self.touch();
    }

    /// Rotate the piece (`direction` > 0 clockwise, otherwise counter-clockwise).
    ///
    /// A blocked rotation is undone by rotating the other way.
    pub fn rotate(&mut self, direction: i32) {
        if self.phase != Phase::Active {
            return;
        }
        self.piece.rotate(direction);
        if self.field.will_collide(&self.piece) {
            let back = if direction > 0 { -1 } else { 1 };
            self.piece.rotate(back);
        }
        self.touch();
    }

    /// Move the piece one row down; returns whether the way was free.
    ///
    /// A manual drop (`by_tick == false`) on a piece that has not seen a tick yet
    /// is ignored and reports a free way, so a held key does not double-drop a
    /// freshly spawned piece. Never settles the piece.
    pub fn move_down(&mut self, by_tick: bool) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        if self.piece.ticks() == 0 && !by_tick {
            return true;
        }

        let mut free_way = true;
        self.piece.shift(0, 1);
        if self.field.will_collide(&self.piece) {
            self.piece.shift(0, -1);
            free_way = false;
        }
        self.touch();
        free_way
    }

    /// Player-requested drop; settles the piece when it is blocked
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let free_way = self.move_down(false);
        if !free_way {
            self.settle();
        }
        free_way
    }

    /// Merge, clear rows, then spawn the next piece.
    ///
    /// A piece that comes to rest while sticking out above row 0 cannot be merged
    /// and ends the game.
    fn settle(&mut self) {
        if self.piece.occupied_cells().iter().any(|&(_, y)| y < 0) {
            self.game_over();
            self.touch();
            return;
        }
        self.field.merge(&self.piece);
        self.emit(GameEvent::Settled);
        self.clear_filled_rows();
        self.spawn_piece();
        self.touch();
    }

    fn clear_filled_rows(&mut self) {
        let filled = self.field.filled_rows();
        if filled.is_empty() {
            return;
        }
        // Ascending order: removing a row never moves the rows below it.
        for &y in &filled {
            self.field.remove_row(y);
        }
        self.update_score(filled.len());
    }

    fn update_score(&mut self, rows: usize) {
        self.lines += rows as u32;

        let award = line_clear_award(rows, self.speed, self.config.scoring);
        self.score.update(award);
        self.emit(GameEvent::LinesCleared {
            rows: rows as u32,
            award,
        });

        if should_speed_up(self.lines, self.speed, self.config.lines_per_speed) {
            self.speed += 1;
            self.emit(GameEvent::SpeedChanged(self.speed));
        }
    }

    fn spawn_piece(&mut self) {
        self.piece = Piece::generate(&mut self.rng, self.config.spawn);
        self.emit(GameEvent::Spawned(self.piece.kind()));

        if self.field.will_collide(&self.piece) {
            self.game_over();
        }
    }

    /// Park in `GameOver`, or start over when auto-restart is on.
    ///
    /// An empty field that still rejects the spawn would reject it again after a
    /// restart, so that case always parks.
    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.emit(GameEvent::GameOver);
        if self.config.auto_restart && !self.field.is_empty() {
            self.restart();
        }
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Take the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current tick period
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.speed)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for scripted setups
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Swap in a specific piece (scripted setups); no collision check
    pub fn replace_piece(&mut self, piece: Piece) {
        self.piece = piece;
        self.touch();
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn best_score(&self) -> u32 {
        self.score.best()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.field.clear();
        out.field.extend_from_slice(self.field.cells());
        out.write_piece(&self.piece);
        out.score = self.score();
        out.best_score = self.best_score();
        out.lines = self.lines;
        out.speed = self.speed;
        out.phase = self.phase;
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::empty(&self.piece);
        self.snapshot_into(&mut s);
        s
    }
}
