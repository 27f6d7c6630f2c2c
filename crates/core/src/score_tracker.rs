//! Score tracking with a persisted best score.
//!
//! The best score lives behind the [`BestScoreStore`] port so hosts can keep it
//! wherever they like. It is read once when the tracker is built and written
//! back every time the running score beats it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Persistent home of the best-ever score
pub trait BestScoreStore {
    /// Stored best score, 0 when nothing has been stored yet
    fn load_best_score(&self) -> u32;

    fn save_best_score(&mut self, score: u32);
}

/// In-memory store.
///
/// Clones share the same slot, so a test can keep one handle while the game
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Rc<Cell<u32>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best: u32) -> Self {
        let store = Self::default();
        store.best.set(best);
        store
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }

    /// Number of saves received
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> u32 {
        self.best.get()
    }

    fn save_best_score(&mut self, score: u32) {
        self.best.set(score);
        self.writes.set(self.writes.get() + 1);
    }
}

/// Current score plus the persisted best score
pub struct ScoreTracker {
    score: u32,
    best: u32,
    store: Box<dyn BestScoreStore>,
}

impl ScoreTracker {
    /// Build a tracker, loading the best score from the store
    pub fn new(store: Box<dyn BestScoreStore>) -> Self {
        let best = store.load_best_score();
        Self {
            score: 0,
            best,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Add points; persists a new best score when the running score beats it
    pub fn update(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
        if self.score > self.best {
            self.best = self.score;
            self.store.save_best_score(self.best);
        }
    }

    /// Zero the running score, keeping the best
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

impl fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("score", &self.score)
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}
