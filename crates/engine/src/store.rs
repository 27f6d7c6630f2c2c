//! Best-score persistence in a small JSON file.
//!
//! File layout: `{"best_score": 120}`. A missing file means no best score yet.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use blockfall_core::BestScoreStore;

/// Default file name, relative to the working directory
pub const DEFAULT_BEST_SCORE_FILE: &str = "blockfall-best.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

#[derive(Debug)]
struct StoreState {
    path: PathBuf,
    best: u32,
    last_error: Option<String>,
}

/// JSON-file backed [`BestScoreStore`].
///
/// Clones share one state, so the host can keep a handle for error reporting
/// after handing another to the game.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    inner: Rc<RefCell<StoreState>>,
}

impl JsonFileStore {
    /// Load the best score from `path`.
    ///
    /// A missing file yields 0; an unreadable or malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(text) => {
                serde_json::from_str::<BestScoreRecord>(&text)
                    .with_context(|| format!("malformed best score file {}", path.display()))?
                    .best_score
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read best score file {}", path.display()))
            }
        };

        Ok(Self::with_state(path, best))
    }

    /// Store that starts from 0 and overwrites `path` on the next save
    pub fn fresh(path: impl Into<PathBuf>) -> Self {
        Self::with_state(path.into(), 0)
    }

    fn with_state(path: PathBuf, best: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreState {
                path,
                best,
                last_error: None,
            })),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.inner.borrow().path.clone()
    }

    pub fn best(&self) -> u32 {
        self.inner.borrow().best
    }

    /// Error of the most recent failed save, cleared by a successful one
    pub fn last_error(&self) -> Option<String> {
        self.inner.borrow().last_error.clone()
    }

    fn write(path: &Path, best_score: u32) -> Result<()> {
        let text = serde_json::to_string_pretty(&BestScoreRecord { best_score })?;
        fs::write(path, text)
            .with_context(|| format!("failed to write best score file {}", path.display()))
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self) -> u32 {
        self.best()
    }

    fn save_best_score(&mut self, score: u32) {
        let mut state = self.inner.borrow_mut();
        state.best = score;
        // Play goes on with the in-memory value when the disk is unavailable.
        state.last_error = Self::write(&state.path, score)
            .err()
            .map(|e| format!("{e:#}"));
    }
}
