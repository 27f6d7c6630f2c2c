//! Tick timers.
//!
//! A [`Timer`] fires periodically by pushing [`EngineEvent::Tick`] into the
//! engine's queue. Each tick carries the handle of the timer that produced it, so a
//! tick that was already queued when its timer got cancelled can be recognized as
//! stale and dropped.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::engine::EngineEvent;

/// Shortest period a [`TokioTimer`] will run at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one scheduled periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Periodic timer service
pub trait Timer {
    /// Start firing every `period`; the first tick comes one period from now
    fn schedule(&mut self, period: Duration) -> TimerHandle;

    /// Stop a timer; unknown or already cancelled handles are ignored
    fn cancel(&mut self, handle: TimerHandle);
}

/// Timer operation recorded by [`ManualTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    Scheduled(TimerHandle, Duration),
    Cancelled(TimerHandle),
}

/// Deterministic timer that only records what it was asked to do.
///
/// Tests fire ticks by hand with `EngineEvent::Tick(handle)`.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    active: Vec<(TimerHandle, Duration)>,
    log: Vec<TimerOp>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and not yet cancelled
    pub fn active(&self) -> &[(TimerHandle, Duration)] {
        &self.active
    }

    pub fn log(&self) -> &[TimerOp] {
        &self.log
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.active.push((handle, period));
        self.log.push(TimerOp::Scheduled(handle, period));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.active.retain(|(h, _)| *h != handle);
        self.log.push(TimerOp::Cancelled(handle));
    }
}

/// Timer backed by tokio tasks.
///
/// Must be used from inside a tokio runtime. Each schedule spawns one task that
/// sends ticks into the engine queue; cancel aborts it.
#[derive(Debug)]
pub struct TokioTimer {
    events: mpsc::UnboundedSender<EngineEvent>,
    tasks: HashMap<u64, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimer {
    pub fn new(events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            events,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of live timer tasks
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let tx = self.events.clone();
        // tokio intervals panic on a zero period.
        let period = period.max(MIN_PERIOD);

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(EngineEvent::Tick(handle)).is_err() {
                    // Engine queue is gone.
                    break;
                }
            }
        });

        self.tasks.insert(handle.0, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle.0) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
