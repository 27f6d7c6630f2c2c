//! Engine driver.
//!
//! Serializes every source of mutation (timer ticks, player commands, speed and
//! restart requests) through one queue and applies them to the [`GameState`] one
//! at a time. After each event the tick timer is reconciled with the game's speed
//! and the frame is repainted.

use anyhow::Result;
use tokio::sync::mpsc;

use blockfall_core::{GameEvent, GameState, Phase};

use crate::render::{paint, Renderer};
use crate::timer::{Timer, TimerHandle};
use crate::types::Command;

/// Everything the engine queue can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Start,
    Tick(TimerHandle),
    Command(Command),
    SetSpeed(u32),
    Restart,
    /// Repaint without touching the game (terminal resize)
    Redraw,
    Quit,
}

/// Whether the driver loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the game, its tick timer and the render port
pub struct Engine<T: Timer, R: Renderer> {
    game: GameState,
    timer: T,
    renderer: R,
    /// The only timer whose ticks are honored
    tick: Option<TimerHandle>,
}

impl<T: Timer, R: Renderer> Engine<T, R> {
    pub fn new(game: GameState, timer: T, renderer: R) -> Self {
        Self {
            game,
            timer,
            renderer,
            tick: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Mutable game access for scripted setups
    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Handle of the live tick timer
    pub fn current_timer(&self) -> Option<TimerHandle> {
        self.tick
    }

    /// Apply one event, reconcile the timer, repaint
    pub fn handle(&mut self, event: EngineEvent) -> Result<Flow> {
        match event {
            EngineEvent::Start => self.game.start(),
            EngineEvent::Tick(handle) => {
                if self.tick != Some(handle) {
                    // Queued before its timer was cancelled.
                    return Ok(Flow::Continue);
                }
                self.game.tick();
            }
            EngineEvent::Command(command) => self.apply(command),
            EngineEvent::SetSpeed(speed) => self.game.set_speed(speed),
            EngineEvent::Restart => self.game.restart(),
            EngineEvent::Redraw => {}
            EngineEvent::Quit => {
                self.stop();
                return Ok(Flow::Quit);
            }
        }

        self.sync_timer();
        paint(&self.game, &mut self.renderer)?;
        Ok(Flow::Continue)
    }

    pub fn start(&mut self) -> Result<()> {
        self.handle(EngineEvent::Start).map(|_| ())
    }

    pub fn restart(&mut self) -> Result<()> {
        self.handle(EngineEvent::Restart).map(|_| ())
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        self.handle(EngineEvent::SetSpeed(speed)).map(|_| ())
    }

    pub fn command(&mut self, command: Command) -> Result<()> {
        self.handle(EngineEvent::Command(command)).map(|_| ())
    }

    /// Cancel the tick timer
    pub fn stop(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.timer.cancel(handle);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.game.move_piece(-1),
            Command::MoveRight => self.game.move_piece(1),
            Command::SoftDrop => {
                self.game.soft_drop();
            }
            Command::Rotate => self.game.rotate(1),
            Command::RotateBack => self.game.rotate(-1),
            Command::Restart => self.game.restart(),
        }
    }

    /// Bring the timer in line with the game after a transition.
    ///
    /// Speed changes and restarts replace the timer (cancel first, then
    /// schedule); a parked game over stops it.
    fn sync_timer(&mut self) {
        let events = self.game.take_events();
        let retime = events
            .iter()
            .any(|e| matches!(e, GameEvent::SpeedChanged(_) | GameEvent::Restarted));

        match self.game.phase() {
            Phase::Idle => {}
            Phase::GameOver => self.stop(),
            Phase::Active => {
                if retime || self.tick.is_none() {
                    self.reschedule();
                }
            }
        }
    }

    fn reschedule(&mut self) {
        self.stop();
        self.tick = Some(self.timer.schedule(self.game.tick_interval()));
    }
}

/// Drain the queue until `Quit` or until every sender is gone
pub async fn run<T: Timer, R: Renderer>(
    engine: &mut Engine<T, R>,
    events: &mut mpsc::UnboundedReceiver<EngineEvent>,
) -> Result<()> {
    while let Some(event) = events.recv().await {
        if engine.handle(event)? == Flow::Quit {
            return Ok(());
        }
    }
    engine.stop();
    Ok(())
}
