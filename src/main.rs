//! Terminal blockfall runner (default binary).
//!
//! Wires the deterministic core to the real world: a tokio timer drives gravity,
//! a blocking thread reads crossterm key events, and a framebuffer canvas draws
//! every frame. Everything funnels through one engine queue.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use blockfall::core::{BestScoreStore, GameConfig, GameState, MemoryStore};
use blockfall::engine::{run, Engine, EngineEvent, JsonFileStore, TokioTimer, DEFAULT_BEST_SCORE_FILE};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FieldCanvas, TerminalCanvas, TerminalRenderer, Viewport};
use blockfall::types::{ScoringPolicy, BASE_SPEED};

/// Terminal falling-block puzzle.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Speed level to start (and restart) at.
    #[arg(long, env = "BLOCKFALL_SPEED", default_value_t = BASE_SPEED)]
    speed: u32,

    /// Seed for shape selection.
    #[arg(long, env = "BLOCKFALL_SEED", default_value_t = 1)]
    seed: u32,

    /// Award one point per cleared row instead of rows times speed.
    #[arg(long, env = "BLOCKFALL_FLAT_SCORING")]
    flat_scoring: bool,

    /// Stop at game over instead of starting a new game.
    #[arg(long, env = "BLOCKFALL_NO_AUTO_RESTART")]
    no_auto_restart: bool,

    /// Where the best score is kept.
    #[arg(long, env = "BLOCKFALL_BEST_SCORE_FILE", default_value = DEFAULT_BEST_SCORE_FILE)]
    best_score_file: PathBuf,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let scoring = if self.flat_scoring {
            ScoringPolicy::Flat
        } else {
            ScoringPolicy::SpeedMultiplied
        };
        GameConfig::default()
            .with_seed(self.seed)
            .with_base_speed(self.speed)
            .with_scoring(scoring)
            .with_auto_restart(!self.no_auto_restart)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.game_config();

    // The file handle outlives the game so save errors can be reported afterwards.
    let file_store = match JsonFileStore::open(&args.best_score_file) {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("[blockfall] {e:#}; best score will not be saved this session");
            None
        }
    };
    let store: Box<dyn BestScoreStore> = match &file_store {
        Some(store) => Box::new(store.clone()),
        None => Box::new(MemoryStore::new()),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let result = runtime.block_on(play(config, store));

    if let Some(store) = &file_store {
        if let Some(err) = store.last_error() {
            eprintln!("[blockfall] {err}");
        }
    }
    result
}

async fn play(config: GameConfig, store: Box<dyn BestScoreStore>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let canvas = FieldCanvas::new(config.width, config.height, Viewport::from_terminal());
    let mut screen = TerminalCanvas::new(canvas, TerminalRenderer::new());
    if let Err(e) = screen.terminal_mut().enter() {
        // Always try to restore terminal state.
        let _ = screen.terminal_mut().exit();
        return Err(e);
    }

    let game = GameState::new(config, store);
    let mut engine = Engine::new(game, TokioTimer::new(tx.clone()), screen);
    spawn_input_reader(tx);

    let outcome = match engine.start() {
        Ok(()) => run(&mut engine, &mut rx).await,
        Err(e) => Err(e),
    };

    engine.stop();
    let restored = engine.renderer_mut().terminal_mut().exit();
    outcome.and(restored)
}

/// Forward key and resize events into the engine queue until it closes.
fn spawn_input_reader(tx: mpsc::UnboundedSender<EngineEvent>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => {
                    let _ = tx.send(EngineEvent::Quit);
                    break;
                }
            }
            let event = match event::read() {
                Ok(Event::Key(key)) if should_quit(key) => EngineEvent::Quit,
                Ok(Event::Key(key)) => match handle_key_event(key) {
                    Some(command) => EngineEvent::Command(command),
                    None => continue,
                },
                Ok(Event::Resize(..)) => EngineEvent::Redraw,
                Ok(_) => continue,
                Err(_) => EngineEvent::Quit,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}
