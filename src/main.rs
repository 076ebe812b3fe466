//! Terminal Grid Merge runner (default binary).
//!
//! Keyboard and mouse drags drive the session; the play clock runs on a
//! wall-clock scheduler that is drained every loop iteration. Logging goes
//! to a file only, since the terminal is in raw mode.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use grid_merge::core::{GameSession, GameSnapshot, SystemScheduler};
use grid_merge::input::{handle_key_event, handle_mouse_event, should_quit, SwipeTracker};
use grid_merge::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use grid_merge::types::{Command, LifecycleEvent};
use grid_merge::ShellConfig;

/// Upper bound on input latency and clock display lag.
const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let config = ShellConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &ShellConfig) -> Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &ShellConfig) -> Result<()> {
    let mut game = GameSession::new(config.seed, SystemScheduler::new());
    info!(seed = config.seed, "shell started");

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut swipe = SwipeTracker::new();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        game.pump();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if !event::poll(frame)? {
            continue;
        }

        let command = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!(score = game.score(), high_score = game.high_score(), "quit");
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => handle_mouse_event(&mut swipe, mouse, config.min_swipe_distance),
            Event::FocusLost => Some(Command::Lifecycle(LifecycleEvent::Backgrounded)),
            Event::FocusGained => Some(Command::Lifecycle(LifecycleEvent::Foregrounded)),
            Event::Resize(..) => {
                term.invalidate();
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            let changed = game.apply_command(command);
            debug!(?command, changed, "command");
        }
    }
}
