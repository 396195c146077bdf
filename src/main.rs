//! Two-player terminal runner (default binary).
//!
//! Wires crossterm input, the debounced input handler, the game session and the
//! framebuffer renderer into one frame loop. After quitting a finished game the final
//! scores are printed to stdout as JSON, followed by a submission payload when
//! `DUO_TETRIS_PLAYER_NAME` is set.
//!
//! Logging is off unless `DUO_TETRIS_LOG_PATH` names a file; the level comes from
//! `DUO_TETRIS_LOG` (default `info`).

use std::env;
use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, trace, Level};
use tracing_subscriber::prelude::*;

use duo_tetris::core::{CoreEvent, GameSession, GameSnapshot, SessionConfig};
use duo_tetris::input::{should_quit, InputHandler};
use duo_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = SessionConfig::from_env();
    if env::var("DUO_TETRIS_SEED").is_err() {
        config.seed = rand::random();
    }
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let session = result?;
    if let Some(scores) = session.final_scores() {
        println!("{}", serde_json::to_string(&scores)?);
    }
    if let Some(submission) = env::var("DUO_TETRIS_PLAYER_NAME")
        .ok()
        .and_then(|name| session.submission(name))
    {
        println!("{}", serde_json::to_string(&submission)?);
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let Ok(path) = env::var("DUO_TETRIS_LOG_PATH") else {
        return Ok(());
    };
    let level = env::var("DUO_TETRIS_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let file = File::create(&path).with_context(|| format!("cannot create log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

/// Play until a quit key and hand back the finished session.
fn run(term: &mut TerminalRenderer, config: SessionConfig) -> Result<GameSession> {
    let mut input = InputHandler::with_lag(config.movement_lag_ms);
    let mut session = GameSession::new(config);
    if let Err(conflict) = session.start() {
        info!(%conflict, "game over at start");
    }

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(session);
                    }
                    input.handle_key_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < frame {
            continue;
        }
        last_frame = Instant::now();
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

        for (player, action) in input.update(elapsed_ms) {
            session.apply_action(player, action);
        }
        session.tick(elapsed_ms);

        for event in session.drain_events() {
            log_event(&event);
        }
    }
}

fn log_event(event: &CoreEvent) {
    if let Some(cue) = event.sound_cue() {
        trace!(cue = cue.as_str(), "sound cue");
    }
    match event {
        CoreEvent::PieceMoved { .. } => trace!(?event, "core event"),
        _ => debug!(?event, "core event"),
    }
}
