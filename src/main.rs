//! Terminal blockfall runner (default binary).
//!
//! Runs a fixed-period frame loop: draw the current snapshot, wait for input
//! until the frame is due, then advance the session by the elapsed time.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::{error, info, warn};

use blockfall::config::Config;
use blockfall::core::{shapes, GameSnapshot, Session};
use blockfall::input::InputHandler;
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let (config, config_error) = Config::from_env_or_default();
    logging::init(&config)?;
    if let Some(err) = config_error {
        warn!("{err}; using default timings");
    }

    if let Err(err) = shapes::validate() {
        error!("shape table rejected: {err}");
        return Err(err.into());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    info!(
        "terminal ready, key release events: {}",
        term.key_release_events()
    );

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("exiting on error: {err:#}");
    }
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut session = Session::new(config.session_config());
    let mut input = InputHandler::with_key_release_timeout_ms(config.key_release_ms);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    for action in input.handle_key(key, session.phase()) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if session.quit_requested() {
            info!("quit with score {} lines {}", session.score(), session.lines());
            return Ok(());
        }

        // Advance time.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            if let Some(action) = input.update() {
                session.apply_action(action);
            }
            session.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));

            if let Some(lock) = session.take_last_event() {
                if lock.topped_out {
                    info!("game over with score {} lines {}", session.score(), session.lines());
                }
            }
        }
    }
}
