//! Terminal blockfall runner.
//!
//! Reads `BLOCKFALL_*` settings from the environment, then runs the game on
//! this thread: wait for input or the next gravity tick, apply it, redraw.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use log::info;

use blockfall::core::{GameState, SimpleRng};
use blockfall::engine::{init_file_logging, GameConfig, Session};
use blockfall::input::{handle_key_event, handle_mouse_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Poll timeout while no timer is armed (after game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    config.validate().context("invalid BLOCKFALL_* configuration")?;
    if let Some(path) = &config.log_path {
        init_file_logging(path, config.log_level)?;
    }
    info!(
        "starting {}x{} board, tick {:?}",
        config.rows, config.columns, config.tick_interval
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state, even when the loop failed.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let seed = config.seed_or_clock();
    let game = GameState::with_source(config.rows, config.columns, SimpleRng::new(seed));
    let on_game_over = |score: u32| info!("game over, final score {score}");
    let mut session = Session::new(game, config.tick_interval, on_game_over);
    session.start(Instant::now());
    info!("seed {seed}");

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = terminal::size().unwrap_or((80, 24));
            view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = session
            .time_until_tick(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    handle_key_event(key)
                }
                Event::Mouse(mouse) => {
                    let (w, _) = terminal::size().unwrap_or((80, 24));
                    handle_mouse_event(mouse, w)
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                    None
                }
                _ => None,
            };
            if let Some(action) = action {
                session.handle(action, Instant::now());
                dirty = true;
            }
        }

        if session.advance(Instant::now()) {
            dirty = true;
        }
    }
}
