//! Terminal blockfall runner (default binary).
//!
//! Reads [`AppConfig`] from the environment, then renders, polls input until
//! the next tick deadline and ticks at the game's current interval.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::AppConfig;
use blockfall::core::GameState;
use blockfall::input::{
    handle_key_event, handle_key_release, is_accelerate_key, should_quit, AccelerateHold,
};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;
    log::info!("starting with {:?}", config);
    let game_state = GameState::new(config.game_config()?)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game_state);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game_state: GameState) -> Result<()> {
    game_state.start();

    let view = GameView::default();
    let mut accelerate = AccelerateHold::new();
    let mut last_tick = Instant::now();
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game_state, Viewport::new(w, h));
        term.draw(&fb)?;

        let tick_duration = Duration::from_millis(game_state.tick_interval_ms() as u64);
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        let action = if is_accelerate_key(key.code) {
                            // Auto-repeat only refreshes the hold.
                            accelerate.press()
                        } else {
                            handle_key_event(key)
                        };
                        if let Some(action) = action {
                            game_state.apply_action(action);
                        }
                        // Anything that stopped fast ticking also ends the hold.
                        if !game_state.accelerating() {
                            accelerate.reset();
                        }
                    }
                    KeyEventKind::Release => {
                        if handle_key_release(key) == Some(GameAction::Decelerate) {
                            if let Some(action) = accelerate.release() {
                                game_state.apply_action(action);
                            }
                        }
                    }
                }
            }
        }

        let frame_ms = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        if let Some(action) = accelerate.update(frame_ms) {
            game_state.apply_action(action);
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game_state.tick();
            if let Some(event) = game_state.take_last_event() {
                if event.rows_cleared > 0 {
                    log::debug!("cleared {} rows for {}", event.rows_cleared, event.points);
                }
            }
        }
    }
}
