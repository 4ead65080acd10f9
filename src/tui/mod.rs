//! Terminal UI driving the render loop.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{GuessInput, InputOutcome};

use crate::config::ClientConfig;
use crate::render_loop::{LoopEvent, RenderLoop, Trigger};
use crate::session_client::GameSessionClient;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Log file written while the TUI owns the terminal.
pub const LOG_FILE: &str = "town_wordle.log";

/// Run the TUI client until the player quits.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Log to a file so output does not interfere with the TUI
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,town_wordle=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Town Wordle TUI");

    let descriptor = config.descriptor()?;
    let observer = config.player()?;
    let client = GameSessionClient::http(config.server_url(), config.request_timeout())?;
    let (render_loop, events_rx) = RenderLoop::new(client, descriptor, observer);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, render_loop, events_rx, config.poll_interval()).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draws, polls and reads keys until the player quits.
#[instrument(skip_all, fields(observer = %render_loop.observer()))]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut render_loop: RenderLoop,
    mut events_rx: mpsc::UnboundedReceiver<LoopEvent>,
    poll_interval: Duration,
) -> Result<()> {
    let mut app = App::new();
    let mut keys_rx = spawn_key_reader();
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    render_loop.activate(Trigger::Entered);

    loop {
        terminal.draw(|f| ui::draw(f, &app, &render_loop))?;

        tokio::select! {
            _ = ticker.tick() => {
                render_loop.activate(Trigger::Tick);
            }
            Some(event) = events_rx.recv() => {
                let commit = render_loop.handle(event);
                debug!(?commit, "Loop event committed");
                app.note(&commit);
            }
            key = keys_rx.recv() => {
                let Some(key) = key else {
                    info!("Key reader stopped");
                    break;
                };
                match app.handle_key(key) {
                    InputOutcome::Quit => {
                        info!("User quit");
                        break;
                    }
                    InputOutcome::Submit(word) => {
                        render_loop.submit_guess(word);
                    }
                    InputOutcome::Edited | InputOutcome::Incomplete | InputOutcome::Ignored => {}
                }
            }
        }
    }

    render_loop.teardown();
    Ok(())
}

/// Reads key presses on a blocking thread and forwards them.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyCode> {
    let (keys_tx, keys_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        loop {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if keys_tx.send(key.code).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Failed to read terminal event");
                        return;
                    }
                },
                Ok(false) => {
                    if keys_tx.is_closed() {
                        return;
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal events");
                    return;
                }
            }
        }
    });
    keys_rx
}
