//! Permutas TUI - Terminal User Interface for job-swap interests
//!
//! A Ratatui-based TUI for listing, registering and removing interests
//! through the Permutas API.

mod api;
mod app;
mod config;
mod event;
mod platform;
mod screens;
mod state;
mod storage;
mod ui;

use anyhow::Result;
use api::{ApiClient, GeographyClient};
use app::App;
use config::{TuiConfig, TOKEN_ENV};
use crossterm::{
    event::{self as term_event, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use screens::ScreenContext;
use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use storage::{KeyValueStore, Session};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "permutas-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Flushes buffered log lines when dropped at the end of main
    let _log_guard = init_logging();

    let config = TuiConfig::load()?;
    let session = load_session(&config)?;
    let authenticated = session.is_authenticated();
    if !authenticated {
        tracing::warn!("no api token stored; set {TOKEN_ENV} to provide one");
    }

    let api = ApiClient::new(config.api_url())?;
    tracing::info!(api = api.base_url(), "starting");
    let ctx = ScreenContext {
        api: Arc::new(api),
        geography: Arc::new(GeographyClient::new(config.geography_url())?),
        session,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ctx);
    if !authenticated {
        app.state.status_message = Some(format!("Sem token: defina {TOKEN_ENV}"));
    }
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exiting after error");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data dir so output does not tear the alternate screen
fn init_logging() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("permutas_tui=info"));
    let registry = tracing_subscriber::registry().with(filter);

    match TuiConfig::data_dir().filter(|dir| fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let (non_blocking, guard) = log_file_writer(&dir);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                .init();
            Some(guard)
        }
        None => {
            registry.with(fmt::layer().with_writer(io::stderr)).init();
            None
        }
    }
}

/// Background writer appending to `LOG_FILE` in `dir`
fn log_file_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    tracing_appender::non_blocking(file_appender)
}

fn load_session(config: &TuiConfig) -> Result<Session> {
    let env_token = std::env::var(TOKEN_ENV).ok();
    match config.storage_path() {
        Some(path) => Ok(Session::bootstrap(
            &KeyValueStore::open(path),
            env_token.as_deref(),
        )?),
        None => {
            tracing::warn!("no data directory; the token is not persisted");
            Ok(Session::new(env_token))
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if term_event::poll(Duration::from_millis(100))? {
            match term_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
                _ => {}
            }
        }

        // Results of finished requests
        app.drain_events();

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_lines_reach_file_once_guard_drops() {
        let dir = TempDir::new().unwrap();
        let (writer, guard) = log_file_writer(dir.path());
        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(writer));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(mount_id = 3, "mounting screen");
        });
        drop(guard);

        let content = fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert!(content.contains("mounting screen"));
        assert!(content.contains("mount_id=3"));
    }
}
