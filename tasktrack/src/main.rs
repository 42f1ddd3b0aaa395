//! `Tasktrack`: terminal task tracker with per-user local storage.
//!
//! Opens the login gate (or logs straight in with `--user`) and keeps each
//! user's tasks in `storage.json` under the data directory. Configuration via
//! CLI flags, environment variables, or config file
//! (`~/.config/tasktrack/config.toml`).
//!
//! ```bash
//! cargo run --bin tasktrack
//!
//! # Separate data directory, logged in as alice
//! cargo run --bin tasktrack -- --data-dir /tmp/tasks --user alice
//!
//! # Wipe bob's tasks
//! TASKTRACK_DATA_DIR=/tmp/tasks cargo run --bin tasktrack -- --reset-user bob
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use tasktrack::app::{App, Intent};
use tasktrack::config::{CliArgs, ClientConfig};
use tasktrack::storage::{FileStore, KeyValueStore, StoreAdapter};
use tasktrack::ui;
use tasktrack_core::SystemClock;

fn main() -> io::Result<ExitCode> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let mut config_error = None;
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file, using CLI and defaults: {e}");
            config_error = Some(e);
            ClientConfig::from_cli(&cli)
        }
    };

    // Logs go to a file, never stdout, since ratatui owns the terminal.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config file ignored");
    }

    tracing::info!(data_dir = %config.data_dir.display(), "tasktrack starting");

    let store = match FileStore::open(config.storage_path()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "could not open storage");
            eprintln!("Error: could not open storage: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let adapter = StoreAdapter::new(store);

    if let Some(user) = cli.reset_user.as_deref() {
        return Ok(reset_user(&adapter, user));
    }

    let mut app = App::new(adapter, SystemClock)
        .with_dark_mode(config.dark_mode)
        .with_timestamp_format(&config.timestamp_format);
    if let Some(user) = cli.user {
        app.dispatch(Intent::Login(user));
    }

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tasktrack exiting");
    result.map(|()| ExitCode::SUCCESS)
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("tasktrack.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Remove `user`'s stored tasks.
fn reset_user<S: KeyValueStore>(adapter: &StoreAdapter<S>, user: &str) -> ExitCode {
    let user = user.trim();
    match adapter.clear_tasks(user) {
        Ok(()) => {
            tracing::info!(user = %user, "task list reset");
            println!("Cleared tasks for {user}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(user = %user, error = %e, "task list reset failed");
            eprintln!("Error: could not clear tasks for {user}: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Main application loop: draw, poll for a key, apply it.
fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    config: &ClientConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
