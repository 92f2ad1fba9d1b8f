use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::Path};
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use taskpin::config::Config;
use taskpin::ui::{run_app, App};
use taskpin::{DraftTaskManager, JsonTaskStore, StoreResult};

fn main() -> Result<()> {
    let config = Config::parse();
    let _guard = init_tracing(&config.log_level, &config.log_file)?;

    let store = JsonTaskStore::open(&config.task_file)
        .with_context(|| format!("load tasks from {}", config.task_file.display()))?;
    let draft = DraftTaskManager::with_observer(|draft| {
        debug!(
            title = %draft.title,
            is_finished = draft.is_finished,
            is_pinned = draft.is_pinned,
            "draft changed"
        );
    });
    let mut app = App::new(store, draft);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    finish_session(result, || app.store.save())
}

/// Reports the session outcome before saving so a failed save cannot hide it.
fn finish_session(result: io::Result<()>, save: impl FnOnce() -> StoreResult<()>) -> Result<()> {
    if let Err(err) = &result {
        error!(error = %err, "terminal session failed");
    }

    save().context("save tasks")?;
    info!("exiting");
    result.context("terminal session")
}

fn init_tracing(log_level: &str, log_file: &Path) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .context("log file path must name a file")?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
