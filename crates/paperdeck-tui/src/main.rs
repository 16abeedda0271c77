use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use paperdeck_core::config_file::load_config;
use paperdeck_core::{FilterState, SortOrder};
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod action;
mod app;
mod input;
mod theme;
mod tui_event;
mod view;

use app::App;
use tui_event::LoadEvent;

/// Paperdeck TUI - browse a paper collection by text, keywords and date.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dataset path or http(s) URL (default: $PAPERDECK_SOURCE, config, ./data/papers.json)
    source: Option<String>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Initial sort order: newest or oldest
    #[arg(long)]
    sort: Option<SortOrder>,

    /// HTTP fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging(args.log_file.as_deref());

    // Resolve config from CLI flags > env vars > config file > defaults
    let config = load_config();
    let source = config.resolve_source(args.source.as_deref());
    let timeout = args
        .timeout
        .map(|s| Duration::from_secs(s.max(1)))
        .unwrap_or_else(|| config.fetch_timeout());
    let sort = args.sort.unwrap_or_else(|| config.sort());

    let theme_name = args
        .theme
        .as_deref()
        .or(config.theme())
        .unwrap_or("hacker");
    let theme = theme::Theme::from_name(theme_name);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(source.to_string(), FilterState::with_sort(sort), theme);

    // Load the dataset in the background; the UI stays responsive meanwhile
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<LoadEvent>();
    let cancel = CancellationToken::new();
    let cancel_for_load = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel_for_load.cancelled() => {
                tracing::debug!("dataset load cancelled");
            }
            result = paperdeck_core::load(&source, timeout) => {
                let _ = event_tx.send(LoadEvent::Finished(result));
            }
        }
    });

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            Some(load_event) = event_rx.recv() => {
                app.handle_load_event(load_event);
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}

/// Route tracing output to a file. Without `--log-file`, logging is only
/// enabled when `PAPERDECK_LOG` is set, into the platform cache directory.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_env("PAPERDECK_LOG").ok();
    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None if env_filter.is_some() => {
            dirs::cache_dir()?.join("paperdeck").join("paperdeck-tui.log")
        }
        None => return None,
    };

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path.file_name()?.to_os_string();
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter.unwrap_or_else(|| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
