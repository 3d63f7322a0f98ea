//! skywatch - current weather in your terminal.
//!
//! Type a city, press Enter, get conditions from OpenWeatherMap. The last
//! five searches are kept on disk and re-fetchable from the history panel.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use skywatch_core::{Config, FileStore, HistoryBridge, WeatherClient};
use skywatch_tui::action::Action;
use skywatch_tui::runtime::Runtime;
use skywatch_tui::ui::Ui;

#[derive(Parser, Debug)]
#[command(name = "skywatch")]
#[command(about = "Current weather in your terminal", version)]
struct Args {
    /// Fetch this city immediately on startup
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key (overrides OPENWEATHER_API_KEY and the config
    /// file)
    #[arg(long)]
    api_key: Option<String>,

    /// Append tracing output to this file; without it logging is disabled,
    /// since the TUI owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let api_key = Config::resolve_api_key(args.api_key)?;
    let client = WeatherClient::new(api_key);
    let bridge = HistoryBridge::new(FileStore::open_default()?);

    let mut runtime = Runtime::new(client, bridge);
    if let Some(city) = args.city {
        runtime.enqueue(Action::WeatherFetch(city));
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ui = Ui::new();
    let result = runtime.run(&mut terminal, &mut ui).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("Runtime loop failed")
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
