//! Inventory Admin: terminal console for the inventory REST backend.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

use inv_admin::api::InventoryClient;
use inv_admin::domain::{drive, AlertBanner, App, Command, Key, DEFAULT_MAX_ALERTS};
use inv_admin::ui;

/// Inventory Admin console
#[derive(Parser, Debug)]
#[command(name = "inv-admin")]
#[command(about = "TUI console for managing inventory objects, zones and history")]
struct Args {
    /// Inventory API base URL
    #[arg(short, long, env = "INV_ADMIN_ENDPOINT", default_value = "http://127.0.0.1:5000")]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Seconds an alert stays on screen
    #[arg(long, default_value = "5")]
    alert_ttl: u64,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let client = InventoryClient::new(&args.endpoint, Duration::from_secs(args.timeout))
        .context("Failed to create API client")?;
    let client = Arc::new(client);
    info!(endpoint = %client.base_url(), "Starting inventory console");

    let alerts = AlertBanner::new(Duration::from_secs(args.alert_ttl), DEFAULT_MAX_ALERTS);
    let app = Arc::new(Mutex::new(App::with_alerts(alerts)));

    // Commands run one at a time, in arrival order
    let (tx, rx) = mpsc::unbounded_channel::<Command>();
    tokio::spawn(run_worker(Arc::clone(&client), Arc::clone(&app), rx));
    for command in App::startup_commands() {
        let _ = tx.send(command);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, tx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("Console terminated with an error")
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

async fn run_worker(
    client: Arc<InventoryClient>,
    app: Arc<Mutex<App>>,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        drive(client.as_ref(), &app, command).await;
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    tx: mpsc::UnboundedSender<Command>,
) -> io::Result<()> {
    loop {
        // Draw UI
        {
            let mut app_guard = app.lock().await;
            app_guard.prune_alerts(Instant::now());
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        // Handle input with timeout so alerts expire and results show up
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(key) = map_key(key.code, key.modifiers) {
                        let command = app.lock().await.handle_key(key);
                        if let Some(command) = command {
                            let _ = tx.send(command);
                        }
                    }
                }
            }
        }

        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return None,
    };
    Some(key)
}
