//! vaultboard TUI — one slide at a time, vim-style navigation.
//!
//! Files under `<config dir>/vaultboard/`:
//! - `config.toml` — dashboard configuration (defaults when absent)
//! - `state.json` — role, slide and periods from the last session
//! - `vaultboard.log` — tracing output, since the terminal belongs to the UI

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vaultboard_core::DashboardConfig;
use vaultboard_tui::{input, persistence, ui, AppState};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vaultboard");
    let config_path = state_dir.join("config.toml");
    let state_path = state_dir.join("state.json");

    init_logging(&state_dir)?;

    let config = DashboardConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let mut app = AppState::new(config).context("building dashboard")?;

    // Apply persisted state
    let persisted = persistence::load(&state_path);
    persistence::apply(&mut app, persisted);
    info!(role = %app.role, slide = app.deck.index(), "dashboard ready");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        tracing::warn!(error = %e, "failed to save state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Route tracing output to `vaultboard.log`. `RUST_LOG` overrides the `info` default.
fn init_logging(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let log_path = dir.join("vaultboard.log");
    let file = File::create(&log_path)
        .with_context(|| format!("creating {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
