// ABOUTME: Main entry point for trendify with TUI and CLI support
//
// Binary: trendify
// Usage: trendify [COMMAND]
// - No command: launches TUI
// - catalog: list trends, brands and pairings
// - merge: mux a trend's clip and audio track
// - config: print the effective configuration

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};
use tracing::{debug, error, info};

use trendify::app::{App, EventHandler};
use trendify::cli;
use trendify::components::LayoutComponent;
use trendify::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let result = match args.command {
        // CLI commands
        Some(cli::Commands::Catalog) => cli::catalog::execute(args.format),
        Some(cli::Commands::Merge(merge_args)) => cli::merge::execute(merge_args, &config).await,
        Some(cli::Commands::Config) => cli::config::execute(&config, args.format),

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let tick_rate = config.timing.tick_rate();
            let mut app = App::new(config);
            let mut layout = LayoutComponent::new();

            // Flush any pending terminal events to prevent stray keypresses
            while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = event::read();
            }

            run_tui(&mut app, &mut layout, tick_rate)
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent, tick_rate: Duration) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, layout, &mut terminal, tick_rate);

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        error!("Failed to cleanup terminal: {}", e);
        // Fallback to basic cleanup
        cleanup_terminal();
    }

    result
}

fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    // Startup guard: ignore key events for the first 100ms so buffered
    // keypresses do not trigger actions
    let startup_time = Instant::now();
    const STARTUP_GUARD_MS: u64 = 100;

    info!("Starting TUI loop with tick rate {:?}", tick_rate);

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if startup_time.elapsed() < Duration::from_millis(STARTUP_GUARD_MS) {
                    debug!(
                        "Ignoring key event {:?} during startup guard period",
                        key_event.code
                    );
                    continue;
                }
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state)
                {
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
        }

        // Process any pending events queued by the previous action
        if let Some(pending) = app.state.pending_event.take() {
            EventHandler::process_event(pending, &mut app.state);
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    info!("TUI loop finished");
    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Create log directory if it doesn't exist
    let log_dir = dirs::home_dir()
        .map(|home| home.join(".trendify").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".trendify/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "trendify-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Logging is best-effort; the TUI owns the terminal so there is no fallback sink
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json() // Output in JSON Lines format
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendify=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
