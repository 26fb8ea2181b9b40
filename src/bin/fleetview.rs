//! fleetview - simulated machine deployment dashboard
//!
//! Renders a live table of synthetic machines, a scrolling log pane and a
//! footer. There are no runtime flags; behavior is tuned through
//! environment toggles:
//!
//! ```text
//! fleetview                             # normal run
//! FLEETVIEW_DEBUG_DISPLAY=1 fleetview   # annotate every cell with its width
//! FLEETVIEW_TRACE=1 fleetview           # trace-level log file
//! FLEETVIEW_ICONS=1 fleetview           # pictographic status glyphs
//! ```

use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fleetview_core::{SharedLogRing, LOG_CAPACITY};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use fleetview_tui::error::{Result as TuiResult, TuiError};
use fleetview_tui::input::Event;
use fleetview_tui::logging::{env_filter, log_file_path, open_log_file};
use fleetview_tui::producer::{spawn_log_generator, spawn_machine_events, MachineEventGenerator};
use fleetview_tui::{run_event_loop, ui, App, DashConfig};

/// How long background tasks get to finish after the loop exits.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

// ============================================================================
// CLI Arguments
// ============================================================================

/// fleetview - simulated machine deployment dashboard
#[derive(Parser, Debug)]
#[command(name = "fleetview")]
#[command(about = "Watch a simulated fleet of machines being provisioned")]
#[command(version)]
struct Args {}

// ============================================================================
// Terminal Setup / Cleanup
// ============================================================================

fn setup_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| TuiError::TerminalInit(e.to_string()))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| TuiError::TerminalInit(e.to_string()))
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
    disable_raw_mode().map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    terminal
        .show_cursor()
        .map_err(|e| TuiError::TerminalCleanup(e.to_string()))?;

    Ok(())
}

// ============================================================================
// Keyboard Input Task
// ============================================================================

fn spawn_keyboard_task(
    event_tx: mpsc::UnboundedSender<Event>,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if cancel_token.is_cancelled() {
                debug!("Keyboard task shutting down");
                break;
            }

            let poll_result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await;

            match poll_result {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if event_tx.send(Event::Key(key)).is_err() {
                        debug!("Event channel closed, keyboard task exiting");
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(width, height))) => {
                    if event_tx.send(Event::Resize(width, height)).is_err() {
                        break;
                    }
                }
                Ok(Some(_)) | Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "Keyboard polling task panicked");
                    break;
                }
            }
        }
    })
}

/// Cancels `cancel_token` on SIGINT delivered outside raw mode.
fn spawn_signal_task(cancel_token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel_token.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    info!("Interrupt signal received");
                    cancel_token.cancel();
                }
            }
        }
    })
}

// ============================================================================
// Logging Setup
// ============================================================================

fn init_tracing(config: &DashConfig) -> TuiResult<()> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.verbose_trace))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    info!(log_file = %path.display(), "Logging initialized");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let _args = Args::parse();
    let config = DashConfig::from_env();

    init_tracing(&config)?;
    info!(
        debug_display = config.debug_display,
        verbose_trace = config.verbose_trace,
        glyph_mode = ?config.glyph_mode,
        "fleetview starting..."
    );

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let cancel_token = CancellationToken::new();
    let log_ring = SharedLogRing::new(LOG_CAPACITY);

    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to initialize terminal");
            // Raw mode may already be on if the alternate screen failed
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };

    let mut app = App::new(config.clone());

    let machine_handle = spawn_machine_events(
        MachineEventGenerator::new(config.machine_count),
        event_tx.clone(),
        config.producer_interval,
        cancel_token.clone(),
    );
    let log_handle = spawn_log_generator(
        log_ring.clone(),
        config.producer_interval,
        cancel_token.clone(),
    );
    let keyboard_handle = spawn_keyboard_task(event_tx.clone(), cancel_token.clone());
    let signal_handle = spawn_signal_task(cancel_token.clone());

    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &mut event_rx,
        &event_tx,
        &log_ring,
        &cancel_token,
    )
    .await;

    cancel_token.cancel();

    for handle in [machine_handle, log_handle, keyboard_handle, signal_handle] {
        let _ = tokio::time::timeout(SHUTDOWN_GRACE, handle).await;
    }

    if let Err(e) = cleanup_terminal(&mut terminal) {
        error!(error = %e, "Failed to cleanup terminal");
    }

    println!("{}", ui::table_text(&app.table, &app.config));
    info!(
        machines = app.table.len(),
        complete = app.table.complete_count(),
        "fleetview stopped"
    );

    result.map_err(Into::into)
}
