//! The single-threaded dashboard event loop.
//!
//! The loop owns the [`App`] for its whole run. Producers only reach it
//! through the inbox; the periodic tick and the log poll are driven from
//! inside the loop, and both stop once the dispatcher leaves
//! [`RunState::Running`](crate::app::RunState::Running).
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

use crate::app::{App, Dispatch};
use crate::error::Result;
use crate::input::Event;
use crate::provision::spawn_provisioning;
use crate::ui;
use chrono::Local;
use fleetview_core::SharedLogRing;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs the dashboard until the dispatcher reports [`Dispatch::Exit`] or
/// the inbox closes.
///
/// * `event_tx` - sender side of `inbox`, used for the shutdown message
///   and handed to provisioning tasks.
/// * `log_source` - polled every `log_poll_rate`; changes arrive as
///   [`Event::LogSnapshot`].
/// * `cancel` - cancelled on quit. A cancellation from outside while
///   running is treated as [`Event::Interrupt`].
pub async fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    inbox: &mut mpsc::UnboundedReceiver<Event>,
    event_tx: &mpsc::UnboundedSender<Event>,
    log_source: &SharedLogRing,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut tick = interval(app.config.tick_rate);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut log_poll = interval(app.config.log_poll_rate);
    log_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_snapshot: Vec<String> = Vec::new();

    terminal.draw(|frame| ui::render(frame, app))?;

    loop {
        let event = tokio::select! {
            biased;
            received = inbox.recv() => match received {
                Some(event) => Some(event),
                None => {
                    warn!("Event channel closed");
                    break;
                }
            },
            _ = cancel.cancelled(), if app.is_running() => Some(Event::Interrupt),
            _ = tick.tick(), if app.is_running() => Some(Event::Tick(Local::now())),
            _ = log_poll.tick(), if app.is_running() => {
                let lines = log_source.snapshot();
                if lines == last_snapshot {
                    None
                } else {
                    last_snapshot.clone_from(&lines);
                    Some(Event::LogSnapshot(lines))
                }
            }
        };

        let Some(event) = event else {
            continue;
        };

        match app.dispatch(event) {
            Dispatch::Continue => {}
            Dispatch::Provision(name) => {
                spawn_provisioning(
                    name,
                    event_tx.clone(),
                    app.config.provision_step_delay,
                    cancel.clone(),
                );
            }
            Dispatch::Quit => {
                info!("Quitting: cancelling producers");
                cancel.cancel();
                terminal.clear()?;
                if event_tx.send(Event::Shutdown).is_err() {
                    debug!("inbox closed during shutdown");
                    break;
                }
            }
            Dispatch::Exit => break,
        }

        if app.is_running() {
            terminal.draw(|frame| ui::render(frame, app))?;
        }
    }

    info!(machines = app.table.len(), "Event loop stopped");
    Ok(())
}
