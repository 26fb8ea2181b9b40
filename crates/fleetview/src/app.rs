//! Dashboard context and dispatcher state machine.
//!
//! [`App`] owns every piece of mutable dashboard state: the machine table,
//! the displayed log lines and the last-updated clock. It is constructed
//! once at startup and passed by reference to the event loop; nothing
//! else mutates it.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

use crate::config::DashConfig;
use crate::input::{handle_key_event, Action, Event};
use chrono::{DateTime, Local, Utc};
use fleetview_core::{DeploymentTable, LogRingBuffer, MachineName, LOG_CAPACITY};
use tracing::{debug, info, trace};

// ============================================================================
// Run State
// ============================================================================

/// Lifecycle of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Accepting and applying messages.
    #[default]
    Running,

    /// A quit was requested; the next message terminates the loop.
    Quitting,
}

/// What the event loop must do after a message has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Keep going.
    Continue,

    /// Spawn the derived provisioning task for this machine.
    Provision(MachineName),

    /// Quit was requested: cancel producers, clear the screen and
    /// enqueue [`Event::Shutdown`].
    Quit,

    /// Leave the loop.
    Exit,
}

// ============================================================================
// Application
// ============================================================================

/// The owned dashboard context.
#[derive(Debug, Clone)]
pub struct App {
    /// Machine rows in render order.
    pub table: DeploymentTable,

    /// Log lines shown in the log pane.
    pub logs: LogRingBuffer,

    /// Wall-clock time of the most recent tick.
    pub last_updated: DateTime<Local>,

    /// Current dispatcher state.
    pub state: RunState,

    /// Settings read once at startup.
    pub config: DashConfig,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DashConfig::default())
    }
}

impl App {
    /// Creates an empty, running dashboard.
    pub fn new(config: DashConfig) -> Self {
        Self {
            table: DeploymentTable::new(),
            logs: LogRingBuffer::new(LOG_CAPACITY),
            last_updated: Local::now(),
            state: RunState::Running,
            config,
        }
    }

    /// Returns true while the dispatcher accepts mutations.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Applies one message to the dashboard.
    ///
    /// Once [`RunState::Quitting`] is reached every message, whatever its
    /// kind, yields [`Dispatch::Exit`] without touching any state.
    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        if self.state == RunState::Quitting {
            trace!("message received while quitting, exiting loop");
            return Dispatch::Exit;
        }

        match event {
            Event::Key(key) => match handle_key_event(key) {
                Action::Quit => {
                    info!("User requested quit");
                    self.begin_quit()
                }
                Action::None => Dispatch::Continue,
            },
            Event::Interrupt | Event::Shutdown => {
                info!("Shutdown requested");
                self.begin_quit()
            }
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                Dispatch::Continue
            }
            Event::Status(update) => {
                let outcome = self.table.apply_status(&update, Utc::now());
                trace!(machine = %update.name, ?outcome, "applied status update");
                if outcome.ssh_succeeded() {
                    debug!(machine = %update.name, "ssh succeeded, starting provisioning");
                    Dispatch::Provision(update.name)
                } else {
                    Dispatch::Continue
                }
            }
            Event::DerivedStatus(update) => {
                let changed = self.table.apply_derived(&update);
                trace!(machine = %update.name, changed, "applied derived update");
                Dispatch::Continue
            }
            Event::Tick(now) => {
                self.last_updated = now;
                self.table.refresh_elapsed(now.with_timezone(&Utc));
                Dispatch::Continue
            }
            Event::LogLine(line) => {
                self.logs.push(line);
                Dispatch::Continue
            }
            Event::LogSnapshot(lines) => {
                self.logs.replace(lines);
                Dispatch::Continue
            }
        }
    }

    fn begin_quit(&mut self) -> Dispatch {
        self.state = RunState::Quitting;
        Dispatch::Quit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use fleetview_core::{ServiceState, StatusUpdate};

    fn quit_key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
    }

    #[test]
    fn test_new_app_is_running_and_empty() {
        let app = App::default();
        assert!(app.is_running());
        assert!(app.table.is_empty());
        assert!(app.logs.is_empty());
    }

    #[test]
    fn test_status_creates_record() {
        let mut app = App::default();
        let dispatch = app.dispatch(Event::Status(StatusUpdate::vm("vm1").with_location("eu")));
        assert_eq!(dispatch, Dispatch::Continue);
        assert_eq!(app.table.len(), 1);
    }

    #[test]
    fn test_ssh_success_requests_provisioning() {
        let mut app = App::default();
        let update = StatusUpdate::vm("vm1").with_ssh(ServiceState::Succeeded);
        assert_eq!(
            app.dispatch(Event::Status(update.clone())),
            Dispatch::Provision(MachineName::new("vm1"))
        );
        // Re-sending the same state is not a new transition
        assert_eq!(app.dispatch(Event::Status(update)), Dispatch::Continue);
    }

    #[test]
    fn test_derived_status_applies_to_existing_record() {
        let mut app = App::default();
        app.dispatch(Event::Status(StatusUpdate::vm("vm1")));
        app.dispatch(Event::DerivedStatus(
            StatusUpdate::vm("vm1").with_docker(ServiceState::Updating),
        ));
        assert_eq!(
            app.table.get("vm1").map(|m| m.docker),
            Some(ServiceState::Updating)
        );
    }

    #[test]
    fn test_tick_updates_clock_and_elapsed() {
        let mut app = App::default();
        app.dispatch(Event::Status(StatusUpdate::vm("vm1")));
        let start = app.table.get("vm1").map(|m| m.start_time).unwrap();

        let later = (start + ChronoDuration::seconds(3)).with_timezone(&Local);
        app.dispatch(Event::Tick(later));

        assert_eq!(app.last_updated, later);
        let elapsed = app.table.get("vm1").map(|m| m.elapsed()).unwrap();
        assert_eq!(elapsed.as_secs(), 3);
    }

    #[test]
    fn test_log_line_and_snapshot() {
        let mut app = App::default();
        app.dispatch(Event::LogLine("first".to_string()));
        app.dispatch(Event::LogLine("second".to_string()));
        assert_eq!(app.logs.snapshot(), vec!["first", "second"]);

        app.dispatch(Event::LogSnapshot(vec!["only".to_string()]));
        assert_eq!(app.logs.snapshot(), vec!["only"]);
    }

    #[test]
    fn test_quit_key_moves_to_quitting() {
        let mut app = App::default();
        assert_eq!(app.dispatch(quit_key()), Dispatch::Quit);
        assert_eq!(app.state, RunState::Quitting);
        assert!(!app.is_running());
    }

    #[test]
    fn test_interrupt_quits() {
        let mut app = App::default();
        assert_eq!(app.dispatch(Event::Interrupt), Dispatch::Quit);
        assert_eq!(app.state, RunState::Quitting);
    }

    #[test]
    fn test_quitting_accepts_no_mutation() {
        let mut app = App::default();
        app.dispatch(quit_key());

        let tick = Local.timestamp_opt(1_700_000_000, 0).single().unwrap();
        assert_eq!(app.dispatch(Event::Status(StatusUpdate::vm("vm1"))), Dispatch::Exit);
        assert_eq!(app.dispatch(Event::LogLine("late".to_string())), Dispatch::Exit);
        assert_eq!(app.dispatch(Event::Tick(tick)), Dispatch::Exit);

        assert!(app.table.is_empty());
        assert!(app.logs.is_empty());
        assert_ne!(app.last_updated, tick);
    }

    #[test]
    fn test_non_quit_key_continues() {
        let mut app = App::default();
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.dispatch(key), Dispatch::Continue);
        assert!(app.is_running());
    }
}
