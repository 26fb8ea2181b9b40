//! Inbox message types and keyboard handling for the fleetview dashboard.
//!
//! Every producer (keyboard reader, machine event generator, derived
//! provisioning task) talks to the event loop only by sending an [`Event`].
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fleetview_core::StatusUpdate;

// ============================================================================
// Event Types
// ============================================================================

/// Messages consumed by the event loop, processed strictly in arrival order.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input from the user.
    Key(KeyEvent),

    /// Terminal window resize event.
    Resize(u16, u16),

    /// Explicit status delta from a producer.
    Status(StatusUpdate),

    /// Status delta produced by the provisioning task after an ssh success.
    DerivedStatus(StatusUpdate),

    /// Periodic refresh carrying the wall-clock time it fired at.
    Tick(DateTime<Local>),

    /// A single new log line.
    LogLine(String),

    /// The full current content of the log source, oldest first.
    LogSnapshot(Vec<String>),

    /// The process was asked to stop from outside the dashboard.
    Interrupt,

    /// Sent by the dispatcher itself once a quit has been requested.
    Shutdown,
}

// ============================================================================
// Action Types
// ============================================================================

/// What the dispatcher should do in response to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action required.
    None,

    /// Quit the application.
    Quit,
}

// ============================================================================
// Input Handler
// ============================================================================

/// Maps a keyboard event to an [`Action`].
///
/// # Key Bindings
///
/// | Key          | Action                |
/// |--------------|-----------------------|
/// | `q`, `Q`     | Quit the application  |
/// | `Esc`        | Quit the application  |
/// | `Ctrl+C`     | Quit the application  |
///
/// Key release events (reported by some terminals) are ignored.
#[must_use]
pub fn handle_key_event(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // Ctrl+C is an unconditional quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('Q'))), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = key_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), Action::Quit);
    }

    #[test]
    fn test_plain_c_does_nothing() {
        assert_eq!(handle_key_event(key(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Down)), Action::None);
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), Action::None);
    }
}
