//! Error types for the fleetview TUI.
//!
//! Only the bootstrap layer can fail: terminal setup and teardown, and
//! opening the diagnostic log file. The dispatcher and render engine are
//! total and never produce these errors.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// TUI Error Type
// ============================================================================

/// TUI application errors.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Failed to initialize the terminal.
    ///
    /// Usually means the process is not attached to a TTY (pipes, scripts)
    /// or the terminal emulator does not support raw mode.
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    /// Failed to restore the terminal on exit.
    ///
    /// The terminal may be left in raw mode; running `reset` recovers it.
    #[error("Failed to restore terminal: {0}")]
    TerminalCleanup(String),

    /// The diagnostic log file could not be created or opened.
    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No state directory could be determined for the log file.
    #[error("Could not determine a state directory for the log file (set XDG_STATE_HOME or HOME)")]
    NoLogDirectory,

    /// I/O error passthrough (terminal drawing, clearing).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Convenience Result type alias for TUI operations.
pub type Result<T> = std::result::Result<T, TuiError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_init_error_display() {
        let error = TuiError::TerminalInit("not a TTY".to_string());
        let display = format!("{error}");
        assert!(display.contains("Failed to initialize terminal"));
        assert!(display.contains("not a TTY"));
    }

    #[test]
    fn test_terminal_cleanup_error_display() {
        let error = TuiError::TerminalCleanup("could not restore cursor".to_string());
        assert!(format!("{error}").contains("Failed to restore terminal"));
    }

    #[test]
    fn test_log_file_error_display() {
        let error = TuiError::LogFile {
            path: PathBuf::from("/nope/fleetview.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{error}");
        assert!(display.contains("/nope/fleetview.log"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let tui_error: TuiError = io_error.into();
        assert!(matches!(tui_error, TuiError::Io(_)));
        assert!(format!("{tui_error}").contains("IO error"));
    }
}
