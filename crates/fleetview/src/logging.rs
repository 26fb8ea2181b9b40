//! Log file location and opening.
//!
//! While the alternate screen is active nothing may be written to stderr,
//! so diagnostics go to an append-only file under the user's state
//! directory.

use crate::error::{Result, TuiError};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Log file name inside the fleetview state directory.
pub const LOG_FILE_NAME: &str = "fleetview.log";

/// Filter directive used when verbose tracing is off.
pub const DEFAULT_DIRECTIVE: &str = "fleetview=info";

/// Filter directive used when verbose tracing is on.
pub const VERBOSE_DIRECTIVE: &str = "fleetview=trace";

/// Resolves the log file path.
///
/// Prefers `$XDG_STATE_HOME/fleetview`, then the platform state directory,
/// then `$HOME/.local/state/fleetview`.
pub fn log_file_path() -> Result<PathBuf> {
    log_dir_from(
        std::env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        dirs::state_dir(),
        dirs::home_dir(),
    )
    .map(|dir| dir.join(LOG_FILE_NAME))
    .ok_or(TuiError::NoLogDirectory)
}

fn log_dir_from(
    xdg_state: Option<PathBuf>,
    platform_state: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    xdg_state
        .filter(|dir| !dir.as_os_str().is_empty())
        .or(platform_state)
        .or_else(|| home.map(|home| home.join(".local").join("state")))
        .map(|dir| dir.join("fleetview"))
}

/// Creates the parent directory if needed and opens `path` for appending.
pub fn open_log_file(path: &Path) -> Result<File> {
    let to_error = |source| TuiError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// The default filter directive for the given verbosity.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

/// Builds the log filter.
///
/// `RUST_LOG` wins when it is set and parses; otherwise the filter falls
/// back to [`default_directive`].
pub fn env_filter(verbose: bool) -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose)
}

fn filter_from(rust_log: Option<String>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)))
}
