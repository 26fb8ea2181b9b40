//! Dashboard configuration.
//!
//! The process takes no runtime flags. A handful of boolean environment
//! toggles are read once at startup into a [`DashConfig`], which is then
//! passed explicitly to the dispatcher, the render engine and the
//! producer tasks.

use std::time::Duration;

/// Enables the per-cell width annotation in the rendered table.
pub const ENV_DEBUG_DISPLAY: &str = "FLEETVIEW_DEBUG_DISPLAY";
/// Enables verbose tracing to the log file.
pub const ENV_TRACE: &str = "FLEETVIEW_TRACE";
/// Renders status columns with pictographic glyphs.
pub const ENV_ICONS: &str = "FLEETVIEW_ICONS";

/// Short aliases accepted for the two diagnostic toggles.
const ENV_DEBUG_DISPLAY_ALIAS: &str = "DEBUG_DISPLAY";
const ENV_TRACE_ALIAS: &str = "DEBUG_CHANNELS";

/// How status cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Single-width text symbols and letter headers.
    #[default]
    Text,
    /// Pictographic (emoji) glyphs.
    Icons,
}

/// Configuration threaded through the dashboard at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    /// Append each rendered cell's character length after the cell.
    pub debug_display: bool,

    /// Raise the log file filter to trace level.
    pub verbose_trace: bool,

    /// Glyph set for header and status cells.
    pub glyph_mode: GlyphMode,

    /// Period of the refresh tick; also the elapsed-time display granularity.
    pub tick_rate: Duration,

    /// Period at which the event loop polls the shared log ring.
    pub log_poll_rate: Duration,

    /// Period of the synthetic machine and log producers.
    pub producer_interval: Duration,

    /// Delay between the steps of the derived provisioning task.
    pub provision_step_delay: Duration,

    /// Number of simulated machines.
    pub machine_count: usize,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            debug_display: false,
            verbose_trace: false,
            glyph_mode: GlyphMode::Text,
            tick_rate: Duration::from_millis(250),
            log_poll_rate: Duration::from_millis(250),
            producer_interval: Duration::from_secs(1),
            provision_step_delay: Duration::from_millis(150),
            machine_count: 5,
        }
    }
}

impl DashConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = |keys: &[&str]| {
            keys.iter()
                .any(|key| lookup(key).as_deref().is_some_and(parse_toggle))
        };

        Self {
            debug_display: enabled(&[ENV_DEBUG_DISPLAY, ENV_DEBUG_DISPLAY_ALIAS]),
            verbose_trace: enabled(&[ENV_TRACE, ENV_TRACE_ALIAS]),
            glyph_mode: if enabled(&[ENV_ICONS]) {
                GlyphMode::Icons
            } else {
                GlyphMode::Text
            },
            ..Self::default()
        }
    }
}

/// Parses a boolean toggle: `1`, `true`, `yes` and `on` are true.
#[must_use]
pub fn parse_toggle(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
