//! UI rendering module for the fleetview dashboard.
//!
//! Rendering is a pure function of the [`App`]: the machine table, the
//! buffered log lines, the last-updated time and the display
//! configuration fully determine the frame.
//!
//! # Layout Structure
//!
//! ```text
//! +--------------------------------------------------+
//! |  Machine table (header + one row per machine)    |
//! +--------------------------------------------------+
//!
//! +--------------------------------------------------+
//! |  Log pane (last 10 lines)                        |
//! +--------------------------------------------------+
//!  Footer: quit hint and last-updated time
//! ```

pub mod columns;
pub mod layout;
pub mod log_pane;
pub mod machine_table;
pub mod status_bar;
pub mod theme;

use crate::app::App;
use layout::DashLayout;
use ratatui::Frame;

// Re-export commonly used items
pub use log_pane::render_log_pane;
pub use machine_table::{render_machine_table, table_lines, table_text};
pub use status_bar::render_footer;

/// Renders the complete dashboard frame.
///
/// ```ignore
/// terminal.draw(|frame| {
///     ui::render(frame, &app);
/// })?;
/// ```
pub fn render(frame: &mut Frame, app: &App) {
    let lines = table_lines(&app.table, &app.config);
    let layout = DashLayout::new(frame.area(), lines.len());

    render_machine_table(frame, layout.table, lines);
    render_log_pane(frame, layout.logs, &app.logs);
    render_footer(frame, layout.footer, app);
}
