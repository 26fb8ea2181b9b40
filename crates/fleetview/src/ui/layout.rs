//! Layout helpers for the fleetview dashboard.

use crate::ui::columns::aggregate_width;
use fleetview_core::LOG_CAPACITY;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Cells taken by a block's two opposite borders.
const BORDER_CELLS: u16 = 2;

/// Main dashboard areas, top to bottom.
///
/// ```text
/// +------------------------------------------+
/// | Name  Type  Location ...     O  S  D  B  |  <- header + one row per machine
/// +------------------------------------------+
///                                               <- spacer
/// +------------------------------------------+
/// | recent log lines                         |  <- LOG_CAPACITY lines
/// +------------------------------------------+
///  Press 'q' or Ctrl+C to quit (...)            <- footer
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DashLayout {
    /// Bordered machine table.
    pub table: Rect,
    /// Bordered log pane.
    pub logs: Rect,
    /// Single-line footer.
    pub footer: Rect,
}

impl DashLayout {
    /// Splits `area` for a table with `table_lines` lines of content.
    ///
    /// Widths are capped at the table's natural width.
    pub fn new(area: Rect, table_lines: usize) -> Self {
        let table_height = u16::try_from(table_lines)
            .unwrap_or(u16::MAX)
            .saturating_add(BORDER_CELLS);
        let log_height = u16::try_from(LOG_CAPACITY)
            .unwrap_or(u16::MAX)
            .saturating_add(BORDER_CELLS);

        let [table, _spacer, logs, footer, _rest] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(table_height),
                Constraint::Length(1),
                Constraint::Length(log_height),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);

        let width = outer_width().min(area.width);
        Self {
            table: Rect { width, ..table },
            logs: Rect { width, ..logs },
            footer,
        }
    }
}

/// Table width including its side borders.
pub fn outer_width() -> u16 {
    u16::try_from(aggregate_width())
        .unwrap_or(u16::MAX)
        .saturating_add(BORDER_CELLS)
}
