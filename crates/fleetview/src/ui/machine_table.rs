//! Machine table widget.
//!
//! Every cell is padded or truncated to exactly its column's width, so
//! rows line up without relying on ratatui's table layout. The same lines
//! are used for the live frame and for the plain-text table printed after
//! the terminal has been restored.

use crate::config::{DashConfig, GlyphMode};
use crate::ui::columns::{self, progress_budget, DisplayColumn, DISPLAY_COLUMNS};
use crate::ui::theme::{
    header_style, role_glyph, service_glyph, service_style, PROGRESS_EMPTY_COLOR,
    PROGRESS_FILLED_COLOR, PROGRESS_GLYPH, TABLE_BORDER_COLOR,
};
use fleetview_core::{DeploymentTable, MachineRecord, ServiceState};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Blank columns kept after the content of a text cell.
const GUTTER: usize = 1;

// ============================================================================
// Typed Row
// ============================================================================

/// One rendered row, with a field per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineRow {
    pub name: String,
    pub resource: &'static str,
    pub location: String,
    pub status: String,
    pub progress: (usize, usize),
    pub elapsed: String,
    pub public_ip: String,
    pub private_ip: String,
    pub orchestrator: bool,
    pub ssh: ServiceState,
    pub docker: ServiceState,
    pub bacalhau: ServiceState,
}

impl MachineRow {
    /// Builds the row for `record`, truncating elapsed time to `tick`.
    pub fn from_record(record: &MachineRecord, tick: Duration) -> Self {
        Self {
            name: record.name().to_string(),
            resource: record.resource_type.short_code(),
            location: record.location.clone(),
            status: record.status_message.clone(),
            progress: record.progress(),
            elapsed: format_elapsed(truncate_to_tick(record.elapsed(), tick)),
            public_ip: record.public_ip.clone(),
            private_ip: record.private_ip.clone(),
            orchestrator: record.orchestrator,
            ssh: record.ssh,
            docker: record.docker,
            bacalhau: record.bacalhau,
        }
    }

    fn cells(&self, mode: GlyphMode) -> Vec<Vec<Span<'static>>> {
        vec![
            text_cell(&self.name, &columns::NAME),
            text_cell(self.resource, &columns::TYPE),
            text_cell(&self.location, &columns::LOCATION),
            text_cell(&self.status, &columns::STATUS),
            progress_cell(self.progress, &columns::PROGRESS),
            text_cell(&self.elapsed, &columns::TIME),
            text_cell(&self.public_ip, &columns::PUBLIC_IP),
            text_cell(&self.private_ip, &columns::PRIVATE_IP),
            icon_cell(
                role_glyph(self.orchestrator, mode),
                &columns::ORCHESTRATOR,
                Style::default(),
            ),
            icon_cell(service_glyph(self.ssh, mode), &columns::SSH, service_style(self.ssh)),
            icon_cell(
                service_glyph(self.docker, mode),
                &columns::DOCKER,
                service_style(self.docker),
            ),
            icon_cell(
                service_glyph(self.bacalhau, mode),
                &columns::BACALHAU,
                service_style(self.bacalhau),
            ),
        ]
    }
}

// ============================================================================
// Cell Fitting
// ============================================================================

/// Horizontal placement of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Cuts `text` to at most `max` terminal columns.
fn truncate_to_width(text: &str, max: usize) -> (String, usize) {
    let full = text.width();
    if full <= max {
        return (text.to_string(), full);
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(c);
        used += w;
    }
    (out, used)
}

/// Pads or truncates `text` to exactly `width` terminal columns.
///
/// Left-aligned cells reserve a one-column gutter on the right.
pub fn fit_cell(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => {
            let content_width = width.saturating_sub(GUTTER);
            let (content, used) = truncate_to_width(text, content_width);
            format!("{content}{}", " ".repeat(width - used))
        }
        Align::Center => {
            let (content, used) = truncate_to_width(text, width);
            let left = (width - used) / 2;
            let right = width - used - left;
            format!("{}{content}{}", " ".repeat(left), " ".repeat(right))
        }
    }
}

fn text_cell(text: &str, column: &DisplayColumn) -> Vec<Span<'static>> {
    vec![Span::raw(fit_cell(text, column.width, Align::Left))]
}

fn icon_cell(glyph: &str, column: &DisplayColumn, style: Style) -> Vec<Span<'static>> {
    vec![Span::styled(fit_cell(glyph, column.width, Align::Center), style)]
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Splits `budget` columns into `(filled, empty)` runs.
///
/// `filled = ceil(completed * budget / total)`, clamped to `budget`.
/// Returns `None` when `total` is zero.
#[must_use]
pub fn progress_widths(completed: usize, total: usize, budget: usize) -> Option<(usize, usize)> {
    if total == 0 {
        return None;
    }
    let filled = (completed.saturating_mul(budget))
        .div_ceil(total)
        .min(budget);
    Some((filled, budget - filled))
}

/// The two styled runs of the progress bar.
pub fn progress_bar(completed: usize, total: usize, budget: usize) -> Vec<Span<'static>> {
    match progress_widths(completed, total, budget) {
        Some((filled, empty)) => vec![
            Span::styled(
                PROGRESS_GLYPH.to_string().repeat(filled),
                Style::default().fg(PROGRESS_FILLED_COLOR),
            ),
            Span::styled(
                PROGRESS_GLYPH.to_string().repeat(empty),
                Style::default().fg(PROGRESS_EMPTY_COLOR),
            ),
        ],
        None => Vec::new(),
    }
}

fn progress_cell((completed, total): (usize, usize), column: &DisplayColumn) -> Vec<Span<'static>> {
    let mut spans = progress_bar(completed, total, progress_budget());
    let used: usize = spans.iter().map(|span| span.content.width()).sum();
    spans.push(Span::raw(" ".repeat(column.width.saturating_sub(used))));
    spans
}

// ============================================================================
// Elapsed Time
// ============================================================================

/// Drops the part of `elapsed` below the `tick` granularity.
#[must_use]
pub fn truncate_to_tick(elapsed: Duration, tick: Duration) -> Duration {
    let tick_nanos = tick.as_nanos();
    if tick_nanos == 0 {
        return elapsed;
    }
    let nanos = elapsed.as_nanos();
    let truncated = nanos - nanos % tick_nanos;
    Duration::from_nanos(u64::try_from(truncated).unwrap_or(u64::MAX))
}

/// Formats elapsed time as `1m05.3s`, or ` 9.7s` under a minute.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let tenths = (elapsed.as_millis() / 100) % 10;

    if minutes > 0 {
        format!("{minutes}m{seconds:02}.{tenths}s")
    } else {
        format!("{seconds:2}.{tenths}s")
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Flattens cells into a line, appending `[len]` after each cell in debug mode.
fn join_cells(cells: Vec<Vec<Span<'static>>>, debug_display: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for cell in cells {
        let len: usize = cell.iter().map(|span| span.content.chars().count()).sum();
        spans.extend(cell);
        if debug_display {
            spans.push(Span::raw(format!("[{len}]")));
        }
    }
    Line::from(spans)
}

fn header_line(config: &DashConfig) -> Line<'static> {
    let cells = DISPLAY_COLUMNS
        .iter()
        .map(|column| {
            let align = if column.icon_column {
                Align::Center
            } else {
                Align::Left
            };
            vec![Span::styled(
                fit_cell(column.header(config.glyph_mode), column.width, align),
                header_style(),
            )]
        })
        .collect();
    join_cells(cells, config.debug_display)
}

/// Header, optional debug separator, then one line per named machine.
pub fn table_lines(table: &DeploymentTable, config: &DashConfig) -> Vec<Line<'static>> {
    let mut lines = vec![header_line(config)];
    if config.debug_display {
        lines.push(Line::raw("-".repeat(columns::aggregate_width())));
    }
    lines.extend(
        table
            .iter()
            .filter(|record| !record.name().is_empty())
            .map(|record| {
                let row = MachineRow::from_record(record, config.tick_rate);
                join_cells(row.cells(config.glyph_mode), config.debug_display)
            }),
    );
    lines
}

/// The table as unstyled text, one line per row.
pub fn table_text(table: &DeploymentTable, config: &DashConfig) -> String {
    table_lines(table, config)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders lines built by [`table_lines`] inside a plain border.
pub fn render_machine_table(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TABLE_BORDER_COLOR));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
