//! Bordered pane showing the most recent log lines.

use crate::ui::theme::LOG_BORDER_COLOR;
use fleetview_core::LogRingBuffer;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

/// Renders the buffered lines oldest-first, newest at the bottom.
pub fn render_log_pane(frame: &mut Frame, area: Rect, logs: &LogRingBuffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(LOG_BORDER_COLOR))
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(logs.as_text()).block(block), area);
}
