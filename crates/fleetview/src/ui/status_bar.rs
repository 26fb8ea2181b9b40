//! Footer line with quit instructions and the last refresh time.

use crate::app::App;
use crate::ui::theme::footer_style;
use chrono::{DateTime, TimeZone};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};
use std::fmt::Display;

/// Footer text for the given last-updated time.
pub fn footer_text<Tz>(last_updated: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "Press 'q' or Ctrl+C to quit (Last Updated: {})",
        last_updated.format("%H:%M:%S")
    )
}

/// Renders the footer.
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::styled(footer_text(&app.last_updated), footer_style());
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_footer_text_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).single().unwrap();
        assert_eq!(
            footer_text(&at),
            "Press 'q' or Ctrl+C to quit (Last Updated: 07:05:03)"
        );
    }
}
