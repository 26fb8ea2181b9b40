//! Shared glyphs and colors for the fleetview dashboard.
//!
//! Status cells have two renderings: single-width text symbols (the
//! default) and pictographic icons. The color of a status cell depends
//! only on the service state, not on the glyph set.

use crate::config::GlyphMode;
use fleetview_core::ServiceState;
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Palette
// ============================================================================

/// Succeeded services.
pub const SUCCESS_COLOR: Color = Color::Rgb(0x00, 0xc4, 0x13);
/// Services still working or not yet reported.
pub const WAITING_COLOR: Color = Color::Rgb(0x69, 0xac, 0xdb);
/// Services that have not started.
pub const NOT_STARTED_COLOR: Color = Color::Rgb(0x2e, 0x2d, 0x2d);
/// Failed services.
pub const FAILED_COLOR: Color = Color::Red;

pub const HEADER_COLOR: Color = Color::Indexed(39);
pub const TABLE_BORDER_COLOR: Color = Color::Indexed(240);
pub const LOG_BORDER_COLOR: Color = Color::Indexed(63);
pub const FOOTER_COLOR: Color = Color::Indexed(241);
pub const PROGRESS_FILLED_COLOR: Color = Color::Indexed(42);
pub const PROGRESS_EMPTY_COLOR: Color = Color::Indexed(237);

/// Glyph used for both runs of the progress bar.
pub const PROGRESS_GLYPH: char = '█';

// ============================================================================
// Glyphs
// ============================================================================

/// Glyph for a service state in the given mode.
///
/// `Unknown` shares the waiting glyph: nothing has been reported yet.
pub fn service_glyph(state: ServiceState, mode: GlyphMode) -> &'static str {
    match mode {
        GlyphMode::Text => match state {
            ServiceState::Succeeded => "✔",
            ServiceState::Failed => "✘",
            ServiceState::Created => "⌃",
            ServiceState::NotStarted => "┅",
            ServiceState::Updating | ServiceState::Unknown => "↻",
        },
        GlyphMode::Icons => match state {
            ServiceState::Succeeded => "✅",
            ServiceState::Failed => "❌",
            ServiceState::Created => "⬆️",
            ServiceState::NotStarted => "⬛️",
            ServiceState::Updating | ServiceState::Unknown => "⏳",
        },
    }
}

/// Glyph for the orchestrator-role column.
pub fn role_glyph(orchestrator: bool, mode: GlyphMode) -> &'static str {
    match (mode, orchestrator) {
        (GlyphMode::Text, true) => "⏼",
        (GlyphMode::Text, false) => " ",
        (GlyphMode::Icons, true) => "🌕",
        (GlyphMode::Icons, false) => "⚫️",
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Foreground color for a service state, if it has one.
pub fn service_color(state: ServiceState) -> Option<Color> {
    match state {
        ServiceState::Succeeded => Some(SUCCESS_COLOR),
        ServiceState::Updating | ServiceState::Unknown => Some(WAITING_COLOR),
        ServiceState::NotStarted => Some(NOT_STARTED_COLOR),
        ServiceState::Failed => Some(FAILED_COLOR),
        ServiceState::Created => None,
    }
}

/// Bold style for a status icon cell.
pub fn service_style(state: ServiceState) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match service_color(state) {
        Some(color) => style.fg(color),
        None => style,
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(HEADER_COLOR)
        .add_modifier(Modifier::BOLD)
}

pub fn footer_style() -> Style {
    Style::default()
        .fg(FOOTER_COLOR)
        .add_modifier(Modifier::ITALIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_glyphs() {
        assert_eq!(service_glyph(ServiceState::Succeeded, GlyphMode::Text), "✔");
        assert_eq!(service_glyph(ServiceState::Failed, GlyphMode::Text), "✘");
        assert_eq!(service_glyph(ServiceState::NotStarted, GlyphMode::Text), "┅");
        assert_eq!(
            service_glyph(ServiceState::Unknown, GlyphMode::Text),
            service_glyph(ServiceState::Updating, GlyphMode::Text)
        );
    }

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(service_glyph(ServiceState::Succeeded, GlyphMode::Icons), "✅");
        assert_eq!(service_glyph(ServiceState::Failed, GlyphMode::Icons), "❌");
        assert_eq!(service_glyph(ServiceState::Updating, GlyphMode::Icons), "⏳");
    }

    #[test]
    fn test_role_glyphs() {
        assert_eq!(role_glyph(true, GlyphMode::Text), "⏼");
        assert_eq!(role_glyph(false, GlyphMode::Text), " ");
        assert_eq!(role_glyph(true, GlyphMode::Icons), "🌕");
    }

    #[test]
    fn test_state_colors_are_distinct() {
        let colors = [
            service_color(ServiceState::Succeeded),
            service_color(ServiceState::Updating),
            service_color(ServiceState::NotStarted),
            service_color(ServiceState::Failed),
        ];
        for (i, a) in colors.iter().enumerate() {
            assert!(a.is_some());
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_service_style_is_bold() {
        let style = service_style(ServiceState::Created);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, None);
    }
}
