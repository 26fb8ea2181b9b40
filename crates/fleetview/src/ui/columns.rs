//! Static column schema of the machine table.

use crate::config::GlyphMode;
use fleetview_core::STATUS_WIDTH;

/// Columns the progress bar leaves free inside its cell.
pub const PROGRESS_PADDING: usize = 2;

/// One column of the machine table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColumn {
    /// Header in text mode.
    pub title: &'static str,
    /// Header in icon mode, for icon columns.
    pub icon_title: Option<&'static str>,
    /// Fixed width in terminal columns.
    pub width: usize,
    /// Icon columns are centered and hold a single status glyph.
    pub icon_column: bool,
}

impl DisplayColumn {
    const fn text(title: &'static str, width: usize) -> Self {
        Self {
            title,
            icon_title: None,
            width,
            icon_column: false,
        }
    }

    const fn icon(title: &'static str, icon_title: &'static str) -> Self {
        Self {
            title,
            icon_title: Some(icon_title),
            width: 2,
            icon_column: true,
        }
    }

    /// Header text for the given glyph mode.
    pub fn header(&self, mode: GlyphMode) -> &'static str {
        match (mode, self.icon_title) {
            (GlyphMode::Icons, Some(icon)) => icon,
            _ => self.title,
        }
    }
}

pub const NAME: DisplayColumn = DisplayColumn::text("Name", 10);
pub const TYPE: DisplayColumn = DisplayColumn::text("Type", 6);
pub const LOCATION: DisplayColumn = DisplayColumn::text("Location", 16);
pub const STATUS: DisplayColumn = DisplayColumn::text("Status", STATUS_WIDTH);
pub const PROGRESS: DisplayColumn = DisplayColumn::text("Progress", 20);
pub const TIME: DisplayColumn = DisplayColumn::text("Time", 8);
pub const PUBLIC_IP: DisplayColumn = DisplayColumn::text("Pub IP", 19);
pub const PRIVATE_IP: DisplayColumn = DisplayColumn::text("Priv IP", 19);
pub const ORCHESTRATOR: DisplayColumn = DisplayColumn::icon("O", "🤖");
pub const SSH: DisplayColumn = DisplayColumn::icon("S", "🔑");
pub const DOCKER: DisplayColumn = DisplayColumn::icon("D", "🐳");
pub const BACALHAU: DisplayColumn = DisplayColumn::icon("B", "🐟");

/// All columns in render order.
pub const DISPLAY_COLUMNS: [DisplayColumn; 12] = [
    NAME,
    TYPE,
    LOCATION,
    STATUS,
    PROGRESS,
    TIME,
    PUBLIC_IP,
    PRIVATE_IP,
    ORCHESTRATOR,
    SSH,
    DOCKER,
    BACALHAU,
];

/// Sum of all column widths.
pub fn aggregate_width() -> usize {
    DISPLAY_COLUMNS.iter().map(|column| column.width).sum()
}

/// Width available to the progress bar glyphs.
pub fn progress_budget() -> usize {
    PROGRESS.width.saturating_sub(PROGRESS_PADDING)
}
