//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: the row under the cursor (headings use the same green)
//! - Dim: the cursor row while the table is unfocused, borders
//! - Bold: column headers

use ratatui::style::{Color, Modifier, Style};

/// Column header row.
pub const STYLE_HEADER: Style = Style::new().add_modifier(Modifier::BOLD);

/// Table border.
pub const STYLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// Cursor row of a focused, selectable table.
pub const STYLE_CURSOR: Style = Style::new().fg(Color::White).bg(Color::Green);

/// Cursor row while focus is paused.
pub const STYLE_CURSOR_BLURRED: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Ordinary cells. Static tables use this for every row.
pub const STYLE_CELL: Style = Style::new();
