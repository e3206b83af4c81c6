//! Table session state: pure types, zero effects.
//!
//! A [`Session`] owns everything the interactive table needs: the full rows
//! (source of truth across resizes), the visible projection, the cursor and
//! the focus mode. The transition function in `update` consumes a session
//! and an [`Event`] and returns a [`Transition`].
//!
//! Terminal outcomes are not stored: they only exist as
//! [`Transition::Quit`], so a finished session cannot be driven further.

use crate::layout::TableLayout;
use crate::types::{Row, Schema, Selection};

// ============================================================================
// EVENTS
// ============================================================================

/// Semantic input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(Action),
    /// Terminal was resized. The new width drives the layout; the height
    /// bounds page movement.
    Resize { width: u16, height: u16 },
}

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    /// Pause or resume browsing (Esc).
    ToggleFocus,
    /// Pick the row under the cursor (Enter).
    Confirm,
    /// Leave without a selection (q, Ctrl+C).
    Quit,
}

// ============================================================================
// SESSION
// ============================================================================

/// Focus mode of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Static display. Terminates as soon as it starts.
    Idle,
    /// Focused: the cursor follows movement keys.
    Browsing,
    /// Blurred: the cursor is frozen until focus is toggled back.
    Unfocused,
}

/// Table rows plus the schema they were built for.
#[derive(Debug, Clone)]
pub struct TableData {
    pub schema: Schema,
    pub rows: Vec<Row>,
    /// Row the cursor starts on.
    pub active_index: usize,
    /// Selection reported by a non-interactive run.
    pub active_id: String,
}

/// State of one table invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub schema: Schema,
    /// Unprojected rows. Never modified after construction.
    pub rows: Vec<Row>,
    /// Projection of `rows` at the current width.
    pub layout: TableLayout,
    pub cursor: usize,
    pub mode: Mode,
    /// Rows moved by a page jump.
    pub page_height: usize,
    /// Result of a non-interactive run.
    pub active_id: String,
}

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep running with the updated session.
    Continue(Session),
    /// Stop the loop and hand this selection to the caller.
    Quit(Selection),
}

impl Session {
    /// Build a session sized for a terminal of `width` × `height`.
    ///
    /// Panics if a row does not have exactly one cell per schema column.
    pub fn new(table: TableData, selectable: bool, width: u16, height: u16) -> Self {
        let TableData {
            schema,
            rows,
            active_index,
            active_id,
        } = table;

        assert!(
            rows.iter().all(|r| r.len() == schema.len()),
            "row arity must match the {}-column schema",
            schema.len()
        );

        let layout = TableLayout::compute(&schema, &rows, width);
        let cursor = clamp_cursor(active_index, rows.len());
        let page_height = page_height_for(rows.len(), height);

        Session {
            schema,
            rows,
            layout,
            cursor,
            mode: if selectable { Mode::Browsing } else { Mode::Idle },
            page_height,
            active_id,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.mode != Mode::Idle
    }

    /// Identifier of the row under the cursor (its first cell).
    pub fn cursor_id(&self) -> Option<&str> {
        self.rows.get(self.cursor)?.first().map(String::as_str)
    }

    /// Lines the table occupies on screen: rows plus the frame.
    pub fn rendered_height(&self) -> u16 {
        u16::try_from(self.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(FRAME_OVERHEAD)
    }
}

/// Lines around the rows: top border, header, header gap, bottom border.
pub const FRAME_OVERHEAD: u16 = 4;

/// Clamp a cursor into `[0, len - 1]` (0 for an empty table).
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Rows visible at once in a terminal of `height` lines, at least one.
pub fn page_height_for(rows: usize, height: u16) -> usize {
    let available = usize::from(height.saturating_sub(FRAME_OVERHEAD));
    rows.min(available).max(1)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| (0..8).map(|c| format!("r{}c{}", i, c)).collect())
            .collect()
    }

    fn table(n: usize, active_index: usize) -> TableData {
        TableData {
            schema: Schema::profiles(),
            rows: rows(n),
            active_index,
            active_id: String::new(),
        }
    }

    #[test]
    fn selectable_session_starts_browsing_on_active_row() {
        let session = Session::new(table(3, 1), true, 200, 40);
        assert_eq!(session.mode, Mode::Browsing);
        assert_eq!(session.cursor, 1);
        assert_eq!(session.layout.columns.len(), 8);
    }

    #[test]
    fn static_session_starts_idle() {
        let session = Session::new(table(3, 0), false, 200, 40);
        assert_eq!(session.mode, Mode::Idle);
        assert!(!session.is_selectable());
    }

    #[test]
    fn out_of_range_active_index_is_clamped() {
        let session = Session::new(table(2, 9), true, 200, 40);
        assert_eq!(session.cursor, 1);
    }

    #[test]
    fn empty_table_has_no_cursor_id() {
        let session = Session::new(table(0, 0), true, 200, 40);
        assert_eq!(session.cursor, 0);
        assert_eq!(session.cursor_id(), None);
        assert_eq!(session.rendered_height(), FRAME_OVERHEAD);
    }

    #[test]
    #[should_panic(expected = "row arity")]
    fn short_row_is_rejected() {
        let mut data = table(1, 0);
        data.rows[0].pop();
        Session::new(data, true, 200, 40);
    }

    #[test]
    fn page_height_is_bounded_by_terminal() {
        assert_eq!(page_height_for(50, 14), 10);
        assert_eq!(page_height_for(3, 40), 3);
        assert_eq!(page_height_for(0, 40), 1);
        assert_eq!(page_height_for(10, 2), 1);
    }
}
