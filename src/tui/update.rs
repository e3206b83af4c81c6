//! Pure state transitions: (Session, Event) → Transition.
//!
//! Fully testable without a terminal. Every mode handles every event
//! explicitly; movement is only honoured while browsing.

use crate::layout::TableLayout;
use crate::types::Selection;

use super::state::{Action, Event, Mode, Session, Transition, clamp_cursor, page_height_for};

/// First transition of a session, before any input.
///
/// Static tables terminate immediately with the pre-supplied active id;
/// interactive ones wait for input.
pub fn init(session: Session) -> Transition {
    match session.mode {
        Mode::Idle => Transition::Quit(Selection::from_id(&session.active_id)),
        Mode::Browsing | Mode::Unfocused => Transition::Continue(session),
    }
}

/// Pure state transition function.
pub fn update(session: Session, event: &Event) -> Transition {
    match event {
        Event::Resize { width, height } => Transition::Continue(resize(session, *width, *height)),
        Event::Key(action) => match session.mode {
            Mode::Idle => update_idle(session, *action),
            Mode::Browsing => update_browsing(session, *action),
            Mode::Unfocused => update_unfocused(session, *action),
        },
    }
}

// ============================================================================
// PER-MODE HANDLERS
// ============================================================================

/// Idle: nothing to browse, only quitting is meaningful.
fn update_idle(session: Session, action: Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit(Selection::Cancelled),
        _ => Transition::Continue(session),
    }
}

fn update_browsing(mut session: Session, action: Action) -> Transition {
    let len = session.rows.len();
    let page = session.page_height;
    let half = (page / 2).max(1);

    let cursor = session.cursor;
    let next = match action {
        Action::ToggleFocus => {
            session.mode = Mode::Unfocused;
            cursor
        }
        Action::Quit => return Transition::Quit(Selection::Cancelled),
        Action::Confirm => return confirm(&session),
        Action::MoveUp => cursor.saturating_sub(1),
        Action::MoveDown => clamp_cursor(cursor + 1, len),
        Action::PageUp => cursor.saturating_sub(page),
        Action::PageDown => clamp_cursor(cursor + page, len),
        Action::HalfPageUp => cursor.saturating_sub(half),
        Action::HalfPageDown => clamp_cursor(cursor + half, len),
        Action::Top => 0,
        Action::Bottom => clamp_cursor(len, len),
    };

    session.cursor = next;
    Transition::Continue(session)
}

/// Unfocused: the cursor is frozen, but confirming and quitting still work.
fn update_unfocused(mut session: Session, action: Action) -> Transition {
    match action {
        Action::ToggleFocus => {
            session.mode = Mode::Browsing;
            Transition::Continue(session)
        }
        Action::Quit => Transition::Quit(Selection::Cancelled),
        Action::Confirm => confirm(&session),
        Action::MoveUp
        | Action::MoveDown
        | Action::PageUp
        | Action::PageDown
        | Action::HalfPageUp
        | Action::HalfPageDown
        | Action::Top
        | Action::Bottom => Transition::Continue(session),
    }
}

/// Select the first cell of the row under the cursor.
fn confirm(session: &Session) -> Transition {
    let selection = session
        .cursor_id()
        .map(Selection::from_id)
        .unwrap_or(Selection::Cancelled);
    Transition::Quit(selection)
}

/// Re-fit the layout to a new terminal size.
///
/// The projection is rebuilt from the full rows, never from the previous
/// projection. Focus mode is preserved.
fn resize(mut session: Session, width: u16, height: u16) -> Session {
    session.layout = TableLayout::compute(&session.schema, &session.rows, width);
    session.cursor = clamp_cursor(session.cursor, session.rows.len());
    session.page_height = page_height_for(session.rows.len(), height);
    tracing::debug!(
        width,
        height,
        visible_columns = session.layout.columns.len(),
        "table resized"
    );
    session
}

// ============================================================================
// TESTS
// ============================================================================
