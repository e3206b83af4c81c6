//! Pure rendering: map a Session to a ratatui table.
//!
//! The table sits in a rounded border with the header separated from the
//! rows by one blank line, which is what [`FRAME_OVERHEAD`] accounts for.
//!
//! [`FRAME_OVERHEAD`]: super::state::FRAME_OVERHEAD

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, BorderType, Row, StatefulWidget, Table, TableState};

use super::state::{Mode, Session};
use super::theme;

/// Gap between columns.
const COLUMN_SPACING: u16 = 1;

/// Render the session into the frame.
pub fn render(session: &Session, frame: &mut Frame) {
    let area = frame.area();
    let mut state = table_state(session);
    frame.render_stateful_widget(table(session), area, &mut state);
}

/// Render the session into an off-screen buffer and return its lines.
///
/// Used for static tables so they print without taking over the terminal.
/// Trailing blanks of each line are trimmed.
pub fn render_lines(session: &Session, width: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, session.rendered_height());
    let mut buffer = Buffer::empty(area);
    let mut state = table_state(session);
    StatefulWidget::render(table(session), area, &mut buffer, &mut state);

    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Outer width of the table: visible columns, spacing, borders.
pub fn frame_width(session: &Session) -> u16 {
    let columns = session.layout.columns.len() as u16;
    session.layout.width() + COLUMN_SPACING * columns.saturating_sub(1) + 2
}

fn table_state(session: &Session) -> TableState {
    TableState::default().with_selected(Some(session.cursor))
}

fn table(session: &Session) -> Table<'_> {
    let widths: Vec<Constraint> = session
        .layout
        .columns
        .iter()
        .map(|c| Constraint::Length(c.width))
        .collect();

    let header = Row::new(session.layout.columns.iter().map(|c| c.title))
        .style(theme::STYLE_HEADER)
        .bottom_margin(1);

    let rows = session
        .layout
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().map(String::as_str)).style(theme::STYLE_CELL));

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::STYLE_BORDER);

    Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(cursor_style(session.mode))
}

fn cursor_style(mode: Mode) -> ratatui::style::Style {
    match mode {
        Mode::Browsing => theme::STYLE_CURSOR,
        Mode::Unfocused => theme::STYLE_CURSOR_BLURRED,
        Mode::Idle => theme::STYLE_CELL,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::profile_rows;
    use crate::tui::state::TableData;
    use crate::types::{Profile, ProfileAuth, Schema};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn session(width: u16, selectable: bool) -> Session {
        let profiles = vec![
            Profile {
                id: "a".into(),
                name: "Alpha".into(),
                hostname: "alpha.dev".into(),
                port: 22,
                auth: ProfileAuth {
                    user: "root".into(),
                    password: Some("secret".into()),
                    private_key_path: None,
                },
            },
            Profile::builtin_default(),
        ];
        let (rows, active_index) = profile_rows(&profiles, "a");
        let table = TableData {
            schema: Schema::profiles(),
            rows,
            active_index,
            active_id: "a".into(),
        };
        Session::new(table, selectable, width, 24)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_headers_and_masked_password() {
        let s = session(200, true);
        let mut terminal = Terminal::new(TestBackend::new(140, s.rendered_height())).unwrap();
        terminal.draw(|frame| render(&s, frame)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Hostname"));
        assert!(content.contains("SSH private key path"));
        assert!(content.contains("******"));
        assert!(!content.contains("secret"));
    }

    #[test]
    fn narrow_session_hides_later_columns() {
        let s = session(25, true);
        let mut terminal = Terminal::new(TestBackend::new(40, s.rendered_height())).unwrap();
        terminal.draw(|frame| render(&s, frame)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Id"));
        assert!(!content.contains("Name"));
        assert!(!content.contains("Alpha"));
    }

    #[test]
    fn zero_column_table_renders_without_panic() {
        let s = session(0, true);
        let mut terminal = Terminal::new(TestBackend::new(10, s.rendered_height())).unwrap();
        terminal
            .draw(|frame| render(&s, frame))
            .expect("render should not panic");
    }

    #[test]
    fn static_lines_match_rendered_height() {
        let s = session(200, false);
        let lines = render_lines(&s, frame_width(&s));
        assert_eq!(lines.len(), usize::from(s.rendered_height()));
        assert!(lines[0].starts_with('╭'));
        assert!(lines[1].contains("Id"));
        assert!(lines[3].contains("Alpha"));
        assert!(lines[4].contains("default"));
        assert!(lines[5].starts_with('╰'));
    }

    #[test]
    fn frame_width_counts_spacing_and_borders() {
        let s = session(25, false);
        assert_eq!(frame_width(&s), 12);
        let s = session(200, false);
        assert_eq!(frame_width(&s), 110 + 7 + 2);
    }
}
