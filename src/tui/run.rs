//! TUI effects boundary: terminal lifecycle, key mapping, render thread.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: an interactive table runs on its own thread, which owns
//! the terminal, raw mode and the [`Session`]. The caller blocks on a
//! single-slot channel until that thread sends exactly one result, joins
//! it, then erases the lines the table occupied.

use std::io::{self, Write};
use std::sync::{Once, mpsc};
use std::thread;

use crossterm::cursor::{MoveTo, MoveToPreviousLine};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, tty::IsTty};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Schema, Selection};

use super::state::{Action, Event, Session, TableData, Transition};
use super::update::{init, update};
use super::view::{frame_width, render, render_lines};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::ToggleFocus),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Action::PageUp),
        KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::Char('u') => Some(Action::HalfPageUp),
        KeyCode::Char('d') => Some(Action::HalfPageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),

        _ => None,
    }
}

/// Translate a raw terminal event into a state machine event.
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => map_key(key).map(Event::Key),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

// ============================================================================
// TERMINAL SIZE
// ============================================================================

/// Size of the terminal attached to stdout.
///
/// Without a real terminal the width falls back to the first column of the
/// schema, the narrowest projection that still shows identifiers.
pub fn terminal_size(schema: &Schema) -> (u16, u16, bool) {
    let tty = io::stdout().is_tty();
    match terminal::size() {
        Ok((width, height)) if tty => (width, height, true),
        _ => {
            let width = schema.columns().first().map_or(0, |c| c.width);
            (width, u16::MAX, false)
        }
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Attach an inline viewport of `height` lines below the cursor.
fn setup_terminal(height: u16) -> io::Result<Term> {
    enable_raw_mode()?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )
}

/// Leave raw mode with the cursor on the line just below the table.
///
/// Raw mode is left even when repositioning the cursor fails.
fn restore_terminal(terminal: &mut Term, area: Rect) -> io::Result<()> {
    let repositioned = terminal.show_cursor().and_then(|()| {
        execute!(
            terminal.backend_mut(),
            MoveTo(0, area.bottom().saturating_sub(1)),
            Print("\r\n")
        )
    });
    first_error(repositioned, disable_raw_mode())
}

/// Combine two cleanup steps that both ran, keeping the earlier failure.
fn first_error(first: io::Result<()>, second: io::Result<()>) -> io::Result<()> {
    first.and(second)
}

/// Install a panic hook that leaves raw mode before printing the panic.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Best-effort terminal restoration
            let _ = disable_raw_mode();
            original_hook(panic_info);
        }));
    });
}

/// Erase the `lines` lines above the cursor.
fn clear_lines(lines: u16) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        MoveToPreviousLine(lines),
        Clear(ClearType::FromCursorDown)
    )
}

// ============================================================================
// RENDER THREAD
// ============================================================================

/// Draw, read, update until the session reaches a terminal state.
///
/// Returns the selection and the area last drawn to.
fn event_loop(terminal: &mut Term, session: Session) -> io::Result<(Selection, Rect)> {
    let mut session = match init(session) {
        Transition::Continue(session) => session,
        Transition::Quit(selection) => return Ok((selection, Rect::default())),
    };

    loop {
        let area = terminal.draw(|frame| render(&session, frame))?.area;

        let Some(event) = translate(event::read()?) else {
            continue;
        };

        session = match update(session, &event) {
            Transition::Continue(next) => next,
            Transition::Quit(selection) => return Ok((selection, area)),
        };
    }
}

/// Body of the render thread: own the terminal for one session.
fn drive_terminal(session: Session, height: u16) -> io::Result<Selection> {
    let mut terminal = match setup_terminal(height) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    match event_loop(&mut terminal, session) {
        Ok((selection, area)) => {
            restore_terminal(&mut terminal, area)?;
            Ok(selection)
        }
        Err(e) => {
            let _ = disable_raw_mode();
            Err(e)
        }
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Show a table and, if `selectable`, let the user pick a row.
///
/// Static tables are printed once and report the table's active id.
/// Interactive tables block until the user confirms (the row's id) or
/// quits ([`Selection::Cancelled`]), then vanish from the terminal.
pub fn run(table: TableData, selectable: bool) -> Result<Selection> {
    let (width, height, tty) = terminal_size(&table.schema);
    let session = Session::new(table, selectable, width, height);
    debug!(
        rows = session.rows.len(),
        width,
        visible_columns = session.layout.columns.len(),
        selectable,
        "starting table session"
    );

    if !session.is_selectable() {
        let print_width = if tty {
            frame_width(&session).min(width)
        } else {
            frame_width(&session)
        };
        print_static(&session, print_width)?;
        return match init(session) {
            Transition::Quit(selection) => Ok(selection),
            Transition::Continue(_) => Ok(Selection::Cancelled),
        };
    }

    run_interactive(session, height)
}

fn print_static(session: &Session, width: u16) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in render_lines(session, width) {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()
}

fn run_interactive(session: Session, terminal_height: u16) -> Result<Selection> {
    install_panic_hook();

    let viewport_height = session.rendered_height().min(terminal_height);
    let selection = hand_off(move || drive_terminal(session, viewport_height))?;

    clear_lines(viewport_height)?;
    info!(selection = ?selection.id(), "table selection made");
    Ok(selection)
}

/// Run `work` on the render thread and block until it reports back.
///
/// The thread sends exactly one message through a single-slot channel. A
/// terminal failure arrives as [`Error::Terminal`]; a thread that dies
/// without sending is [`Error::RenderThread`].
fn hand_off<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<io::Result<T>>(1);

    let handle = thread::Builder::new()
        .name("table-render".to_string())
        .spawn(move || {
            let result = work();
            // The caller only goes away by panicking; nothing to report then.
            let _ = tx.send(result);
        })?;

    let received = rx.recv();
    handle.join().map_err(|_| Error::RenderThread)?;

    match received {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::Terminal(e)),
        Err(_) => Err(Error::RenderThread),
    }
}

// ============================================================================
// TESTS
// ============================================================================
