// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the application,
// or into local ViewState changes (focus, grid cursor, quit prompt).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pylon_core::candidate::ListKind;
use pylon_core::form::{FormPhase, FormState};
use pylon_core::validate::FieldId;

use super::{Focus, ViewState};
use crate::app::UserCommand;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press changes the form or asks
/// to quit, `None` when it was handled locally (or ignored).
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    form: &FormState,
) -> Option<UserCommand> {
    // Only presses; some terminals also report releases and repeats
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits immediately regardless of mode
    if ctrl && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match form.phase() {
        FormPhase::Submitting => return None,
        FormPhase::Submitted(_) => {
            return match key_event.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(UserCommand::Quit),
                _ => None,
            };
        }
        FormPhase::Editing | FormPhase::Blocked => {}
    }

    if ctrl && key_event.code == KeyCode::Char('s') {
        return Some(UserCommand::Submit);
    }

    match key_event.code {
        KeyCode::Tab => {
            view_state.focus = view_state.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            view_state.focus = view_state.focus.prev();
            return None;
        }
        _ => {}
    }

    match view_state.focus {
        Focus::Field(field) => handle_field_key(key_event, view_state, form, field),
        Focus::Grid(kind) => handle_grid_key(key_event, view_state, form, kind),
        Focus::Submit => match key_event.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(UserCommand::Submit),
            KeyCode::Esc | KeyCode::Char('q') => {
                view_state.confirm_quit = true;
                None
            }
            _ => None,
        },
    }
}

/// Handle key events while in quit confirmation mode.
///
/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Text entry. Enter never submits from a field; it advances focus.
fn handle_field_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    form: &FormState,
    field: FieldId,
) -> Option<UserCommand> {
    let current = form.fields.get(field);
    match key_event.code {
        KeyCode::Enter => {
            view_state.focus = view_state.focus.next();
            None
        }
        KeyCode::Esc => {
            view_state.focus = Focus::Grid(ListKind::Returning);
            None
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            Some(UserCommand::EditField { field, value })
        }
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut value = current.to_string();
            value.push(c);
            Some(UserCommand::EditField { field, value })
        }
        _ => None,
    }
}

fn handle_grid_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    form: &FormState,
    kind: ListKind,
) -> Option<UserCommand> {
    let list = form.selector.list(kind);
    let last_row = list.candidates().len().saturating_sub(1);

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor(view_state, kind, last_row, |row| row.saturating_sub(1));
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor(view_state, kind, last_row, |row| row + 1);
            None
        }
        KeyCode::PageUp => {
            move_cursor(view_state, kind, last_row, |row| row.saturating_sub(PAGE_SIZE));
            None
        }
        KeyCode::PageDown => {
            move_cursor(view_state, kind, last_row, |row| row + PAGE_SIZE);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            move_cursor(view_state, kind, last_row, |_| 0);
            None
        }
        KeyCode::End | KeyCode::Char('G') => {
            move_cursor(view_state, kind, last_row, |_| usize::MAX);
            None
        }

        KeyCode::Char(' ') => {
            let row = view_state.cursor(kind);
            let candidate = list.sorted_view().get(row)?;
            Some(UserCommand::Toggle {
                list: kind,
                id: candidate.id,
            })
        }

        // Column headers, left to right
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            let column = *list.spec().columns.get(index)?;
            let next = list.sort_state().cycle(column);
            *view_state.cursor_mut(kind) = 0;
            Some(UserCommand::Sort {
                list: kind,
                column_key: next.column_key,
                direction: next.direction,
            })
        }

        KeyCode::Esc | KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

fn move_cursor(
    view_state: &mut ViewState,
    kind: ListKind,
    last_row: usize,
    step: impl FnOnce(usize) -> usize,
) {
    let cursor = view_state.cursor_mut(kind);
    *cursor = step(*cursor).min(last_row);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
