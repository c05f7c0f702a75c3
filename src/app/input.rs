use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{Message, Model};
use crate::editor::{Horizontal, Landing, Vertical};
use crate::ui::{LineInput, SurfaceTable};

/// Lines scrolled per mouse wheel step.
const WHEEL_STEP: usize = 3;

/// Translate a terminal event into a message.
///
/// Keys that a text input handles natively (printable chars, mid-line caret
/// motion, deleting inside a line) go to the cursor line's input first;
/// only what it reports back becomes a message.
pub fn handle_event(event: &Event, model: &Model, surfaces: &mut SurfaceTable) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(*key, model, surfaces),
        Event::Mouse(mouse) => handle_mouse(*mouse, surfaces),
        Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
        _ => None,
    }
}

fn handle_key(key: KeyEvent, model: &Model, surfaces: &mut SurfaceTable) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let mut detached = None;

    match key.code {
        KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
        KeyCode::F(2) => Some(Message::ToggleInspector),
        KeyCode::Enter => Some(Message::AddLineAtCursor),
        KeyCode::Up => Some(Message::MoveVertical(Vertical::Up, Landing::PreserveColumn)),
        KeyCode::Down => Some(Message::MoveVertical(
            Vertical::Down,
            Landing::PreserveColumn,
        )),
        KeyCode::Left => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            Some(input.move_left().map_or(
                Message::MoveHorizontal(Horizontal::Left),
                |caret| Message::SetPosition(line, caret),
            ))
        }
        KeyCode::Right => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            Some(input.move_right().map_or(
                Message::MoveHorizontal(Horizontal::Right),
                |caret| Message::SetPosition(line, caret),
            ))
        }
        KeyCode::Home => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            Some(Message::SetPosition(line, input.move_home()))
        }
        KeyCode::End => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            Some(Message::SetPosition(line, input.move_end()))
        }
        KeyCode::Backspace => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            Some(input.backspace().map_or(
                Message::DeleteBackwardAtLineStart,
                |edit| Message::Edit {
                    line,
                    text: edit.text,
                    caret: edit.caret,
                },
            ))
        }
        KeyCode::Delete => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            let edit = input.delete_forward()?;
            Some(Message::Edit {
                line,
                text: edit.text,
                caret: edit.caret,
            })
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let (line, input) = target(model, surfaces, &mut detached)?;
            let edit = input.insert_char(ch);
            Some(Message::Edit {
                line,
                text: edit.text,
                caret: edit.caret,
            })
        }
        // Tab is swallowed; there is no indentation model.
        _ => None,
    }
}

fn handle_mouse(mouse: MouseEvent, surfaces: &mut SurfaceTable) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let row = surfaces.row_at(mouse.row)?;
            let col = usize::from(mouse.column.saturating_sub(row.x));
            let input = surfaces.get_mut(row.slot)?;
            let caret = input.click(row.hidden, col);
            Some(Message::SetPosition(row.line, caret))
        }
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_STEP)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_STEP)),
        _ => None,
    }
}

/// The input native keys act on, and the cursor line it belongs to.
///
/// That is the focused surface when it belongs to the cursor line and
/// shows the line's current text. Between a structural edit or a line
/// change and the next draw it does not: the old line keeps focus until
/// the queued request resolves. Keys in that window go to a detached input
/// over the cursor line instead, placed at the cursor.
fn target<'a>(
    model: &Model,
    surfaces: &'a mut SurfaceTable,
    detached: &'a mut Option<LineInput>,
) -> Option<(usize, &'a mut LineInput)> {
    let cursor = model.editor.cursor();
    let line = model.editor.lines().get(cursor.line)?;
    let in_sync = surfaces
        .focused()
        .is_some_and(|input| input.slot() == line.slot() && input.text() == line.text());
    if in_sync {
        return surfaces.focused_mut().map(|input| (cursor.line, input));
    }
    tracing::trace!(
        line = cursor.line,
        column = cursor.column,
        "focused surface is stale, editing cursor line directly"
    );
    let input = detached.insert(LineInput::detached(line.slot(), line.text(), cursor.column));
    Some((cursor.line, input))
}
