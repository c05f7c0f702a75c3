use crate::app::Model;
use crate::editor::{Horizontal, Landing, Vertical};

/// All possible events and actions in the application.
///
/// Input handlers translate terminal events (and native surface edits) into
/// these; [`update`] applies them to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// A surface changed its line's text and reports its caret
    Edit {
        line: usize,
        text: String,
        caret: usize,
    },
    /// Split the cursor line at the cursor (Enter)
    AddLineAtCursor,
    /// Backspace at column 0: merge into the previous line
    DeleteBackwardAtLineStart,

    // Cursor
    /// A surface reports its caret (click, native caret motion, focus)
    SetPosition(usize, usize),
    /// Move to the previous/next line
    MoveVertical(Vertical, Landing),
    /// Horizontal motion at a line boundary
    MoveHorizontal(Horizontal),

    // View
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Show or hide the debug inspector
    ToggleInspector,
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// All editor state transitions happen here. Focus requests queued by the
/// editor are resolved later by the event loop, after the next draw.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::Edit { line, text, caret } => {
            model.editor.edit(line, text);
            adopt_caret(&mut model, line, caret);
        }
        Message::AddLineAtCursor => {
            model.editor.add_line_at_cursor();
            model.ensure_cursor_visible();
        }
        Message::DeleteBackwardAtLineStart => {
            model.editor.delete_backward_at_line_start();
            model.ensure_cursor_visible();
        }

        // Cursor
        Message::SetPosition(line, column) => {
            adopt_caret(&mut model, line, column);
        }
        Message::MoveVertical(dir, landing) => {
            model.editor.move_vertical(dir, landing);
            model.ensure_cursor_visible();
        }
        Message::MoveHorizontal(dir) => {
            model.editor.move_horizontal(dir);
            model.ensure_cursor_visible();
        }

        // View
        Message::ScrollUp(n) => {
            model.scroll_by(-isize::try_from(n).unwrap_or(isize::MAX));
        }
        Message::ScrollDown(n) => {
            model.scroll_by(isize::try_from(n).unwrap_or(isize::MAX));
        }
        Message::ToggleInspector => {
            model.inspector_visible = !model.inspector_visible;
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

/// Take a caret reported by input. A focus request still queued from an
/// earlier edit would put the caret back where that edit left it, so the
/// new caret is queued behind it.
fn adopt_caret(model: &mut Model, line: usize, column: usize) {
    model.editor.set_position(line, column);
    if model.editor.pending_focus() > 0 {
        model.editor.request_focus();
    }
    model.ensure_cursor_visible();
}
