use serde::Serialize;

use super::buffer::{Line, LineBuffer};
use super::cursor::{Cursor, Horizontal, HorizontalMove, Landing, Vertical};
use super::focus::{FocusReconciler, PostAction, SurfaceRegistry, TickReport};
use super::transform::{self, Display, Rule};

/// Lines the editor opens with when no file is given.
pub const GREETING: [&str; 3] = ["👋🏻 Hello world", "How are you?", "I'm fine, thank you!"];

/// Serializable view of the editor state, shown by the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSnapshot {
    pub line: usize,
    pub column: usize,
    pub lines: Vec<String>,
    pub pending_focus: usize,
}

/// Line buffer, cursor and focus queue behind one set of commands.
///
/// Every command keeps the cursor inside the buffer, so the lower layers
/// never see out-of-range positions from here.
#[derive(Debug)]
pub struct Editor {
    buffer: LineBuffer,
    cursor: Cursor,
    focus: FocusReconciler,
}

impl Editor {
    pub fn new(buffer: LineBuffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            focus: FocusReconciler::new(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(LineBuffer::from_text(text))
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn lines(&self) -> &[Line] {
        self.buffer.lines()
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Unresolved focus requests.
    pub fn pending_focus(&self) -> usize {
        self.focus.pending()
    }

    /// Transformation rule for a line, if any.
    pub fn classify(&self, line: usize) -> Option<&'static Rule> {
        self.buffer.text_at(line).and_then(transform::classify)
    }

    /// Displayed form of a line for the current cursor.
    pub fn display(&self, line: usize) -> Option<Display<'_>> {
        self.buffer
            .text_at(line)
            .map(|text| transform::display(text, line == self.cursor.line))
    }

    /// Replace a line's text. The cursor column is re-clamped if it now
    /// points past the end.
    pub fn edit(&mut self, line: usize, text: impl Into<String>) {
        if self.buffer.edit(line, text) {
            self.cursor = self.cursor.clamped(&self.buffer);
        }
    }

    /// Adopt the caret reported by a surface.
    pub fn set_position(&mut self, line: usize, column: usize) {
        let clamped = Cursor::at(line, column).clamped(&self.buffer);
        self.cursor.set_position(clamped.line, clamped.column);
    }

    /// Split the cursor line at the cursor ("insert line break").
    pub fn add_line_at_cursor(&mut self) {
        let Some(split) = self.buffer.split(self.cursor.line, self.cursor.column) else {
            return;
        };
        self.buffer = split.buffer;
        self.cursor = split.cursor;
        self.focus
            .enqueue(self.cursor.line, Some(PostAction::CollapseTo(0)));
    }

    /// Backspace at column 0: merge the cursor line into the previous one.
    /// Returns `false` when nothing happened (first line, or mid-line).
    pub fn delete_backward_at_line_start(&mut self) -> bool {
        if self.cursor.column != 0 {
            return false;
        }
        let Some(merge) = self.buffer.merge(self.cursor.line) else {
            return false;
        };
        self.buffer = merge.buffer;
        self.cursor = merge.cursor;
        self.focus.enqueue(
            self.cursor.line,
            Some(PostAction::CollapseBeforeTail {
                tail_len: merge.appended_len,
            }),
        );
        true
    }

    /// Move to the previous/next line. No-op at the document edges.
    pub fn move_vertical(&mut self, dir: Vertical, landing: Landing) -> bool {
        let moved = self.cursor.move_vertical(&self.buffer, dir, landing);
        if moved {
            self.request_focus();
        }
        moved
    }

    /// Horizontal motion at a line boundary crosses lines; mid-line motion
    /// is left to the surface.
    pub fn move_horizontal(&mut self, dir: Horizontal) -> HorizontalMove {
        let outcome = self.cursor.move_horizontal(&self.buffer, dir);
        if outcome == HorizontalMove::Crossed {
            self.request_focus();
        }
        outcome
    }

    /// Ask for the cursor line's surface to take focus with the caret at the
    /// cursor column.
    pub fn request_focus(&mut self) {
        self.focus
            .enqueue(self.cursor.line, Some(PostAction::CollapseTo(self.cursor.column)));
    }

    /// Run one focus reconciliation tick against the current state. The
    /// caret of the last resolved request is adopted as the cursor column.
    pub fn reconcile_focus<R>(&mut self, registry: &mut R) -> TickReport
    where
        R: SurfaceRegistry + ?Sized,
    {
        let report = self.focus.tick(&self.buffer, self.cursor, registry);
        if let Some((line, caret)) = report.last_caret() {
            self.set_position(line, caret);
        }
        report
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            line: self.cursor.line,
            column: self.cursor.column,
            lines: self
                .buffer
                .lines()
                .iter()
                .map(|l| l.text().to_string())
                .collect(),
            pending_focus: self.focus.pending(),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(LineBuffer::from_lines(GREETING))
    }
}
