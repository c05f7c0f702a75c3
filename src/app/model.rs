use std::path::PathBuf;

use crate::editor::Editor;

/// The complete application state.
///
/// All state lives here - no global or scattered state. Mounted surfaces
/// belong to the rendering layer and live beside the model, not in it.
pub struct Model {
    /// The editor core: lines, cursor, pending focus requests
    pub editor: Editor,
    /// File the buffer was seeded from, if any
    pub source_path: Option<PathBuf>,
    /// Index of the first visible line
    pub scroll_offset: usize,
    /// Terminal width
    pub width: u16,
    /// Terminal height, status bar included
    pub height: u16,
    /// Whether the debug inspector overlay is visible
    pub inspector_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("source_path", &self.source_path)
            .field("cursor", &self.editor.cursor())
            .field("lines", &self.editor.lines().len())
            .field("scroll_offset", &self.scroll_offset)
            .field("inspector_visible", &self.inspector_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model for a terminal of the given size.
    pub fn new(editor: Editor, terminal_size: (u16, u16)) -> Self {
        Self {
            editor,
            source_path: None,
            scroll_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            inspector_visible: false,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn with_source_path(mut self, path: Option<PathBuf>) -> Self {
        self.source_path = path;
        self
    }

    #[must_use]
    pub const fn with_inspector(mut self, visible: bool) -> Self {
        self.inspector_visible = visible;
        self
    }

    /// Rows available for lines (the status bar takes one).
    pub const fn text_rows(&self) -> usize {
        self.height.saturating_sub(1) as usize
    }

    /// Keep the cursor line on screen, margins included.
    pub fn ensure_cursor_visible(&mut self) {
        let cursor_line = self.editor.cursor().line;
        let last_line = self.editor.lines().len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(last_line);
        let visible = self.text_rows();
        if visible == 0 || cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
            return;
        }
        while self.scroll_offset < cursor_line
            && self.rows_between(self.scroll_offset, cursor_line) > visible
        {
            self.scroll_offset += 1;
        }
    }

    /// Scroll the view without moving the cursor.
    pub fn scroll_by(&mut self, delta: isize) {
        let last_line = self.editor.lines().len().saturating_sub(1);
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(last_line);
    }

    // The first visible line never draws its top margin.
    fn rows_between(&self, first: usize, last: usize) -> usize {
        1 + (first + 1..=last)
            .map(|line| crate::ui::line_rows(&self.editor, line))
            .sum::<usize>()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Editor::default(), (80, 24))
    }
}
