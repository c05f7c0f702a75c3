//! Debug inspector overlay: cursor and raw lines as JSON.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use serde_json::json;

use crate::editor::Editor;

const MAX_WIDTH: u16 = 48;

/// Pretty JSON shown in the overlay.
pub fn inspector_text(editor: &Editor) -> String {
    let snapshot = editor.snapshot();
    let position = json!({ "line": snapshot.line, "column": snapshot.column });
    let position = serde_json::to_string_pretty(&position).unwrap_or_default();
    let lines = serde_json::to_string_pretty(&snapshot.lines).unwrap_or_default();
    format!(
        "{position}\n{lines}\npending focus: {}",
        snapshot.pending_focus
    )
}

/// Draw the overlay in the top-right corner of `area`.
pub fn render_inspector(editor: &Editor, frame: &mut Frame, area: Rect) {
    let text = inspector_text(editor);
    let content_width = text
        .lines()
        .map(|l| u16::try_from(l.len()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(0);
    let width = content_width.saturating_add(2).min(MAX_WIDTH).min(area.width);
    let height = u16::try_from(text.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let popup = Rect {
        x: area.right().saturating_sub(width),
        y: area.y,
        width,
        height,
    };
    let block = Block::default()
        .title("Inspector")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::LineBuffer;

    #[test]
    fn test_inspector_text_shows_position_and_lines() {
        let mut editor = Editor::new(LineBuffer::from_lines(["# a", "b"]));
        editor.set_position(1, 1);
        let text = inspector_text(&editor);
        assert!(text.contains("\"line\": 1"), "{text}");
        assert!(text.contains("\"column\": 1"), "{text}");
        assert!(text.contains("\"# a\""), "{text}");
        assert!(text.contains("pending focus: 0"), "{text}");
    }
}
