use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::editor::{Editor, RuleKind};

use super::surface::{RowHit, SurfaceTable};
use super::{inspector, style};

/// Split the frame into the editing area and the one-row status bar.
pub fn split_editor_area(area: Rect) -> (Rect, Rect) {
    let editor_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    (editor_area, status_area)
}

/// Render the complete UI.
///
/// This is also where surfaces get mounted: after a draw every line in the
/// buffer has a surface in `surfaces`, and the hit-test rows describe what
/// is on screen.
pub fn render(model: &Model, surfaces: &mut SurfaceTable, frame: &mut Frame) {
    let area = frame.area();
    let (editor_area, status_area) = split_editor_area(area);

    surfaces.mount(model.editor.lines());
    render_lines(model, surfaces, frame, editor_area);
    render_status_bar(model, frame, status_area);

    if model.inspector_visible {
        inspector::render_inspector(&model.editor, frame, editor_area);
    }
}

fn render_lines(model: &Model, surfaces: &mut SurfaceTable, frame: &mut Frame, area: Rect) {
    let editor = &model.editor;
    let total_lines = editor.lines().len();
    let gutter_width = line_number_width(total_lines);
    let text_x = area.x + gutter_width + 1;
    let bottom = area.y + area.height;
    let cursor_line = editor.cursor().line;

    let mut content: Vec<Line> = Vec::new();
    let mut rows = Vec::new();
    let mut y = area.y;

    for line_idx in model.scroll_offset..total_lines {
        let Some(shown) = editor.display(line_idx) else {
            break;
        };
        let margins = shown.rule.map(|r| r.margins).unwrap_or_default();
        let above = if content.is_empty() { 0 } else { margins.above };
        for _ in 0..above {
            if y >= bottom {
                break;
            }
            content.push(Line::default());
            y += 1;
        }
        if y >= bottom {
            break;
        }

        let gutter = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let gutter_style = if line_idx == cursor_line {
            style::gutter_active_style()
        } else {
            style::gutter_style()
        };
        let mut spans = vec![Span::styled(gutter, gutter_style)];

        if margins.left > 0 {
            let bar = if shown.rule.is_some_and(|r| r.kind == RuleKind::BlockQuote) {
                "│"
            } else {
                " "
            };
            let pad = " ".repeat(usize::from(margins.left.saturating_sub(1)));
            spans.push(Span::styled(format!("{bar}{pad}"), style::quote_bar_style()));
        }
        if let Some(indicator) = shown.indicator {
            spans.push(Span::styled(indicator.to_string(), style::indicator_style()));
        }
        let text_style = shown
            .rule
            .map_or_else(Style::default, |r| style::style_for_rule(r.kind));
        spans.push(Span::styled(shown.text.to_string(), text_style));
        content.push(Line::from(spans));

        if let Some(line) = editor.lines().get(line_idx) {
            rows.push(RowHit {
                y,
                x: text_x + margins.left,
                line: line_idx,
                slot: line.slot(),
                hidden: shown.hidden_prefix_len(),
            });
        }
        y += 1;
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);

    if let Some(position) = caret_position(surfaces, &rows, area) {
        frame.set_cursor_position(position);
    }
    surfaces.set_rows(rows);
}

/// Terminal position of the focused surface's caret, when its line is on
/// screen.
fn caret_position(surfaces: &SurfaceTable, rows: &[RowHit], area: Rect) -> Option<Position> {
    let focused = surfaces.focused()?;
    let row = rows.iter().find(|row| row.slot == focused.slot())?;
    let text = focused.text();
    let caret = focused.caret().max(row.hidden);
    let before = text.get(row.hidden..caret).unwrap_or_default();
    let width = u16::try_from(before.width()).unwrap_or(u16::MAX);
    let x = row
        .x
        .saturating_add(width)
        .min(area.right().saturating_sub(1));
    Some(Position::new(x, row.y))
}

fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let name = model.source_path.as_ref().map_or_else(
        || "scratch".to_string(),
        |p| {
            p.file_name()
                .map_or_else(|| p.display().to_string(), |s| s.to_string_lossy().to_string())
        },
    );
    let cursor = model.editor.cursor();
    let kind = model
        .editor
        .classify(cursor.line)
        .map_or_else(String::new, |rule| format!("  [{}]", rule_label(rule.kind)));
    let status = format!(
        " EDIT  {name}  Ln {}, Col {}{kind}  Enter:split  F2:inspector  Ctrl+Q:quit",
        cursor.line + 1,
        cursor.column + 1
    );
    frame.render_widget(Paragraph::new(status).style(style::status_style()), area);
}

fn rule_label(kind: RuleKind) -> String {
    match kind {
        RuleKind::Heading(level) => format!("h{level}"),
        RuleKind::BlockQuote => "quote".to_string(),
    }
}

/// Rows a line occupies on screen, margins included.
pub fn line_rows(editor: &Editor, line: usize) -> usize {
    1 + editor
        .classify(line)
        .map_or(0, |rule| usize::from(rule.margins.above))
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
