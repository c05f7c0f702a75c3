use linemark::editor::{
    Editor, EditableSurface, Horizontal, HorizontalMove, Landing, LineBuffer, RuleKind,
    SurfaceRegistry, Vertical, transform,
};
use linemark::ui::SurfaceTable;

fn texts(editor: &Editor) -> Vec<&str> {
    editor.lines().iter().map(|l| l.text()).collect()
}

fn at(editor: &Editor) -> (usize, usize) {
    let cursor = editor.cursor();
    (cursor.line, cursor.column)
}

#[test]
fn test_type_and_split_at_end_of_line() {
    let mut editor = Editor::from_text("abc");
    editor.set_position(0, 3);
    editor.add_line_at_cursor();

    assert_eq!(texts(&editor), vec!["abc", ""]);
    assert_eq!(at(&editor), (1, 0));
}

#[test]
fn test_split_mid_line() {
    let mut editor = Editor::from_text("hello world");
    editor.set_position(0, 5);
    editor.add_line_at_cursor();

    assert_eq!(texts(&editor), vec!["hello", " world"]);
    assert_eq!(at(&editor), (1, 0));
}

#[test]
fn test_backspace_merge() {
    let mut editor = Editor::from_text("foo\nbar");
    editor.set_position(1, 0);
    assert!(editor.delete_backward_at_line_start());

    assert_eq!(texts(&editor), vec!["foobar"]);
    assert_eq!(at(&editor), (0, 3));
}

#[test]
fn test_heading_classification() {
    let shown = transform::display("## Title", false);
    let rule = shown.rule.unwrap();
    assert_eq!(rule.kind, RuleKind::Heading(2));
    assert_eq!(rule.indicator, "## ");
    assert_eq!(shown.text, "Title");
    assert_eq!(shown.indicator, None);
    assert_eq!(rule.margins, transform::RULES[1].margins);
}

#[test]
fn test_split_then_merge_restores_buffer() {
    let mut editor = Editor::from_text("first\nsecond line\nthird");
    editor.set_position(1, 6);
    editor.add_line_at_cursor();
    assert_eq!(texts(&editor), vec!["first", "second", " line", "third"]);

    assert!(editor.delete_backward_at_line_start());
    assert_eq!(texts(&editor), vec!["first", "second line", "third"]);
    assert_eq!(at(&editor), (1, 6));
}

#[test]
fn test_split_keeps_surface_identity_of_head() {
    let buffer = LineBuffer::from_lines(["one", "two"]);
    let head_slot = buffer.lines()[0].slot();
    let split = buffer.split(0, 1).unwrap();

    assert_eq!(split.buffer.lines()[0].slot(), head_slot);
    assert_ne!(split.buffer.lines()[1].slot(), head_slot);
    assert_ne!(split.buffer.lines()[1].slot(), buffer.lines()[1].slot());
    // The source buffer is untouched.
    assert_eq!(buffer.text(), "one\ntwo");
}

#[test]
fn test_focus_request_survives_until_surface_is_mounted() {
    let mut editor = Editor::from_text("hello world");
    let mut surfaces = SurfaceTable::new();
    surfaces.mount(editor.lines());

    editor.set_position(0, 5);
    editor.add_line_at_cursor();

    for _ in 0..3 {
        let report = editor.reconcile_focus(&mut surfaces);
        assert!(report.resolved.is_empty());
        assert_eq!(report.pending, 1);
    }

    surfaces.mount(editor.lines());
    let report = editor.reconcile_focus(&mut surfaces);
    assert_eq!(report.resolved.len(), 1);
    assert_eq!(report.pending, 0);

    let slot = editor.lines()[1].slot();
    let surface = surfaces.resolve(slot).unwrap();
    assert_eq!(surface.selection(), (0, 0));
}

#[test]
fn test_focus_follows_cursor_moved_while_pending() {
    let mut editor = Editor::from_text("abc\ndef\nghi");
    let mut surfaces = SurfaceTable::new();

    editor.set_position(2, 2);
    editor.add_line_at_cursor();
    editor.move_vertical(Vertical::Up, Landing::End);
    assert_eq!(at(&editor), (2, 2));

    surfaces.mount(editor.lines());
    editor.reconcile_focus(&mut surfaces);

    let slot = editor.lines()[2].slot();
    assert_eq!(surfaces.focused_slot(), Some(slot));
    assert_eq!(editor.pending_focus(), 0);
}

#[test]
fn test_horizontal_boundaries() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_position(0, 2);
    assert_eq!(editor.move_horizontal(Horizontal::Right), HorizontalMove::Crossed);
    assert_eq!(at(&editor), (1, 0));

    editor.set_position(1, 2);
    assert_eq!(editor.move_horizontal(Horizontal::Right), HorizontalMove::Blocked);
    assert_eq!(at(&editor), (1, 2));

    editor.set_position(0, 0);
    assert_eq!(editor.move_horizontal(Horizontal::Left), HorizontalMove::Blocked);
    assert_eq!(at(&editor), (0, 0));
}

#[test]
fn test_snapshot_serializes_position_and_lines() {
    let mut editor = Editor::from_text("# Notes\nbody");
    editor.set_position(1, 2);
    let json = serde_json::to_value(editor.snapshot()).unwrap();

    assert_eq!(json["line"], 1);
    assert_eq!(json["column"], 2);
    assert_eq!(json["lines"][0], "# Notes");
}
