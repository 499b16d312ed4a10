//! Snapshot tests for console and editor row layout.
//!
//! Rows are rendered as `yy|text` so positions and prefixes are checked
//! together. Update with `cargo insta review` after intentional changes.

use dofi::ScreenMetrics;
use dofi::text::{ConsoleView, Cursor, EditBuffer, EditorView, LineBuffer, RenderRow, RowKind};

/// 5 text columns, 2px rows, 12px tall with a 2px navbar.
fn tiny() -> ScreenMetrics {
    ScreenMetrics::builder()
        .size(7, 12)
        .font(1, 1)
        .line_spacing(1)
        .navbar_height(2)
        .build()
        .expect("valid metrics")
}

fn render(rows: &[RenderRow]) -> String {
    rows.iter()
        .map(|row| format!("{:02}|{}", row.y, row.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn console_rows_stack_from_bottom() {
    let mut lines = LineBuffer::with_capacity(&tiny(), 10);
    lines.append("print hello", true);
    lines.append("hello", false);
    lines.append("abc", true);

    let rows = ConsoleView::new(&lines, tiny()).rows();
    insta::assert_snapshot!(render(&rows), @r"
    02|> print
    04|   hell
    06|  o
    08|- hello
    10|> abc
    ");

    let kinds: Vec<RowKind> = rows.iter().map(|row| row.kind).collect();
    assert_eq!(
        kinds,
        [
            RowKind::Input,
            RowKind::Continuation,
            RowKind::Continuation,
            RowKind::Output,
            RowKind::Input,
        ]
    );
}

#[test]
fn console_clips_rows_above_top_edge() {
    let mut lines = LineBuffer::with_capacity(&tiny(), 10);
    for text in ["one", "two", "three", "four", "five", "six", "seven", "eight"] {
        lines.append(text, false);
    }

    insta::assert_snapshot!(render(&ConsoleView::new(&lines, tiny()).rows()), @r"
    00|- three
    02|- four
    04|- five
    06|- six
    08|- seven
    10|- eight
    ");
}

#[test]
fn editor_rows_with_gutter() {
    let mut editor = EditBuffer::with_text("let x\nprint(x, 1)\nend");
    let view = EditorView::new(&editor, tiny());
    insta::assert_snapshot!(render(&view.rows()), @r"
    02|  1 let x
    04|  2 print
    06|    (x, 1
    08|    )
    10|  3 end
    ");

    editor.set_scroll_y(1);
    let view = EditorView::new(&editor, tiny());
    insta::assert_snapshot!(render(&view.rows()), @r"
    02|  2 print
    04|    (x, 1
    06|    )
    08|  3 end
    ");
}

#[test]
fn editor_caret_position_and_blink() {
    let mut editor = EditBuffer::with_text("let x\nprint(x, 1)\nend");
    editor.set_cursor(Cursor::new(1, 7));

    let caret = EditorView::new(&editor, tiny())
        .caret()
        .expect("caret on screen");
    assert_eq!((caret.cursor.visual_row, caret.cursor.visual_col), (2, 2));
    assert_eq!((caret.x, caret.y), (6, 6));

    let hidden = EditorView::new(&editor, tiny()).caret_on(false).caret();
    assert!(hidden.is_none());
}

#[test]
fn editor_caret_off_screen_is_suppressed() {
    let mut editor = EditBuffer::with_text("a\nb\nc\nd\ne\nf\ng");
    editor.set_cursor(Cursor::new(6, 0));
    assert!(EditorView::new(&editor, tiny()).caret().is_none());

    editor.set_scroll_y(2);
    let caret = EditorView::new(&editor, tiny()).caret().expect("visible");
    assert_eq!(caret.y, 2 + 4 * 2);
}
