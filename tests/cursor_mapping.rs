//! Logical-to-visual cursor mapping across wrapped editor lines.

use dofi::text::{Cursor, EditBuffer, WrapBudget, map_cursor, visible_caret};
use proptest::prelude::*;

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|s| (*s).to_string()).collect()
}

fn visual(lines: &[String], line: usize, column: usize, scroll_y: usize, max: i64) -> (i64, usize) {
    let caret = map_cursor(lines, Cursor::new(line, column), scroll_y, WrapBudget::columns(max));
    (caret.visual_row, caret.visual_col)
}

#[test]
fn column_at_wrap_boundary_starts_next_row() {
    let text = lines(&["helloworld"]);
    assert_eq!(visual(&text, 0, 5, 0, 5), (1, 0));
    assert_eq!(visual(&text, 0, 4, 0, 5), (0, 4));
    assert_eq!(visual(&text, 0, 10, 0, 5), (1, 5));
}

#[test]
fn rows_of_earlier_lines_accumulate() {
    let text = lines(&["abcdefghijkl", "", "xy"]);
    // Line 0 wraps into three rows, line 1 is one empty row.
    assert_eq!(visual(&text, 2, 1, 0, 5), (4, 1));
    assert_eq!(visual(&text, 2, 1, 1, 5), (1, 1));
    assert_eq!(visual(&text, 2, 1, 2, 5), (0, 1));
}

#[test]
fn cursor_above_scroll_offset_is_negative_and_hidden() {
    let text = lines(&["one", "two", "three"]);
    let caret = map_cursor(&text, Cursor::new(0, 0), 2, WrapBudget::columns(5));
    assert_eq!(caret.visual_row, -2);
    assert!(visible_caret(caret, 10).is_none());
}

#[test]
fn cursor_below_viewport_is_hidden_not_clamped() {
    let text = lines(&["a", "b", "c", "d"]);
    let caret = map_cursor(&text, Cursor::new(3, 0), 0, WrapBudget::columns(5));
    assert_eq!(caret.visual_row, 3);
    assert!(visible_caret(caret, 3).is_none());
    assert_eq!(visible_caret(caret, 4), Some(caret));
}

#[test]
fn out_of_range_cursor_maps_to_end() {
    let text = lines(&["abc", "defgh"]);
    let caret = map_cursor(&text, Cursor::new(9, 9), 0, WrapBudget::columns(5));
    assert_eq!(caret.logical_line, 1);
    assert_eq!(caret.logical_col, 5);
    assert_eq!((caret.visual_row, caret.visual_col), (1, 5));
}

#[test]
fn multibyte_columns_count_clusters() {
    let text = lines(&["héllo wörld"]);
    assert_eq!(visual(&text, 0, 7, 0, 5), (1, 2));
}

#[test]
fn editor_scrolls_to_keep_caret_visible() {
    let budget = WrapBudget::columns(5);
    let mut editor = EditBuffer::with_text("0\n1\n2\n3\n4\n5\n6\n7");
    editor.set_cursor(Cursor::new(7, 0));
    editor.scroll_to_cursor(3, budget);
    assert_eq!(editor.scroll_y(), 5);
    assert_eq!(editor.visual_cursor(budget).visual_row, 2);

    editor.set_cursor(Cursor::new(1, 0));
    editor.scroll_to_cursor(3, budget);
    assert_eq!(editor.scroll_y(), 1);
    assert_eq!(editor.visual_cursor(budget).visual_row, 0);
}

#[test]
fn caret_follows_text_onto_wrapped_row() {
    let budget = WrapBudget::columns(5);
    let mut editor = EditBuffer::new();
    editor.insert_str("abcde");
    let caret = editor.visual_cursor(budget);
    assert_eq!((caret.visual_row, caret.visual_col), (0, 5));

    editor.insert_char('f');
    let caret = editor.visual_cursor(budget);
    assert_eq!((caret.visual_row, caret.visual_col), (1, 1));

    editor.move_left();
    let caret = editor.visual_cursor(budget);
    assert_eq!((caret.visual_row, caret.visual_col), (1, 0));
}

proptest! {
    /// The mapped row never exceeds the rows above plus the line's own rows.
    #[test]
    fn mapped_row_within_line_rows(
        text in prop::collection::vec("[a-z ]{0,24}", 1..8),
        line in 0usize..8,
        column in 0usize..30,
        max in 1i64..10,
    ) {
        let budget = WrapBudget::columns(max);
        let caret = map_cursor(&text, Cursor::new(line, column), 0, budget);
        let line = caret.logical_line;

        let above: i64 = text[..line].iter().map(|l| budget.row_count(l) as i64).sum();
        let own = budget.row_count(&text[line]) as i64;
        prop_assert!(caret.visual_row >= above);
        prop_assert!(caret.visual_row < above + own);
        prop_assert!(caret.visual_col as i64 <= max);
    }
}
