//! Fuzz target for editor operations.
//!
//! Applies arbitrary edit and motion sequences and checks that the cursor
//! always stays inside the buffer and maps to a visible row after scrolling.

#![no_main]

use arbitrary::Arbitrary;
use dofi::text::{EditBuffer, WrapBudget};
use dofi::unicode::grapheme_count;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(char),
    InsertStr(String),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp(u8),
    PageDown(u8),
}

#[derive(Arbitrary, Debug)]
struct EditorInput {
    ops: Vec<Op>,
    columns: u8,
    rows: u8,
}

fuzz_target!(|input: EditorInput| {
    let budget = WrapBudget::columns(i64::from(input.columns % 40) + 1);
    let rows = usize::from(input.rows % 30) + 1;
    let mut editor = EditBuffer::new();

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Insert(ch) => editor.insert_char(ch),
            Op::InsertStr(s) => editor.insert_str(&s),
            Op::Newline => editor.newline(),
            Op::Backspace => editor.backspace(),
            Op::Delete => editor.delete(),
            Op::Left => editor.move_left(),
            Op::Right => editor.move_right(),
            Op::Up => editor.move_up(),
            Op::Down => editor.move_down(),
            Op::Home => editor.move_home(),
            Op::End => editor.move_end(),
            Op::PageUp(n) => editor.page_up(usize::from(n)),
            Op::PageDown(n) => editor.page_down(usize::from(n)),
        }
        editor.scroll_to_cursor(rows, budget);

        let cursor = editor.cursor();
        assert!(cursor.line < editor.line_count());
        let line = editor.line(cursor.line).unwrap_or_default();
        assert!(cursor.column <= grapheme_count(line));
        assert!(!line.contains('\t'));
        assert!(editor.scroll_y() <= cursor.line);
        assert!(editor.visual_cursor(budget).visual_row >= 0);
    }
});
