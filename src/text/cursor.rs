//! Logical-to-visual cursor mapping for wrapped editor text.

use crate::text::editor::Cursor;
use crate::text::wrap::WrapBudget;
use crate::unicode::grapheme_count;

/// Cursor position in wrapped view.
///
/// `visual_row` is relative to the first visible logical line and is negative
/// when the cursor sits above the scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisualCursor {
    /// Wrapped row, counted from the scroll offset.
    pub visual_row: i64,
    /// Column within the wrapped row.
    pub visual_col: usize,
    /// Source line the cursor is on.
    pub logical_line: usize,
    /// Grapheme column within the source line.
    pub logical_col: usize,
}

impl VisualCursor {
    /// Whether the caret lands inside a window of `max_visible_rows` rows.
    #[must_use]
    pub fn is_visible(&self, max_visible_rows: usize) -> bool {
        usize::try_from(self.visual_row).is_ok_and(|row| row < max_visible_rows)
    }
}

/// Map a logical cursor to visual coordinates.
///
/// Rows of every line from `scroll_y` up to the cursor line are summed, then
/// the cursor line's own rows are searched. A column exactly at a hard wrap
/// boundary belongs to the start of the following row, matching where the
/// next typed character appears.
///
/// A cursor past the end of `lines` maps to the end of the buffer; a column
/// past the end of its line maps to the end of that line.
#[must_use]
pub fn map_cursor(
    lines: &[String],
    cursor: Cursor,
    scroll_y: usize,
    budget: WrapBudget,
) -> VisualCursor {
    let Some(last) = lines.len().checked_sub(1) else {
        return VisualCursor::default();
    };
    let cursor = if cursor.line > last {
        Cursor::new(last, grapheme_count(&lines[last]))
    } else {
        cursor
    };
    let text = &lines[cursor.line];
    let column = cursor.column.min(grapheme_count(text));

    let rows_between = |range: std::ops::Range<usize>| -> i64 {
        lines[range]
            .iter()
            .map(|line| budget.row_count(line) as i64)
            .sum()
    };
    let mut visual_row = if cursor.line >= scroll_y {
        rows_between(scroll_y..cursor.line)
    } else {
        -rows_between(cursor.line..scroll_y.min(lines.len()))
    };

    let spans = budget.spans(text);
    let (row_in_line, span) = spans
        .iter()
        .enumerate()
        .rev()
        .find(|(_, span)| span.start <= column)
        .unwrap_or((0, &spans[0]));
    visual_row += row_in_line as i64;

    VisualCursor {
        visual_row,
        visual_col: column - span.start,
        logical_line: cursor.line,
        logical_col: column,
    }
}

/// The caret to draw, or `None` when it falls outside the visible window.
///
/// Off-screen carets are suppressed rather than clamped so a caret is never
/// drawn at a wrong on-screen position.
#[must_use]
pub fn visible_caret(cursor: VisualCursor, max_visible_rows: usize) -> Option<VisualCursor> {
    cursor.is_visible(max_visible_rows).then_some(cursor)
}
