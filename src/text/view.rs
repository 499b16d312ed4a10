//! Render views over the console scrollback and the editor buffer.
//!
//! Views turn buffer state into positioned text rows. They never mutate
//! anything, and a renderer only has to draw each row's text at its `y`.

use crate::metrics::ScreenMetrics;
use crate::text::cursor::{VisualCursor, visible_caret};
use crate::text::editor::EditBuffer;
use crate::text::scrollback::LineBuffer;
use crate::text::wrap::WrapBudget;

/// Width of the editor's line-number gutter in cells (`"%3d "`).
pub const GUTTER_COLS: usize = 4;

/// What a rendered row represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// First row of a user-typed console entry.
    Input,
    /// First row of an output console entry.
    Output,
    /// Wrapped continuation of the previous row.
    Continuation,
    /// First row of an editor source line (carries a line number).
    Source,
}

/// One positioned row of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRow {
    /// Top edge in pixels from the top of the screen.
    pub y: i32,
    /// Text with its prefix or gutter already applied.
    pub text: String,
    /// What the row belongs to.
    pub kind: RowKind,
}

/// Caret placement in pixels plus the cursor it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caret {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Mapped editor cursor.
    pub cursor: VisualCursor,
}

/// Bottom-anchored view of the console scrollback.
///
/// The newest row sits on the bottom edge; older rows stack upward and rows
/// that would start above the top edge are clipped.
pub struct ConsoleView<'a> {
    buffer: &'a LineBuffer,
    metrics: ScreenMetrics,
}

impl<'a> ConsoleView<'a> {
    /// Create a view of `buffer` for the given metrics.
    #[must_use]
    pub fn new(buffer: &'a LineBuffer, metrics: ScreenMetrics) -> Self {
        Self { buffer, metrics }
    }

    /// Positioned rows, top to bottom, clipped to the viewport.
    #[must_use]
    pub fn rows(&self) -> Vec<RenderRow> {
        let line_height = self.metrics.line_height() as i64;
        let total = self.buffer.total_visual_rows() as i64;
        let mut y = i64::from(self.metrics.height) - total * line_height;

        let mut rows = Vec::new();
        for line in self.buffer {
            for (i, text) in line.prefixed_rows().enumerate() {
                if y >= 0 {
                    let kind = match (i, line.is_input()) {
                        (0, true) => RowKind::Input,
                        (0, false) => RowKind::Output,
                        _ => RowKind::Continuation,
                    };
                    rows.push(RenderRow {
                        y: y as i32,
                        text,
                        kind,
                    });
                }
                y += line_height;
            }
        }
        rows
    }
}

/// Top-anchored view of an editor buffer below the navbar.
pub struct EditorView<'a> {
    editor: &'a EditBuffer,
    metrics: ScreenMetrics,
    caret_on: bool,
}

impl<'a> EditorView<'a> {
    /// Create a view of `editor` for the given metrics.
    #[must_use]
    pub fn new(editor: &'a EditBuffer, metrics: ScreenMetrics) -> Self {
        Self {
            editor,
            metrics,
            caret_on: true,
        }
    }

    /// Set the blink phase. An off phase hides the caret.
    #[must_use]
    pub fn caret_on(mut self, on: bool) -> Self {
        self.caret_on = on;
        self
    }

    /// Number of rows that fit below the navbar.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        self.metrics.editor_rows()
    }

    /// Positioned rows from the scroll offset down, clipped to the viewport.
    #[must_use]
    pub fn rows(&self) -> Vec<RenderRow> {
        let budget = WrapBudget::from_metrics(&self.metrics);
        let visible = self.visible_rows();
        let mut rows = Vec::new();

        let lines = self.editor.lines().iter().enumerate();
        'lines: for (index, line) in lines.skip(self.editor.scroll_y()) {
            for (j, row) in budget.wrap(line).into_iter().enumerate() {
                if rows.len() >= visible {
                    break 'lines;
                }
                let (gutter, kind) = if j == 0 {
                    (format!("{:3} ", index + 1), RowKind::Source)
                } else {
                    (" ".repeat(GUTTER_COLS), RowKind::Continuation)
                };
                rows.push(RenderRow {
                    y: self.row_y(rows.len()),
                    text: format!("{gutter}{row}"),
                    kind,
                });
            }
        }
        rows
    }

    /// Caret to draw this frame, if it is on screen and in its on phase.
    #[must_use]
    pub fn caret(&self) -> Option<Caret> {
        if !self.caret_on {
            return None;
        }
        let budget = WrapBudget::from_metrics(&self.metrics);
        let cursor = visible_caret(self.editor.visual_cursor(budget), self.visible_rows())?;
        let col = (GUTTER_COLS + cursor.visual_col) as i64;
        Some(Caret {
            x: (col * i64::from(self.metrics.font_width)) as i32,
            y: self.row_y(cursor.visual_row as usize),
            cursor,
        })
    }

    fn row_y(&self, row: usize) -> i32 {
        (self.metrics.navbar_height as usize + row * self.metrics.line_height() as usize) as i32
    }
}

/// Console rows without positions, as plain prefixed strings.
#[must_use]
pub fn console_text(buffer: &LineBuffer) -> Vec<String> {
    buffer.iter().flat_map(|line| line.prefixed_rows()).collect()
}
