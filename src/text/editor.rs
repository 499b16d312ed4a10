//! Editable source buffer for the code tab.
//!
//! The buffer is the source of truth for the edited text: raw logical lines
//! that are wrapped only for display. The cursor is kept in logical
//! coordinates and always satisfies `line < lines.len()` and
//! `column <= len(lines[line])`, counted in grapheme clusters.
//!
//! # Examples
//!
//! ```
//! use dofi::text::EditBuffer;
//!
//! let mut buf = EditBuffer::new();
//! buf.insert_str("function _draw()\nend");
//! assert_eq!(buf.line_count(), 2);
//! assert_eq!(buf.cursor().line, 1);
//!
//! buf.backspace();
//! assert_eq!(buf.text(), "function _draw()\nen");
//! ```

use crate::text::cursor::{VisualCursor, map_cursor};
use crate::text::wrap::WrapBudget;
use crate::unicode::{byte_index, grapheme_count};

/// Spaces inserted by the Tab key. Source lines never contain `'\t'`.
pub const TAB_SPACES: &str = "  ";

/// Logical cursor position in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    /// Line number (0-indexed).
    pub line: usize,
    /// Column in grapheme clusters (0-indexed).
    pub column: usize,
}

impl Cursor {
    /// Create a cursor at a position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Cursor at the start of the buffer.
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }
}

/// Line-oriented edit buffer with a cursor and a scroll offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    scroll_y: usize,
    saved: bool,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    /// Create a buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::start(),
            scroll_y: 0,
            saved: false,
        }
    }

    /// Create a buffer with initial text. The cursor starts at the top.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.set_text(text);
        buf
    }

    /// Replace the entire text, resetting cursor and scroll.
    pub fn set_text(&mut self, text: &str) {
        let text = text.replace('\t', TAB_SPACES);
        self.lines = text.lines().map(str::to_string).collect();
        if text.ends_with('\n') || self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = Cursor::start();
        self.scroll_y = 0;
        self.saved = false;
    }

    /// Full text joined with `'\n'`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Logical lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of logical lines (at least one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor, clamping it into the buffer.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.clamp_cursor();
    }

    /// First visible logical line.
    #[must_use]
    pub fn scroll_y(&self) -> usize {
        self.scroll_y
    }

    /// Set the first visible logical line (clamped to the last line).
    pub fn set_scroll_y(&mut self, scroll_y: usize) {
        self.scroll_y = scroll_y.min(self.lines.len() - 1);
    }

    /// Whether the buffer is unchanged since the last [`mark_saved`](Self::mark_saved).
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Record that the current text has been persisted by the host.
    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Insert a single character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        match ch {
            '\n' => self.newline(),
            '\r' => {}
            '\t' => self.insert_inline(TAB_SPACES),
            _ => {
                let mut buf = [0u8; 4];
                self.insert_inline(ch.encode_utf8(&mut buf));
            }
        }
    }

    /// Insert text at the cursor. Newlines split the current line.
    pub fn insert_str(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "");
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.insert_inline(&first.replace('\t', TAB_SPACES));
        }
        for part in parts {
            self.newline();
            self.insert_inline(&part.replace('\t', TAB_SPACES));
        }
    }

    /// Split the current line at the cursor.
    pub fn newline(&mut self) {
        let Cursor { line, column } = self.cursor;
        let current = &mut self.lines[line];
        let at = byte_index(current, column);
        let rest = current.split_off(at);
        self.lines.insert(line + 1, rest);
        self.cursor = Cursor::new(line + 1, 0);
        self.saved = false;
    }

    /// Delete the cluster before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let Cursor { line, column } = self.cursor;
        if column > 0 {
            let current = &mut self.lines[line];
            let from = byte_index(current, column - 1);
            let to = byte_index(current, column);
            current.replace_range(from..to, "");
            self.cursor.column -= 1;
        } else if line > 0 {
            let removed = self.lines.remove(line);
            let previous = &mut self.lines[line - 1];
            let join_at = grapheme_count(previous);
            previous.push_str(&removed);
            self.cursor = Cursor::new(line - 1, join_at);
        } else {
            return;
        }
        self.saved = false;
        self.clamp_cursor();
        self.clamp_scroll();
    }

    /// Delete the cluster after the cursor, joining lines at end of line.
    pub fn delete(&mut self) {
        let Cursor { line, column } = self.cursor;
        if column < self.line_len(line) {
            let current = &mut self.lines[line];
            let from = byte_index(current, column);
            let to = byte_index(current, column + 1);
            current.replace_range(from..to, "");
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
        } else {
            return;
        }
        self.saved = false;
        self.clamp_cursor();
        self.clamp_scroll();
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Move left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
        }
    }

    /// Move right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        if self.cursor.column < self.line_len(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor = Cursor::new(self.cursor.line + 1, 0);
        }
    }

    /// Move up one logical line, clamping the column.
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_cursor();
        }
    }

    /// Move down one logical line, clamping the column.
    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.clamp_cursor();
        }
    }

    /// Move up by `lines` logical lines.
    pub fn page_up(&mut self, lines: usize) {
        self.cursor.line = self.cursor.line.saturating_sub(lines.max(1));
        self.clamp_cursor();
    }

    /// Move down by `lines` logical lines.
    pub fn page_down(&mut self, lines: usize) {
        self.cursor.line = self.cursor.line.saturating_add(lines.max(1));
        self.clamp_cursor();
    }

    /// Move to the start of the line.
    pub fn move_home(&mut self) {
        self.cursor.column = 0;
    }

    /// Move to the end of the line.
    pub fn move_end(&mut self) {
        self.cursor.column = self.line_len(self.cursor.line);
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Map the cursor to visual coordinates relative to the scroll offset.
    #[must_use]
    pub fn visual_cursor(&self, budget: WrapBudget) -> VisualCursor {
        map_cursor(&self.lines, self.cursor, self.scroll_y, budget)
    }

    /// Adjust the scroll offset so the cursor row lies in
    /// `[0, visible_rows)`.
    ///
    /// When a single wrapped line is taller than the viewport the cursor
    /// line is scrolled to the top and the caret may still be off screen.
    pub fn scroll_to_cursor(&mut self, visible_rows: usize, budget: WrapBudget) {
        if self.cursor.line < self.scroll_y {
            self.scroll_y = self.cursor.line;
            return;
        }
        let limit = i64::try_from(visible_rows).unwrap_or(i64::MAX);
        while self.scroll_y < self.cursor.line {
            if self.visual_cursor(budget).visual_row < limit {
                break;
            }
            self.scroll_y += 1;
        }
    }

    fn insert_inline(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Cursor { line, column } = self.cursor;
        let current = &mut self.lines[line];
        let at = byte_index(current, column);
        let before = grapheme_count(current);
        current.insert_str(at, text);
        // Combining marks can merge with the cluster before the cursor, so
        // advance by the change in cluster count rather than the insert length.
        let after = grapheme_count(current);
        self.cursor.column = column + after.saturating_sub(before);
        self.clamp_cursor();
        self.saved = false;
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| grapheme_count(l))
    }

    fn clamp_cursor(&mut self) {
        self.cursor.line = self.cursor.line.min(self.lines.len() - 1);
        self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
    }

    fn clamp_scroll(&mut self) {
        self.scroll_y = self.scroll_y.min(self.lines.len() - 1);
    }
}
