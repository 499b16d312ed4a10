//! Text layout for the console and the code editor.
//!
//! This module holds the wrapping engine and the two buffers built on it.
//! Key types:
//!
//! - [`WrapBudget`]: column budget derived from pixel metrics, and the
//!   hard-break wrap itself
//! - [`LineBuffer`]: capped console scrollback of wrapped entries
//! - [`EditBuffer`]: editable source lines with a logical cursor
//! - [`VisualCursor`]: a logical cursor mapped onto wrapped rows
//! - [`ConsoleView`] / [`EditorView`]: positioned rows for a renderer
//!
//! # Examples
//!
//! ## Console scrollback
//!
//! ```
//! use dofi::ScreenMetrics;
//! use dofi::text::LineBuffer;
//!
//! let mut lines = LineBuffer::new(&ScreenMetrics::default());
//! lines.append("", true);
//! lines.modify_last("print(\"hi\")");
//! lines.append("hi", false);
//! assert_eq!(lines.len(), 2);
//! assert!(lines.lines()[0].is_input());
//! ```
//!
//! ## Caret mapping
//!
//! ```
//! use dofi::text::{Cursor, EditBuffer, WrapBudget};
//!
//! let mut editor = EditBuffer::with_text("helloworld");
//! editor.set_cursor(Cursor::new(0, 5));
//! let caret = editor.visual_cursor(WrapBudget::columns(5));
//! assert_eq!((caret.visual_row, caret.visual_col), (1, 0));
//! ```

mod cursor;
mod editor;
mod scrollback;
mod view;
mod wrap;

pub use cursor::{VisualCursor, map_cursor, visible_caret};
pub use editor::{Cursor, EditBuffer, TAB_SPACES};
pub use scrollback::{
    CONTINUATION_PREFIX, INPUT_PREFIX, LineBuffer, LineSnapshot, LogicalLine, OUTPUT_PREFIX,
};
pub use view::{Caret, ConsoleView, EditorView, GUTTER_COLS, RenderRow, RowKind, console_text};
pub use wrap::{RowSpan, WrapBudget, reassemble, wrap};
