//! Console scrollback: an ordered, capped sequence of wrapped entries.
//!
//! Each entry keeps the text it was built from plus its wrapped visual rows.
//! The last entry is rewritten in place while the user types and a new one is
//! started on commit. Eviction always drops the oldest entries and is counted
//! in entries, never in rows or pixels; the renderer clips to the viewport.
//!
//! Out-of-range edits are silent no-ops.
//!
//! # Examples
//!
//! ```
//! use dofi::ScreenMetrics;
//! use dofi::text::LineBuffer;
//!
//! let mut lines = LineBuffer::with_capacity(&ScreenMetrics::default(), 3);
//! for n in 1..=4 {
//!     lines.append(&format!("entry {n}"), false);
//! }
//! let texts: Vec<_> = lines.iter().map(|l| l.text().to_string()).collect();
//! assert_eq!(texts, ["entry 2", "entry 3", "entry 4"]);
//! ```

use crate::event::{LogLevel, emit_log};
use crate::metrics::ScreenMetrics;
use crate::text::wrap::WrapBudget;

/// Prefix drawn before the first row of a user-typed entry.
pub const INPUT_PREFIX: &str = "> ";
/// Prefix drawn before the first row of an output entry.
pub const OUTPUT_PREFIX: &str = "- ";
/// Prefix drawn before continuation rows.
pub const CONTINUATION_PREFIX: &str = "  ";

/// One logical console entry and its wrapped rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    text: String,
    content: Vec<String>,
    is_input: bool,
}

impl LogicalLine {
    fn new(text: String, budget: WrapBudget, is_input: bool) -> Self {
        let content = budget.wrap(&text);
        Self {
            text,
            content,
            is_input,
        }
    }

    /// The unwrapped text of this entry (tabs already stripped).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wrapped visual rows. Never empty.
    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// Whether the user typed this entry.
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.is_input
    }

    /// Number of visual rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.content.len()
    }

    /// Prefix for the first visual row.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        if self.is_input {
            INPUT_PREFIX
        } else {
            OUTPUT_PREFIX
        }
    }

    /// Visual rows with their display prefixes applied.
    pub fn prefixed_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.content.iter().enumerate().map(|(i, row)| {
            let prefix = if i == 0 {
                self.prefix()
            } else {
                CONTINUATION_PREFIX
            };
            format!("{prefix}{row}")
        })
    }

    fn rewrap(&mut self, budget: WrapBudget) {
        self.content = budget.wrap(&self.text);
    }
}

/// Read-only view of one entry, handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSnapshot {
    /// Wrapped rows, without prefixes.
    pub visual_rows: Vec<String>,
    /// Whether the user typed this entry.
    pub is_input: bool,
}

/// Ordered console history, oldest first.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    lines: Vec<LogicalLine>,
    budget: WrapBudget,
    capacity: usize,
}

impl LineBuffer {
    /// Create an empty buffer wrapping to `metrics` with the default cap.
    #[must_use]
    pub fn new(metrics: &ScreenMetrics) -> Self {
        Self::with_capacity(metrics, metrics.history_cap())
    }

    /// Create an empty buffer retaining at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(metrics: &ScreenMetrics, capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            budget: WrapBudget::from_metrics(metrics),
            capacity,
        }
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the retention cap, evicting the oldest entries past it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.enforce_capacity();
    }

    /// Current wrap budget.
    #[must_use]
    pub fn budget(&self) -> WrapBudget {
        self.budget
    }

    /// Adopt new screen metrics, re-wrapping every entry from its text.
    pub fn set_metrics(&mut self, metrics: &ScreenMetrics) {
        let budget = WrapBudget::from_metrics(metrics);
        if budget == self.budget {
            return;
        }
        self.budget = budget;
        for line in &mut self.lines {
            line.rewrap(budget);
        }
    }

    /// Append a new entry and evict the oldest past the cap.
    pub fn append(&mut self, value: &str, is_input: bool) {
        let text = strip_tabs(value);
        self.lines.push(LogicalLine::new(text, self.budget, is_input));
        self.enforce_capacity();
    }

    /// Replace the text of the entry at `index`.
    ///
    /// Does nothing when `index` is out of bounds.
    pub fn modify_line(&mut self, index: usize, value: &str) {
        let budget = self.budget;
        let text = strip_tabs(value);
        let wrapped = budget.wrap(&text);
        if wrapped.is_empty() {
            return;
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.text = text;
            line.content = wrapped;
            self.enforce_capacity();
        }
    }

    /// Replace the text of the most recent entry. No-op on an empty buffer.
    pub fn modify_last(&mut self, value: &str) {
        if let Some(last) = self.lines.len().checked_sub(1) {
            self.modify_line(last, value);
        }
    }

    /// Keep only the most recent `max_entries` entries.
    ///
    /// Negative values are ignored, as are values at or above the current
    /// length.
    pub fn truncate(&mut self, max_entries: isize) {
        let Ok(max) = usize::try_from(max_entries) else {
            return;
        };
        self.truncate_to(max);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LogicalLine> {
        self.lines.get(index)
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogicalLine> {
        self.lines.last()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[LogicalLine] {
        &self.lines
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, LogicalLine> {
        self.lines.iter()
    }

    /// Sum of visual rows across all entries.
    #[must_use]
    pub fn total_visual_rows(&self) -> usize {
        self.lines.iter().map(LogicalLine::row_count).sum()
    }

    /// Owned snapshot for renderers.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineSnapshot> {
        self.lines
            .iter()
            .map(|line| LineSnapshot {
                visual_rows: line.content.clone(),
                is_input: line.is_input,
            })
            .collect()
    }

    fn enforce_capacity(&mut self) {
        self.truncate_to(self.capacity);
    }

    fn truncate_to(&mut self, max: usize) {
        if max >= self.lines.len() {
            return;
        }
        let evicted = self.lines.len() - max;
        self.lines.drain(..evicted);
        emit_log(
            LogLevel::Debug,
            &format!("scrollback evicted {evicted} entries (cap {max})"),
        );
    }
}

impl<'a> IntoIterator for &'a LineBuffer {
    type Item = &'a LogicalLine;
    type IntoIter = std::slice::Iter<'a, LogicalLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

fn strip_tabs(value: &str) -> String {
    value.replace('\t', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Metrics giving a 5-column wrap budget (7px / 1px cells).
    fn five_columns() -> ScreenMetrics {
        ScreenMetrics::builder()
            .size(7, 100)
            .font(1, 5)
            .build()
            .unwrap()
    }

    fn texts(buffer: &LineBuffer) -> Vec<&str> {
        buffer.iter().map(LogicalLine::text).collect()
    }

    #[test]
    fn test_append_exact_fit() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("hello", false);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.lines()[0].content(), ["hello"]);
        assert!(!buffer.lines()[0].is_input());
    }

    #[test]
    fn test_append_wraps() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("hello world!", true);
        assert_eq!(buffer.lines()[0].content(), ["hello", " worl", "d!"]);
        assert_eq!(buffer.total_visual_rows(), 3);
    }

    #[test]
    fn test_append_strips_tabs() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("\tab\tc", false);
        assert_eq!(buffer.lines()[0].text(), "abc");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut buffer = LineBuffer::with_capacity(&five_columns(), 3);
        for text in ["1", "2", "3", "4"] {
            buffer.append(text, false);
        }
        assert_eq!(texts(&buffer), ["2", "3", "4"]);
    }

    #[test]
    fn test_modify_last() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("", true);
        buffer.modify_last("print(1)");
        assert_eq!(buffer.lines()[0].content(), ["print", "(1)"]);
        assert!(buffer.lines()[0].is_input());
    }

    #[test]
    fn test_modify_out_of_range_is_noop() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("a", false);
        buffer.modify_line(1, "b");
        buffer.modify_line(usize::MAX, "b");
        assert_eq!(texts(&buffer), ["a"]);

        let mut empty = LineBuffer::new(&five_columns());
        empty.modify_last("x");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_truncate_rules() {
        let mut buffer = LineBuffer::with_capacity(&five_columns(), 10);
        for text in ["a", "b", "c", "d"] {
            buffer.append(text, false);
        }
        buffer.truncate(-1);
        assert_eq!(buffer.len(), 4);
        buffer.truncate(4);
        assert_eq!(buffer.len(), 4);
        buffer.truncate(2);
        assert_eq!(texts(&buffer), ["c", "d"]);
        buffer.truncate(0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_truncate_counts_entries_not_rows() {
        let mut buffer = LineBuffer::with_capacity(&five_columns(), 10);
        buffer.append("a very long entry", false);
        buffer.append("b", false);
        buffer.truncate(2);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.total_visual_rows(), 5);
    }

    #[test]
    fn test_resize_rewraps_from_text() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("hello world!", false);
        buffer.set_metrics(&ScreenMetrics::default());
        assert_eq!(buffer.lines()[0].content(), ["hello world!"]);
        buffer.set_metrics(&five_columns());
        assert_eq!(buffer.lines()[0].row_count(), 3);
    }

    #[test]
    fn test_prefixed_rows() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("hello world!", true);
        buffer.append("ok", false);
        let rows: Vec<String> = buffer.iter().flat_map(LogicalLine::prefixed_rows).collect();
        assert_eq!(rows, ["> hello", "   worl", "  d!", "- ok"]);
    }

    #[test]
    fn test_snapshot_matches_lines() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("in", true);
        let snap = buffer.snapshot();
        assert_eq!(
            snap,
            vec![LineSnapshot {
                visual_rows: vec!["in".to_string()],
                is_input: true,
            }]
        );
    }

    #[test]
    fn test_clear() {
        let mut buffer = LineBuffer::new(&five_columns());
        buffer.append("a", false);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.total_visual_rows(), 0);
    }
}
