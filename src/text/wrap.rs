//! Hard-break text wrapping for the console and editor.
//!
//! Wrapping is a pure transform from a logical string and a pixel width
//! budget to an ordered list of visual rows. It is a character-count wrap
//! (grapheme clusters, not bytes), not a word wrap: rows are cut exactly at
//! the column budget unless an explicit line break comes first.
//!
//! # Examples
//!
//! ```
//! use dofi::text::{WrapBudget, wrap};
//!
//! // 128px viewport with a 4px font leaves 22 columns after the prefix margin.
//! assert_eq!(WrapBudget::from_pixels(128, 4).max_chars(), 22);
//!
//! let budget = WrapBudget::columns(5);
//! assert_eq!(budget.wrap("hello world!"), vec!["hello", " worl", "d!"]);
//! assert_eq!(wrap("", 128, 4), vec![String::new()]);
//! ```

use crate::metrics::ScreenMetrics;
use crate::unicode::{grapheme_count, grapheme_indices, graphemes, slice_graphemes};

/// Column budget for wrapping, derived from pixel metrics.
///
/// `max_chars` may be zero or negative for very narrow viewports; such a
/// budget means "no room" and every value wraps to a single unsplit row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WrapBudget {
    max_chars: i64,
}

impl WrapBudget {
    /// Derive the budget from a pixel width and font cell width.
    ///
    /// Reserves two cells for the row prefix (`"> "`, `"- "` or `"  "`) plus
    /// half a cell of padding. A zero cell width is treated as one pixel.
    #[must_use]
    pub fn from_pixels(width_px: u32, font_width_px: u32) -> Self {
        let cell = i64::from(font_width_px.max(1));
        let cells = (f64::from(width_px) / cell as f64).round() as i64;
        Self {
            max_chars: cells - 2 * cell - cell / 2,
        }
    }

    /// Budget for the given screen metrics.
    #[must_use]
    pub fn from_metrics(metrics: &ScreenMetrics) -> Self {
        Self::from_pixels(metrics.width, metrics.font_width)
    }

    /// Budget with an explicit column count.
    #[must_use]
    pub fn columns(max_chars: i64) -> Self {
        Self { max_chars }
    }

    /// Maximum grapheme clusters per visual row.
    #[must_use]
    pub fn max_chars(&self) -> i64 {
        self.max_chars
    }

    /// Whether this budget leaves room for at least one column.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.max_chars > 0
    }

    /// Compute the row spans for `value` without allocating row strings.
    #[must_use]
    pub fn spans(&self, value: &str) -> Vec<RowSpan> {
        let total = grapheme_count(value);
        if !self.has_room() {
            return vec![RowSpan {
                start: 0,
                end: total,
                ends_with_break: false,
            }];
        }

        let max = usize::try_from(self.max_chars).unwrap_or(usize::MAX);
        let clusters: Vec<&str> = graphemes(value).collect();
        let mut spans = Vec::new();
        let mut pos = 0usize;

        while pos < total {
            let window_end = total.min(pos.saturating_add(max));
            if let Some(brk) = (pos..window_end).find(|&i| is_break(clusters[i])) {
                spans.push(RowSpan {
                    start: pos,
                    end: brk,
                    ends_with_break: true,
                });
                pos = brk + 1;
                continue;
            }

            if total - pos <= max {
                break;
            }

            spans.push(RowSpan {
                start: pos,
                end: pos + max,
                ends_with_break: false,
            });
            pos += max;
        }

        spans.push(RowSpan {
            start: pos,
            end: total,
            ends_with_break: false,
        });
        spans
    }

    /// Wrap `value` into visual rows. Never returns an empty vector.
    #[must_use]
    pub fn wrap(&self, value: &str) -> Vec<String> {
        let offsets: Vec<usize> = grapheme_indices(value)
            .map(|(idx, _)| idx)
            .chain(std::iter::once(value.len()))
            .collect();
        self.spans(value)
            .iter()
            .map(|span| value[offsets[span.start]..offsets[span.end]].to_string())
            .collect()
    }

    /// Number of visual rows `value` occupies.
    #[must_use]
    pub fn row_count(&self, value: &str) -> usize {
        self.spans(value).len()
    }
}

/// One visual row of a wrapped value, in grapheme indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    /// First cluster of the row.
    pub start: usize,
    /// One past the last cluster of the row (break excluded).
    pub end: usize,
    /// The row was ended by an explicit line break that was consumed.
    pub ends_with_break: bool,
}

impl RowSpan {
    /// Number of clusters shown on this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the row is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text of this row within `value`.
    #[must_use]
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        slice_graphemes(value, self.start, self.end)
    }
}

/// Wrap `value` to the budget derived from a pixel width and cell width.
#[must_use]
pub fn wrap(value: &str, width_px: u32, font_width_px: u32) -> Vec<String> {
    WrapBudget::from_pixels(width_px, font_width_px).wrap(value)
}

/// Rebuild the original value from wrapped rows and their spans.
///
/// Inserts `'\n'` wherever a break was consumed, so for values without
/// `"\r\n"` this is the exact inverse of [`WrapBudget::wrap`].
#[must_use]
pub fn reassemble(rows: &[String], spans: &[RowSpan]) -> String {
    let mut out = String::new();
    for (row, span) in rows.iter().zip(spans) {
        out.push_str(row);
        if span.ends_with_break {
            out.push('\n');
        }
    }
    out
}

fn is_break(cluster: &str) -> bool {
    cluster == "\n" || cluster == "\r\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        assert_eq!(WrapBudget::from_metrics(&ScreenMetrics::default()).max_chars(), 22);
    }

    #[test]
    fn test_zero_cell_width_does_not_divide_by_zero() {
        let budget = WrapBudget::from_pixels(10, 0);
        assert_eq!(budget.max_chars(), 8);
    }

    #[test]
    fn test_exact_fit_is_one_row() {
        assert_eq!(WrapBudget::columns(5).wrap("hello"), vec!["hello"]);
    }

    #[test]
    fn test_hard_cut() {
        let rows = WrapBudget::columns(5).wrap("hello world!");
        assert_eq!(rows, vec!["hello", " worl", "d!"]);
    }

    #[test]
    fn test_exact_multiple_leaves_no_trailing_row() {
        let rows = WrapBudget::columns(5).wrap("helloworld");
        assert_eq!(rows, vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_value_yields_one_row() {
        assert_eq!(WrapBudget::columns(5).wrap(""), vec![""]);
        assert_eq!(WrapBudget::columns(0).wrap(""), vec![""]);
    }

    #[test]
    fn test_explicit_break() {
        let rows = WrapBudget::columns(10).wrap("ab\ncd");
        assert_eq!(rows, vec!["ab", "cd"]);
    }

    #[test]
    fn test_trailing_break_yields_empty_row() {
        assert_eq!(WrapBudget::columns(10).wrap("ab\n"), vec!["ab", ""]);
    }

    #[test]
    fn test_break_at_budget_is_not_before_it() {
        // The break sits at column 5, not before it, so the cut happens first
        // and the break then produces an empty row.
        let rows = WrapBudget::columns(5).wrap("hello\nworld");
        assert_eq!(rows, vec!["hello", "", "world"]);
    }

    #[test]
    fn test_degenerate_budget_is_unsplit() {
        let rows = WrapBudget::columns(-3).wrap("hello\nworld");
        assert_eq!(rows, vec!["hello\nworld"]);
        assert_eq!(WrapBudget::from_pixels(0, 4).wrap("abc"), vec!["abc"]);
    }

    #[test]
    fn test_huge_budget_is_one_row() {
        let budget = WrapBudget::columns(i64::MAX);
        assert_eq!(budget.wrap("hello world"), vec!["hello world"]);
        assert_eq!(budget.wrap("ab\ncd"), vec!["ab", "cd"]);
        assert_eq!(WrapBudget::columns(1 << 32).wrap("abc"), vec!["abc"]);
    }

    #[test]
    fn test_cuts_on_grapheme_boundaries() {
        let rows = WrapBudget::columns(2).wrap("e\u{0301}e\u{0301}e\u{0301}");
        assert_eq!(rows, vec!["e\u{0301}e\u{0301}", "e\u{0301}"]);
    }

    #[test]
    fn test_crlf_counts_as_break() {
        let rows = WrapBudget::columns(10).wrap("ab\r\ncd");
        assert_eq!(rows, vec!["ab", "cd"]);
    }

    #[test]
    fn test_spans_and_reassemble() {
        let budget = WrapBudget::columns(4);
        let value = "one\ntwo three";
        let spans = budget.spans(value);
        let rows = budget.wrap(value);
        assert_eq!(rows, vec!["one", "two ", "thre", "e"]);
        assert!(spans[0].ends_with_break);
        assert!(!spans[1].ends_with_break);
        assert_eq!(spans[1].start, 4);
        assert_eq!(reassemble(&rows, &spans), value);
    }
}
