//! Grapheme cluster iteration.

use unicode_segmentation::UnicodeSegmentation;

/// Iterator over grapheme clusters in a string.
pub struct GraphemeIterator<'a> {
    inner: unicode_segmentation::Graphemes<'a>,
}

impl<'a> Iterator for GraphemeIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl DoubleEndedIterator for GraphemeIterator<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Iterate over grapheme clusters in a string.
#[must_use]
pub fn graphemes(s: &str) -> GraphemeIterator<'_> {
    GraphemeIterator {
        inner: s.graphemes(true),
    }
}

/// Iterate over grapheme clusters with byte indices.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.grapheme_indices(true)
}

/// Check if a string is ASCII-only.
#[must_use]
pub fn is_ascii_only(s: &str) -> bool {
    s.is_ascii()
}

/// Number of grapheme clusters in a string.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    if is_ascii_only(s) {
        // "\r\n" is a single cluster even in ASCII text.
        return s.len() - s.matches("\r\n").count();
    }
    graphemes(s).count()
}

/// Byte index of the grapheme at `column`.
///
/// Columns at or past the end map to `s.len()`.
#[must_use]
pub fn byte_index(s: &str, column: usize) -> usize {
    grapheme_indices(s)
        .nth(column)
        .map_or(s.len(), |(idx, _)| idx)
}

/// Slice a string by grapheme range `[start, end)`.
///
/// Out-of-range bounds are clamped to the string.
#[must_use]
pub fn slice_graphemes(s: &str, start: usize, end: usize) -> &str {
    let end = end.max(start);
    let from = byte_index(s, start);
    let to = byte_index(s, end);
    &s[from..to]
}
