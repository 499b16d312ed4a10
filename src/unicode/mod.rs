//! Unicode utilities for grapheme-based column arithmetic.
//!
//! Every column, length and cut position in the crate is counted in extended
//! grapheme clusters so a wrap or an edit never splits a user-perceived
//! character.

mod grapheme;

pub use grapheme::{
    GraphemeIterator, byte_index, grapheme_count, grapheme_indices, graphemes, is_ascii_only,
    slice_graphemes,
};
