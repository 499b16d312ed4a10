//! Fuzz target for the wrap engine.
//!
//! Checks that wrapping terminates, never returns zero rows, keeps rows
//! inside the budget and loses no text.

#![no_main]

use arbitrary::Arbitrary;
use dofi::text::{WrapBudget, reassemble};
use dofi::unicode::grapheme_count;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct WrapInput {
    text: String,
    width_px: u16,
    font_width_px: u8,
}

fuzz_target!(|input: WrapInput| {
    let budget = WrapBudget::from_pixels(u32::from(input.width_px), u32::from(input.font_width_px));
    let spans = budget.spans(&input.text);
    let rows = budget.wrap(&input.text);
    assert!(!rows.is_empty());
    assert_eq!(rows.len(), spans.len());

    if budget.has_room() {
        for row in &rows {
            assert!(grapheme_count(row) as i64 <= budget.max_chars());
        }
    } else {
        assert_eq!(rows, [input.text.clone()]);
    }

    if !input.text.contains('\r') {
        assert_eq!(reassemble(&rows, &spans), input.text);
    }
});
