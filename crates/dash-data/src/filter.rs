//! Row filtering by the user's current selection.

use dash_core::models::{FilterSelection, RecordSet};

/// Select the rows of `records` matching `selection`.
///
/// Pure, order-preserving subset: the result keeps the input's date ordering
/// and the inputs are untouched. An empty store or department selection
/// yields an empty result rather than an error.
pub fn filter_records(records: &RecordSet, selection: &FilterSelection) -> RecordSet {
    let kept: Vec<_> = records
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();
    RecordSet::new(kept)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
