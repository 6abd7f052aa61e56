//! The filter chain: anchor filters, range construction, and range filters.
//!
//! Order matters. Anchor filters (section membership, address range) run
//! before range construction because the end of each range is derived from
//! the *next surviving* anchor; range filters (size, alignment, overlap)
//! run after. Every filter consumes its input and returns a fresh list.

use crate::model::{Anchor, FunctionRange};
use crate::sections::SectionIndex;

/// Safety margin shaved off the next anchor when closing a range, so the
/// reconstructed function never reaches into its successor's entry.
pub const SAFETY_MARGIN: u64 = 4;

/// Width assigned to the final anchor's range, which has no successor to
/// bound it.
pub const TAIL_WIDTH: u64 = 0x40;

/// Required start alignment for `aligned_only`.
pub const START_ALIGNMENT: u64 = 16;

/// Keep only anchors whose document position falls inside the named section.
pub fn in_section(anchors: Vec<Anchor>, index: &SectionIndex, target: &str) -> Vec<Anchor> {
    anchors.into_iter().filter(|a| index.position_in_section(a.pos, target)).collect()
}

/// Keep only anchors with `low <= address <= high` (both inclusive).
pub fn in_addr_range(anchors: Vec<Anchor>, low: u64, high: u64) -> Vec<Anchor> {
    anchors.into_iter().filter(|a| low <= a.address && a.address <= high).collect()
}

/// Build one range per anchor from the surviving anchor sequence.
///
/// A range ends `SAFETY_MARGIN` before the next anchor's address, clamped so
/// it is never narrower than `SAFETY_MARGIN` even when two anchors sit right
/// next to each other (or out of address order). The last range gets a fixed
/// `TAIL_WIDTH`.
pub fn build_ranges(anchors: &[Anchor]) -> Vec<FunctionRange> {
    anchors
        .iter()
        .enumerate()
        .map(|(idx, anchor)| {
            let start = anchor.address;
            let end = match anchors.get(idx + 1) {
                Some(next) => {
                    (start + SAFETY_MARGIN).max(next.address.saturating_sub(SAFETY_MARGIN))
                }
                None => start + TAIL_WIDTH,
            };
            FunctionRange::new(start, end)
        })
        .collect()
}

/// Keep ranges at least `min` units wide.
pub fn min_size(ranges: Vec<FunctionRange>, min: u64) -> Vec<FunctionRange> {
    ranges.into_iter().filter(|r| r.size() >= min).collect()
}

/// Keep ranges at most `max` units wide.
pub fn max_size(ranges: Vec<FunctionRange>, max: u64) -> Vec<FunctionRange> {
    ranges.into_iter().filter(|r| r.size() <= max).collect()
}

/// Keep ranges whose start is `START_ALIGNMENT`-aligned.
pub fn aligned_only(ranges: Vec<FunctionRange>) -> Vec<FunctionRange> {
    ranges.into_iter().filter(|r| r.start % START_ALIGNMENT == 0).collect()
}

/// Drop ranges that overlap an earlier kept range.
///
/// Sorts by `(start, size)` ascending and then keeps a range only when its
/// start is at or past the end of the last kept range. First-fit on purpose:
/// a range overlapping an already-accepted one is dropped even when dropping
/// the earlier one instead would have let more ranges survive.
pub fn without_overlaps(mut ranges: Vec<FunctionRange>) -> Vec<FunctionRange> {
    ranges.sort_by_key(|r| (r.start, r.size()));
    let mut kept: Vec<FunctionRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if kept.last().map_or(true, |last| range.start >= last.end) {
            kept.push(range);
        }
    }
    kept
}
