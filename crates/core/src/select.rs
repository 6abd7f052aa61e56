//! Mapping switch addresses onto surviving ranges and shaping the final
//! entry list.

use std::collections::BTreeSet;

use crate::model::{FunctionRange, OutputEntry};

/// Map each switch address to the first range (in the ranges' current
/// order) that covers it. A switch address no range covers contributes
/// nothing. Two switch addresses landing in the same range produce that
/// range twice; callers dedup afterwards.
pub fn map_switches(switches: &BTreeSet<u64>, ranges: &[FunctionRange]) -> Vec<OutputEntry> {
    switches
        .iter()
        .filter_map(|&sw| ranges.iter().find(|r| r.covers_switch(sw)))
        .map(|&r| OutputEntry::from(r))
        .collect()
}

/// Fallback when the log yielded nothing: every surviving range becomes an
/// entry, so the operator still gets a usable candidate list.
pub fn dump_all(ranges: &[FunctionRange]) -> Vec<OutputEntry> {
    ranges.iter().map(|&r| OutputEntry::from(r)).collect()
}

/// Collapse duplicate (address, size) pairs. Output order after this step
/// is not part of the contract; the set iteration is merely deterministic.
pub fn dedup(entries: Vec<OutputEntry>) -> Vec<OutputEntry> {
    entries.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Rank entries smallest-first (ties by ascending start address) and keep
/// only the first `batch` of them. Small functions are the safest to hand
/// off for manual review, so they go out first.
pub fn rank_and_truncate(mut entries: Vec<OutputEntry>, batch: usize) -> Vec<OutputEntry> {
    entries.sort_by_key(|e| (e.size, e.address));
    entries.truncate(batch);
    entries
}
