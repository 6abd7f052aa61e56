//! Anchor extraction from disassembly HTML exports.
//!
//! The listing is treated as raw text, not as a DOM: disassembler exports
//! are regular enough that matching the anchor convention directly is both
//! simpler and more tolerant of the malformed markup these tools emit.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Anchor;

/// Primary convention: an `id`/`name` attribute whose value is a
/// prefix-decorated hex address, e.g. `id="sub_82001000"`.
static ANCHOR_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:id|name)\s*=\s*"(?:sub|fn|unknown|__)?_([0-9A-Fa-f]{6,8})""#).unwrap()
});

/// Fallback: bare tokens of the same shape anywhere in the text. Higher
/// false-positive risk, used only when the attribute convention is absent.
static ANCHOR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:sub|fn|unknown|__)?_([0-9A-Fa-f]{6,8})\b").unwrap());

/// Extract function-start anchors from the export text.
///
/// Matches are sorted by document position and deduplicated by address,
/// keeping the earliest occurrence of each address.
pub fn extract_anchors(doc: &str) -> Vec<Anchor> {
    let mut raw = collect(&ANCHOR_ATTR, doc);
    if raw.is_empty() {
        raw = collect(&ANCHOR_TOKEN, doc);
    }
    raw.sort_by_key(|anchor| anchor.pos);

    let mut seen = HashSet::new();
    raw.into_iter().filter(|anchor| seen.insert(anchor.address)).collect()
}

fn collect(pattern: &Regex, doc: &str) -> Vec<Anchor> {
    pattern
        .captures_iter(doc)
        .filter_map(|caps| {
            let pos = caps.get(0)?.start();
            let address = u64::from_str_radix(caps.get(1)?.as_str(), 16).ok()?;
            Some(Anchor { pos, address })
        })
        .collect()
}

/// Min/max address over a set of anchors, for diagnostics.
pub fn address_span(anchors: &[Anchor]) -> Option<(u64, u64)> {
    let min = anchors.iter().map(|a| a.address).min()?;
    let max = anchors.iter().map(|a| a.address).max()?;
    Some((min, max))
}
