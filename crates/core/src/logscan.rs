//! Scanner for recompiler logs.
//!
//! Pulls out the addresses of switch/jump constructs the recompiler could
//! not resolve. Patterns are tried most-specific-first; the first one that
//! matches a line wins, so a line contributes at most one address. Lines
//! that match nothing are simply skipped.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static SWITCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // The explicit unresolved-switch error.
        Regex::new(r"ERROR:\s*Switch case at\s*(?:0x)?([0-9A-Fa-f]{6,8})").unwrap(),
        // Looser error context mentioning a switch at some address.
        Regex::new(r"(?:error|ERROR).*?(?:switch|Switch).*?(?:at|@)\s*(?:0x)?([0-9A-Fa-f]{6,8})")
            .unwrap(),
        // Warning context, least specific.
        Regex::new(r"(?:warning|WARN).*?(?:switch|Switch).*?(?:at|@)\s*(?:0x)?([0-9A-Fa-f]{6,8})")
            .unwrap(),
    ]
});

/// Scan decoded log text for switch addresses.
///
/// Duplicates collapse into the returned set; ordering carries no meaning.
pub fn scan_log(text: &str) -> BTreeSet<u64> {
    let mut addresses = BTreeSet::new();
    for line in text.lines() {
        for pattern in SWITCH_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                if let Ok(address) = u64::from_str_radix(&caps[1], 16) {
                    addresses.insert(address);
                }
                break;
            }
        }
    }
    addresses
}
