//! Rendering the final entry list as the `functions = [...]` literal the
//! recompiler consumes.

use crate::model::OutputEntry;

/// Render entries as a single array-of-records assignment.
///
/// Addresses and sizes are uppercase hex with a `0x` prefix; records carry a
/// trailing comma except the last; an empty list renders as `functions = []`.
pub fn render_functions(entries: &[OutputEntry]) -> String {
    if entries.is_empty() {
        return "functions = []".to_string();
    }

    let mut out = String::from("functions = [");
    for (idx, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "\n    {{ address = 0x{:X}, size = 0x{:X} }}",
            entry.address, entry.size
        ));
        if idx + 1 < entries.len() {
            out.push(',');
        }
    }
    out.push_str("\n]");
    out
}
