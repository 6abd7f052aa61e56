//! sift-core
//!
//! Core library for reconstructing candidate function boundaries from a
//! disassembler's HTML export and matching them against diagnostics emitted
//! by a binary recompiler.
//!
//! The pipeline is a single pass: scan the recompiler log for unresolved
//! switch constructs, extract function-start anchors from the listing, run
//! the configured filter chain over the derived ranges, then map the switch
//! addresses onto the surviving ranges and emit the result.
//!
//! All substantive logic lives here so it is fully testable and reusable
//! from multiple frontends.

pub mod anchors;
pub mod emit;
pub mod filters;
pub mod logscan;
pub mod model;
pub mod pipeline;
pub mod sections;
pub mod select;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
