//! Section-header index over a disassembly export.
//!
//! Disassemblers emit headers like `.section ".text"` into the listing, but
//! the HTML export scatters markup tags through them and may escape the
//! quotes as `&quot;`. The index matches headers tolerantly and carves the
//! document into named spans: each span runs from its header to the next
//! header, the last one to the end of the document.

use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)\.section(?:\s|<[^>]+>)*(?:&quot;|")\s*(?:<[^>]+>)*([.\w$]+)\s*(?:<[^>]+>)*(?:&quot;|")"#,
    )
    .unwrap()
});

/// One named region of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub start: usize,
    pub end: usize,
    pub name: String,
}

/// Offset-sorted section spans covering the document from the first header
/// onward. Positions before the first header belong to no span.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    spans: Vec<SectionSpan>,
}

impl SectionIndex {
    pub fn build(doc: &str) -> Self {
        let mut headers: Vec<(usize, String)> = SECTION_HEADER
            .captures_iter(doc)
            .filter_map(|caps| Some((caps.get(0)?.start(), caps.get(1)?.as_str().to_string())))
            .collect();
        headers.sort_by_key(|&(start, _)| start);

        let mut spans = Vec::with_capacity(headers.len());
        for (idx, (start, name)) in headers.iter().enumerate() {
            let end = headers.get(idx + 1).map_or(doc.len(), |&(next, _)| next);
            spans.push(SectionSpan { start: *start, end, name: name.clone() });
        }
        Self { spans }
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    /// Whether the document position lies in a span matching the target
    /// section name.
    ///
    /// A span matches if its name equals the target (case-insensitive) or
    /// ends with the target minus a single leading `.`. The ends-with rule
    /// is a lenient compromise for exports that decorate section names; it
    /// can over-match reused names in malformed documents and is kept as-is.
    /// Positions outside every span never match.
    pub fn position_in_section(&self, pos: usize, target: &str) -> bool {
        let target = target.trim().to_ascii_lowercase();
        let stripped = target.strip_prefix('.').unwrap_or(&target);
        for span in &self.spans {
            if span.start <= pos && pos < span.end {
                let name = span.name.trim().to_ascii_lowercase();
                return name == target || name.ends_with(stripped);
            }
        }
        false
    }
}
