//! Single-pass pipeline driver: scan, filter, select, emit.
//!
//! Stage-by-stage progress goes to stdout. The counts are informational
//! only; nothing downstream parses them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::model::OutputEntry;
use crate::sections::SectionIndex;
use crate::{anchors, emit, filters, logscan, select};

/// Errors from parsing operator-supplied values.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("malformed hex value `{0}`")]
    MalformedHex(String),
    #[error("malformed address range `{0}`, expected LOW-HIGH")]
    MalformedAddrRange(String),
}

/// Parse a hex value with an optional `0x`/`0X` prefix.
pub fn parse_hex(text: &str) -> Result<u64, SiftError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16).map_err(|_| SiftError::MalformedHex(text.to_string()))
}

/// Parse a `LOW-HIGH` pair of hex values.
pub fn parse_addr_range(text: &str) -> Result<(u64, u64), SiftError> {
    let (low, high) =
        text.split_once('-').ok_or_else(|| SiftError::MalformedAddrRange(text.to_string()))?;
    let low = parse_hex(low).map_err(|_| SiftError::MalformedAddrRange(text.to_string()))?;
    let high = parse_hex(high).map_err(|_| SiftError::MalformedAddrRange(text.to_string()))?;
    Ok((low, high))
}

/// Pipeline configuration, one field per flag.
#[derive(Debug, Clone)]
pub struct SiftOptions {
    /// Keep only anchors with addresses in this inclusive range.
    pub addr_range: Option<(u64, u64)>,
    /// Drop ranges narrower than this. Zero disables the filter.
    pub min_size: u64,
    /// Drop ranges wider than this.
    pub max_size: Option<u64>,
    /// Keep only anchors inside this named section.
    pub segment: Option<String>,
    /// Keep only 16-byte-aligned range starts.
    pub enforce_align: bool,
    /// Drop ranges overlapping an earlier kept range.
    pub no_overlap: bool,
    /// Truncate the final output to this many entries, smallest first.
    pub batch_size: Option<usize>,
    /// Emit every surviving range when the log yields no switch addresses.
    pub dump_all: bool,
}

impl Default for SiftOptions {
    fn default() -> Self {
        Self {
            addr_range: None,
            min_size: 0,
            max_size: None,
            segment: None,
            enforce_align: false,
            no_overlap: false,
            batch_size: None,
            dump_all: true,
        }
    }
}

/// Run the pipeline over already-decoded log and listing text.
///
/// Returns the final entry list in emission order.
pub fn run(listing: &str, log_text: &str, opts: &SiftOptions) -> Vec<OutputEntry> {
    println!("Parsing recompiler log...");
    let switches = logscan::scan_log(log_text);

    println!("Parsing disassembly HTML (anchor-based)...");
    let mut anchors = anchors::extract_anchors(listing);
    match anchors::address_span(&anchors) {
        Some((min, max)) => println!(
            "Anchors/tokens: count={}, min=0x{:08X}, max=0x{:08X}",
            anchors.len(),
            min,
            max
        ),
        None => println!("Anchors/tokens: count=0"),
    }

    if let Some(segment) = &opts.segment {
        let index = SectionIndex::build(listing);
        let before = anchors.len();
        anchors = filters::in_section(anchors, &index, segment);
        println!("Section '{}': {} (was {})", segment, anchors.len(), before);
    }

    if let Some((low, high)) = opts.addr_range {
        let before = anchors.len();
        anchors = filters::in_addr_range(anchors, low, high);
        println!("Addr-range 0x{:X}-0x{:X}: {} (was {})", low, high, anchors.len(), before);
    }

    let mut ranges = filters::build_ranges(&anchors);

    if opts.min_size > 0 {
        let before = ranges.len();
        ranges = filters::min_size(ranges, opts.min_size);
        println!("Min-size 0x{:X}: {} (was {})", opts.min_size, ranges.len(), before);
    }

    if let Some(max) = opts.max_size {
        let before = ranges.len();
        ranges = filters::max_size(ranges, max);
        println!("Max-size 0x{:X}: {} (was {})", max, ranges.len(), before);
    }

    if opts.enforce_align {
        let before = ranges.len();
        ranges = filters::aligned_only(ranges);
        println!("Align-{}: {} (was {})", filters::START_ALIGNMENT, ranges.len(), before);
    }

    if opts.no_overlap {
        let before = ranges.len();
        ranges = filters::without_overlaps(ranges);
        println!("No-overlap: {} (was {})", ranges.len(), before);
    }

    println!("Searching for needed functions...");
    let selected = if switches.is_empty() {
        println!("No switch addresses parsed from recompiler log.");
        if opts.dump_all && !ranges.is_empty() {
            println!("Dumping ALL parsed functions (fallback).");
            select::dump_all(&ranges)
        } else {
            println!("Skip dump-all (flag disabled).");
            Vec::new()
        }
    } else {
        select::map_switches(&switches, &ranges)
    };

    let mut entries = select::dedup(selected);

    if let Some(batch) = opts.batch_size {
        let before = entries.len();
        entries = select::rank_and_truncate(entries, batch);
        println!("Batch-size {}: {} (was {})", batch, entries.len(), before);
    }

    match entries.iter().map(|e| e.address).min().zip(entries.iter().map(|e| e.address).max()) {
        Some((min, max)) => {
            println!("Output: count={}, min=0x{:08X}, max=0x{:08X}", entries.len(), min, max)
        }
        None => println!("Output: count=0"),
    }

    entries
}

/// Run the pipeline over files on disk and write the rendered output.
///
/// Inputs are decoded tolerantly (invalid bytes replaced, never fatal); any
/// filesystem error aborts the run before the output file is touched, so no
/// partial output is ever written.
pub fn run_files(
    listing_path: &Path,
    log_path: &Path,
    output_path: &Path,
    opts: &SiftOptions,
) -> Result<Vec<OutputEntry>> {
    let log_text = read_lossy(log_path)
        .with_context(|| format!("Failed to read recompiler log: {}", log_path.display()))?;
    let listing = read_lossy(listing_path)
        .with_context(|| format!("Failed to read disassembly HTML: {}", listing_path.display()))?;

    let entries = run(&listing, &log_text, opts);

    println!("{} functions found!", entries.len());
    println!("Outputting to formatted file...");
    fs::write(output_path, emit::render_functions(&entries))
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
    println!("Wrote function list to: {}", output_path.display());

    Ok(entries)
}

fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
