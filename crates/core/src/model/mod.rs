//! Core data model for anchors, reconstructed function ranges, and output
//! entries.

/// A detected function-start address together with its byte offset in the
/// source document.
///
/// Anchors are ordered by `pos` (document order) and deduplicated by
/// `address`, keeping the earliest occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Byte offset of the match in the source text.
    pub pos: usize,
    /// Parsed function-start address.
    pub address: u64,
}

/// Minimum width of a reconstructed range, in address units.
pub const MIN_RANGE_WIDTH: u64 = 4;

/// A reconstructed `[start, end)` interval approximating one function's
/// extent. `end` is exclusive; construction guarantees
/// `end >= start + MIN_RANGE_WIDTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionRange {
    pub start: u64,
    pub end: u64,
}

impl FunctionRange {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(
            end >= start + MIN_RANGE_WIDTH,
            "range [{start:#X}, {end:#X}) narrower than {MIN_RANGE_WIDTH} units"
        );
        Self { start, end }
    }

    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    /// Whether a switch address flagged by the recompiler falls inside this
    /// range for selection purposes.
    ///
    /// Deliberately NOT the same interval as the range itself: the low bound
    /// is exclusive (a switch exactly at a function's entry point is not
    /// attributed to it) and the high bound is inclusive.
    pub fn covers_switch(&self, address: u64) -> bool {
        self.start < address && address <= self.end
    }
}

/// One record of the final artifact: a function start and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputEntry {
    pub address: u64,
    pub size: u64,
}

impl From<FunctionRange> for OutputEntry {
    fn from(range: FunctionRange) -> Self {
        Self { address: range.start, size: range.size() }
    }
}
