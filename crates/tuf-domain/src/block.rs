use std::ops::Range;
use std::path::{Path, PathBuf};

/// Byte span of a block inside a file; `start` inclusive, `end` exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub path: PathBuf,
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "byte range start {start} past end {end}");
        Self {
            path: path.into(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the span lies inside a buffer of `len` bytes.
    #[must_use]
    pub fn fits(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }
}

/// A top-level block as reported by a document parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateBlock {
    /// Block keyword, e.g. `resource` or `module`.
    pub kind: String,
    pub labels: Vec<String>,
    /// Covers the keyword through the closing brace.
    pub range: ByteRange,
}
