//! Source text positions.
//!
//! Provides a compact 8-byte position marker. Positions are diagnostic-only:
//! the evaluator never branches on them.

use std::fmt;

/// Location of a span in the original source text.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from script start
/// - end: u32 - byte offset (exclusive)
///
/// Ordering compares `start` first, then `end`, so positions sort in
/// source order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(C)]
pub struct TextPosition {
    pub start: u32,
    pub end: u32,
}

impl TextPosition {
    /// Placeholder position for synthesized nodes.
    pub const DUMMY: TextPosition = TextPosition { start: 0, end: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        TextPosition { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if another position is fully contained within this one.
    #[inline]
    pub fn contains(&self, other: TextPosition) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merge two positions into one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: TextPosition) -> TextPosition {
        TextPosition {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
