//! Token span references.
//!
//! Entities remember where they occurred in the token stream through
//! [`SpanRef`]s; both indices are inclusive token positions.

/// A reference to a token range within a [`TokenLine`](super::TokenLine).
///
/// Both indices are inclusive and refer to token positions (not character positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanRef {
    /// Inclusive start token index
    pub start_idx: usize,
    /// Inclusive end token index
    pub end_idx: usize,
}

impl SpanRef {
    /// Create a new span reference. The indices are swapped if given in
    /// reverse order.
    pub fn new(start_idx: usize, end_idx: usize) -> Self {
        if end_idx < start_idx {
            Self {
                start_idx: end_idx,
                end_idx: start_idx,
            }
        } else {
            Self { start_idx, end_idx }
        }
    }

    /// A span covering one token.
    pub fn single(idx: usize) -> Self {
        Self::new(idx, idx)
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.end_idx - self.start_idx + 1
    }

    /// Spans always cover at least one token.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.start_idx <= idx && idx <= self.end_idx
    }

    pub fn overlaps(&self, other: &SpanRef) -> bool {
        self.start_idx <= other.end_idx && other.start_idx <= self.end_idx
    }
}
