//! Error types for dictionary construction, regime bookkeeping and
//! configuration loading.
//!
//! Absence of a match is never an error: scanners and matchers return
//! `None`/`false` for that. Everything here is either a build-time defect
//! (a dictionary that must be fixed before use) or a recoverable pipeline
//! inconsistency.

use thiserror::Error;

use crate::regime::Phase;

/// Defects found while building a [`TermCollection`](crate::TermCollection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// A term or variant with no words in it.
    #[error("term text is empty")]
    Empty,

    /// Canonical text must be unique within one collection.
    #[error("duplicate canonical term: {canonical}")]
    DuplicateCanonical { canonical: String },

    /// An abbreviation that cannot be parsed into letter parts.
    #[error("malformed abbreviation {abbreviation:?} for {canonical}: {reason}")]
    MalformedAbbreviation {
        canonical: String,
        abbreviation: String,
        reason: &'static str,
    },
}

/// Mismatched `enter`/`exit` pairing on the regime state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegimeError {
    #[error("exit from phase {0:?} which is not active")]
    NotActive(Phase),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    Regime(#[from] RegimeError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ron::error::SpannedError),
}

/// Result type for fallible geo operations.
pub type GeoResult<T> = Result<T, GeoError>;
