// ABOUTME: Error types for series construction, queries, and domain conversion
// ABOUTME: Defines AnalysisError with structured context and the AnalysisResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Error Types
//!
//! All failures in the analysis engine are local, synchronous, and
//! deterministic: an operation either succeeds or fails at the point of
//! the offending call, leaving every previously constructed object valid
//! and reusable. Nothing is retried internally; a caller retries only by
//! supplying corrected input.
//!
//! `AnalysisError` is `Clone + PartialEq` so that the lazy conversion
//! cache inside an analysis session can replay a recorded failure to
//! later callers without recomputing it.

/// Result alias for all fallible analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors produced by series construction, queries, and conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Malformed construction arguments
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// A point query landed past the end of a series
    #[error("index {index} out of range for series of length {length}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the series
        length: usize,
    },

    /// A range query was empty or extended past the end of a series
    #[error("range {start}..{end} invalid for series of length {length}")]
    RangeOutOfBounds {
        /// Start of the requested range
        start: usize,
        /// End (exclusive) of the requested range
        end: usize,
        /// Length of the series
        length: usize,
    },

    /// Two series sampled over different underlying axes cannot be
    /// converted against each other
    #[error("domain mismatch: {expected} vs {actual}")]
    DomainMismatch {
        /// Domain of the receiver
        expected: f64,
        /// Domain of the conversion target
        actual: f64,
    },

    /// The conversion target's values do not support inversion
    #[error("conversion target values are not monotonic")]
    NonMonotonicConversion,

    /// Paired series must have equal lengths
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the receiver
        expected: usize,
        /// Length of the paired series
        actual: usize,
    },

    /// A range mapping produced inverted endpoints
    #[error("mapped range {start}..{end} is empty")]
    EmptyRange {
        /// Mapped start index
        start: usize,
        /// Mapped end index
        end: usize,
    },

    /// The background construction task failed to complete
    #[error("background analysis task failed: {reason}")]
    TaskFailed {
        /// Join failure description
        reason: String,
    },
}

impl AnalysisError {
    /// Create an [`AnalysisError::InvalidInput`] from any displayable reason
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
