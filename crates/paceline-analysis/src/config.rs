// ABOUTME: Explicit configuration for the analysis engine
// ABOUTME: Grid rate and conversion resolution passed by callers, never ambient globals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! Engine configuration.
//!
//! Everything tunable is carried in an explicitly passed
//! [`AnalysisConfig`] rather than ambient shared state, so two analysis
//! sessions can run side by side with different settings.

use paceline_core::constants::sampling::DEFAULT_GRID_HZ;
use serde::{Deserialize, Serialize};

/// Relative tolerance when deciding whether two series share a domain
pub const DEFAULT_DOMAIN_TOLERANCE: f64 = 1e-9;

/// Tunable parameters for bundle construction and domain conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rate of the uniform time-domain grid, in hertz
    ///
    /// Raw samples are interpolated onto this grid so every series in a
    /// bundle shares one index correspondence.
    pub grid_hz: f64,

    /// Output sample count for domain conversion
    ///
    /// `None` matches the source length, preserving sample density.
    pub conversion_resolution: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_hz: DEFAULT_GRID_HZ,
            conversion_resolution: None,
        }
    }
}

impl AnalysisConfig {
    /// Resolve the conversion resolution against a source length
    #[must_use]
    pub fn resolution_for(&self, source_length: usize) -> usize {
        self.conversion_resolution.unwrap_or(source_length)
    }
}
