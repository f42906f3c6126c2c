// ABOUTME: Geodetic and sampling constants organized by domain
// ABOUTME: Earth model parameters and default sampling rates shared across the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! Application-wide constants organized by domain.

/// Geodetic model constants
pub mod geo {
    /// Mean Earth radius in meters (spherical model)
    ///
    /// One degree of longitude at the equator spans
    /// `EARTH_RADIUS_METERS * PI / 180` ≈ 111 195 m under this model.
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// Sampling defaults for bundle construction
pub mod sampling {
    /// Default resampling rate for the time-domain grid, in hertz
    ///
    /// Raw samples are interpolated onto a uniform grid at this rate, so
    /// that every series in a bundle shares one index correspondence.
    pub const DEFAULT_GRID_HZ: f64 = 1.0;

    /// Minimum number of grid samples a workout must span
    ///
    /// Derivatives need at least two samples; anything shorter cannot be
    /// analyzed.
    pub const MIN_GRID_SAMPLES: usize = 2;
}
