// ABOUTME: Geodetic analogue of ScalarSeries: coordinates indexed by monotonic keys
// ABOUTME: Great-circle step distances, component-wise domain conversion, and globe projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Coordinate Series
//!
//! A [`CoordinateSeries`] stores geographic coordinates under the same
//! key/domain contract as [`ScalarSeries`]: strictly increasing keys over
//! a bounded domain, immutable after construction.

use crate::point_cloud::PointCloud;
use crate::series::{
    domains_match, fractional_position, interpolate, validate_keys, value_at_fraction,
    ScalarSeries,
};
use paceline_core::constants::geo::EARTH_RADIUS_METERS;
use paceline_core::{AnalysisError, AnalysisResult, GeoCoordinate};
use std::ops::Range;

/// An immutable series of geographic coordinates sampled at strictly
/// increasing keys over the bounded domain `[0, domain]`
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSeries {
    coordinates: Vec<GeoCoordinate>,
    keys: Vec<f64>,
    domain: f64,
}

impl CoordinateSeries {
    /// Create a coordinate series from paired coordinates and keys
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] under the same key/domain contract
    /// as [`ScalarSeries::new`].
    pub fn new(
        coordinates: Vec<GeoCoordinate>,
        keys: Vec<f64>,
        domain: f64,
    ) -> AnalysisResult<Self> {
        if coordinates.len() != keys.len() {
            return Err(AnalysisError::invalid_input(
                "coordinates and keys must have equal lengths",
            ));
        }
        validate_keys(&keys, domain)?;
        Ok(Self {
            coordinates,
            keys,
            domain,
        })
    }

    fn from_parts(coordinates: Vec<GeoCoordinate>, keys: Vec<f64>, domain: f64) -> Self {
        debug_assert!(validate_keys(&keys, domain).is_ok());
        Self {
            coordinates,
            keys,
            domain,
        }
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always false: a series holds at least one sample
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// The magnitude of the key domain
    #[must_use]
    pub fn domain(&self) -> f64 {
        self.domain
    }

    /// Borrowed read-only view of the backing coordinates
    #[must_use]
    pub fn coordinates(&self) -> &[GeoCoordinate] {
        &self.coordinates
    }

    /// Borrowed read-only view of the backing keys
    #[must_use]
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// The coordinate at `index`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IndexOutOfRange`] when `index >= len`.
    pub fn coordinate_at(&self, index: usize) -> AnalysisResult<GeoCoordinate> {
        self.coordinates
            .get(index)
            .copied()
            .ok_or(AnalysisError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// The coordinate at an arbitrary key, with latitude and longitude
    /// interpolated independently
    #[must_use]
    pub fn coordinate_at_key(&self, key: f64) -> GeoCoordinate {
        let latitudes: Vec<f64> = self.coordinates.iter().map(|c| c.latitude).collect();
        let longitudes: Vec<f64> = self.coordinates.iter().map(|c| c.longitude).collect();
        GeoCoordinate::new(
            interpolate(&self.keys, &latitudes, key),
            interpolate(&self.keys, &longitudes, key),
        )
    }

    /// Great-circle distance between each coordinate and the one before
    /// it, as a scalar series on the same keys
    ///
    /// The first value is always 0. Taking the
    /// [`stair_case`](ScalarSeries::stair_case) of the result gives
    /// cumulative distance along the route.
    #[must_use]
    pub fn step_space(&self) -> ScalarSeries {
        let mut values = Vec::with_capacity(self.len());
        values.push(0.0);
        for index in 1..self.len() {
            values.push(
                self.coordinates[index - 1].great_circle_distance(&self.coordinates[index]),
            );
        }
        ScalarSeries::from_parts(values, self.keys.clone(), self.domain)
    }

    /// Convert the receiver into the domain described by `other`'s values
    ///
    /// Latitude and longitude are resampled independently through the
    /// same interpolate-invert-interpolate algorithm as
    /// [`ScalarSeries::convert_to_domain_with_resolution`], then re-paired.
    ///
    /// # Errors
    ///
    /// Same failure modes as the scalar conversion.
    pub fn convert_to_domain_with_resolution(
        &self,
        other: &ScalarSeries,
        resolution: usize,
    ) -> AnalysisResult<Self> {
        if !domains_match(self.domain, other.domain()) {
            return Err(AnalysisError::DomainMismatch {
                expected: self.domain,
                actual: other.domain(),
            });
        }
        if self.len() != other.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        if resolution < 2 {
            return Err(AnalysisError::invalid_input(
                "conversion resolution must be >= 2",
            ));
        }
        let axis = other.values();
        if axis.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(AnalysisError::NonMonotonicConversion);
        }
        let new_domain = axis[axis.len() - 1];
        if !new_domain.is_finite() || new_domain <= 0.0 {
            return Err(AnalysisError::NonMonotonicConversion);
        }

        let latitudes: Vec<f64> = self.coordinates.iter().map(|c| c.latitude).collect();
        let longitudes: Vec<f64> = self.coordinates.iter().map(|c| c.longitude).collect();

        let step = new_domain / (resolution - 1) as f64;
        let mut keys = Vec::with_capacity(resolution);
        let mut coordinates = Vec::with_capacity(resolution);
        for index in 0..resolution {
            // resolution - 1 accumulated steps can round one ulp past the domain.
            let key = (index as f64 * step).min(new_domain);
            let position = fractional_position(axis, key);
            let latitude = value_at_fraction(&latitudes, position);
            let longitude = value_at_fraction(&longitudes, position);
            keys.push(key);
            coordinates.push(GeoCoordinate::new(latitude, longitude));
        }

        Ok(Self::from_parts(coordinates, keys, new_domain))
    }

    /// Convert with the default resolution (the source length)
    ///
    /// # Errors
    ///
    /// See [`convert_to_domain_with_resolution`](Self::convert_to_domain_with_resolution).
    pub fn convert_to_domain(&self, other: &ScalarSeries) -> AnalysisResult<Self> {
        self.convert_to_domain_with_resolution(other, self.len())
    }

    /// Re-express the coordinates at new key positions by component-wise
    /// linear interpolation
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the new keys violate the
    /// key/domain contract.
    pub fn resample_at(&self, keys: &[f64], domain: f64) -> AnalysisResult<Self> {
        validate_keys(keys, domain)?;
        let latitudes: Vec<f64> = self.coordinates.iter().map(|c| c.latitude).collect();
        let longitudes: Vec<f64> = self.coordinates.iter().map(|c| c.longitude).collect();
        let coordinates = keys
            .iter()
            .map(|&key| {
                GeoCoordinate::new(
                    interpolate(&self.keys, &latitudes, key),
                    interpolate(&self.keys, &longitudes, key),
                )
            })
            .collect();
        Ok(Self::from_parts(coordinates, keys.to_vec(), domain))
    }

    /// The coordinates of `range` in order, as a connected path
    ///
    /// Boundary accessor for an external renderer; the engine defines
    /// only the ordered data handed across, not any drawing primitive.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn path_for_range(&self, range: Range<usize>) -> AnalysisResult<&[GeoCoordinate]> {
        if range.start >= range.end || range.end > self.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: self.len(),
            });
        }
        Ok(&self.coordinates[range])
    }

    /// Project each coordinate onto the globe at
    /// `EARTH_RADIUS_METERS + altitude[i]`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::LengthMismatch`] when `altitudes` does not pair
    /// one-to-one with the coordinates.
    pub fn globe_map(&self, altitudes: &ScalarSeries) -> AnalysisResult<PointCloud> {
        if altitudes.len() != self.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.len(),
                actual: altitudes.len(),
            });
        }
        let points = self
            .coordinates
            .iter()
            .zip(altitudes.values())
            .map(|(coordinate, &altitude)| {
                coordinate.globe_point(EARTH_RADIUS_METERS + altitude)
            })
            .collect();
        Ok(PointCloud::new(points))
    }
}
