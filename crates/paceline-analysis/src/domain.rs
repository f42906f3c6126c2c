// ABOUTME: Multi-domain workout bundle: one series per measurement over a shared index grid
// ABOUTME: Time-domain construction from raw samples, domain conversion, and index/range mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Workout Domains
//!
//! A [`WorkoutDomain`] owns one scalar series per measurement (time,
//! distance, altitude, speed, grade, cumulative ascent and descent,
//! heart rate) plus a coordinate series and its globe projection, all
//! built from the same ordered sample set. Sample `i` in every series
//! refers to the same physical instant.
//!
//! The time-domain bundle is built once from raw samples; distance- and
//! climbing-domain bundles are derived from it by re-expressing every
//! member series against the source's own axis series.
//!
//! Taking the average of a derivative in a domain the derivative was not
//! with respect to results in skewed values.

use crate::config::AnalysisConfig;
use crate::coordinate::CoordinateSeries;
use crate::point_cloud::PointCloud;
use crate::series::{fractional_position, ScalarSeries};
use paceline_core::constants::sampling::MIN_GRID_SAMPLES;
use paceline_core::{AnalysisError, AnalysisResult, GeoCoordinate, RawWorkoutData};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// The measurement serving as a bundle's independent variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKey {
    /// Elapsed time is the independent variable
    Time,
    /// Distance traveled along the route is the independent variable
    Distance,
    /// Cumulative climb is the independent variable
    Climbing,
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Time => "time",
            Self::Distance => "distance",
            Self::Climbing => "climbing",
        };
        f.write_str(name)
    }
}

/// One consistent view of a workout: every measurement re-expressed
/// against a single independent variable
///
/// Immutable once constructed; safe for unsynchronized concurrent reads.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDomain {
    domain_key: DomainKey,
    time: ScalarSeries,
    distance: ScalarSeries,
    altitude: ScalarSeries,
    speed: ScalarSeries,
    grade: ScalarSeries,
    ascending: ScalarSeries,
    descending: ScalarSeries,
    heart_rate: ScalarSeries,
    coordinate: CoordinateSeries,
    globe_map: PointCloud,
}

/// Sparse per-measurement samples gated and offset from the raw input.
struct GatedSamples {
    altitude_keys: Vec<f64>,
    altitude_values: Vec<f64>,
    coordinate_keys: Vec<f64>,
    coordinate_values: Vec<GeoCoordinate>,
    heart_keys: Vec<f64>,
    heart_values: Vec<f64>,
}

fn gate_samples(raw: &RawWorkoutData, duration: f64) -> AnalysisResult<GatedSamples> {
    let mut gated = GatedSamples {
        altitude_keys: Vec::with_capacity(raw.locations.len()),
        altitude_values: Vec::with_capacity(raw.locations.len()),
        coordinate_keys: Vec::with_capacity(raw.locations.len()),
        coordinate_values: Vec::with_capacity(raw.locations.len()),
        heart_keys: Vec::with_capacity(raw.heart_rates.len()),
        heart_values: Vec::with_capacity(raw.heart_rates.len()),
    };
    let mut out_of_span = 0_usize;

    for location in &raw.locations {
        let key = (location.timestamp - raw.start).num_milliseconds() as f64 / 1000.0;
        if key < 0.0 || key > duration {
            out_of_span += 1;
            continue;
        }
        if location.has_usable_altitude() {
            gated.altitude_keys.push(key);
            gated.altitude_values.push(location.altitude);
        }
        if location.has_usable_coordinate() {
            gated.coordinate_keys.push(key);
            gated.coordinate_values.push(location.coordinate);
        }
    }

    for sample in &raw.heart_rates {
        let key = (sample.timestamp - raw.start).num_milliseconds() as f64 / 1000.0;
        if key < 0.0 || key > duration {
            out_of_span += 1;
            continue;
        }
        gated.heart_keys.push(key);
        gated.heart_values.push(sample.beats_per_minute);
    }

    if out_of_span > 0 {
        debug!(out_of_span, "dropped samples outside the workout span");
    }
    if gated.coordinate_values.len() < 2 {
        return Err(AnalysisError::invalid_input(
            "at least two usable location coordinates are required",
        ));
    }
    if gated.altitude_values.len() < 2 {
        return Err(AnalysisError::invalid_input(
            "at least two usable altitude samples are required",
        ));
    }
    if gated.heart_values.is_empty() {
        return Err(AnalysisError::invalid_input(
            "at least one heart-rate sample is required",
        ));
    }
    Ok(gated)
}

impl WorkoutDomain {
    /// Build the time-domain bundle from raw samples
    ///
    /// Raw samples are interpolated onto a uniform grid at
    /// `config.grid_hz`, so every member series shares one index
    /// correspondence; the series are then identity-keyed (keys are the
    /// sample indices). With the default 1 Hz grid, index equals elapsed
    /// second.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the workout span is empty or
    /// too short for the grid, timestamps are not strictly increasing,
    /// or too few usable samples survive accuracy gating.
    pub fn time_domain(raw: &RawWorkoutData, config: &AnalysisConfig) -> AnalysisResult<Self> {
        let duration = raw.duration_seconds();
        if duration <= 0.0 {
            return Err(AnalysisError::invalid_input(
                "workout end must be after its start",
            ));
        }
        if !config.grid_hz.is_finite() || config.grid_hz <= 0.0 {
            return Err(AnalysisError::invalid_input("grid rate must be positive"));
        }

        let grid_len = (duration * config.grid_hz).floor() as usize + 1;
        if grid_len < MIN_GRID_SAMPLES {
            return Err(AnalysisError::invalid_input(
                "workout is too short for the configured grid rate",
            ));
        }

        let gated = gate_samples(raw, duration)?;
        debug!(
            grid_len,
            coordinates = gated.coordinate_values.len(),
            altitudes = gated.altitude_values.len(),
            heart_rates = gated.heart_values.len(),
            "building time-domain bundle"
        );

        // Sparse series keyed by offset seconds; construction rejects
        // non-monotonic timestamps.
        let altitude_sparse =
            ScalarSeries::new(gated.altitude_values, gated.altitude_keys, duration)?;
        let coordinate_sparse =
            CoordinateSeries::new(gated.coordinate_values, gated.coordinate_keys, duration)?;
        let heart_sparse = ScalarSeries::new(gated.heart_values, gated.heart_keys, duration)?;

        let grid_seconds: Vec<f64> = (0..grid_len)
            .map(|index| index as f64 / config.grid_hz)
            .collect();
        let identity_keys: Vec<f64> = (0..grid_len).map(|index| index as f64).collect();
        let identity_domain = (grid_len - 1) as f64;

        let time = ScalarSeries::from_indexed(grid_seconds.clone())?;
        let altitude = ScalarSeries::from_indexed(
            grid_seconds
                .iter()
                .map(|&second| altitude_sparse.value_at_key(second))
                .collect(),
        )?;
        let heart_rate = ScalarSeries::from_indexed(
            grid_seconds
                .iter()
                .map(|&second| heart_sparse.value_at_key(second))
                .collect(),
        )?;
        let coordinate = CoordinateSeries::new(
            grid_seconds
                .iter()
                .map(|&second| coordinate_sparse.coordinate_at_key(second))
                .collect(),
            identity_keys.clone(),
            identity_domain,
        )?;

        let distance = coordinate.step_space().stair_case();

        // Instantaneous speed lives on midpoint keys; re-express it on
        // the grid and rescale from meters-per-grid-step to meters-per-second.
        let speed_midpoints = distance.derivative()?;
        let speed_on_grid = speed_midpoints.resample_at(&identity_keys, identity_domain)?;
        let speed = ScalarSeries::from_indexed(
            speed_on_grid
                .values()
                .iter()
                .map(|&step| step * config.grid_hz)
                .collect(),
        )?;

        let grade_midpoints = altitude.derivative_in_domain(&distance)?;
        let grade = grade_midpoints.resample_at(&identity_keys, identity_domain)?;

        let climb = altitude.step_space();
        let ascending = climb.clip(0.0, f64::INFINITY).stair_case();
        let descending = climb.clip(f64::NEG_INFINITY, 0.0).stair_case();

        let globe_map = coordinate.globe_map(&altitude)?;

        Ok(Self {
            domain_key: DomainKey::Time,
            time,
            distance,
            altitude,
            speed,
            grade,
            ascending,
            descending,
            heart_rate,
            coordinate,
            globe_map,
        })
    }

    /// Build a new bundle whose independent variable is `key`, by
    /// converting every member series against this bundle's own axis
    /// series for `key`
    ///
    /// For `DomainKey::Distance`, every member is resampled against this
    /// bundle's `distance` series, making distance the new independent
    /// variable for all of them.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NonMonotonicConversion`] when the requested axis
    /// does not support inversion (for example a workout with no
    /// movement converted to the distance domain); other conversion
    /// failures propagate from the series algebra.
    pub fn converted(&self, key: DomainKey) -> AnalysisResult<Self> {
        self.converted_with_resolution(key, self.len())
    }

    /// [`converted`](Self::converted) with an explicit output resolution
    ///
    /// # Errors
    ///
    /// See [`converted`](Self::converted).
    pub fn converted_with_resolution(
        &self,
        key: DomainKey,
        resolution: usize,
    ) -> AnalysisResult<Self> {
        let axis = self.series_for_key(key);
        debug!(source = %self.domain_key, target = %key, resolution, "converting domain bundle");

        let altitude = self
            .altitude
            .convert_to_domain_with_resolution(axis, resolution)?;
        let coordinate = self
            .coordinate
            .convert_to_domain_with_resolution(axis, resolution)?;
        let globe_map = coordinate.globe_map(&altitude)?;

        Ok(Self {
            domain_key: key,
            time: self.time.convert_to_domain_with_resolution(axis, resolution)?,
            distance: self
                .distance
                .convert_to_domain_with_resolution(axis, resolution)?,
            altitude,
            speed: self
                .speed
                .convert_to_domain_with_resolution(axis, resolution)?,
            grade: self
                .grade
                .convert_to_domain_with_resolution(axis, resolution)?,
            ascending: self
                .ascending
                .convert_to_domain_with_resolution(axis, resolution)?,
            descending: self
                .descending
                .convert_to_domain_with_resolution(axis, resolution)?,
            heart_rate: self
                .heart_rate
                .convert_to_domain_with_resolution(axis, resolution)?,
            coordinate,
            globe_map,
        })
    }

    /// The axis series a conversion to `key` inverts: elapsed time,
    /// distance traveled, or cumulative ascent
    #[must_use]
    pub fn series_for_key(&self, key: DomainKey) -> &ScalarSeries {
        match key {
            DomainKey::Time => &self.time,
            DomainKey::Distance => &self.distance,
            DomainKey::Climbing => &self.ascending,
        }
    }

    /// This bundle's own axis series
    #[must_use]
    pub fn native_series(&self) -> &ScalarSeries {
        self.series_for_key(self.domain_key)
    }

    /// The independent variable of this bundle
    #[must_use]
    pub fn domain_key(&self) -> DomainKey {
        self.domain_key
    }

    /// Shared sample count of every member series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false: a bundle holds at least two samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// The range covering every sample
    #[must_use]
    pub fn full_range(&self) -> Range<usize> {
        0..self.len()
    }

    /// Elapsed seconds since the workout start
    #[must_use]
    pub fn time(&self) -> &ScalarSeries {
        &self.time
    }

    /// Distance traveled from the start point, measured along the route
    ///
    /// A route of five laps around a 250 meter track reads 750 meters at
    /// the conclusion of the third lap.
    #[must_use]
    pub fn distance(&self) -> &ScalarSeries {
        &self.distance
    }

    /// Altitude above sea level in meters
    #[must_use]
    pub fn altitude(&self) -> &ScalarSeries {
        &self.altitude
    }

    /// Speed in meters per second
    #[must_use]
    pub fn speed(&self) -> &ScalarSeries {
        &self.speed
    }

    /// Ratio of vertical to horizontal travel; flat is 0, a 45 degree
    /// climb is 1
    #[must_use]
    pub fn grade(&self) -> &ScalarSeries {
        &self.grade
    }

    /// Cumulative meters ascended; monotonically non-decreasing and
    /// never negative
    ///
    /// For a loop between a 10 meter low and a 30 meter high, ascending
    /// grows by 20 meters per lap while altitude oscillates.
    #[must_use]
    pub fn ascending(&self) -> &ScalarSeries {
        &self.ascending
    }

    /// Cumulative meters descended; monotonically non-increasing and
    /// never positive
    #[must_use]
    pub fn descending(&self) -> &ScalarSeries {
        &self.descending
    }

    /// Heart rate in beats per minute
    #[must_use]
    pub fn heart_rate(&self) -> &ScalarSeries {
        &self.heart_rate
    }

    /// Geographic position along the route
    #[must_use]
    pub fn coordinate(&self) -> &CoordinateSeries {
        &self.coordinate
    }

    /// Route coordinates projected onto the globe with altitude offsets
    #[must_use]
    pub fn globe_map(&self) -> &PointCloud {
        &self.globe_map
    }

    /// The sample index at `percent` of the way through the bundle
    ///
    /// `percent` is clamped into `[0, 1]`.
    #[must_use]
    pub fn index_for_percent(&self, percent: f64) -> usize {
        let clamped = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        (clamped * (self.len() - 1) as f64).round() as usize
    }

    /// Map a sample index in `other`'s bundle to the closest
    /// corresponding index in this bundle
    ///
    /// Reads this bundle's axis measurement at `other[index]`, then
    /// inverts this bundle's own axis series to find where that value
    /// falls.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IndexOutOfRange`] when `index` is outside `other`.
    pub fn index_from_index(&self, index: usize, other: &Self) -> AnalysisResult<usize> {
        let measured = other.series_for_key(self.domain_key).value_at(index)?;
        let position = fractional_position(self.native_series().values(), measured);
        let last = self.len() - 1;
        Ok((position.round() as usize).min(last))
    }

    /// Map a sample range in `other`'s bundle to the corresponding
    /// inclusive range in this bundle
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::RangeOutOfBounds`] when `range` is empty or
    ///   outside `other`
    /// - [`AnalysisError::EmptyRange`] when the mapped endpoints invert;
    ///   every axis series built by this crate is non-decreasing, and the
    ///   mapping preserves endpoint order for non-decreasing axes
    pub fn range_from_range(&self, range: Range<usize>, other: &Self) -> AnalysisResult<Range<usize>> {
        if range.start >= range.end || range.end > other.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: other.len(),
            });
        }
        let start = self.index_from_index(range.start, other)?;
        let last = self.index_from_index(range.end - 1, other)?;
        if last < start {
            return Err(AnalysisError::EmptyRange { start, end: last });
        }
        Ok(start..last + 1)
    }
}
