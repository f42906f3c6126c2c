// ABOUTME: Immutable keyed scalar series with interpolation, derivative, and integral algebra
// ABOUTME: Core resampling engine including cross-domain conversion via interpolate-invert-interpolate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Scalar Series
//!
//! A [`ScalarSeries`] models a one-dimensional numeric function sampled at
//! monotonically increasing keys over a bounded domain. The keys may
//! represent indices, or a relation to another value such as time.
//!
//! An example may be altitude of an aircraft as the values and distance
//! traveled as the keys. The maximum tells you the highest the aircraft
//! was; the derivative gives the grade it was traveling on; the maximum
//! of the derivative gives the steepest climb.
//!
//! Every transformation returns a new instance. Instances are safe to
//! share read-only across threads.

use crate::config::DEFAULT_DOMAIN_TOLERANCE;
use crate::graph::{GraphConfiguration, GraphGuide};
use paceline_core::{AnalysisError, AnalysisResult};
use rayon::prelude::*;
use std::ops::Range;
use tracing::debug;

/// An immutable one-dimensional numeric function sampled at strictly
/// increasing keys over the bounded domain `[0, domain]`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSeries {
    values: Vec<f64>,
    keys: Vec<f64>,
    domain: f64,
}

/// Linear interpolation of `values` (sampled at `keys`) at a query key.
///
/// Query keys outside `[keys[0], keys[n-1]]` clamp to the nearest
/// endpoint. `keys` must be strictly increasing and non-empty.
pub(crate) fn interpolate(keys: &[f64], values: &[f64], key: f64) -> f64 {
    let upper = keys.partition_point(|&k| k < key);
    if upper == 0 {
        return values[0];
    }
    if upper == keys.len() {
        return values[values.len() - 1];
    }
    let lower = upper - 1;
    let t = (key - keys[lower]) / (keys[upper] - keys[lower]);
    values[lower] + t * (values[upper] - values[lower])
}

/// Invert a monotonic non-decreasing value sequence: find the fractional
/// sample position `p` where the sequence passes through `target`.
///
/// Targets outside the sequence clamp to the endpoints. Inside a flat
/// segment the inverse clamps to the left edge of the plateau.
pub(crate) fn fractional_position(values: &[f64], target: f64) -> f64 {
    let upper = values.partition_point(|&v| v < target);
    if upper == 0 {
        return 0.0;
    }
    if upper == values.len() {
        return (values.len() - 1) as f64;
    }
    let lower = upper - 1;
    let span = values[upper] - values[lower];
    // values[lower] < target <= values[upper], so span > 0
    lower as f64 + (target - values[lower]) / span
}

/// Evaluate `values` at a fractional sample position by linear
/// interpolation between the two bracketing samples.
pub(crate) fn value_at_fraction(values: &[f64], position: f64) -> f64 {
    let clamped = position.clamp(0.0, (values.len() - 1) as f64);
    let lower = clamped.floor() as usize;
    if lower + 1 >= values.len() {
        return values[values.len() - 1];
    }
    let t = clamped - lower as f64;
    values[lower] + t * (values[lower + 1] - values[lower])
}

/// Validate the shared key/domain contract for series construction.
pub(crate) fn validate_keys(keys: &[f64], domain: f64) -> AnalysisResult<()> {
    if keys.is_empty() {
        return Err(AnalysisError::invalid_input("series length must be >= 1"));
    }
    if !domain.is_finite() || domain < 0.0 {
        return Err(AnalysisError::invalid_input(
            "domain must be finite and non-negative",
        ));
    }
    if !keys[0].is_finite() || keys[0] < 0.0 {
        return Err(AnalysisError::invalid_input(
            "first key must be finite and non-negative",
        ));
    }
    if keys
        .windows(2)
        .any(|pair| !pair[1].is_finite() || pair[1] <= pair[0])
    {
        return Err(AnalysisError::invalid_input(
            "keys must increase strictly monotonically",
        ));
    }
    if keys[keys.len() - 1] > domain {
        return Err(AnalysisError::invalid_input(
            "last key must not exceed the domain",
        ));
    }
    Ok(())
}

/// Two series can only be converted against each other when they are
/// sampled over the same underlying axis.
pub(crate) fn domains_match(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= DEFAULT_DOMAIN_TOLERANCE * scale
}

impl ScalarSeries {
    /// Create a series from paired values and keys over `[0, domain]`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the inputs are empty, the
    /// lengths differ, the keys are not strictly increasing, the first
    /// key is negative, or the last key exceeds `domain`.
    pub fn new(values: Vec<f64>, keys: Vec<f64>, domain: f64) -> AnalysisResult<Self> {
        if values.len() != keys.len() {
            return Err(AnalysisError::invalid_input(
                "values and keys must have equal lengths",
            ));
        }
        validate_keys(&keys, domain)?;
        Ok(Self {
            values,
            keys,
            domain,
        })
    }

    /// Create a per-sample-indexed series: keys are the integers
    /// `0..n-1` and the domain is `n-1`
    ///
    /// Used for series with no independent key axis, where the sample
    /// index is the key.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when `values` is empty.
    pub fn from_indexed(values: Vec<f64>) -> AnalysisResult<Self> {
        if values.is_empty() {
            return Err(AnalysisError::invalid_input("series length must be >= 1"));
        }
        let keys: Vec<f64> = (0..values.len()).map(|index| index as f64).collect();
        let domain = (values.len() - 1) as f64;
        Ok(Self {
            values,
            keys,
            domain,
        })
    }

    /// Internal constructor for outputs whose invariants are upheld by
    /// the producing algorithm.
    pub(crate) fn from_parts(values: Vec<f64>, keys: Vec<f64>, domain: f64) -> Self {
        debug_assert!(validate_keys(&keys, domain).is_ok());
        debug_assert_eq!(values.len(), keys.len());
        Self {
            values,
            keys,
            domain,
        }
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a series holds at least one sample
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The magnitude of the key domain; keys lie within `[0, domain]`
    #[must_use]
    pub fn domain(&self) -> f64 {
        self.domain
    }

    /// Borrowed read-only view of the backing values
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Borrowed read-only view of the backing keys
    #[must_use]
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// The range covering every sample
    #[must_use]
    pub fn full_range(&self) -> Range<usize> {
        0..self.len()
    }

    /// The value at `index`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IndexOutOfRange`] when `index >= len`.
    pub fn value_at(&self, index: usize) -> AnalysisResult<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(AnalysisError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// The value of the series at an arbitrary key, by linear
    /// interpolation between the two bracketing samples
    ///
    /// Keys outside the sampled range clamp to the nearest endpoint.
    #[must_use]
    pub fn value_at_key(&self, key: f64) -> f64 {
        interpolate(&self.keys, &self.values, key)
    }

    fn checked_range(&self, range: &Range<usize>) -> AnalysisResult<Range<usize>> {
        if range.start >= range.end || range.end > self.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: self.len(),
            });
        }
        Ok(range.clone())
    }

    /// The mean value over `range`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn average(&self, range: Range<usize>) -> AnalysisResult<f64> {
        let range = self.checked_range(&range)?;
        let count = range.len() as f64;
        let sum: f64 = self.values[range].iter().sum();
        Ok(sum / count)
    }

    /// The maximum value over `range`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn maximum(&self, range: Range<usize>) -> AnalysisResult<f64> {
        let range = self.checked_range(&range)?;
        Ok(self.values[range].iter().copied().fold(f64::MIN, f64::max))
    }

    /// The minimum value over `range`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn minimum(&self, range: Range<usize>) -> AnalysisResult<f64> {
        let range = self.checked_range(&range)?;
        Ok(self.values[range].iter().copied().fold(f64::MAX, f64::min))
    }

    /// The difference between the value at the end of `range` and the
    /// value at its beginning
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn delta(&self, range: Range<usize>) -> AnalysisResult<f64> {
        let range = self.checked_range(&range)?;
        Ok(self.values[range.end - 1] - self.values[range.start])
    }

    /// The instantaneous derivative of the values with respect to the keys
    ///
    /// The result has length `n - 1`; the key for output slot `i` is the
    /// midpoint of the two bracketing input keys. The result keeps the
    /// receiver's domain.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the series has fewer than two samples.
    pub fn derivative(&self) -> AnalysisResult<Self> {
        if self.len() < 2 {
            return Err(AnalysisError::invalid_input(
                "derivative requires at least two samples",
            ));
        }
        let output_len = self.len() - 1;
        let mut values = Vec::with_capacity(output_len);
        let mut keys = Vec::with_capacity(output_len);
        for index in 0..output_len {
            let dk = self.keys[index + 1] - self.keys[index];
            values.push((self.values[index + 1] - self.values[index]) / dk);
            keys.push((self.keys[index] + self.keys[index + 1]) / 2.0);
        }
        Ok(Self::from_parts(values, keys, self.domain))
    }

    /// The difference between each value and the value before it
    ///
    /// The first output value is always 0 (there is no prior sample);
    /// keys are unchanged.
    #[must_use]
    pub fn step_space(&self) -> Self {
        let mut values = Vec::with_capacity(self.len());
        values.push(0.0);
        for index in 1..self.len() {
            values.push(self.values[index] - self.values[index - 1]);
        }
        Self::from_parts(values, self.keys.clone(), self.domain)
    }

    /// The running sum of the values; the algebraic inverse of
    /// [`step_space`](Self::step_space)
    ///
    /// The first value is unchanged. For a series whose first value is
    /// zero, `step_space().stair_case()` reconstructs the original
    /// within floating-point rounding.
    #[must_use]
    pub fn stair_case(&self) -> Self {
        let mut values = Vec::with_capacity(self.len());
        let mut running = 0.0;
        for &value in &self.values {
            running += value;
            values.push(running);
        }
        Self::from_parts(values, self.keys.clone(), self.domain)
    }

    /// Element-wise clamp of the values into `[lower, upper]`
    ///
    /// Either bound may be infinite. For example, clipping a climb
    /// series to `[0, +inf]` keeps only the ascending steps.
    #[must_use]
    pub fn clip(&self, lower: f64, upper: f64) -> Self {
        let values = self
            .values
            .iter()
            .map(|value| value.clamp(lower, upper))
            .collect();
        Self::from_parts(values, self.keys.clone(), self.domain)
    }

    /// Re-express the receiver's samples at new key positions by linear
    /// interpolation
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the new keys violate the
    /// key/domain contract.
    pub fn resample_at(&self, keys: &[f64], domain: f64) -> AnalysisResult<Self> {
        validate_keys(keys, domain)?;
        let values = keys.iter().map(|&key| self.value_at_key(key)).collect();
        Ok(Self::from_parts(values, keys.to_vec(), domain))
    }

    /// Convert the receiver into the domain described by `other`'s values
    ///
    /// Output resolution defaults to the source length, preserving sample
    /// density. See
    /// [`convert_to_domain_with_resolution`](Self::convert_to_domain_with_resolution).
    ///
    /// # Errors
    ///
    /// See [`convert_to_domain_with_resolution`](Self::convert_to_domain_with_resolution).
    pub fn convert_to_domain(&self, other: &Self) -> AnalysisResult<Self> {
        self.convert_to_domain_with_resolution(other, self.len())
    }

    /// Convert the receiver into the domain described by `other`'s
    /// values, sampling the output at `resolution` evenly spaced keys
    ///
    /// `other.values()[i]` is treated as a new, independent key for
    /// sample `i`. For example, with the receiver as speed over time and
    /// `other` as distance over time, the result is speed over distance.
    ///
    /// The output key axis spans `[0, other.values()[n-1]]`. Each output
    /// key is inverted through `other`'s value sequence (binary search
    /// plus linear interpolation) to a fractional source position, and
    /// the receiver is evaluated there.
    ///
    /// This interpolate-invert-interpolate composition is why a chained
    /// conversion is far more costly than the dedicated
    /// [`derivative_in_domain`](Self::derivative_in_domain).
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::DomainMismatch`] when the two series are not
    ///   sampled over the same underlying axis
    /// - [`AnalysisError::LengthMismatch`] when the lengths differ
    /// - [`AnalysisError::NonMonotonicConversion`] when `other`'s values
    ///   decrease anywhere or span nothing
    /// - [`AnalysisError::InvalidInput`] when `resolution < 2`
    pub fn convert_to_domain_with_resolution(
        &self,
        other: &Self,
        resolution: usize,
    ) -> AnalysisResult<Self> {
        if !domains_match(self.domain, other.domain) {
            return Err(AnalysisError::DomainMismatch {
                expected: self.domain,
                actual: other.domain,
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
        if other.values.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(AnalysisError::NonMonotonicConversion);
        }
        let new_domain = other.values[other.len() - 1];
        if !new_domain.is_finite() || new_domain <= 0.0 {
            return Err(AnalysisError::NonMonotonicConversion);
        }

        let step = new_domain / (resolution - 1) as f64;
        // resolution - 1 accumulated steps can round one ulp past the domain.
        let keys: Vec<f64> = (0..resolution)
            .map(|index| (index as f64 * step).min(new_domain))
            .collect();
        let values: Vec<f64> = keys
            .par_iter()
            .map(|&key| {
                let position = fractional_position(&other.values, key);
                value_at_fraction(&self.values, position)
            })
            .collect();

        Ok(Self::from_parts(values, keys, new_domain))
    }

    /// The instantaneous derivative of the receiver with respect to
    /// `other`, expressed on the receiver's native key axis
    ///
    /// Equivalent to, but significantly more performant than,
    /// `convert_to_domain(other).derivative().convert_to_domain(self)`:
    /// computed directly as `Δself / Δother` per adjacent sample pair,
    /// keyed by the same midpoint convention as
    /// [`derivative`](Self::derivative). Pairs where `other` does not
    /// move are dropped.
    ///
    /// For example, with the receiver as altitude over time and `other`
    /// as distance over time, the result is grade over time.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::DomainMismatch`] when the two series are not
    ///   sampled over the same underlying axis
    /// - [`AnalysisError::LengthMismatch`] when the lengths differ
    /// - [`AnalysisError::InvalidInput`] when fewer than two samples, or
    ///   no sample pair survives the zero-step filter
    pub fn derivative_in_domain(&self, other: &Self) -> AnalysisResult<Self> {
        if !domains_match(self.domain, other.domain) {
            return Err(AnalysisError::DomainMismatch {
                expected: self.domain,
                actual: other.domain,
            });
        }
        if self.len() != other.len() {
            return Err(AnalysisError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        if self.len() < 2 {
            return Err(AnalysisError::invalid_input(
                "derivative requires at least two samples",
            ));
        }

        let mut values = Vec::with_capacity(self.len() - 1);
        let mut keys = Vec::with_capacity(self.len() - 1);
        let mut dropped = 0_usize;
        for index in 0..self.len() - 1 {
            let dx = other.values[index + 1] - other.values[index];
            if dx == 0.0 {
                dropped += 1;
                continue;
            }
            let dy = self.values[index + 1] - self.values[index];
            values.push(dy / dx);
            keys.push((self.keys[index] + self.keys[index + 1]) / 2.0);
        }
        if dropped > 0 {
            debug!(dropped, "dropped zero-step pairs in domain derivative");
        }
        if values.is_empty() {
            return Err(AnalysisError::invalid_input(
                "no sample pair moves in the requested domain",
            ));
        }
        Ok(Self::from_parts(values, keys, self.domain))
    }

    /// A graph guide that lays the series out as drawable plot points
    ///
    /// # Errors
    ///
    /// Propagates configuration failures from [`GraphGuide::new`].
    pub fn graph_guide(&self, configuration: &GraphConfiguration) -> AnalysisResult<GraphGuide> {
        GraphGuide::new(self, configuration)
    }
}
