// ABOUTME: Ordered 3-D point series projected from a coordinate series onto the globe
// ABOUTME: Euclidean step distances and rolling spatial distance over index ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Point Cloud
//!
//! An ordered sequence of points in 3-dimensional space with no
//! independent key axis: positions correspond one-to-one to a coordinate
//! series' samples plus an altitude offset. Used for spatial distance
//! and route-shape queries.

use crate::series::ScalarSeries;
use paceline_core::{AnalysisError, AnalysisResult, Point3};
use std::ops::Range;

/// An immutable array of points in 3-dimensional space, implicitly
/// indexed `0..n-1`
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point3>,
}

impl PointCloud {
    /// Wrap an ordered point sequence
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrowed read-only view of the backing points
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The point at `index`
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IndexOutOfRange`] when `index >= len`.
    pub fn point_at(&self, index: usize) -> AnalysisResult<Point3> {
        self.points
            .get(index)
            .copied()
            .ok_or(AnalysisError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// Euclidean distance between each point and the one before it, as
    /// an index-keyed scalar series
    ///
    /// The first value is always 0.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidInput`] when the cloud is empty.
    pub fn step_space(&self) -> AnalysisResult<ScalarSeries> {
        let mut values = Vec::with_capacity(self.len());
        values.push(0.0);
        for index in 1..self.len() {
            values.push(self.points[index - 1].distance(&self.points[index]));
        }
        ScalarSeries::from_indexed(values)
    }

    /// Sum of the spatial steps strictly inside `range`
    ///
    /// Excludes the distance into the first point of the range: a range
    /// of one point rolls zero distance.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn rolling_distance(&self, range: Range<usize>) -> AnalysisResult<f64> {
        if range.start >= range.end || range.end > self.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: self.len(),
            });
        }
        let mut total = 0.0;
        for index in range.start + 1..range.end {
            total += self.points[index - 1].distance(&self.points[index]);
        }
        Ok(total)
    }

    /// The points of `range` in order
    ///
    /// Boundary accessor: geometry construction is delegated to an
    /// external renderer, which receives only this ordered data.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RangeOutOfBounds`] for an empty or out-of-bounds range.
    pub fn points_for_range(&self, range: Range<usize>) -> AnalysisResult<&[Point3]> {
        if range.start >= range.end || range.end > self.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: self.len(),
            });
        }
        Ok(&self.points[range])
    }
}
