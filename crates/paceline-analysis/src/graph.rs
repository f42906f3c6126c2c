// ABOUTME: Graph sampling: smoothed, evenly laid-out plot points for a series range
// ABOUTME: Tracks rendered extrema and answers inverse pixel-to-value queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Graph Guide
//!
//! A [`GraphGuide`] converts a series range into a finite, restartable
//! sequence of 2-D plot points: x linear in sample index across the inset
//! width, y linearly scaled from the value range into the inset height
//! (inverted, since larger values plot higher).
//!
//! Smoothing inserts interpolated points between adjacent samples. The
//! easing weights used here are monotonic on `[0, 1]`, so smoothed
//! output never leaves the convex hull of the bracketing samples and
//! original sample positions are preserved exactly.

use crate::series::ScalarSeries;
use paceline_core::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Complete size of a graph in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphSize {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

/// Insets within a graph's size to draw
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Inset from the top edge
    pub top: f64,
    /// Inset from the left edge
    pub left: f64,
    /// Inset from the bottom edge
    pub bottom: f64,
    /// Inset from the right edge
    pub right: f64,
}

/// A technique to smooth the rendered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingTechnique {
    /// One point per index, straight segments between them
    #[default]
    None,
    /// One interpolated midpoint per adjacent pair, doubling segment density
    Linear,
    /// Two interpolated points per adjacent pair, weighted by a
    /// monotonic quadratic ease-in-out
    Quadratic,
}

/// Configuration for laying a series range out as plot points
///
/// Passed explicitly per guide; mutating a configuration after building
/// a guide does not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfiguration {
    /// Complete size of the graph
    pub size: GraphSize,
    /// Insets within `size` to draw
    pub edge_insets: EdgeInsets,
    /// The portion of the data to graph; `None` graphs everything
    pub range: Option<Range<usize>>,
    /// How to smooth the rendered series
    pub smoothing: SmoothingTechnique,
}

/// A single 2-D plot point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Horizontal position in drawing units
    pub x: f64,
    /// Vertical position in drawing units
    pub y: f64,
}

/// Quadratic ease-in-out weight, monotonic on `[0, 1]`
fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - 2.0 * (1.0 - t) * (1.0 - t)
    }
}

/// A series range laid out as drawable plot points, with rendered
/// extrema and inverse queries
#[derive(Debug, Clone, PartialEq)]
pub struct GraphGuide {
    size: GraphSize,
    insets: EdgeInsets,
    range: Range<usize>,
    raw_values: Vec<f64>,
    points: Vec<PlotPoint>,
    minimum_value: f64,
    maximum_value: f64,
    x_scale: f64,
    y_scale: f64,
}

impl GraphGuide {
    /// Lay out `series` over the configured range
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::RangeOutOfBounds`] when the configured range is
    ///   empty or outside the series
    /// - [`AnalysisError::InvalidInput`] when the insets leave no
    ///   drawable area
    pub fn new(series: &ScalarSeries, config: &GraphConfiguration) -> AnalysisResult<Self> {
        let range = config.range.clone().unwrap_or_else(|| series.full_range());
        if range.start >= range.end || range.end > series.len() {
            return Err(AnalysisError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                length: series.len(),
            });
        }

        let insets = config.edge_insets;
        let effective_width = config.size.width - (insets.left + insets.right);
        let effective_height = config.size.height - (insets.top + insets.bottom);
        if !effective_width.is_finite()
            || !effective_height.is_finite()
            || effective_width <= 0.0
            || effective_height <= 0.0
        {
            return Err(AnalysisError::invalid_input(
                "graph insets leave no drawable area",
            ));
        }

        let raw_values: Vec<f64> = series.values()[range.clone()].to_vec();
        let sampled = Self::smoothed_samples(&raw_values, config.smoothing);

        let (minimum_value, maximum_value) = Self::rendered_extrema(&sampled);

        let count = raw_values.len();
        let x_scale = if count > 1 {
            effective_width / (count - 1) as f64
        } else {
            0.0
        };
        let y_scale = effective_height / (maximum_value - minimum_value);

        let points = sampled
            .iter()
            .map(|&(position, value)| PlotPoint {
                x: insets.left + position * x_scale,
                y: insets.top + (maximum_value - value) * y_scale,
            })
            .collect();

        Ok(Self {
            size: config.size,
            insets,
            range,
            raw_values,
            points,
            minimum_value,
            maximum_value,
            x_scale,
            y_scale,
        })
    }

    /// Build `(fractional index, value)` pairs for the selected
    /// smoothing technique. Original sample values appear unmodified.
    fn smoothed_samples(values: &[f64], smoothing: SmoothingTechnique) -> Vec<(f64, f64)> {
        let mut sampled = Vec::with_capacity(values.len() * 3);
        for (index, &value) in values.iter().enumerate() {
            sampled.push((index as f64, value));
            if index + 1 == values.len() {
                break;
            }
            let next = values[index + 1];
            match smoothing {
                SmoothingTechnique::None => {}
                SmoothingTechnique::Linear => {
                    sampled.push((index as f64 + 0.5, (value + next) / 2.0));
                }
                SmoothingTechnique::Quadratic => {
                    for t in [1.0 / 3.0, 2.0 / 3.0] {
                        let weight = ease_in_out_quad(t);
                        sampled.push((index as f64 + t, next.mul_add(weight, value * (1.0 - weight))));
                    }
                }
            }
        }
        sampled
    }

    /// Extrema across the smoothed output, widened when the value range
    /// is degenerate so the y-scale stays finite.
    fn rendered_extrema(sampled: &[(f64, f64)]) -> (f64, f64) {
        let mut minimum = f64::MAX;
        let mut maximum = f64::MIN;
        for &(_, value) in sampled {
            minimum = minimum.min(value);
            maximum = maximum.max(value);
        }

        if minimum == 0.0 && maximum == 0.0 {
            return (-1.0, 1.0);
        }
        if (maximum - minimum) < f64::EPSILON {
            // Relatively small widening, but not too small.
            let scale = 0.01;
            let away_from_zero = 1.0 + scale;
            let closer_to_zero = 1.0 - scale;
            maximum *= if maximum > 0.0 { away_from_zero } else { closer_to_zero };
            minimum *= if minimum > 0.0 { closer_to_zero } else { away_from_zero };
        }
        (minimum, maximum)
    }

    /// The size of the graph, including insets
    #[must_use]
    pub fn size(&self) -> GraphSize {
        self.size
    }

    /// The insets within the size to draw
    #[must_use]
    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    /// The range of the input data being drawn
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The minimum value in the graph
    ///
    /// Tracked across the smoothed output; degenerate input ranges are
    /// widened, so this may differ from the raw series minimum.
    #[must_use]
    pub fn minimum_value(&self) -> f64 {
        self.minimum_value
    }

    /// The maximum value in the graph
    ///
    /// Tracked across the smoothed output; degenerate input ranges are
    /// widened, so this may differ from the raw series maximum.
    #[must_use]
    pub fn maximum_value(&self) -> f64 {
        self.maximum_value
    }

    /// The plotted point sequence, in drawing order
    ///
    /// Finite and restartable: every call starts a fresh pass.
    pub fn points(&self) -> impl Iterator<Item = PlotPoint> + '_ {
        self.points.iter().copied()
    }

    /// Number of plotted points, including smoothing insertions
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The y position where `x` falls on the plotted path, by locating
    /// the bracketing segment and linearly inverting it
    ///
    /// Positions outside the plotted span clamp to the nearest endpoint.
    #[must_use]
    pub fn y_value_for_x(&self, x: f64) -> f64 {
        let upper = self.points.partition_point(|point| point.x < x);
        if upper == 0 {
            return self.points[0].y;
        }
        if upper == self.points.len() {
            return self.points[self.points.len() - 1].y;
        }
        let lower = upper - 1;
        let left = self.points[lower];
        let right = self.points[upper];
        let span = right.x - left.x;
        if span <= 0.0 {
            return left.y;
        }
        let t = (x - left.x) / span;
        t.mul_add(right.y - left.y, left.y)
    }

    /// The x component of [`point_for_index`](Self::point_for_index)
    ///
    /// Performs no range validation and may return a position outside
    /// the drawable area.
    #[must_use]
    pub fn x_for_index(&self, index: usize) -> f64 {
        let offset = index as f64 - self.range.start as f64;
        self.insets.left + offset * self.x_scale
    }

    /// The exact plotted point for an original sample
    ///
    /// Smoothing never moves original samples, so this is also a point
    /// on the rendered path.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::IndexOutOfRange`] when `index` is outside the
    /// configured range.
    pub fn point_for_index(&self, index: usize) -> AnalysisResult<PlotPoint> {
        if !self.range.contains(&index) {
            return Err(AnalysisError::IndexOutOfRange {
                index,
                length: self.range.end,
            });
        }
        let value = self.raw_values[index - self.range.start];
        Ok(PlotPoint {
            x: self.x_for_index(index),
            y: self.insets.top + (self.maximum_value - value) * self.y_scale,
        })
    }
}
