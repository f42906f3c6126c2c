// ABOUTME: Multi-domain workout time-series analysis engine
// ABOUTME: Series algebra, geodetic series, domain conversion, and graph sampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

#![deny(unsafe_code)]

//! # Paceline Analysis
//!
//! Turns a workout's raw, irregularly-timestamped location and heart-rate
//! samples into multiple consistent, derivable views of the same activity:
//! as functions of elapsed time, of distance traveled, or of cumulative
//! climb. Statistics, graphs, and 3-D route queries are all served from
//! one engine.
//!
//! Data flows one way: raw samples build the time-domain
//! [`WorkoutDomain`](domain::WorkoutDomain) bundle; distance- and
//! climbing-domain bundles are derived from it on demand; the
//! [`GraphGuide`](graph::GraphGuide) and per-range statistics are computed
//! from whichever bundle a consumer holds.
//!
//! Every series type is immutable after construction and safe for
//! unsynchronized concurrent reads.

/// Immutable keyed scalar series with interpolation, derivative, and
/// integral algebra
pub mod series;

/// Geodetic analogue of the scalar series: coordinates indexed the same way
pub mod coordinate;

/// 3-D projection of a coordinate series onto the globe
pub mod point_cloud;

/// Multi-domain bundle: one series per measurement, re-expressible
/// against time, distance, or cumulative climb
pub mod domain;

/// Analysis session: asynchronous construction and lazy domain conversion
pub mod analysis;

/// Graph sampling: smoothed, evenly laid-out plot points with extrema
/// tracking and inverse queries
pub mod graph;

/// Explicit engine configuration (no ambient singletons)
pub mod config;

pub use analysis::WorkoutAnalysis;
pub use config::AnalysisConfig;
pub use coordinate::CoordinateSeries;
pub use domain::{DomainKey, WorkoutDomain};
pub use graph::{
    EdgeInsets, GraphConfiguration, GraphGuide, GraphSize, PlotPoint, SmoothingTechnique,
};
pub use point_cloud::PointCloud;
pub use series::ScalarSeries;
