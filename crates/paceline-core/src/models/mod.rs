// ABOUTME: Raw sample models and geometric primitives for workout analysis
// ABOUTME: Re-exports GeoCoordinate, Point3, LocationSample, HeartRateSample, RawWorkoutData
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

//! # Data Models
//!
//! Core data structures handed into the analysis engine by an external
//! acquisition layer. Models are provider-agnostic: the engine accepts
//! sparse, unevenly spaced samples and performs all alignment and
//! interpolation itself.

mod geo;
mod sample;

pub use geo::{GeoCoordinate, Point3};
pub use sample::{HeartRateSample, LocationSample, RawWorkoutData};
