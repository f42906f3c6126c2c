// ABOUTME: Core types for the Paceline workout analysis engine
// ABOUTME: Foundation crate with error handling, sample models, and geodetic constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

#![deny(unsafe_code)]

//! # Paceline Core
//!
//! Foundation crate providing shared types for the Paceline workout
//! analysis engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AnalysisError` and `AnalysisResult`
//! - **constants**: Geodetic and sampling constants organized by domain
//! - **models**: Raw sample types (`LocationSample`, `HeartRateSample`) and
//!   geometric primitives (`GeoCoordinate`, `Point3`)

/// Unified error handling for series construction and queries
pub mod errors;

/// Geodetic and sampling constants organized by domain
pub mod constants;

/// Raw sample models and geometric primitives
pub mod models;

pub use errors::{AnalysisError, AnalysisResult};
pub use models::{GeoCoordinate, HeartRateSample, LocationSample, Point3, RawWorkoutData};
