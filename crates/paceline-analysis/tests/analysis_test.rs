// ABOUTME: Tests for WorkoutAnalysis construction and lazy domain caching
// ABOUTME: Covers async creation, Arc identity of cached bundles, and failure replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use paceline_analysis::{AnalysisConfig, DomainKey, WorkoutAnalysis};
use paceline_core::{AnalysisError, GeoCoordinate, HeartRateSample, LocationSample, RawWorkoutData};

fn workout_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap()
}

fn synthetic_workout(altitude_for: impl Fn(i64) -> f64) -> RawWorkoutData {
    let start = workout_start();
    let locations = (0..=24_i64)
        .map(|index| LocationSample {
            timestamp: start + Duration::seconds(index * 5),
            coordinate: GeoCoordinate::new(0.0, index as f64 * 0.0001),
            altitude: altitude_for(index),
            horizontal_accuracy: 5.0,
            vertical_accuracy: 3.0,
        })
        .collect();
    let heart_rates = (0..=12_i64)
        .map(|index| HeartRateSample {
            timestamp: start + Duration::seconds(index * 10),
            beats_per_minute: 120.0 + index as f64,
        })
        .collect();
    RawWorkoutData {
        start,
        end: start + Duration::seconds(120),
        locations,
        heart_rates,
    }
}

fn climbing_workout() -> RawWorkoutData {
    synthetic_workout(|index| 100.0 + 2.0 * index as f64)
}

fn downhill_workout() -> RawWorkoutData {
    synthetic_workout(|index| 200.0 - 2.0 * index as f64)
}

#[test]
fn blocking_construction_builds_the_time_bundle() {
    let analysis = WorkoutAnalysis::new_blocking(&climbing_workout(), AnalysisConfig::default())
        .unwrap();
    assert_eq!(analysis.time_domain().len(), 121);
    assert_eq!(analysis.time_domain().domain_key(), DomainKey::Time);
}

#[tokio::test]
async fn async_construction_matches_blocking() {
    let analysis = WorkoutAnalysis::create(climbing_workout(), AnalysisConfig::default())
        .await
        .unwrap();
    assert_eq!(analysis.time_domain().len(), 121);
}

#[test]
fn time_domain_is_served_without_conversion() {
    let analysis = WorkoutAnalysis::new_blocking(&climbing_workout(), AnalysisConfig::default())
        .unwrap();
    let served = analysis.domain(DomainKey::Time).unwrap();
    assert!(Arc::ptr_eq(&served, analysis.time_domain()));
}

#[test]
fn converted_domains_are_computed_once_and_cached() {
    let analysis = WorkoutAnalysis::new_blocking(&climbing_workout(), AnalysisConfig::default())
        .unwrap();
    let first = analysis.domain(DomainKey::Distance).unwrap();
    let second = analysis.domain(DomainKey::Distance).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.domain_key(), DomainKey::Distance);

    let climbing = analysis.domain(DomainKey::Climbing).unwrap();
    assert_eq!(climbing.domain_key(), DomainKey::Climbing);
    assert!(!Arc::ptr_eq(&first, &climbing));
}

#[test]
fn conversion_resolution_comes_from_the_config() {
    let config = AnalysisConfig {
        conversion_resolution: Some(61),
        ..AnalysisConfig::default()
    };
    let analysis = WorkoutAnalysis::new_blocking(&climbing_workout(), config).unwrap();
    assert_eq!(analysis.time_domain().len(), 121);
    let distance = analysis.domain(DomainKey::Distance).unwrap();
    assert_eq!(distance.len(), 61);
}

#[test]
fn failed_conversions_replay_the_same_error() {
    // A ride with no ascent has a flat climbing axis, so the climbing
    // bundle cannot be built.
    let analysis = WorkoutAnalysis::new_blocking(&downhill_workout(), AnalysisConfig::default())
        .unwrap();
    let first = analysis.domain(DomainKey::Climbing).unwrap_err();
    assert_eq!(first, AnalysisError::NonMonotonicConversion);
    let second = analysis.domain(DomainKey::Climbing).unwrap_err();
    assert_eq!(first, second);

    // Other domains stay available.
    assert!(analysis.domain(DomainKey::Distance).is_ok());
}
