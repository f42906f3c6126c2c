// ABOUTME: Tests for ScalarSeries construction, statistics, and calculus operations
// ABOUTME: Covers derivative/integral inverses, clipping, and cross-domain conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use paceline_analysis::ScalarSeries;
use paceline_core::AnalysisError;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

// === Construction ===

#[test]
fn new_rejects_empty_input() {
    let result = ScalarSeries::new(vec![], vec![], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
}

#[test]
fn new_rejects_non_monotonic_keys() {
    let result = ScalarSeries::new(vec![1.0, 2.0, 3.0], vec![0.0, 2.0, 2.0], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));

    let result = ScalarSeries::new(vec![1.0, 2.0, 3.0], vec![0.0, 2.0, 1.0], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
}

#[test]
fn new_rejects_keys_past_domain() {
    let result = ScalarSeries::new(vec![1.0, 2.0], vec![0.0, 11.0], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
}

#[test]
fn new_rejects_negative_first_key() {
    let result = ScalarSeries::new(vec![1.0, 2.0], vec![-1.0, 5.0], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
}

#[test]
fn new_rejects_mismatched_lengths() {
    let result = ScalarSeries::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0], 10.0);
    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
}

#[test]
fn from_indexed_builds_identity_keys() {
    let series = ScalarSeries::from_indexed(vec![5.0, 5.0, 5.0]).unwrap();
    assert_eq!(series.keys(), &[0.0, 1.0, 2.0]);
    assert_close(series.domain(), 2.0, 0.0);
}

// === Point and range queries ===

#[test]
fn value_at_checks_bounds() {
    let series = ScalarSeries::from_indexed(vec![1.0, 2.0, 3.0]).unwrap();
    assert_close(series.value_at(2).unwrap(), 3.0, 0.0);
    assert!(matches!(
        series.value_at(3),
        Err(AnalysisError::IndexOutOfRange {
            index: 3,
            length: 3
        })
    ));
}

#[test]
fn value_at_key_interpolates_and_clamps() {
    let series = ScalarSeries::new(vec![10.0, 20.0], vec![2.0, 4.0], 5.0).unwrap();
    assert_close(series.value_at_key(3.0), 15.0, 1e-12);
    assert_close(series.value_at_key(0.0), 10.0, 0.0);
    assert_close(series.value_at_key(9.0), 20.0, 0.0);
}

#[test]
fn range_statistics() {
    let series = ScalarSeries::from_indexed(vec![4.0, 8.0, 2.0, 6.0]).unwrap();
    assert_close(series.average(0..4).unwrap(), 5.0, 1e-12);
    assert_close(series.maximum(0..4).unwrap(), 8.0, 0.0);
    assert_close(series.minimum(0..4).unwrap(), 2.0, 0.0);
    assert_close(series.delta(0..4).unwrap(), 2.0, 1e-12);
    assert_close(series.delta(1..3).unwrap(), -6.0, 1e-12);
}

#[test]
fn average_lies_between_extrema() {
    let series = ScalarSeries::from_indexed(vec![3.0, -7.0, 12.0, 0.5, 9.0]).unwrap();
    let range = 1..4;
    let average = series.average(range.clone()).unwrap();
    assert!(average >= series.minimum(range.clone()).unwrap());
    assert!(average <= series.maximum(range).unwrap());
}

#[test]
fn range_statistics_reject_bad_ranges() {
    let series = ScalarSeries::from_indexed(vec![1.0, 2.0]).unwrap();
    assert!(matches!(
        series.average(1..1),
        Err(AnalysisError::RangeOutOfBounds { .. })
    ));
    assert!(matches!(
        series.maximum(0..3),
        Err(AnalysisError::RangeOutOfBounds { .. })
    ));
}

// === Calculus ===

#[test]
fn derivative_uses_midpoint_keys() {
    let series = ScalarSeries::new(vec![0.0, 10.0, 10.0], vec![0.0, 2.0, 6.0], 6.0).unwrap();
    let derivative = series.derivative().unwrap();
    assert_eq!(derivative.len(), 2);
    assert_eq!(derivative.keys(), &[1.0, 4.0]);
    assert_close(derivative.value_at(0).unwrap(), 5.0, 1e-12);
    assert_close(derivative.value_at(1).unwrap(), 0.0, 1e-12);
    assert_close(derivative.domain(), 6.0, 0.0);
}

#[test]
fn derivative_keys_lie_strictly_between_inputs() {
    let series = ScalarSeries::new(
        vec![1.0, 4.0, 9.0, 16.0],
        vec![0.0, 1.0, 3.0, 7.0],
        7.0,
    )
    .unwrap();
    let derivative = series.derivative().unwrap();
    assert_eq!(derivative.len(), series.len() - 1);
    for index in 0..derivative.len() {
        let key = derivative.keys()[index];
        assert!(key > series.keys()[index]);
        assert!(key < series.keys()[index + 1]);
    }
}

#[test]
fn derivative_requires_two_samples() {
    let series = ScalarSeries::from_indexed(vec![1.0]).unwrap();
    assert!(matches!(
        series.derivative(),
        Err(AnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn step_space_starts_at_zero() {
    let series = ScalarSeries::from_indexed(vec![10.0, 30.0, 10.0, 30.0]).unwrap();
    let steps = series.step_space();
    assert_eq!(steps.values(), &[0.0, 20.0, -20.0, 20.0]);
    assert_eq!(steps.keys(), series.keys());
}

#[test]
fn stair_case_inverts_step_space() {
    // Integral is the exact inverse of differencing for a series
    // anchored at zero.
    let series = ScalarSeries::from_indexed(vec![0.0, 12.5, 7.25, 30.0, 29.0]).unwrap();
    let round_trip = series.step_space().stair_case();
    for index in 0..series.len() {
        assert_close(
            round_trip.value_at(index).unwrap(),
            series.value_at(index).unwrap(),
            1e-9,
        );
    }
}

#[test]
fn clip_clamps_with_infinite_bounds() {
    let series = ScalarSeries::from_indexed(vec![-5.0, 0.0, 5.0]).unwrap();
    let positive = series.clip(0.0, f64::INFINITY);
    assert_eq!(positive.values(), &[0.0, 0.0, 5.0]);
    let negative = series.clip(f64::NEG_INFINITY, 0.0);
    assert_eq!(negative.values(), &[-5.0, 0.0, 0.0]);
}

#[test]
fn ascending_descending_partition_example() {
    // Altitude [10, 30, 10, 30] at times [0, 1, 2, 3].
    let altitude = ScalarSeries::from_indexed(vec![10.0, 30.0, 10.0, 30.0]).unwrap();
    let climb = altitude.step_space();
    let ascending = climb.clip(0.0, f64::INFINITY).stair_case();
    let descending = climb.clip(f64::NEG_INFINITY, 0.0).stair_case();
    assert_eq!(ascending.values(), &[0.0, 20.0, 20.0, 40.0]);
    assert_eq!(descending.values(), &[0.0, 0.0, -20.0, -20.0]);
}

// === Domain conversion ===

#[test]
fn convert_to_own_domain_is_identity() {
    let axis = ScalarSeries::from_indexed(vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    let series = ScalarSeries::from_indexed(vec![3.0, 1.0, 4.0, 1.0, 5.0]).unwrap();
    let converted = series.convert_to_domain(&axis).unwrap();
    assert_eq!(converted.len(), series.len());
    for index in 0..series.len() {
        assert_close(
            converted.value_at(index).unwrap(),
            series.value_at(index).unwrap(),
            1e-9,
        );
    }
}

#[test]
fn convert_resamples_against_new_axis() {
    // Distance over time accelerates; speed-over-distance samples must
    // land at even distance spacing.
    let distance = ScalarSeries::from_indexed(vec![0.0, 1.0, 4.0, 9.0]).unwrap();
    let altitude = ScalarSeries::from_indexed(vec![100.0, 101.0, 104.0, 109.0]).unwrap();
    let converted = altitude.convert_to_domain(&distance).unwrap();
    assert_eq!(converted.len(), 4);
    assert_eq!(converted.keys(), &[0.0, 3.0, 6.0, 9.0]);
    // Altitude equals 100 + distance in this construction.
    for index in 0..converted.len() {
        assert_close(
            converted.value_at(index).unwrap(),
            100.0 + converted.keys()[index],
            1e-9,
        );
    }
}

#[test]
fn convert_respects_requested_resolution() {
    let axis = ScalarSeries::from_indexed(vec![0.0, 2.0, 4.0]).unwrap();
    let series = ScalarSeries::from_indexed(vec![0.0, 10.0, 20.0]).unwrap();
    let converted = series.convert_to_domain_with_resolution(&axis, 9).unwrap();
    assert_eq!(converted.len(), 9);
    assert_close(converted.domain(), 4.0, 0.0);
}

#[test]
fn convert_rejects_domain_mismatch() {
    let series = ScalarSeries::new(vec![1.0, 2.0], vec![0.0, 5.0], 5.0).unwrap();
    let axis = ScalarSeries::new(vec![0.0, 7.0], vec![0.0, 7.0], 7.0).unwrap();
    assert!(matches!(
        series.convert_to_domain(&axis),
        Err(AnalysisError::DomainMismatch { .. })
    ));
}

#[test]
fn convert_rejects_length_mismatch() {
    let series = ScalarSeries::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 5.0], 5.0).unwrap();
    let axis = ScalarSeries::new(vec![0.0, 4.0], vec![0.0, 5.0], 5.0).unwrap();
    assert!(matches!(
        series.convert_to_domain(&axis),
        Err(AnalysisError::LengthMismatch { .. })
    ));
}

#[test]
fn convert_rejects_decreasing_axis() {
    let series = ScalarSeries::from_indexed(vec![1.0, 2.0, 3.0]).unwrap();
    let axis = ScalarSeries::from_indexed(vec![0.0, 5.0, 4.0]).unwrap();
    assert!(matches!(
        series.convert_to_domain(&axis),
        Err(AnalysisError::NonMonotonicConversion)
    ));
}

#[test]
fn convert_rejects_axis_with_no_span() {
    let series = ScalarSeries::from_indexed(vec![1.0, 2.0, 3.0]).unwrap();
    let axis = ScalarSeries::from_indexed(vec![0.0, 0.0, 0.0]).unwrap();
    assert!(matches!(
        series.convert_to_domain(&axis),
        Err(AnalysisError::NonMonotonicConversion)
    ));
}

#[test]
fn convert_tolerates_plateaus_in_axis() {
    let series = ScalarSeries::from_indexed(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    let axis = ScalarSeries::from_indexed(vec![0.0, 2.0, 2.0, 4.0]).unwrap();
    let converted = series.convert_to_domain(&axis).unwrap();
    assert_eq!(converted.len(), 4);
    assert_close(converted.value_at(0).unwrap(), 0.0, 1e-9);
    assert_close(converted.value_at(3).unwrap(), 3.0, 1e-9);
}

#[test]
fn convert_keys_never_exceed_a_non_dyadic_axis_endpoint() {
    // An axis endpoint whose step accumulation rounds upward: the last
    // output key must still land inside the new domain.
    let mut axis_values: Vec<f64> = (0..12).map(|index| f64::from(index) * 18.0).collect();
    axis_values.push(217.455_242_706_718_45);
    let axis = ScalarSeries::from_indexed(axis_values).unwrap();
    let series = ScalarSeries::from_indexed((0..13).map(f64::from).collect()).unwrap();

    let converted = series.convert_to_domain(&axis).unwrap();
    let domain = converted.domain();
    assert!(converted.keys().iter().all(|&key| key <= domain));
    assert_close(converted.keys()[12], domain, 1e-9);
}

// === Domain derivative ===

#[test]
fn derivative_in_domain_matches_direct_ratio() {
    // Altitude rises twice as fast as distance: grade is 2 everywhere.
    let distance = ScalarSeries::from_indexed(vec![0.0, 3.0, 5.0, 10.0]).unwrap();
    let altitude = ScalarSeries::from_indexed(vec![0.0, 6.0, 10.0, 20.0]).unwrap();
    let grade = altitude.derivative_in_domain(&distance).unwrap();
    assert_eq!(grade.len(), 3);
    for index in 0..grade.len() {
        assert_close(grade.value_at(index).unwrap(), 2.0, 1e-12);
    }
}

#[test]
fn derivative_in_domain_drops_zero_steps() {
    let distance = ScalarSeries::from_indexed(vec![0.0, 2.0, 2.0, 6.0]).unwrap();
    let altitude = ScalarSeries::from_indexed(vec![0.0, 4.0, 5.0, 13.0]).unwrap();
    let grade = altitude.derivative_in_domain(&distance).unwrap();
    // The stationary pair is filtered out.
    assert_eq!(grade.len(), 2);
    assert_close(grade.value_at(0).unwrap(), 2.0, 1e-12);
    assert_close(grade.value_at(1).unwrap(), 2.0, 1e-12);
}

#[test]
fn derivative_in_domain_fails_when_nothing_moves() {
    let distance = ScalarSeries::from_indexed(vec![1.0, 1.0, 1.0]).unwrap();
    let altitude = ScalarSeries::from_indexed(vec![0.0, 4.0, 5.0]).unwrap();
    assert!(matches!(
        altitude.derivative_in_domain(&distance),
        Err(AnalysisError::InvalidInput { .. })
    ));
}
