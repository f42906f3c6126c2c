// ABOUTME: Raw workout sample types consumed from the acquisition layer
// ABOUTME: Location and heart-rate samples with accuracy gating, plus the RawWorkoutData envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

use super::geo::GeoCoordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single location fix from the acquisition layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// When the fix was recorded
    pub timestamp: DateTime<Utc>,
    /// Geographic position of the fix
    pub coordinate: GeoCoordinate,
    /// Altitude above sea level in meters
    pub altitude: f64,
    /// Horizontal accuracy in meters; negative means the coordinate is unusable
    pub horizontal_accuracy: f64,
    /// Vertical accuracy in meters; negative means the altitude is unusable
    pub vertical_accuracy: f64,
}

impl LocationSample {
    /// Whether the coordinate component of this sample is usable
    #[must_use]
    pub fn has_usable_coordinate(&self) -> bool {
        self.horizontal_accuracy >= 0.0 && self.coordinate.is_valid()
    }

    /// Whether the altitude component of this sample is usable
    #[must_use]
    pub fn has_usable_altitude(&self) -> bool {
        self.vertical_accuracy >= 0.0 && self.altitude.is_finite()
    }
}

/// A single heart-rate reading from the acquisition layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
    /// Heart rate in beats per minute
    pub beats_per_minute: f64,
}

/// Everything the engine needs to analyze one workout
///
/// Sample lists must be ordered by strictly increasing timestamp; the
/// engine rejects out-of-order input rather than re-sorting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWorkoutData {
    /// Workout start
    pub start: DateTime<Utc>,
    /// Workout end
    pub end: DateTime<Utc>,
    /// Ordered location fixes
    pub locations: Vec<LocationSample>,
    /// Ordered heart-rate readings
    pub heart_rates: Vec<HeartRateSample>,
}

impl RawWorkoutData {
    /// Workout duration in seconds
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 1000.0
    }
}
