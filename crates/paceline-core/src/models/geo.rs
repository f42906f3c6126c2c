// ABOUTME: Geographic coordinate and 3-D point primitives
// ABOUTME: Great-circle distance and spherical-to-Cartesian projection over a spherical Earth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Paceline

use crate::constants::geo::EARTH_RADIUS_METERS;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate from degree components
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within the valid geographic range
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Great-circle distance to `other` in meters
    ///
    /// Haversine formula over a spherical Earth of radius
    /// [`EARTH_RADIUS_METERS`].
    #[must_use]
    pub fn great_circle_distance(&self, other: &Self) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }

    /// Project onto a sphere of the given radius, producing Cartesian
    /// coordinates centered on the Earth's center
    #[must_use]
    pub fn globe_point(&self, radius: f64) -> Point3 {
        let phi = self.latitude.to_radians();
        let lambda = self.longitude.to_radians();
        Point3 {
            x: radius * phi.cos() * lambda.cos(),
            y: radius * phi.cos() * lambda.sin(),
            z: radius * phi.sin(),
        }
    }
}

/// A point in 3-dimensional space, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Point3 {
    /// Create a point from components
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx.hypot(dy).hypot(dz)
    }
}
