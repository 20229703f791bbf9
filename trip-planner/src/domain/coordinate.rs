//! Geographic coordinates and search boxes.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::Coordinate;
///
/// let hayward = Coordinate::new(37.6738, -122.0795).unwrap();
/// assert_eq!(hayward.to_string(), "37.6738,-122.0795");
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate("latitude must be within ±90"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate(
                "longitude must be within ±180",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Formats as `lat,lon`, the form every provider accepts in query strings.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A rectangular latitude/longitude region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub low_lat: f64,
    pub high_lat: f64,
    pub low_lon: f64,
    pub high_lon: f64,
}

impl BoundingBox {
    /// Box extending `half_size_deg` degrees either side of `center`.
    ///
    /// The box is measured in degrees, not meters, so it narrows in
    /// ground distance as latitude grows. Edges are not clamped.
    pub fn around(center: Coordinate, half_size_deg: f64) -> Self {
        Self {
            low_lat: center.latitude - half_size_deg,
            high_lat: center.latitude + half_size_deg,
            low_lon: center.longitude - half_size_deg,
            high_lon: center.longitude + half_size_deg,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.low_lat..=self.high_lat).contains(&point.latitude)
            && (self.low_lon..=self.high_lon).contains(&point.longitude)
    }
}
