//! Ground legs between two points.

use serde::Serialize;

/// Road distance and travel time between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TravelLeg {
    pub distance_meters: u32,
    pub duration_secs: u32,
}

impl TravelLeg {
    pub fn new(distance_meters: u32, duration_secs: u32) -> Self {
        Self {
            distance_meters,
            duration_secs,
        }
    }
}

/// Render a distance as whole kilometers, e.g. `"612 km"`.
pub fn format_distance(meters: u32) -> String {
    format!("{} km", meters / 1000)
}
