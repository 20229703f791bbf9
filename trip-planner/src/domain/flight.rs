//! Flight search results.

use std::fmt;

use serde::Serialize;

/// Separator between segment ids of a connecting itinerary.
pub const SEGMENT_DELIMITER: char = '|';

/// Identifier of a bookable itinerary.
///
/// Connecting itineraries carry one id per segment, joined with `|`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FlightId(String);

impl FlightId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids of the individual segments, in travel order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_DELIMITER)
    }

    /// Whether the itinerary has more than one segment.
    pub fn is_connecting(&self) -> bool {
        self.0.contains(SEGMENT_DELIMITER)
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A priced itinerary between two airports.
///
/// `flight_duration_secs` already includes layovers for connecting
/// itineraries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOption {
    pub id: FlightId,
    pub price: f64,
    pub flight_duration_secs: u32,
    pub airlines: Vec<String>,
    /// Provider route records, passed through untouched.
    pub routes: Vec<serde_json::Value>,
}
