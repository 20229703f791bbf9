//! Skypicker (Kiwi.com) API response DTOs.
//!
//! These types map directly to the JSON the API returns. Top-level
//! collections are `Option` so that a response missing them can be
//! reported as malformed instead of failing inside serde with no context.

use serde::Deserialize;

/// Response from the `locations` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsResponse {
    pub locations: Option<Vec<LocationDto>>,
}

/// A location search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    /// IATA code for airports.
    pub code: Option<String>,

    /// Human-readable name.
    pub name: Option<String>,

    pub location: Option<LatLon>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Response from the `flights` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightsResponse {
    pub data: Option<Vec<FlightDto>>,
}

/// A bookable itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightDto {
    /// Itinerary id; segment ids joined by `|` for connections.
    pub id: String,

    /// Total price in the request currency.
    pub price: f64,

    /// Total time in the air plus layovers, e.g. `"1h 25m"`.
    pub fly_duration: String,

    /// Carrier codes, in segment order.
    #[serde(default)]
    pub airlines: Vec<String>,

    /// Per-segment route records. Not interpreted.
    #[serde(default)]
    pub routes: Vec<serde_json::Value>,
}
