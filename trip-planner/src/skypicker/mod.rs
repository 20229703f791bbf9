//! Skypicker (Kiwi.com) flight API client.
//!
//! One API serves both halves of the air search:
//! - `locations` finds airports inside a latitude/longitude box
//! - `flights` prices itineraries between two airports for a date window
//!
//! Flight durations arrive as `"..h ..m"` strings and are converted to
//! seconds on the way into the domain.

mod client;
mod convert;
mod types;

pub use client::{DEFAULT_BASE_URL, SkypickerClient, SkypickerConfig};
pub use convert::{convert_flights, convert_locations};
pub use types::{FlightDto, FlightsResponse, LatLon, LocationDto, LocationsResponse};
