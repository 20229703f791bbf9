//! Road distances and drive times from the Google Maps Distance Matrix.
//!
//! A single request covers every origin/destination combination; the
//! answer is decoded into a [`DistanceTable`] keyed by labelled waypoints.

mod client;
mod provider;
mod table;
mod types;

pub use client::{DEFAULT_BASE_URL, GoogleMapsClient, GoogleMapsConfig};
pub use provider::GeoDistanceProvider;
pub use table::{DistanceTable, GroupedLegs, Grouping, Waypoint};
pub use types::{DistanceMatrixResponse, MatrixElement, MatrixRow, Measure};
